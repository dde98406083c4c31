mod simulated_transport;

pub use simulated_transport::{SimulatedTransport, DEFAULT_FAILURE_RATE, DEFAULT_TICK_INTERVAL};
