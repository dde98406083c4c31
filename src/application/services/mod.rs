pub mod upload_manager;
pub mod upload_transport;

pub use upload_transport::UploadTransport;
