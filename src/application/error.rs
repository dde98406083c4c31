#[derive(Debug)]
pub enum ApplicationError {
    NotFound,
    BadRequest(String),
    Persistence(String),
    Internal(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::NotFound => write!(f, "Resource not found"),
            ApplicationError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            ApplicationError::Persistence(msg) => write!(f, "Persistence error: {msg}"),
            ApplicationError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}
