use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum IndexError {
    /// No recorded period covers or precedes the requested date
    NotAvailable(String),
    /// A record is unusable (malformed period, non-positive value)
    InvalidRecord(String),
    /// Reading or parsing an index source failed
    LoadError(String),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IndexError::NotAvailable(msg) => write!(f, "Index value not available: {}", msg),
            IndexError::InvalidRecord(msg) => write!(f, "Invalid index record: {}", msg),
            IndexError::LoadError(msg) => write!(f, "Load error: {}", msg),
        }
    }
}

impl Error for IndexError {}
