use std::fmt;

#[derive(Debug)]
pub enum OWMError {
    MissingCredential,
    Status { endpoint: &'static str, status: u16 },
    Request(String),
    Document(String),
}

impl fmt::Display for OWMError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OWMError::MissingCredential => write!(f, "API key is required"),
            OWMError::Status { endpoint, status } => write!(f, "{} error: {}", endpoint, status),
            OWMError::Request(e) => write!(f, "OWMError::Request: {}", e),
            OWMError::Document(e) => write!(f, "OWMError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for OWMError {
    fn from(e: reqwest::Error) -> Self {
        OWMError::Request(e.to_string())
    }
}
impl From<serde_json::Error> for OWMError {
    fn from(e: serde_json::Error) -> Self {
        OWMError::Document(e.to_string())
    }
}
