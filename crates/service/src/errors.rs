use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(id: u64) -> Self { Self::NotFound(format!("Post with id {} not found", id)) }

    pub fn invalid(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let e = ServiceError::not_found(42);
        assert_eq!(e.to_string(), "Post with id 42 not found");
        assert_eq!(e.code(), 1003);
    }
}
