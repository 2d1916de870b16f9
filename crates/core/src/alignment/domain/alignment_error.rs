use thiserror::Error;

/// Generic alignment failure carrying a human-readable message.
///
/// Export, load, and timing checks all collapse into this one error; callers
/// get the message text and nothing more structured.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AlignmentError {
    message: String,
}

impl AlignmentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_message() {
        let err = AlignmentError::new("something broke");
        assert_eq!(err.to_string(), "something broke");
        assert_eq!(err.message(), "something broke");
    }
}
