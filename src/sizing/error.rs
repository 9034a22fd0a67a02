use thiserror::Error;

/// Errors raised around a sizing call
///
/// Everything else (currents beyond every table entry, no conductor meeting
/// both constraints) degrades to a best-effort result instead of failing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// Input rejected before any computation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A circuit with the same name (case-insensitive) is already stored
    #[error("a circuit named \"{0}\" already exists")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SizingError::InvalidInput("run_length_m must be positive".to_string());
        assert_eq!(error.to_string(), "invalid input: run_length_m must be positive");

        let error = SizingError::DuplicateName("QD-Bloco A".to_string());
        assert_eq!(error.to_string(), "a circuit named \"QD-Bloco A\" already exists");
    }
}
