//! Common error types used throughout waypoint.
//!
//! One enum covers the failure taxonomy of the whole store: missing
//! resources, corrupt documents and images, archive entries escaping the
//! root, database failures, and plain I/O errors.

/// Common error type for waypoint.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested resource or file was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A stored document or image could not be decoded.
    #[error("Corrupt data: {0}")]
    Corrupt(String),

    /// An archive entry tried to resolve outside the storage root.
    #[error("Path violation: {0}")]
    PathViolation(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Corrupt error.
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Self::Corrupt(msg.into())
    }

    /// Create a new PathViolation error.
    pub fn path_violation<S: Into<String>>(msg: S) -> Self {
        Self::PathViolation(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("cities.geojson");
        assert_eq!(err.to_string(), "Not found: cities.geojson");

        let err = Error::corrupt("bad JSON");
        assert_eq!(err.to_string(), "Corrupt data: bad JSON");

        let err = Error::path_violation("../../etc/passwd");
        assert_eq!(err.to_string(), "Path violation: ../../etc/passwd");

        let err = Error::database("no such table");
        assert_eq!(err.to_string(), "Database error: no such table");

        let err = Error::invalid_input("degrees must be a multiple of 90");
        assert_eq!(
            err.to_string(),
            "Invalid input: degrees must be a multiple of 90"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(Error::not_found("x"), Error::NotFound(_)));
        assert!(matches!(Error::corrupt("x"), Error::Corrupt(_)));
        assert!(matches!(Error::path_violation("x"), Error::PathViolation(_)));
        assert!(matches!(Error::database("x"), Error::Database(_)));
        assert!(matches!(Error::invalid_input("x"), Error::InvalidInput(_)));
    }

    #[test]
    fn test_result_type() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(ok_fn().unwrap(), 42);

        fn err_fn() -> Result<i32> {
            Err(Error::not_found("missing"))
        }
        assert!(err_fn().is_err());
    }
}
