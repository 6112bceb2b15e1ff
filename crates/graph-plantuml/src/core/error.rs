//! Error types for the generator boundary
//!
//! Formatting and script assembly never fail. Only running the external
//! rendering command and reversing the transport encoding can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised around script generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Command did not produce output file {path}")]
    MissingOutput { path: PathBuf },

    #[error("Empty command template")]
    EmptyCommand,

    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl GeneratorError {
    /// Create a new command failure
    pub fn command_failed(command: String, status: String, stderr: String) -> Self {
        Self::CommandFailed {
            command,
            status,
            stderr,
        }
    }

    /// Create a new decode error
    pub fn decode_error(message: String) -> Self {
        Self::Decode { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed() {
        let error = GeneratorError::command_failed(
            "java -jar plantuml.jar".to_string(),
            "exit status: 1".to_string(),
            "Syntax Error?".to_string(),
        );
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("java -jar plantuml.jar"));
        assert!(error_msg.contains("exit status: 1"));
        assert!(error_msg.contains("Syntax Error?"));
    }

    #[test]
    fn test_missing_output() {
        let error = GeneratorError::MissingOutput {
            path: PathBuf::from("/tmp/out.png"),
        };
        assert!(format!("{}", error).contains("/tmp/out.png"));
    }

    #[test]
    fn test_decode_error() {
        let error = GeneratorError::decode_error("invalid symbol".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Decode error"));
        assert!(error_msg.contains("invalid symbol"));
        assert!(matches!(error, GeneratorError::Decode { .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "java not found");
        let error: GeneratorError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("java not found"));
        assert!(matches!(error, GeneratorError::Io { .. }));
    }
}
