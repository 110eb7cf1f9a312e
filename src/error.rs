use crate::config::ConfigError;
use crate::http::ServerError;

/// Anything that stops the service from coming up or keeps it from serving.
///
/// Request handlers never fail; every variant here is fatal and ends the process
/// with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_errors_keep_their_message() {
        let err: AppError = ConfigError::InvalidPort("abc".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Invalid PORT value: \"abc\"");
    }

    #[test]
    fn server_errors_are_transparent() {
        let bind = io::Error::new(io::ErrorKind::AddrInUse, "address in use");
        let err: AppError = ServerError::Bind {
            addr: "0.0.0.0:3000".parse().unwrap(),
            source: bind,
        }
        .into();
        assert_eq!(err.to_string(), "Failed to bind 0.0.0.0:3000: address in use");
    }
}
