use std::error::Error as StdError;

use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Failed to connect: {}", error_chain(.0))]
    Connect(#[source] BoxError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("write was not acknowledged")]
    Unacknowledged,

    #[error("remote error: {0}")]
    Remote(String),
}

// Transport errors tend to say little at the top level; the cause is in the chain.
fn error_chain(err: &BoxError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("tcp connect error")]
    struct TcpConnectError(#[source] std::io::Error);

    #[derive(Debug, Error)]
    #[error("transport error")]
    struct TransportError(#[source] TcpConnectError);

    fn refused() -> TransportError {
        TransportError(TcpConnectError(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        )))
    }

    #[test]
    fn test_connect_error_shows_cause() {
        let err = HarnessError::Connect(Box::new(refused()));

        assert_eq!(
            err.to_string(),
            "Failed to connect: transport error: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn test_connect_error_keeps_source() {
        let err = HarnessError::Connect(Box::new(refused()));

        let source = err.source().expect("connect error should have a source");
        assert_eq!(source.to_string(), "transport error");
        assert!(source.source().is_some());
    }

    #[test]
    fn test_plain_message_has_no_chain() {
        let err = HarnessError::Connect("connection refused".into());
        assert_eq!(err.to_string(), "Failed to connect: connection refused");
    }
}
