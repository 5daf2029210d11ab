/// Core error type.
///
/// Adapter crates map their specific failures into this type when they cannot
/// be turned into a reply (startup, configuration, server binding).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_keep_context() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "i/o error: port taken");
        assert_eq!(
            Error::Config("TELEGRAM_TOKEN missing".to_string()).to_string(),
            "config error: TELEGRAM_TOKEN missing"
        );
    }
}
