use miette::Diagnostic;
use thiserror::Error;

/// Main error type for swatch operations.
///
/// Resolution itself never fails with an error: an unknown name or an absent
/// operand is reported as `None`. These variants cover the surfaces around the
/// engine (expression text, manifests, coverage checks).
#[derive(Error, Diagnostic, Debug)]
pub enum SwatchError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(swatch::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(swatch::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(swatch::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Encode error: {message}")]
    #[diagnostic(code(swatch::encode))]
    Encode { message: String },

    #[error("Coverage error: {message}")]
    #[diagnostic(code(swatch::coverage))]
    Coverage {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, SwatchError>;
