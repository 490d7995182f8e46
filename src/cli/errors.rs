use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid size parameter: {size}. Must be WIDTHxHEIGHT, e.g. 1350x1800")]
    InvalidSize { size: String },

    #[error("Invalid DPI parameter: {dpi}. Must be X,Y, e.g. 300,300")]
    InvalidDpi { dpi: String },

    #[error("Confidence must be between 0 and 1, got: {value}")]
    InvalidConfidence { value: f32 },

    #[error("Cut percentage must be strictly between 0 and 100, got: {value}")]
    InvalidCutPercentage { value: f64 },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lib(#[from] batchcut::Error),
}
