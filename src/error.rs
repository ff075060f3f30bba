use thiserror::Error;

/// Errors that terminate a transform invocation.
///
/// Every variant is terminal to the current flow: nothing is written to the
/// output stream, no retry is attempted, and no partial replacement is
/// produced.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no input selection provided")]
    NoInput,

    #[error("selection is empty")]
    EmptySelection,

    #[error("failed to discover transforms: {0}")]
    Discovery(String),

    #[error("no transform selected")]
    Cancelled,

    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    #[error("no transforms available")]
    NoTransforms,

    #[error("transform invocation failed: {0}")]
    Invocation(String),

    #[error("a transform invocation is already in progress")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
