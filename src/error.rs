use dao::BuildError;
use dom::DomPatchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("cannot load markup from {path}: {source}")]
    Markup {
        path: PathBuf,
        #[source]
        source: DomPatchError,
    },
    #[error("{0} contains no element to parse")]
    NoElement(PathBuf),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("cannot encode output: {0}")]
    Output(#[source] serde_json::Error),
}
