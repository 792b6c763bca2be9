use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown translatable element kind: {0}")]
    UnknownElementKind(String),

    #[error("Multilingual label has no text for default language \"{0}\"")]
    MissingDefaultLabel(String),

    #[error("Can't parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
