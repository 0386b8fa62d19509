use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog YAML error in {file}: {source}")]
    Yaml {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid satellite in {file}: {message}")]
    InvalidEntry { file: String, message: String },
    #[error("satellite already exists: {0}")]
    DuplicateName(String),
    #[error("satellite not found: {0}")]
    NotFound(String),
    #[error("built-in satellite cannot be removed: {0}")]
    BuiltinReadOnly(String),
}
