use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Registry unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Invalid catalog data: {0}")]
    CatalogInvalid(String),

    #[error("Component not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid configuration: {0}\n\n\
             Hint: Check your dashkit.toml against the expected layout.\n\n\
             Example structure:\n\
             [registry]\n\
             type = \"http\"\n\
             url = \"https://registry.dashkit.dev\"\n\n\
             [targets]\n\
             chart = \"src/components/charts\"\n\n\
             Try: dashkit init  (writes a fresh default config)")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}
