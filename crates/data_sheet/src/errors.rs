use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read data sheet \"{}\" ({source})", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse data sheet ({0})")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
