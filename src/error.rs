use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Content error: {0}")]
    Content(String),

    #[error("Preference storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("A message is already on its way")]
    SubmissionInFlight,

    #[error("Contact form is not mounted")]
    NotMounted,

    #[error("No async runtime to deliver on: {0}")]
    NoRuntime(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Unknown project: {0}")]
    UnknownProject(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
