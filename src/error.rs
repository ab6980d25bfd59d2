use thiserror::Error;

pub type Result<A> = std::result::Result<A, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Encountered io error: `{0}`")]
    IOError(std::io::Error),
    #[error("Failed to parse yaml: `{0}`")]
    SerdeError(serde_yml::Error),
    #[error("Error with templating: `{0}`")]
    JinjaError(minijinja::Error),
    #[error("Error watching files: `{0}`")]
    NotifyError(notify::Error),
    #[error("Invalid configuration: `{0}`")]
    ConfigError(Box<figment::Error>),
    #[error("Article `{id}` is missing the `{field}` field")]
    MissingField { id: String, field: &'static str },
    #[error("Field `{field}` must be a string or number, found `{value}`")]
    InvalidField { field: &'static str, value: String },
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<serde_yml::Error> for Error {
    fn from(value: serde_yml::Error) -> Self {
        Self::SerdeError(value)
    }
}
impl From<minijinja::Error> for Error {
    fn from(value: minijinja::Error) -> Self {
        Self::JinjaError(value)
    }
}
impl From<notify::Error> for Error {
    fn from(value: notify::Error) -> Self {
        Self::NotifyError(value)
    }
}
impl From<figment::Error> for Error {
    fn from(value: figment::Error) -> Self {
        Self::ConfigError(Box::new(value))
    }
}
