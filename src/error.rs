//! Error type shared by every module

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum VersioningError {
    #[error("entity identity is incomplete, missing {0}")]
    IncompleteEntity(&'static str),

    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} returned status {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },

    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("credentials unavailable: {0}")]
    Credentials(String),

    #[error("entity metadata unavailable after {attempts} attempts: {last}")]
    EntityMetadataUnavailable {
        attempts: u32,
        last: Box<VersioningError>,
    },

    #[error("version `{0}` is not published for this entity")]
    UnknownVersion(String),

    #[error("no documentation page has been resolved yet")]
    NoActiveView,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("browser api unavailable: {0}")]
    Browser(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VersioningError>;

impl From<VersioningError> for JsValue {
    fn from(err: VersioningError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
