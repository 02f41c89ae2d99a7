//! Snapshot of a browser location

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, VersioningError};

/// The parts of `window.location` the resolver reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub href: String,
    pub origin: String,
    /// Scheme with trailing colon, e.g. `https:`
    pub protocol: String,
    pub hostname: String,
    /// Empty when the scheme's default port is used
    pub port: String,
    pub pathname: String,
}

impl Location {
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href).map_err(|source| VersioningError::InvalidUrl {
            url: href.to_string(),
            source,
        })?;
        Ok(Self {
            href: url.as_str().to_string(),
            origin: url.origin().ascii_serialization(),
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port().map(|p| p.to_string()).unwrap_or_default(),
            pathname: url.path().to_string(),
        })
    }

    /// `protocol//hostname[:port]`
    pub fn base(&self) -> String {
        if self.port.is_empty() {
            format!("{}//{}", self.protocol, self.hostname)
        } else {
            format!("{}//{}:{}", self.protocol, self.hostname, self.port)
        }
    }
}
