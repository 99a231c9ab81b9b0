// src/sources/crtsh.rs
use crate::session::Session;
use crate::sources::Source;
use crate::types::HostscopeError;
use crate::utils::{belongs_to_domain, normalize_name, split_lines};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
struct CrtShEntry {
    // absent means no names; null or a non-string is malformed
    #[serde(default)]
    name_value: String,
}

/// CRT.sh certificate transparency logs source
#[derive(Debug, Clone)]
pub struct CrtShSource {
    name: String,
    base_url: String,
}

impl Default for CrtShSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CrtShSource {
    pub fn new() -> Self {
        Self::with_base_url("https://crt.sh")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            name: "crtsh".to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Wildcard subject query for everything under `domain`.
    pub fn query_url(&self, domain: &str) -> String {
        let pattern = format!("%.{}", domain);
        format!("{}/?q={}&output=json", self.base_url, urlencoding::encode(&pattern))
    }
}

#[async_trait]
impl Source for CrtShSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enumerate(&self, domain: &str, session: &Session) -> Result<BTreeSet<String>, HostscopeError> {
        let url = self.query_url(domain);
        debug!("{}: GET {}", self.name, url);

        let body = session.get_bytes(&url).await.map_err(|e| HostscopeError::SourceError {
            source_name: self.name.clone(),
            message: format!("HTTP request failed: {}", e),
        })?;

        if body.is_empty() {
            return Ok(BTreeSet::new());
        }

        let text = std::str::from_utf8(&body)
            .map_err(|e| HostscopeError::ParseError(format!("Response is not UTF-8: {}", e)))?;

        let entries: Vec<serde_json::Value> = serde_json::from_str(text).map_err(|e| HostscopeError::SourceError {
            source_name: self.name.clone(),
            message: format!("Failed to parse JSON: {}", e),
        })?;

        Ok(collect_names(domain, entries))
    }
}

/// Pull the hostnames under `domain` out of crt.sh entries.
///
/// A malformed entry ends the scan; names gathered before it are kept.
fn collect_names(domain: &str, entries: Vec<serde_json::Value>) -> BTreeSet<String> {
    let mut found = BTreeSet::new();

    for entry in entries {
        let entry: CrtShEntry = match serde_json::from_value(entry) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("crtsh: stopping at malformed entry: {}", e);
                break;
            }
        };

        // name_value can hold several names separated by line breaks
        for line in split_lines(&entry.name_value) {
            let name = normalize_name(line);
            if !name.is_empty() && belongs_to_domain(name, domain) {
                found.insert(name.to_string());
            }
        }
    }

    found
}
