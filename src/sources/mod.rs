// src/sources/mod.rs
use crate::session::Session;
use crate::types::HostscopeError;
use async_trait::async_trait;
use log::debug;
use std::collections::BTreeSet;

mod crtsh;

pub use crtsh::CrtShSource;

/// A passive source of hostnames under a domain.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;
    async fn enumerate(&self, domain: &str, session: &Session) -> Result<BTreeSet<String>, HostscopeError>;
}

/// Ask `source` for hostnames under `domain`. Never fails: any error is
/// logged and reported as no names, so an outage looks the same as an empty
/// result to the caller.
pub async fn query_crtsh(source: &dyn Source, domain: &str, session: &Session) -> BTreeSet<String> {
    match source.enumerate(domain, session).await {
        Ok(names) => {
            debug!("{}: {} names under {}", source.name(), names.len(), domain);
            names
        }
        Err(e) => {
            debug!("{}: lookup for {} failed: {}", source.name(), domain, e);
            BTreeSet::new()
        }
    }
}
