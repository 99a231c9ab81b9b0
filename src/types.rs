// src/types.rs
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use trust_dns_resolver::proto::rr::RecordType;

#[derive(Debug, Clone)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub crtsh: CrtShConfig,
    pub record_kinds: Vec<RecordKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            crtsh: CrtShConfig::default(),
            record_kinds: RecordKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Per-query timeout handed to the resolver.
    pub timeout: Duration,
    /// Upper bound on the whole lookup of a single record type.
    pub lifetime: Duration,
    pub attempts: usize,
    /// Explicit `ip:port` nameservers. Empty means use the system configuration.
    pub nameservers: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            lifetime: Duration::from_secs(5),
            attempts: 2,
            nameservers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrtShConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl Default for CrtShConfig {
    fn default() -> Self {
        Self {
            base_url: "https://crt.sh".to_string(),
            timeout: Duration::from_secs(10),
            // crt.sh turns away reqwest's default agent
            user_agent: "curl/7.64".to_string(),
            proxy: None,
        }
    }
}

/// DNS record types queried for the target, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Txt,
    Soa,
    Srv,
    Naptr,
    Ptr,
    Cert,
    Tlsa,
    Ds,
    Dnskey,
    Rrsig,
    Smimea,
    Spf,
    Any,
}

impl RecordKind {
    pub const ALL: [RecordKind; 18] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Cname,
        RecordKind::Mx,
        RecordKind::Ns,
        RecordKind::Txt,
        RecordKind::Soa,
        RecordKind::Srv,
        RecordKind::Naptr,
        RecordKind::Ptr,
        RecordKind::Cert,
        RecordKind::Tlsa,
        RecordKind::Ds,
        RecordKind::Dnskey,
        RecordKind::Rrsig,
        RecordKind::Smimea,
        RecordKind::Spf,
        RecordKind::Any,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Cname => "CNAME",
            RecordKind::Mx => "MX",
            RecordKind::Ns => "NS",
            RecordKind::Txt => "TXT",
            RecordKind::Soa => "SOA",
            RecordKind::Srv => "SRV",
            RecordKind::Naptr => "NAPTR",
            RecordKind::Ptr => "PTR",
            RecordKind::Cert => "CERT",
            RecordKind::Tlsa => "TLSA",
            RecordKind::Ds => "DS",
            RecordKind::Dnskey => "DNSKEY",
            RecordKind::Rrsig => "RRSIG",
            RecordKind::Smimea => "SMIMEA",
            RecordKind::Spf => "SPF",
            RecordKind::Any => "ANY",
        }
    }

    /// IANA resource record type code.
    pub fn code(&self) -> u16 {
        match self {
            RecordKind::A => 1,
            RecordKind::Aaaa => 28,
            RecordKind::Cname => 5,
            RecordKind::Mx => 15,
            RecordKind::Ns => 2,
            RecordKind::Txt => 16,
            RecordKind::Soa => 6,
            RecordKind::Srv => 33,
            RecordKind::Naptr => 35,
            RecordKind::Ptr => 12,
            RecordKind::Cert => 37,
            RecordKind::Tlsa => 52,
            RecordKind::Ds => 43,
            RecordKind::Dnskey => 48,
            RecordKind::Rrsig => 46,
            RecordKind::Smimea => 53,
            RecordKind::Spf => 99,
            RecordKind::Any => 255,
        }
    }

    /// Wire type for the resolver. Types trust-dns has no variant for
    /// (CERT, SMIMEA, SPF) come back as `RecordType::Unknown(code)`.
    pub fn record_type(&self) -> RecordType {
        RecordType::from(self.code())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = HostscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RecordKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HostscopeError::ConfigError(format!("Unknown record type: {}", wanted)))
    }
}

/// What a single record-type query produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Values(Vec<String>),
    /// No answer, NXDOMAIN, or no usable nameserver.
    Empty,
    Timeout,
    Failed(String),
}

impl RecordOutcome {
    pub fn from_values(values: Vec<String>) -> Self {
        if values.is_empty() {
            RecordOutcome::Empty
        } else {
            RecordOutcome::Values(values)
        }
    }

    /// Lines to print under the record header; empty means "(none)".
    pub fn display_lines(&self, kind: RecordKind) -> Vec<String> {
        match self {
            RecordOutcome::Values(values) => values.clone(),
            RecordOutcome::Empty => Vec::new(),
            RecordOutcome::Timeout => vec![format!("<timeout querying {}>", kind)],
            RecordOutcome::Failed(message) => vec![format!("<error: {}>", message)],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanStats {
    pub domain: String,
    pub record_kinds_queried: usize,
    pub hostnames: BTreeSet<String>,
    pub tabs_opened: usize,
    pub duration: Duration,
}

#[derive(Debug, Error)]
pub enum HostscopeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source error in {source_name}: {message}")]
    SourceError {
        source_name: String,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Resolution error: {0}")]
    ResolutionError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kinds_in_report_order() {
        let names: Vec<&str> = RecordKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec![
                "A", "AAAA", "CNAME", "MX", "NS", "TXT", "SOA", "SRV", "NAPTR", "PTR", "CERT",
                "TLSA", "DS", "DNSKEY", "RRSIG", "SMIMEA", "SPF", "ANY"
            ]
        );
    }

    #[test]
    fn test_record_kind_from_str() {
        assert_eq!("mx".parse::<RecordKind>().unwrap(), RecordKind::Mx);
        assert_eq!(" DNSKEY ".parse::<RecordKind>().unwrap(), RecordKind::Dnskey);
        assert!("CAA".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_record_type_mapping() {
        assert_eq!(RecordKind::A.record_type(), RecordType::A);
        assert_eq!(RecordKind::Txt.record_type(), RecordType::TXT);
        assert_eq!(RecordKind::Any.record_type(), RecordType::ANY);
        assert_eq!(u16::from(RecordKind::Spf.record_type()), 99);
        assert_eq!(u16::from(RecordKind::Smimea.record_type()), 53);
    }

    #[test]
    fn test_outcome_display_lines() {
        assert!(RecordOutcome::from_values(Vec::new()).display_lines(RecordKind::A).is_empty());
        assert_eq!(
            RecordOutcome::Timeout.display_lines(RecordKind::Mx),
            vec!["<timeout querying MX>".to_string()]
        );
        assert_eq!(
            RecordOutcome::Failed("refused".to_string()).display_lines(RecordKind::Ns),
            vec!["<error: refused>".to_string()]
        );
        assert_eq!(
            RecordOutcome::from_values(vec!["1.2.3.4".to_string()]).display_lines(RecordKind::A),
            vec!["1.2.3.4".to_string()]
        );
    }
}
