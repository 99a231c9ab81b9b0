// src/resolver.rs
use crate::types::{HostscopeError, RecordKind, RecordOutcome, ResolverConfig};
use async_trait::async_trait;
use log::debug;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use trust_dns_resolver::config::{NameServerConfig, Protocol, ResolverConfig as DnsResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::error::{ProtoError, ProtoErrorKind};
use trust_dns_resolver::proto::rr::{Name, RecordType};
use trust_dns_resolver::TokioAsyncResolver;

/// Answers "which records of this type does this name have".
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn query(&self, domain: &str, kind: RecordKind) -> RecordOutcome;
}

pub struct DnsResolver {
    resolver: TokioAsyncResolver,
    lifetime: Duration,
}

impl DnsResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self, HostscopeError> {
        let (resolver_config, mut opts) = if config.nameservers.is_empty() {
            trust_dns_resolver::system_conf::read_system_conf()
                .map_err(|e| HostscopeError::ResolutionError(format!("Failed to read system resolver configuration: {}", e)))?
        } else {
            let mut resolver_config = DnsResolverConfig::new();

            for ns in &config.nameservers {
                let socket_addr = SocketAddr::from_str(ns)
                    .map_err(|e| HostscopeError::ConfigError(format!("Invalid nameserver address {}: {}", ns, e)))?;
                resolver_config.add_name_server(NameServerConfig {
                    socket_addr,
                    protocol: Protocol::Udp,
                    tls_dns_name: None,
                    trust_negative_responses: false,
                    bind_addr: None,
                });
            }

            (resolver_config, ResolverOpts::default())
        };

        opts.timeout = config.timeout;
        opts.attempts = config.attempts;
        // Every record type is asked exactly once per run.
        opts.cache_size = 0;

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
            lifetime: config.lifetime,
        })
    }
}

#[async_trait]
impl RecordLookup for DnsResolver {
    async fn query(&self, domain: &str, kind: RecordKind) -> RecordOutcome {
        let record_type = kind.record_type();
        let name = match absolute_name(domain) {
            Ok(name) => name,
            Err(e) => return RecordOutcome::Failed(e.to_string()),
        };

        match tokio::time::timeout(self.lifetime, self.resolver.lookup(name, record_type)).await {
            Err(_) => RecordOutcome::Timeout,
            Ok(Ok(lookup)) => {
                let values = lookup
                    .record_iter()
                    .filter(|record| record_type == RecordType::ANY || record.record_type() == record_type)
                    .filter_map(|record| record.data())
                    .map(|rdata| rdata.to_string())
                    .collect();
                RecordOutcome::from_values(values)
            }
            Ok(Err(e)) => {
                debug!("{} lookup for {} failed: {}", kind, domain, e);
                classify_error(&e)
            }
        }
    }
}

/// Parse `domain` as a fully qualified name so the resolver never walks the
/// search list and answers only for the name that was asked about.
pub fn absolute_name(domain: &str) -> Result<Name, ProtoError> {
    let mut name = Name::from_str(domain)?;
    name.set_fqdn(true);
    Ok(name)
}

/// Map a resolver error onto the outcome shown to the user.
pub fn classify_error(error: &ResolveError) -> RecordOutcome {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } | ResolveErrorKind::NoConnections => RecordOutcome::Empty,
        ResolveErrorKind::Timeout => RecordOutcome::Timeout,
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => RecordOutcome::Timeout,
        _ => RecordOutcome::Failed(error.to_string()),
    }
}

/// Query every kind in order, one at a time, handing each outcome to
/// `on_result` before the next query goes out.
pub async fn query_records<F>(
    lookup: &dyn RecordLookup,
    domain: &str,
    kinds: &[RecordKind],
    mut on_result: F,
) -> Result<usize, HostscopeError>
where
    F: FnMut(RecordKind, &RecordOutcome) -> Result<(), HostscopeError>,
{
    for kind in kinds {
        let outcome = lookup.query(domain, *kind).await;
        on_result(*kind, &outcome)?;
    }
    Ok(kinds.len())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned answers keyed by record kind; anything unlisted is `Empty`.
    #[derive(Default)]
    pub(crate) struct FakeLookup {
        pub answers: HashMap<RecordKind, RecordOutcome>,
        pub calls: Mutex<Vec<(String, RecordKind)>>,
    }

    impl FakeLookup {
        pub fn with(mut self, kind: RecordKind, outcome: RecordOutcome) -> Self {
            self.answers.insert(kind, outcome);
            self
        }
    }

    #[async_trait]
    impl RecordLookup for FakeLookup {
        async fn query(&self, domain: &str, kind: RecordKind) -> RecordOutcome {
            self.calls.lock().unwrap().push((domain.to_string(), kind));
            self.answers.get(&kind).cloned().unwrap_or(RecordOutcome::Empty)
        }
    }

    #[test]
    fn test_classify_error() {
        let timeout = ResolveError::from(ResolveErrorKind::Timeout);
        assert_eq!(classify_error(&timeout), RecordOutcome::Timeout);

        let no_ns = ResolveError::from(ResolveErrorKind::NoConnections);
        assert_eq!(classify_error(&no_ns), RecordOutcome::Empty);

        let other = ResolveError::from(ResolveErrorKind::Message("connection refused"));
        assert_eq!(
            classify_error(&other),
            RecordOutcome::Failed("connection refused".to_string())
        );
    }

    #[test]
    fn test_classify_proto_timeout() {
        let proto = ProtoError::from(ProtoErrorKind::Timeout);
        let err = ResolveError::from(ResolveErrorKind::Proto(proto));
        assert_eq!(classify_error(&err), RecordOutcome::Timeout);
    }

    #[tokio::test]
    async fn test_query_records_asks_each_kind_once_in_order() {
        let lookup = FakeLookup::default()
            .with(RecordKind::A, RecordOutcome::Values(vec!["93.184.216.34".to_string()]))
            .with(RecordKind::Mx, RecordOutcome::Timeout);

        let mut seen = Vec::new();
        let count = query_records(&lookup, "example.com", &RecordKind::ALL, |kind, outcome| {
            seen.push((kind, outcome.clone()));
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(count, 18);
        let kinds: Vec<RecordKind> = seen.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, RecordKind::ALL.to_vec());
        assert_eq!(seen[0].1, RecordOutcome::Values(vec!["93.184.216.34".to_string()]));
        assert_eq!(seen[3].1, RecordOutcome::Timeout);
        assert_eq!(seen[1].1, RecordOutcome::Empty);

        let calls = lookup.calls.lock().unwrap();
        assert_eq!(calls.len(), 18);
        assert!(calls.iter().all(|(domain, _)| domain == "example.com"));
    }

    #[tokio::test]
    async fn test_query_records_stops_on_callback_error() {
        let lookup = FakeLookup::default();
        let result = query_records(&lookup, "example.com", &RecordKind::ALL, |kind, _| {
            if kind == RecordKind::Cname {
                Err(HostscopeError::OutputError("broken pipe".to_string()))
            } else {
                Ok(())
            }
        })
        .await;

        assert!(matches!(result, Err(HostscopeError::OutputError(_))));
        assert_eq!(lookup.calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_absolute_name() {
        let name = absolute_name("example.com").unwrap();
        assert!(name.is_fqdn());
        assert_eq!(name.to_string(), "example.com.");

        let name = absolute_name("www.example.com.").unwrap();
        assert!(name.is_fqdn());
        assert_eq!(name.to_string(), "www.example.com.");

        assert!(absolute_name(&format!("{}.com", "a".repeat(64))).is_err());
    }

    fn single_server(addr: SocketAddr, lifetime: Duration) -> ResolverConfig {
        ResolverConfig {
            timeout: Duration::from_secs(5),
            lifetime,
            attempts: 1,
            nameservers: vec![addr.to_string()],
        }
    }

    #[tokio::test]
    async fn test_silent_nameserver_times_out_within_lifetime() {
        // Bound but never answered
        let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        let resolver = DnsResolver::new(&single_server(addr, Duration::from_millis(300))).unwrap();

        assert_eq!(resolver.query("example.com", RecordKind::A).await, RecordOutcome::Timeout);
        assert_eq!(resolver.query("example.com", RecordKind::Cert).await, RecordOutcome::Timeout);
        drop(socket);
    }

    #[tokio::test]
    async fn test_answers_are_limited_to_the_queried_type() {
        use trust_dns_resolver::proto::op::{Message, MessageType};
        use trust_dns_resolver::proto::rr::rdata::{A, CNAME};
        use trust_dns_resolver::proto::rr::{RData, Record};

        let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        // Answers every query with a CNAME hop followed by an A record.
        let server = tokio::spawn(async move {
            let mut buf = [0u8; 512];
            loop {
                let (len, peer) = socket.recv_from(&mut buf).await.unwrap();
                let request = Message::from_vec(&buf[..len]).unwrap();
                let owner = request.queries()[0].name().clone();
                let target = Name::from_str("edge.example.net.").unwrap();

                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(request.op_code())
                    .set_recursion_desired(true)
                    .set_recursion_available(true)
                    .add_queries(request.queries().to_vec());
                response.add_answer(Record::from_rdata(owner, 300, RData::CNAME(CNAME(target.clone()))));
                response.add_answer(Record::from_rdata(target, 300, RData::A(A::new(192, 0, 2, 10))));

                socket.send_to(&response.to_vec().unwrap(), peer).await.unwrap();
            }
        });

        let resolver = DnsResolver::new(&single_server(addr, Duration::from_secs(5))).unwrap();
        let outcome = resolver.query("example.com", RecordKind::A).await;
        server.abort();

        assert_eq!(outcome, RecordOutcome::Values(vec!["192.0.2.10".to_string()]));
    }

    #[test]
    fn test_explicit_nameservers_are_validated() {
        let config = ResolverConfig {
            nameservers: vec!["nonsense".to_string()],
            ..ResolverConfig::default()
        };
        assert!(matches!(DnsResolver::new(&config), Err(HostscopeError::ConfigError(_))));
    }
}
