use crate::cli::Args;
use crate::config;
use crate::launcher::{open_host_tabs, BrowserLauncher, SystemBrowser};
use crate::output::{OutputManager, DOMAIN_PROMPT, OPEN_PROMPT};
use crate::resolver::{query_records, DnsResolver, RecordLookup};
use crate::session::Session;
use crate::sources::{query_crtsh, CrtShSource, Source};
use crate::types::{Config, HostscopeError, RecordKind, ScanStats};
use crate::utils::{extract_domain, is_affirmative, read_line};
use log::info;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

pub struct HostscopeEngine {
    config: Config,
    session: Session,
    lookup: Box<dyn RecordLookup>,
    source: Box<dyn Source>,
    launcher: Box<dyn BrowserLauncher>,
    output: OutputManager,
    args: Args,
}

impl HostscopeEngine {
    pub fn new(args: Args) -> Result<Self, HostscopeError> {
        let mut config = config::load_config(args.config_path.as_deref())?;

        // Override config with command line arguments
        if let Some(types) = args.types.clone() {
            config.record_kinds = types;
        }
        if let Some(secs) = args.timeout {
            config.crtsh.timeout = Duration::from_secs(secs);
        }
        config::validate_config(&config)?;

        let lookup = Box::new(DnsResolver::new(&config.resolver)?);
        let source = Box::new(CrtShSource::with_base_url(&config.crtsh.base_url));

        Self::with_parts(args, config, lookup, source, Box::new(SystemBrowser))
    }

    pub fn with_parts(
        args: Args,
        config: Config,
        lookup: Box<dyn RecordLookup>,
        source: Box<dyn Source>,
        launcher: Box<dyn BrowserLauncher>,
    ) -> Result<Self, HostscopeError> {
        let session = Session::new(&config.crtsh)?;

        Ok(Self {
            config,
            session,
            lookup,
            source,
            launcher,
            output: OutputManager::new(),
            args,
        })
    }

    /// One interactive run. Returns `None` when no domain could be obtained.
    pub async fn run<R, W>(&self, input: &mut R, out: &mut W) -> Result<Option<ScanStats>, HostscopeError>
    where
        R: BufRead,
        W: Write,
    {
        let raw = match &self.args.domain {
            Some(domain) => domain.clone(),
            None => {
                self.output.write_prompt(out, DOMAIN_PROMPT)?;
                match read_line(input).map_err(|e| HostscopeError::OutputError(e.to_string()))? {
                    Some(line) => line,
                    None => return Ok(None),
                }
            }
        };

        let domain = extract_domain(&raw);
        if domain.is_empty() {
            self.output.write_no_domain(out)?;
            return Ok(None);
        }

        info!("Inspecting {}", domain);
        let start_time = Instant::now();

        let record_kinds_queried = self.print_records(&domain, out).await?;

        let mut hostnames = BTreeSet::new();
        let mut tabs_opened = 0;
        if !self.args.no_crtsh {
            self.output.write_crtsh_start(out)?;
            hostnames = query_crtsh(self.source.as_ref(), &domain, &self.session).await;
            self.output.write_hostnames(out, &hostnames)?;

            if !hostnames.is_empty() && !self.args.no_open {
                tabs_opened = self.offer_tabs(&hostnames, input, out)?;
            }
        }

        Ok(Some(ScanStats {
            domain,
            record_kinds_queried,
            hostnames,
            tabs_opened,
            duration: start_time.elapsed(),
        }))
    }

    async fn print_records<W: Write>(&self, domain: &str, out: &mut W) -> Result<usize, HostscopeError> {
        let output = self.output;
        output.write_records_header(out, domain)?;
        let kinds: &[RecordKind] = &self.config.record_kinds;
        let count = query_records(self.lookup.as_ref(), domain, kinds, |kind, outcome| {
            output.write_record(out, kind, outcome)
        })
        .await?;
        output.write_records_footer(out)?;
        Ok(count)
    }

    fn offer_tabs<R: BufRead, W: Write>(
        &self,
        hostnames: &BTreeSet<String>,
        input: &mut R,
        out: &mut W,
    ) -> Result<usize, HostscopeError> {
        self.output.write_prompt(out, OPEN_PROMPT)?;
        let answer = read_line(input)
            .map_err(|e| HostscopeError::OutputError(e.to_string()))?
            .unwrap_or_default();

        if is_affirmative(&answer) {
            let opened = open_host_tabs(self.launcher.as_ref(), hostnames);
            self.output.write_open_result(out, true)?;
            Ok(opened)
        } else {
            self.output.write_open_result(out, false)?;
            Ok(0)
        }
    }
}
