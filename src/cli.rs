use crate::types::RecordKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hostscope",
    version,
    long_version = env!("HOSTSCOPE_LONG_VERSION"),
    about = "DNS record dump and certificate transparency hostname lookup",
    long_about = "hostscope prints the common DNS records of a domain, then asks crt.sh which hostnames\nunder that domain appear in issued certificates and can open them in your browser."
)]
pub struct Args {
    /// Domain or URL to inspect (prompted for when omitted)
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Record types to query (comma-separated, default: all)
    #[arg(short = 't', long = "types", value_name = "TYPES", value_delimiter = ',')]
    pub types: Option<Vec<RecordKind>>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// crt.sh request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip the crt.sh lookup
    #[arg(long = "no-crtsh")]
    pub no_crtsh: bool,

    /// Never offer to open hostnames in the browser
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Do not print the banner
    #[arg(long = "silent")]
    pub silent: bool,

    /// Verbose mode (debug logging on stderr)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Check if the banner should be shown
    pub fn show_banner(&self) -> bool {
        !self.silent && atty::is(atty::Stream::Stdout)
    }
}
