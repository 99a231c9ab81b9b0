use anyhow::{anyhow, Result};
use clap::Parser;
use hostscope::{Args, HostscopeEngine, HostscopeError};
use log::{info, LevelFilter};
use std::io;
use std::process;

const BANNER: &str = r#"
  _               _
 | |__   ___  ___| |_ ___  ___ ___  _ __   ___
 | '_ \ / _ \/ __| __/ __|/ __/ _ \| '_ \ / _ \
 | | | | (_) \__ \ |_\__ \ (_| (_) | |_) |  __/
 |_| |_|\___/|___/\__|___/\___\___/| .__/ \___|
                                   |_|
      DNS records + certificate transparency
"#;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if args.show_banner() {
        println!("{}", BANNER);
    }

    let engine = match HostscopeEngine::new(args) {
        Ok(engine) => engine,
        Err(HostscopeError::ResolutionError(e)) => {
            println!("DNS resolution is unavailable: {}", e);
            println!("Check /etc/resolv.conf, or list nameservers under [resolver] in a --config file.");
            process::exit(1);
        }
        Err(e) => return Err(anyhow!(e)),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    if let Some(stats) = engine.run(&mut input, &mut out).await? {
        info!(
            "Finished {}: {} record types, {} crt.sh names, {} tabs opened in {:.2}s",
            stats.domain,
            stats.record_kinds_queried,
            stats.hostnames.len(),
            stats.tabs_opened,
            stats.duration.as_secs_f64()
        );
    }

    Ok(())
}
