use crate::types::{Config, HostscopeError};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const NAMESERVERS_ENV: &str = "HOSTSCOPE_NAMESERVERS";
pub const CRTSH_URL_ENV: &str = "HOSTSCOPE_CRTSH_URL";

pub fn load_config(config_path: Option<&Path>) -> Result<Config, HostscopeError> {
    let mut config = Config::default();

    if let Some(path) = config_path {
        let contents = fs::read_to_string(path).map_err(|e| {
            HostscopeError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        apply_toml(&mut config, &contents)?;
    }

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    validate_config(&config)?;

    Ok(config)
}

pub fn apply_toml(config: &mut Config, contents: &str) -> Result<(), HostscopeError> {
    let toml_config: toml::Value = toml::from_str(contents)
        .map_err(|e| HostscopeError::ConfigError(format!("Failed to parse config file: {}", e)))?;

    if let Some(resolver) = toml_config.get("resolver").and_then(|v| v.as_table()) {
        if let Some(secs) = read_secs(resolver, "resolver", "timeout_secs")? {
            config.resolver.timeout = secs;
        }
        if let Some(secs) = read_secs(resolver, "resolver", "lifetime_secs")? {
            config.resolver.lifetime = secs;
        }
        if let Some(attempts) = resolver.get("attempts") {
            let attempts = attempts
                .as_integer()
                .filter(|n| *n > 0)
                .ok_or_else(|| HostscopeError::ConfigError("resolver.attempts must be a positive integer".to_string()))?;
            config.resolver.attempts = attempts as usize;
        }
        if let Some(nameservers) = resolver.get("nameservers").and_then(|v| v.as_array()) {
            config.resolver.nameservers = nameservers
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
                .collect();
        }
    }

    if let Some(crtsh) = toml_config.get("crtsh").and_then(|v| v.as_table()) {
        if let Some(url) = crtsh.get("url").and_then(|v| v.as_str()) {
            config.crtsh.base_url = url.to_string();
        }
        if let Some(secs) = read_secs(crtsh, "crtsh", "timeout_secs")? {
            config.crtsh.timeout = secs;
        }
        if let Some(agent) = crtsh.get("user_agent").and_then(|v| v.as_str()) {
            config.crtsh.user_agent = agent.to_string();
        }
        if let Some(proxy) = crtsh.get("proxy").and_then(|v| v.as_str()) {
            config.crtsh.proxy = Some(proxy.to_string());
        }
    }

    Ok(())
}

fn read_secs(
    table: &toml::map::Map<String, toml::Value>,
    section: &str,
    key: &str,
) -> Result<Option<Duration>, HostscopeError> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .filter(|n| *n >= 0)
            .map(|n| Some(Duration::from_secs(n as u64)))
            .ok_or_else(|| {
                HostscopeError::ConfigError(format!("{}.{} must be a whole number of seconds", section, key))
            }),
    }
}

pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(servers) = lookup(NAMESERVERS_ENV) {
        config.resolver.nameservers = servers
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(url) = lookup(CRTSH_URL_ENV) {
        config.crtsh.base_url = url.trim().to_string();
    }
}

pub fn validate_config(config: &Config) -> Result<(), HostscopeError> {
    if config.resolver.timeout.is_zero() {
        return Err(HostscopeError::ConfigError("Resolver timeout must be greater than 0".to_string()));
    }
    if config.resolver.lifetime < config.resolver.timeout {
        return Err(HostscopeError::ConfigError(
            "Resolver lifetime must not be shorter than the per-query timeout".to_string(),
        ));
    }
    for ns in &config.resolver.nameservers {
        ns.parse::<SocketAddr>()
            .map_err(|e| HostscopeError::ConfigError(format!("Invalid nameserver address {}: {}", ns, e)))?;
    }
    if config.crtsh.timeout.is_zero() {
        return Err(HostscopeError::ConfigError("crt.sh timeout must be greater than 0".to_string()));
    }
    url::Url::parse(&config.crtsh.base_url)
        .map_err(|e| HostscopeError::ConfigError(format!("Invalid crt.sh URL {}: {}", config.crtsh.base_url, e)))?;
    if config.record_kinds.is_empty() {
        return Err(HostscopeError::ConfigError("At least one record type is required".to_string()));
    }
    Ok(())
}
