//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services, so request
//! handling never reads process-wide environment variables. Resolution goes through a key lookup
//! closure, which lets tests supply values without touching the real environment.

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{ValidatorError, ValidatorResult};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_ADDR: &str = "DOCKCHECK_ADDR";
pub const ENV_SERVER_PORT: &str = "SERVER_PORT";
pub const ENV_SECRET_TOKEN: &str = "SECRET_TOKEN";
pub const ENV_STORE: &str = "PO_STORE";
pub const ENV_STORE_PATH: &str = "PO_STORE_PATH";
pub const ENV_RULES: &str = "DOCKCHECK_RULES";
pub const ENV_SWAGGER: &str = "DOCKCHECK_SWAGGER";

/// Which purchase-order store backs the lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    /// Canned in-memory data.
    Stub,
    /// Records loaded from a YAML file.
    File(PathBuf),
}

/// Validator configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorConfig {
    listen_addr: SocketAddr,
    secret_token: Option<String>,
    store: StoreConfig,
    rules: Vec<String>,
    swagger_enabled: bool,
}

impl ValidatorConfig {
    /// Create a new `ValidatorConfig`.
    ///
    /// An empty or whitespace-only secret token is treated as no token.
    pub fn new(
        listen_addr: SocketAddr,
        secret_token: Option<String>,
        store: StoreConfig,
        rules: Vec<String>,
        swagger_enabled: bool,
    ) -> Self {
        Self {
            listen_addr,
            secret_token: secret_token.filter(|t| !t.trim().is_empty()),
            store,
            rules,
            swagger_enabled,
        }
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> ValidatorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> ValidatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = listen_addr_from_env_values(lookup(ENV_ADDR), lookup(ENV_SERVER_PORT))?;
        let store = store_from_env_values(lookup(ENV_STORE), lookup(ENV_STORE_PATH))?;
        let rules = rules_from_env_value(lookup(ENV_RULES));
        let swagger_enabled = flag_from_env_value(ENV_SWAGGER, lookup(ENV_SWAGGER), true)?;

        Ok(Self::new(
            listen_addr,
            lookup(ENV_SECRET_TOKEN),
            store,
            rules,
            swagger_enabled,
        ))
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub fn secret_token(&self) -> Option<&str> {
        self.secret_token.as_deref()
    }

    pub fn has_secret_token(&self) -> bool {
        self.secret_token.is_some()
    }

    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn swagger_enabled(&self) -> bool {
        self.swagger_enabled
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the listen address.
///
/// An explicit address wins; otherwise the port (default 8080) is bound on all interfaces.
///
/// # Arguments
/// * `addr` - Value of `DOCKCHECK_ADDR`, if set
/// * `port` - Value of `SERVER_PORT`, if set
///
/// # Returns
/// The socket address to bind.
///
/// # Errors
/// Returns `InvalidConfig` if either value does not parse.
pub fn listen_addr_from_env_values(
    addr: Option<String>,
    port: Option<String>,
) -> ValidatorResult<SocketAddr> {
    if let Some(addr) = non_blank(addr) {
        return addr.parse().map_err(|_| {
            ValidatorError::InvalidConfig(format!("{ENV_ADDR} is not a socket address: {addr}"))
        });
    }

    let port = match non_blank(port) {
        Some(port) => port.parse::<u16>().map_err(|_| {
            ValidatorError::InvalidConfig(format!("{ENV_SERVER_PORT} is not a port: {port}"))
        })?,
        None => DEFAULT_PORT,
    };

    format!("{DEFAULT_HOST}:{port}")
        .parse()
        .map_err(|_| ValidatorError::InvalidConfig(format!("cannot bind to port {port}")))
}

/// Parse the store selection. Defaults to the stub.
pub fn store_from_env_values(
    kind: Option<String>,
    path: Option<String>,
) -> ValidatorResult<StoreConfig> {
    match non_blank(kind).map(|k| k.to_ascii_lowercase()).as_deref() {
        None | Some("stub") => Ok(StoreConfig::Stub),
        Some("file") => non_blank(path)
            .map(|p| StoreConfig::File(PathBuf::from(p)))
            .ok_or_else(|| {
                ValidatorError::InvalidConfig(format!(
                    "{ENV_STORE_PATH} must be set when {ENV_STORE}=file"
                ))
            }),
        Some(other) => Err(ValidatorError::InvalidConfig(format!(
            "{ENV_STORE} must be 'stub' or 'file', got '{other}'"
        ))),
    }
}

/// Split a comma-separated rule list, dropping blanks. Names are checked when rules are built.
pub fn rules_from_env_value(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|r| r.trim().to_ascii_lowercase())
                .filter(|r| !r.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn flag_from_env_value(name: &str, value: Option<String>, default: bool) -> ValidatorResult<bool> {
    match non_blank(value).map(|v| v.to_ascii_lowercase()).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ValidatorError::InvalidConfig(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ValidatorResult<ValidatorConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ValidatorConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config_from(&[]).unwrap();

        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.secret_token(), None);
        assert_eq!(cfg.store(), &StoreConfig::Stub);
        assert!(cfg.rules().is_empty());
        assert!(cfg.swagger_enabled());
    }

    #[test]
    fn test_server_port_used_without_addr() {
        let cfg = config_from(&[(ENV_SERVER_PORT, "9090")]).unwrap();
        assert_eq!(cfg.listen_addr(), "0.0.0.0:9090".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_addr_wins_over_port() {
        let cfg = config_from(&[(ENV_ADDR, "127.0.0.1:3000"), (ENV_SERVER_PORT, "9090")]).unwrap();
        assert_eq!(cfg.listen_addr(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_invalid_addr_and_port() {
        assert!(matches!(
            config_from(&[(ENV_ADDR, "localhost")]),
            Err(ValidatorError::InvalidConfig(_))
        ));
        assert!(matches!(
            config_from(&[(ENV_SERVER_PORT, "99999")]),
            Err(ValidatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_blank_token_means_no_auth() {
        let cfg = config_from(&[(ENV_SECRET_TOKEN, "   ")]).unwrap();
        assert!(!cfg.has_secret_token());

        let cfg = config_from(&[(ENV_SECRET_TOKEN, "s3cret")]).unwrap();
        assert_eq!(cfg.secret_token(), Some("s3cret"));
    }

    #[test]
    fn test_file_store_requires_path() {
        let cfg = config_from(&[(ENV_STORE, "File"), (ENV_STORE_PATH, "/etc/po.yaml")]).unwrap();
        assert_eq!(cfg.store(), &StoreConfig::File(PathBuf::from("/etc/po.yaml")));

        let err = config_from(&[(ENV_STORE, "file")]).unwrap_err();
        assert!(err.to_string().contains(ENV_STORE_PATH));

        assert!(config_from(&[(ENV_STORE, "db2")]).is_err());
    }

    #[test]
    fn test_rules_list() {
        assert_eq!(
            rules_from_env_value(Some(" open_status, ,Expected_Date ".into())),
            ["open_status", "expected_date"]
        );
        assert!(rules_from_env_value(Some("".into())).is_empty());
    }

    #[test]
    fn test_swagger_flag() {
        assert!(!config_from(&[(ENV_SWAGGER, "off")]).unwrap().swagger_enabled());
        assert!(config_from(&[(ENV_SWAGGER, "maybe")]).is_err());
    }
}
