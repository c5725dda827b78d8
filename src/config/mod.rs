//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `JOBMESH_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `JOBMESH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Time-to-live for cached result sets. Default: 24 hours.
    pub cache_ttl: Duration,

    /// Max entries in the aggregation cache. Default: `1_000`.
    pub cache_capacity: u64,

    /// Per-adapter fetch deadline; a timeout yields zero results, not an
    /// error. Capped at the remaining `pipeline_budget` at fan-out time, so
    /// a value larger than the budget never extends a request. Default: 30
    /// seconds.
    pub adapter_timeout: Duration,

    /// Per-posting deadline for resolving the external apply link.
    /// Default: 10 seconds.
    pub detail_timeout: Duration,

    /// Per-posting deadline for the relevance-scoring completion call.
    /// Default: 20 seconds.
    pub scoring_timeout: Duration,

    /// Wall-clock budget for one whole pipeline run. Both the adapter
    /// fan-out and the scoring stage are cut off at this deadline, whatever
    /// their own timeouts say. Default: 90 seconds.
    pub pipeline_budget: Duration,

    /// Max candidates fetched from a single platform. Default: `60`.
    pub per_platform_limit: usize,

    /// Model name passed to the completion provider.
    /// Default: `gpt-4o-mini`.
    pub completion_model: String,

    /// Pre-authenticated session cookie forwarded to listing sites, for
    /// sources that gate results behind a login. Optional.
    pub session_cookie: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            cache_capacity: 1_000,
            adapter_timeout: Duration::from_secs(30),
            detail_timeout: Duration::from_secs(10),
            scoring_timeout: Duration::from_secs(20),
            pipeline_budget: Duration::from_secs(90),
            per_platform_limit: 60,
            completion_model: "gpt-4o-mini".to_string(),
            session_cookie: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "JOBMESH_PORT";
    const ENV_BIND_ADDR: &'static str = "JOBMESH_BIND_ADDR";
    const ENV_CACHE_TTL_SECS: &'static str = "JOBMESH_CACHE_TTL_SECS";
    const ENV_CACHE_CAPACITY: &'static str = "JOBMESH_CACHE_CAPACITY";
    const ENV_ADAPTER_TIMEOUT_SECS: &'static str = "JOBMESH_ADAPTER_TIMEOUT_SECS";
    const ENV_DETAIL_TIMEOUT_SECS: &'static str = "JOBMESH_DETAIL_TIMEOUT_SECS";
    const ENV_SCORING_TIMEOUT_SECS: &'static str = "JOBMESH_SCORING_TIMEOUT_SECS";
    const ENV_PIPELINE_BUDGET_SECS: &'static str = "JOBMESH_PIPELINE_BUDGET_SECS";
    const ENV_PER_PLATFORM_LIMIT: &'static str = "JOBMESH_PER_PLATFORM_LIMIT";
    const ENV_COMPLETION_MODEL: &'static str = "JOBMESH_COMPLETION_MODEL";
    const ENV_SESSION_COOKIE: &'static str = "JOBMESH_SESSION_COOKIE";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let cache_ttl = Self::parse_secs_from_env(Self::ENV_CACHE_TTL_SECS, defaults.cache_ttl);
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let adapter_timeout =
            Self::parse_secs_from_env(Self::ENV_ADAPTER_TIMEOUT_SECS, defaults.adapter_timeout);
        let detail_timeout =
            Self::parse_secs_from_env(Self::ENV_DETAIL_TIMEOUT_SECS, defaults.detail_timeout);
        let scoring_timeout =
            Self::parse_secs_from_env(Self::ENV_SCORING_TIMEOUT_SECS, defaults.scoring_timeout);
        let pipeline_budget =
            Self::parse_secs_from_env(Self::ENV_PIPELINE_BUDGET_SECS, defaults.pipeline_budget);
        let per_platform_limit = Self::parse_u64_from_env(
            Self::ENV_PER_PLATFORM_LIMIT,
            defaults.per_platform_limit as u64,
        ) as usize;
        let completion_model =
            Self::parse_string_from_env(Self::ENV_COMPLETION_MODEL, defaults.completion_model);
        let session_cookie = Self::parse_optional_string_from_env(Self::ENV_SESSION_COOKIE);

        Ok(Self {
            port,
            bind_addr,
            cache_ttl,
            cache_capacity,
            adapter_timeout,
            detail_timeout,
            scoring_timeout,
            pipeline_budget,
            per_platform_limit,
            completion_model,
            session_cookie,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "cache TTL",
            });
        }
        if self.adapter_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "adapter timeout",
            });
        }
        if self.scoring_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "scoring timeout",
            });
        }
        if self.pipeline_budget.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "pipeline budget",
            });
        }
        if self.per_platform_limit == 0 {
            return Err(ConfigError::ZeroPlatformLimit);
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_secs_from_env(var_name: &str, default: Duration) -> Duration {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
