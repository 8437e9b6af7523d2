//! Runtime configuration, read from the environment (and `.env` when present).

use std::env;
use std::net::SocketAddr;

use crate::error::{Error, ENV_VAR_ERROR};

pub const JOURNEY_PLAN_PATH: &str = "/Travel/JourneyPlan.aspx";
pub const PROXY_PREFIX: &str = "/api";
pub const DEFAULT_API_URL: &str = "https://journeyplanner-api.example.com";
pub const DEFAULT_PROXY_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    pub api_url: String,
    pub proxy_addr: SocketAddr,
    pub proxy_target: String,
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let optional = |key: &str| match lookup(key) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value.trim().to_string())),
            Ok(_) | Err(env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(Error::from(err)),
        };

        let environment = match optional("WAYMARK_ENV")?.as_deref() {
            None | Some("production") => Environment::Production,
            Some("development") => Environment::Development,
            Some(other) => {
                return Err(Error {
                    code: ENV_VAR_ERROR,
                    message: format!("WAYMARK_ENV must be development or production, got {}", other),
                })
            }
        };

        let api_url = optional("WAYMARK_API_URL")?.unwrap_or_else(|| DEFAULT_API_URL.into());
        let proxy_target = optional("WAYMARK_PROXY_TARGET")?.unwrap_or_else(|| api_url.clone());
        let proxy_addr = optional("WAYMARK_PROXY_ADDR")?
            .unwrap_or_else(|| DEFAULT_PROXY_ADDR.into());
        let proxy_addr = proxy_addr.parse().map_err(|_| Error {
            code: ENV_VAR_ERROR,
            message: format!("WAYMARK_PROXY_ADDR is not a socket address: {}", proxy_addr),
        })?;

        Ok(Config {
            environment,
            api_url: trim_base(api_url),
            proxy_addr,
            proxy_target: trim_base(proxy_target),
        })
    }

    /// Where the routing client sends requests: through the local proxy in
    /// development, straight to the routing host otherwise.
    pub fn api_base(&self) -> String {
        match self.environment {
            Environment::Development => format!("http://{}{}", self.proxy_addr, PROXY_PREFIX),
            Environment::Production => self.api_url.clone(),
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned().ok_or(env::VarError::NotPresent))
    }

    #[test]
    fn production_targets_the_routing_host() {
        let config = config(&[]).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api_base(), DEFAULT_API_URL);
        assert_eq!(config.proxy_target, DEFAULT_API_URL);
    }

    #[test]
    fn development_goes_through_the_proxy() {
        let config = config(&[
            ("WAYMARK_ENV", "development"),
            ("WAYMARK_PROXY_ADDR", "127.0.0.1:4000"),
            ("WAYMARK_PROXY_TARGET", "https://routing.example.org/"),
        ])
        .unwrap();

        assert_eq!(config.api_base(), "http://127.0.0.1:4000/api");
        assert_eq!(config.proxy_target, "https://routing.example.org");
    }

    #[test]
    fn api_url_override_applies_in_production() {
        let config = config(&[("WAYMARK_API_URL", "http://localhost:9000/")]).unwrap();

        assert_eq!(config.api_base(), "http://localhost:9000");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(config(&[("WAYMARK_ENV", "staging")]).unwrap_err().code, ENV_VAR_ERROR);
        assert_eq!(
            config(&[("WAYMARK_PROXY_ADDR", "nowhere")]).unwrap_err().code,
            ENV_VAR_ERROR
        );
    }
}
