use std::any::Any;
use std::str::FromStr;
use std::time::Duration;

use log::info;
use rgw_states::{State, state_assign_impl};
use serde::Deserialize;
use thiserror::Error;

/// Prefix of the environment variables read by [`BusinessConfig::from_env`].
pub const ENV_PREFIX: &str = "RGW_CONSOLE_";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8443";
const DEFAULT_STALE_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {ENV_PREFIX}* environment: {0}")]
    Env(String),
    #[error(transparent)]
    Permission(#[from] PermissionParseError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown permission `{0}` (expected read, create, update or delete)")]
pub struct PermissionParseError(pub String);

/// What the signed-in administrator may do with gateway users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgwPermission {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl RgwPermission {
    pub const ALL: Self = Self {
        read: true,
        create: true,
        update: true,
        delete: true,
    };

    pub const NONE: Self = Self {
        read: false,
        create: false,
        update: false,
        delete: false,
    };
}

impl Default for RgwPermission {
    fn default() -> Self {
        Self::ALL
    }
}

/// Parses a comma separated list such as `read,delete`.
impl FromStr for RgwPermission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut permission = Self::NONE;
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            match item.to_ascii_lowercase().as_str() {
                "read" => permission.read = true,
                "create" => permission.create = true,
                "update" => permission.update = true,
                "delete" => permission.delete = true,
                _ => return Err(PermissionParseError(item.to_owned())),
            }
        }
        Ok(permission)
    }
}

/// Connection and behaviour settings shared by every front end.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    /// Dashboard base URL, e.g. `https://ceph-mgr:8443`. API paths are appended to it.
    pub api_base_url: String,
    /// Bearer token sent with every request.
    pub auth_token: Option<String>,
    /// Verify the gateway's TLS certificate. Dashboards often run with self-signed ones.
    pub verify_tls: bool,
    pub request_timeout: Duration,
    /// A refresh still unanswered after this long marks the users list as stale.
    pub stale_timeout: Duration,
    pub permissions: RgwPermission,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Web dashboard location of a client-side route such as `/rgw/user/create`.
    pub fn dashboard_route_url(&self, route: &str) -> String {
        format!("{}/#{route}", self.api_url())
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Reads `RGW_CONSOLE_*` variables from the process environment on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`Self::from_env`] but over an explicit set of variables.
    pub fn from_vars(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let prefixed: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|stripped| (stripped.to_owned(), value))
            })
            .collect();

        let raw: RawEnvConfig =
            serde_env::from_iter(prefixed).map_err(|e| ConfigError::Env(e.to_string()))?;
        let mut config = Self::default();

        if let Some(url) = raw.url {
            info!("Using gateway URL from {ENV_PREFIX}URL: {url}");
            config.api_base_url = url;
        }
        if raw.token.is_some() {
            config.auth_token = raw.token;
        }
        if let Some(verify) = raw.verify_tls {
            config.verify_tls = verify;
        }
        if let Some(secs) = raw.stale_timeout_secs {
            config.stale_timeout = Duration::from_secs(secs);
        }
        if let Some(permissions) = raw.permissions {
            config.permissions = permissions.parse()?;
        }
        Ok(config)
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            auth_token: None,
            verify_tls: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            stale_timeout: DEFAULT_STALE_TIMEOUT,
            permissions: RgwPermission::ALL,
        }
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawEnvConfig {
    url: Option<String>,
    token: Option<String>,
    verify_tls: Option<bool>,
    stale_timeout_secs: Option<u64>,
    permissions: Option<String>,
}
