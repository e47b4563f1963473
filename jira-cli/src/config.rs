// ABOUTME: Configuration file loading, validation, and hierarchical merging for Jira CLI
// ABOUTME: Supports TOML config files with XDG paths, a project file, and JIRA_* env overrides

use anyhow::{Context, Result, anyhow, bail};
use jira_sdk::constants::timeouts::HTTP_REQUEST_TIMEOUT;
use jira_sdk::{Credentials, JiraClientConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::config as names;

/// Which Jira deployment the credentials are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Jira Cloud: email + API token
    #[default]
    Basic,
    /// Jira Server / Data Center: personal access token
    Pat,
}

impl FromStr for AuthType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(AuthType::Basic),
            "pat" => Ok(AuthType::Pat),
            other => Err(anyhow!(
                "Invalid auth_type '{}'. Must be one of: basic, pat",
                other
            )),
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::Basic => write!(f, "basic"),
            AuthType::Pat => write!(f, "pat"),
        }
    }
}

#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jira_url", &self.jira_url)
            .field("email", &self.email)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("auth_type", &self.auth_type)
            .field("default_project", &self.default_project)
            .finish()
    }
}

impl Config {
    /// Load configuration from standard locations, an optional explicit file, then the environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let paths = Self::get_config_paths();
        let mut config = Self::load_from_paths(&paths)?;

        if let Some(path) = explicit {
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config.merge(Self::from_env()))
    }

    /// Load configuration from file paths in order of precedence (lowest first).
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if path.as_ref().is_file() {
                config = config.merge(Self::load_from_file(path)?);
            }
        }

        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })
    }

    /// Read `JIRA_*` environment variables. Empty values are ignored.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Config {
            jira_url: var(names::ENV_URL),
            email: var(names::ENV_EMAIL),
            api_token: var(names::ENV_API_TOKEN),
            auth_type: var(names::ENV_AUTH_TYPE).and_then(|raw| match raw.parse() {
                Ok(auth_type) => Some(auth_type),
                Err(e) => {
                    log::warn!("Ignoring {}: {}", names::ENV_AUTH_TYPE, e);
                    None
                }
            }),
            default_project: var(names::ENV_DEFAULT_PROJECT),
        }
    }

    /// Standard config file paths in order of precedence (lowest first)
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(names::APP_DIR)
                    .join(names::FILE_NAME),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(config_home)
                    .join(names::APP_DIR)
                    .join(names::FILE_NAME),
            );
        }

        // 3. Project-specific config
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(names::PROJECT_FILE_NAME));
        }

        paths.dedup();
        paths
    }

    /// Where `jira init` writes its file
    pub fn default_write_path() -> Result<PathBuf> {
        let base = match std::env::var_os("XDG_CONFIG_HOME") {
            Some(config_home) => PathBuf::from(config_home),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine your home directory"))?
                .join(".config"),
        };
        Ok(base.join(names::APP_DIR).join(names::FILE_NAME))
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            jira_url: other.jira_url.or(self.jira_url),
            email: other.email.or(self.email),
            api_token: other.api_token.or(self.api_token),
            auth_type: other.auth_type.or(self.auth_type),
            default_project: other.default_project.or(self.default_project),
        }
    }

    pub fn auth_type(&self) -> AuthType {
        self.auth_type.unwrap_or_default()
    }

    /// Validate that the configuration is complete enough to talk to Jira
    pub fn validate(&self) -> Result<()> {
        let url = self
            .jira_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| anyhow!("jira_url is required"))?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("jira_url must start with http:// or https:// (got '{}')", url);
        }

        if self.auth_type() == AuthType::Basic && is_blank(&self.email) {
            bail!("email is required for basic authentication");
        }

        if is_blank(&self.api_token) {
            bail!("api_token is required");
        }

        Ok(())
    }

    /// Validate, then build the SDK client configuration
    pub fn client_config(&self, verbose: bool) -> Result<JiraClientConfig> {
        self.validate()?;

        let base_url = self.jira_url.clone().unwrap_or_default();
        let token = secret(self.api_token.as_deref().unwrap_or_default());
        let credentials = match self.auth_type() {
            AuthType::Basic => Credentials::Basic {
                username: self.email.clone().unwrap_or_default(),
                token,
            },
            AuthType::Pat => Credentials::Bearer { token },
        };

        Ok(JiraClientConfig {
            base_url: base_url.trim().to_string(),
            credentials,
            verbose,
            timeout: HTTP_REQUEST_TIMEOUT,
            proxy: None,
        })
    }

    /// Browser link for a ticket
    pub fn browse_url(&self, key: &str) -> Option<String> {
        self.jira_url
            .as_deref()
            .map(|url| format!("{}/browse/{}", url.trim().trim_end_matches('/'), key))
    }

    /// Write this configuration as TOML, readable only by the current user
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict permissions on {}", path.display()))?;
        }

        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into_boxed_str())
}
