use crate::error::{ConfigError, CoreError, CredentialError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

pub const CONFIG_ENV_VAR: &str = "MOLTDIGEST_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "moltdigest.toml";

/// Runtime configuration, loaded from an optional TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api_base: String,
    pub credentials_path: PathBuf,
    pub state_path: PathBuf,
    pub reports_dir: PathBuf,
    pub hot_want: usize,
    pub new_want: usize,
    /// Drop already-surfaced posts before scoring instead of only tracking
    /// them. Off by default: the digest favors discovery.
    pub filter_seen: bool,
    /// Keyword weights overriding the built-in lexicon when non-empty.
    pub keywords: HashMap<String, u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "https://www.moltbook.com/api/v1".to_string(),
            credentials_path: PathBuf::from("secrets/moltbook.json"),
            state_path: PathBuf::from("state/moltdigest-state.json"),
            reports_dir: PathBuf::from("reports"),
            hot_want: 200,
            new_want: 400,
            filter_seen: false,
            keywords: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load from the path named by `MOLTDIGEST_CONFIG`, falling back to
    /// `./moltdigest.toml`. An explicitly configured path must exist; the
    /// default path missing just means defaults.
    pub fn load() -> Result<Self, CoreError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::load_from(&path)
            }
            Err(_) => Self::load_from(Path::new(DEFAULT_CONFIG_PATH)),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.api_base).map_err(|_| ConfigError::InvalidValue {
            field: "api_base".to_string(),
            value: self.api_base.clone(),
        })?;
        if self.hot_want == 0 && self.new_want == 0 {
            return Err(ConfigError::InvalidValue {
                field: "hot_want/new_want".to_string(),
                value: "both zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Contents of the credential file: `{"api_key": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub api_key: String,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CredentialError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path)?;
        let credentials: Credentials =
            serde_json::from_str(&raw).map_err(|e| CredentialError::Malformed {
                details: e.to_string(),
            })?;
        if credentials.api_key.trim().is_empty() {
            return Err(CredentialError::Malformed {
                details: "api_key is empty".to_string(),
            }
            .into());
        }
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, CoreError, CredentialError};
    use std::env;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("test_moltdigest_{}_{}", uuid::Uuid::new_v4(), name));
        std::fs::write(&path, contents).expect("Failed to write temp file");
        path
    }

    #[test]
    fn test_defaults_when_config_file_missing() {
        let missing = env::temp_dir().join(format!("test_moltdigest_{}.toml", uuid::Uuid::new_v4()));
        let config = AppConfig::load_from(&missing).unwrap();
        assert_eq!(config.api_base, "https://www.moltbook.com/api/v1");
        assert_eq!(config.hot_want, 200);
        assert_eq!(config.new_want, 400);
        assert!(!config.filter_seen);
        assert!(config.keywords.is_empty());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let path = temp_file(
            "config.toml",
            r#"
hot_want = 50
filter_seen = true

[keywords]
kubernetes = 6
etcd = 3
"#,
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.hot_want, 50);
        assert_eq!(config.new_want, 400);
        assert!(config.filter_seen);
        assert_eq!(config.keywords.get("kubernetes"), Some(&6));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_api_base_rejected() {
        let path = temp_file("config.toml", "api_base = \"not a url\"\n");
        let result = AppConfig::load_from(&path);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { ref field, .. })) if field.as_str() == "api_base"
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_zero_fetch_targets_rejected() {
        let path = temp_file("config.toml", "hot_want = 0\nnew_want = 0\n");
        assert!(AppConfig::load_from(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_credentials_missing_file() {
        let missing = env::temp_dir().join(format!("test_moltdigest_{}.json", uuid::Uuid::new_v4()));
        let result = Credentials::load(&missing);
        assert!(matches!(
            result,
            Err(CoreError::Credential(CredentialError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_credentials_malformed() {
        let path = temp_file("creds.json", "{ not json");
        let result = Credentials::load(&path);
        assert!(matches!(
            result,
            Err(CoreError::Credential(CredentialError::Malformed { .. }))
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_credentials_empty_key_rejected() {
        let path = temp_file("creds.json", r#"{"api_key": "  "}"#);
        assert!(Credentials::load(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_credentials_valid() {
        let path = temp_file("creds.json", r#"{"api_key": "mk-test-123"}"#);
        let credentials = Credentials::load(&path).unwrap();
        assert_eq!(credentials.api_key, "mk-test-123");
        std::fs::remove_file(path).ok();
    }
}
