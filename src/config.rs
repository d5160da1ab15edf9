//! Layered configuration.
//!
//! Priority (highest to lowest):
//! 1. Environment variables (`PREDICTCARE_BACKEND__BASE_URL`, ...)
//! 2. `--config PATH`, or `./predictcare.toml` when no path is given
//! 3. User config (`~/.config/predictcare/config.toml` on Linux)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::adapters::email_relay::DEFAULT_RELAY_URL;

const ENV_PREFIX: &str = "PREDICTCARE_";
const LOCAL_CONFIG: &str = "predictcare.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub feedback: FeedbackSettings,
    pub logging: LoggingSettings,
}

/// Inference service location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,

    /// Request timeout in seconds; unset or 0 waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5328/api".to_string(),
            timeout_secs: None,
        }
    }
}

impl BackendSettings {
    #[must_use]
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(std::time::Duration::from_secs)
    }
}

/// Email relay credentials for the feedback form.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    pub relay_url: String,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            service_id: None,
            template_id: None,
            public_key: None,
        }
    }
}

impl std::fmt::Debug for FeedbackSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "<set>");
        f.debug_struct("FeedbackSettings")
            .field("relay_url", &self.relay_url)
            .field("service_id", &mask(&self.service_id))
            .field("template_id", &mask(&self.template_id))
            .field("public_key", &mask(&self.public_key))
            .finish()
    }
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub mode: LogMode,
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        let file = project_dirs()
            .map(|dirs| dirs.data_local_dir().join("predictcare.log"))
            .unwrap_or_else(|| PathBuf::from("predictcare.log"));
        Self {
            mode: LogMode::Auto,
            file,
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "predictcare", "predictcare")
}

/// Load settings from every layer.
///
/// # Errors
/// Returns an error if an explicitly named file is missing or any layer fails
/// to parse.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, Box<figment::Error>> {
    load_settings_from(explicit, Path::new("."), ENV_PREFIX)
}

fn load_settings_from(
    explicit: Option<&Path>,
    workspace: &Path,
    env_prefix: &str,
) -> Result<Settings, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    if let Some(dirs) = project_dirs() {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            let local = workspace.join(LOCAL_CONFIG);
            if local.exists() {
                figment = figment.merge(Toml::file(&local));
            }
        }
    }

    figment = figment.merge(Env::prefixed(env_prefix).split("__"));

    figment.extract().map_err(Box::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.backend.base_url, "http://127.0.0.1:5328/api");
        assert_eq!(settings.backend.timeout(), None);
        assert_eq!(settings.logging.mode, LogMode::Auto);
        assert_eq!(settings.feedback.relay_url, DEFAULT_RELAY_URL);
    }

    #[test]
    fn test_zero_timeout_means_no_timeout() {
        let mut backend = BackendSettings {
            timeout_secs: Some(0),
            ..BackendSettings::default()
        };
        assert_eq!(backend.timeout(), None);

        backend.timeout_secs = Some(12);
        assert_eq!(backend.timeout(), Some(std::time::Duration::from_secs(12)));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[backend]
base_url = "http://inference.local:8000"
timeout_secs = 12

[logging]
mode = "stdout"
"#,
        )
        .expect("write config");

        let settings =
            load_settings_from(Some(&path), dir.path(), "PREDICTCARE_TEST_EXPLICIT_").expect("load");
        assert_eq!(settings.backend.base_url, "http://inference.local:8000");
        assert_eq!(settings.backend.timeout_secs, Some(12));
        assert_eq!(settings.logging.mode, LogMode::Stdout);
        assert_eq!(settings.feedback, FeedbackSettings::default());
    }

    #[test]
    fn test_workspace_file_is_picked_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(LOCAL_CONFIG),
            "[feedback]\nservice_id = \"service_x\"\n",
        )
        .expect("write config");

        let settings =
            load_settings_from(None, dir.path(), "PREDICTCARE_TEST_LOCAL_").expect("load");
        assert_eq!(settings.feedback.service_id.as_deref(), Some("service_x"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(load_settings_from(Some(&missing), dir.path(), "PREDICTCARE_TEST_MISSING_").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(LOCAL_CONFIG),
            "[backend]\nbase_url = \"http://from-file\"\n",
        )
        .expect("write config");
        std::env::set_var("PREDICTCARE_TEST_ENV_BACKEND__BASE_URL", "http://from-env");

        let settings =
            load_settings_from(None, dir.path(), "PREDICTCARE_TEST_ENV_").expect("load");
        std::env::remove_var("PREDICTCARE_TEST_ENV_BACKEND__BASE_URL");
        assert_eq!(settings.backend.base_url, "http://from-env");
    }

    #[test]
    fn test_debug_masks_credentials() {
        let feedback = FeedbackSettings {
            public_key: Some("pk_secret".to_string()),
            ..FeedbackSettings::default()
        };
        let rendered = format!("{feedback:?}");
        assert!(!rendered.contains("pk_secret"));
        assert!(rendered.contains("<set>"));
    }
}
