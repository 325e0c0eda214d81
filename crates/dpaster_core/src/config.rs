//! Persisted client configuration and its on-disk location.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV, MAX_EXPIRY_DAYS, MIN_EXPIRY_DAYS,
};
use crate::error::AppError;
use crate::text::normalize_optional_nonempty;
use serde::{Deserialize, Deserializer, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// User preferences stored in `dpaster.conf`.
///
/// Older releases wrote `enable_*`/`default_*` keys and could store `null`
/// for boolean options; both shapes still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Copy the paste URL to the clipboard after every upload.
    #[serde(alias = "enable_autocp", deserialize_with = "bool_or_null")]
    pub autocp: bool,
    /// Print the raw-text URL instead of the highlighted page.
    #[serde(alias = "enable_raw", deserialize_with = "bool_or_null")]
    pub raw: bool,
    /// Syntax label used instead of inference.
    #[serde(alias = "default_syntax", alias = "default_lexer")]
    pub syntax: Option<String>,
    /// Expiry in days sent with every paste.
    #[serde(alias = "default_expires")]
    pub expires: Option<u32>,
}

fn bool_or_null<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Options supplied to `config add`; `None` leaves a value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub autocp: Option<bool>,
    pub raw: Option<bool>,
    pub syntax: Option<String>,
    pub expires: Option<u32>,
}

/// Options flagged for removal by `config rm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigFields {
    pub autocp: bool,
    pub raw: bool,
    pub syntax: bool,
    pub expires: bool,
}

impl Config {
    /// Set every option present in `update`.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(autocp) = update.autocp {
            self.autocp = autocp;
        }
        if let Some(raw) = update.raw {
            self.raw = raw;
        }
        if let Some(syntax) = normalize_optional_nonempty(update.syntax) {
            self.syntax = Some(syntax);
        }
        if let Some(expires) = update.expires {
            self.expires = Some(expires);
        }
    }

    /// Reset flagged options: booleans to `false`, the rest to unset.
    pub fn clear(&mut self, fields: ConfigFields) {
        if fields.autocp {
            self.autocp = false;
        }
        if fields.raw {
            self.raw = false;
        }
        if fields.syntax {
            self.syntax = None;
        }
        if fields.expires {
            self.expires = None;
        }
    }

    /// Option/value pairs in display order. Unset values render as `none`.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("autocp", self.autocp.to_string()),
            ("raw", self.raw.to_string()),
            (
                "syntax",
                self.syntax.clone().unwrap_or_else(|| "none".to_string()),
            ),
            (
                "expires",
                self.expires
                    .map(|days| days.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
        ]
    }
}

/// Check an expiry against the range the service accepts.
///
/// # Errors
/// Returns [`AppError::BadRequest`] when `days` is outside `1..=365`.
pub fn validate_expiry_days(days: u32) -> Result<u32, AppError> {
    if (MIN_EXPIRY_DAYS..=MAX_EXPIRY_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(AppError::BadRequest(format!(
            "expiry must be between {} and {} days, got {}",
            MIN_EXPIRY_DAYS, MAX_EXPIRY_DAYS, days
        )))
    }
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn resolve_home_dir() -> Option<PathBuf> {
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Some(home) = normalize_optional_nonempty(env::var("HOME").ok()) {
        return Some(PathBuf::from(home));
    }

    // Windows USERPROFILE (standard)
    if let Some(profile) = normalize_optional_nonempty(env::var("USERPROFILE").ok()) {
        return Some(PathBuf::from(profile));
    }

    // Windows legacy HOMEDRIVE + HOMEPATH
    if let (Ok(drive), Ok(path)) = (env::var("HOMEDRIVE"), env::var("HOMEPATH")) {
        if !drive.trim().is_empty() && !path.trim().is_empty() {
            return Some(PathBuf::from(format!("{}{}", drive, path)));
        }
    }

    None
}

/// Resolve the config file path.
///
/// Order: `DPASTER_CONFIG`, then `$XDG_CONFIG_HOME/dpaster/dpaster.conf`, then
/// `~/.config/dpaster/dpaster.conf` (current directory when no home exists).
///
/// # Returns
/// Absolute or relative path of the config file; it may not exist yet.
pub fn config_path_from_env_or_default() -> PathBuf {
    if let Some(explicit) = normalize_optional_nonempty(env::var(CONFIG_PATH_ENV).ok()) {
        return expand_tilde(&explicit);
    }

    let config_home = normalize_optional_nonempty(env::var("XDG_CONFIG_HOME").ok())
        .map(|dir| expand_tilde(&dir))
        .unwrap_or_else(|| {
            resolve_home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
    config_home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Reads and writes [`Config`] at an explicit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located by [`config_path_from_env_or_default`].
    pub fn from_env_or_default() -> Self {
        Self::new(config_path_from_env_or_default())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, writing defaults first when the file is missing.
    ///
    /// An existing empty file loads as defaults without being rewritten.
    ///
    /// # Errors
    /// Returns [`AppError::Io`] for filesystem failures and
    /// [`AppError::ConfigParse`] when the file is not valid config JSON.
    pub fn load(&self) -> Result<Config, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "creating default config");
                let config = Config::default();
                self.save(&config)?;
                return Ok(config);
            }
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_json::from_str(&raw).map_err(|source| AppError::ConfigParse {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Write `config`, creating the parent directory when needed.
    ///
    /// # Errors
    /// Returns [`AppError::Io`] when the directory or file cannot be written.
    pub fn save(&self, config: &Config) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut encoded = serde_json::to_string_pretty(config)?;
        encoded.push('\n');
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    /// Load, mutate, and save in one step.
    ///
    /// # Returns
    /// The config as written.
    pub fn update<F>(&self, mutate: F) -> Result<Config, AppError>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        mutate(&mut config);
        self.save(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        config_path_from_env_or_default, validate_expiry_days, Config, ConfigFields, ConfigStore,
        ConfigUpdate,
    };
    use crate::error::AppError;
    use crate::test_support::ScopedEnv;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn temp_store() -> (ConfigStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let store = ConfigStore::new(dir.path().join("nested").join("dpaster.conf"));
        (store, dir)
    }

    #[test]
    fn load_creates_default_file_when_missing() {
        let (store, _dir) = temp_store();
        assert!(!store.path().exists());

        let config = store.load().expect("load");
        assert_eq!(config, Config::default());
        assert!(store.path().exists());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).expect("read"))
                .expect("json");
        assert_eq!(written["autocp"], false);
        assert_eq!(written["raw"], false);
        assert!(written["syntax"].is_null());
        assert!(written["expires"].is_null());
    }

    #[test]
    fn load_accepts_legacy_keys_and_null_booleans() {
        let (store, _dir) = temp_store();
        std::fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        std::fs::write(
            store.path(),
            r#"{"enable_autocp": null, "enable_raw": true, "default_lexer": "java", "default_expires": 10}"#,
        )
        .expect("write");

        let config = store.load().expect("load");
        assert!(!config.autocp);
        assert!(config.raw);
        assert_eq!(config.syntax.as_deref(), Some("java"));
        assert_eq!(config.expires, Some(10));
    }

    #[test]
    fn load_treats_empty_file_as_defaults() {
        let (store, _dir) = temp_store();
        std::fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        std::fs::write(store.path(), "  \n").expect("write");
        assert_eq!(store.load().expect("load"), Config::default());
    }

    #[test]
    fn load_reports_malformed_json_with_path() {
        let (store, _dir) = temp_store();
        std::fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        std::fs::write(store.path(), "{not json").expect("write");
        match store.load() {
            Err(AppError::ConfigParse { path, .. }) => {
                assert!(path.ends_with("dpaster.conf"), "path: {path}")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn update_applies_only_provided_options() {
        let (store, _dir) = temp_store();
        store
            .update(|config| {
                config.apply(ConfigUpdate {
                    autocp: Some(true),
                    expires: Some(7),
                    ..ConfigUpdate::default()
                })
            })
            .expect("first update");
        let config = store
            .update(|config| {
                config.apply(ConfigUpdate {
                    syntax: Some(" python ".to_string()),
                    ..ConfigUpdate::default()
                })
            })
            .expect("second update");

        assert!(config.autocp);
        assert!(!config.raw);
        assert_eq!(config.syntax.as_deref(), Some("python"));
        assert_eq!(config.expires, Some(7));
        assert_eq!(store.load().expect("reload"), config);
    }

    #[test]
    fn clear_resets_flagged_options() {
        let mut config = Config {
            autocp: true,
            raw: true,
            syntax: Some("python".to_string()),
            expires: Some(10),
        };
        config.clear(ConfigFields {
            raw: true,
            syntax: true,
            ..ConfigFields::default()
        });
        assert!(config.autocp);
        assert!(!config.raw);
        assert_eq!(config.syntax, None);
        assert_eq!(config.expires, Some(10));
    }

    #[test]
    fn entries_render_unset_values_as_none() {
        let config = Config {
            expires: Some(3),
            ..Config::default()
        };
        let rendered: Vec<String> = config
            .entries()
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        assert_eq!(
            rendered,
            ["autocp: false", "raw: false", "syntax: none", "expires: 3"]
        );
    }

    #[test]
    fn expiry_days_must_fall_within_service_range() {
        assert_eq!(validate_expiry_days(1).expect("min"), 1);
        assert_eq!(validate_expiry_days(365).expect("max"), 365);
        assert!(matches!(
            validate_expiry_days(0),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_expiry_days(366),
            Err(AppError::BadRequest(message)) if message.contains("366")
        ));
    }

    #[test]
    fn config_path_prefers_explicit_env_then_xdg_then_home() {
        {
            let _env = ScopedEnv::new(&[
                ("DPASTER_CONFIG", Some("/tmp/custom/dpaster.json")),
                ("XDG_CONFIG_HOME", Some("/tmp/xdg")),
            ]);
            assert_eq!(
                config_path_from_env_or_default(),
                PathBuf::from("/tmp/custom/dpaster.json")
            );
        }
        {
            let _env = ScopedEnv::new(&[
                ("DPASTER_CONFIG", Some("   ")),
                ("XDG_CONFIG_HOME", Some("/tmp/xdg")),
            ]);
            assert_eq!(
                config_path_from_env_or_default(),
                PathBuf::from("/tmp/xdg/dpaster/dpaster.conf")
            );
        }
        {
            let _env = ScopedEnv::new(&[
                ("DPASTER_CONFIG", None),
                ("XDG_CONFIG_HOME", None),
                ("HOME", Some("/home/tester")),
            ]);
            assert_eq!(
                config_path_from_env_or_default(),
                PathBuf::from("/home/tester/.config/dpaster/dpaster.conf")
            );
        }
    }

    #[test]
    fn config_path_expands_tilde_in_explicit_override() {
        let _env = ScopedEnv::new(&[
            ("DPASTER_CONFIG", Some("~/conf/dpaster.conf")),
            ("HOME", Some("/home/tester")),
        ]);
        assert_eq!(
            config_path_from_env_or_default(),
            PathBuf::from("/home/tester/conf/dpaster.conf")
        );
    }
}
