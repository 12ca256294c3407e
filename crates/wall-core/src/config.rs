use home::home_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    constant::{
        CONFIG_DIR, CONFIG_ENV, CONFIG_FILE, DATA_DIR, DATA_FILE, DEFAULT_BUCKET,
        DEFAULT_STORAGE_URL, STORAGE_KEY_ENV,
    },
    WallError, WallResult,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Path to the sqlite db holding the post list.
    pub db: PathBuf,
    /// Hosted object storage used for images.
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Project URL of the storage service.
    pub url: String,
    /// Bucket that receives uploaded images.
    pub bucket: String,
    /// Access key. Falls back to `WALL_STORAGE_KEY` from the environment,
    /// then to the value baked in at build time.
    pub key: Option<String>,
}

fn config_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            db: config_dir().join(DATA_DIR).join(DATA_FILE),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORAGE_URL.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            key: None,
        }
    }
}

impl StorageConfig {
    /// The access key to use, if any is available.
    pub fn resolved_key(&self) -> Option<String> {
        first_non_empty([
            self.key.clone(),
            std::env::var(STORAGE_KEY_ENV).ok(),
            option_env!("WALL_STORAGE_KEY").map(String::from),
        ])
    }
}

/// An empty value counts as unset, so the next source is tried.
fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|key| !key.is_empty())
}

impl WallConfig {
    /// Default location of the config file, `~/.wall/wall.toml`, unless
    /// `WALLCONF` points somewhere else.
    pub fn default_path() -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => config_dir().join(CONFIG_FILE),
        }
    }

    /// Load the config from `path`, or from [`WallConfig::default_path`].
    /// A missing file gives the defaults; an explicitly given path must
    /// exist.
    pub fn load(path: Option<&Path>) -> WallResult<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.try_exists()? {
            if required {
                return Err(WallError::config_error(format!(
                    "config file {} does not exist",
                    path.display()
                ))
                .into());
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> WallResult<Self> {
        toml::from_str(raw).map_err(|err| WallError::config_error(err.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = WallConfig::from_toml("").unwrap();
        assert_eq!(config, WallConfig::default());
        assert_eq!(config.storage.bucket, "images");
        assert!(config.db.ends_with("data/wall.db"));
        assert_eq!(config.storage.url, "https://xqsoqsuvjvfidxxnggsc.supabase.co");
    }

    #[test]
    fn storage_section_is_read() {
        let config = WallConfig::from_toml(
            r#"
            db = "/tmp/wall-test.db"

            [storage]
            url = "https://example.supabase.co"
            bucket = "wall-images"
            key = "anon"
            "#,
        )
        .unwrap();
        assert_eq!(config.db, PathBuf::from("/tmp/wall-test.db"));
        assert_eq!(config.storage.url, "https://example.supabase.co");
        assert_eq!(config.storage.bucket, "wall-images");
        assert_eq!(config.storage.resolved_key().as_deref(), Some("anon"));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = WallConfig::from_toml("db = [").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WallError>(),
            Some(WallError::Config { .. })
        ));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = std::env::temp_dir().join("wall-missing-dir").join("nope.toml");
        assert!(WallConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn empty_key_falls_through_to_later_sources() {
        assert_eq!(
            first_non_empty([Some(String::new()), Some("from-env".into()), None]),
            Some("from-env".to_string())
        );
        assert_eq!(
            first_non_empty([None, Some(String::new()), Some("baked".into())]),
            Some("baked".to_string())
        );
        assert_eq!(first_non_empty([Some(String::new()), None, None]), None);
    }

    #[test]
    fn storage_url_can_be_overridden() {
        let path = std::env::temp_dir()
            .join(format!("wall-config-{}", std::process::id()))
            .join(CONFIG_FILE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[storage]\nurl = \"https://other.supabase.co\"\n").unwrap();

        let loaded = WallConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.storage.url, "https://other.supabase.co");
        assert_eq!(loaded.storage.bucket, "images");

        std::fs::remove_dir_all(path.parent().unwrap()).expect("Config cleanup failed");
    }
}
