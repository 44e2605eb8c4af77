use crate::api::DEFAULT_BASE_URL;
use crate::state::{StoreError, TokenStore};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

const SETTINGS_STORE_FILE: &str = "saxansaxo-settings.json";
const SESSION_STORE_FILE: &str = "session.json";

pub const KEY_API_URL: &str = "apiUrl";
pub const KEY_TOKEN_STORAGE: &str = "tokenStorage";
pub const KEY_LOG_FORMAT: &str = "logFormat";

pub const ENV_API_URL: &str = "SAXANSAXO_API_URL";
pub const ENV_API_URL_LEGACY: &str = "NEXT_PUBLIC_API_URL";
pub const ENV_TOKEN_STORAGE: &str = "SAXANSAXO_TOKEN_STORAGE";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_CONFIG_DIR: &str = "SAXANSAXO_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error(transparent)]
  Store(#[from] StoreError),
  #[error("invalid {key}: {message}")]
  Invalid { key: &'static str, message: String },
}

/// JSON key-value file, written through on every change.
#[derive(Clone)]
pub struct SettingsStore {
  path: PathBuf,
  values: Arc<Mutex<Map<String, Value>>>,
}

impl SettingsStore {
  pub fn open(path: &Path) -> Result<Self, StoreError> {
    let values = match std::fs::read_to_string(path) {
      Ok(text) if text.trim().is_empty() => Map::new(),
      Ok(text) => serde_json::from_str(&text)?,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
      Err(e) => return Err(e.into()),
    };
    Ok(Self {
      path: path.to_path_buf(),
      values: Arc::new(Mutex::new(values)),
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn values(&self) -> MutexGuard<'_, Map<String, Value>> {
    self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  pub fn get_string(&self, key: &str) -> Option<String> {
    let values = self.values();
    let s = values.get(key)?.as_str()?.trim();
    if s.is_empty() {
      None
    } else {
      Some(s.to_string())
    }
  }

  pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<(), StoreError> {
    let mut values = self.values();
    values.insert(key.to_string(), value.into());
    self.save(&values)
  }

  pub fn remove(&self, key: &str) -> Result<(), StoreError> {
    let mut values = self.values();
    if values.remove(key).is_none() {
      return Ok(());
    }
    self.save(&values)
  }

  fn save(&self, values: &Map<String, Value>) -> Result<(), StoreError> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(values)?;
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
      use std::os::unix::fs::OpenOptionsExt;
      options.mode(0o600);
    }
    let mut file = options.open(&self.path)?;
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(text.as_bytes())?;
    Ok(())
  }
}

#[async_trait]
impl TokenStore for SettingsStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.get_string(key))
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    SettingsStore::set(self, key, value)
  }

  async fn remove(&self, key: &str) -> Result<(), StoreError> {
    SettingsStore::remove(self, key)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenStorage {
  Keyring,
  #[default]
  File,
  Memory,
}

impl TokenStorage {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Keyring => "keyring",
      Self::File => "file",
      Self::Memory => "memory",
    }
  }
}

impl fmt::Display for TokenStorage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TokenStorage {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "keyring" => Ok(Self::Keyring),
      "file" => Ok(Self::File),
      "memory" => Ok(Self::Memory),
      other => Err(format!("'{other}' (expected keyring, file or memory)")),
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" | "text" => Ok(Self::Pretty),
      "json" => Ok(Self::Json),
      other => Err(format!("'{other}' (expected pretty or json)")),
    }
  }
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
  pub api_url: Option<String>,
  pub token_storage: Option<TokenStorage>,
  pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
  pub api_url: String,
  pub token_storage: TokenStorage,
  pub log_format: LogFormat,
  pub config_dir: PathBuf,
}

fn non_empty(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

fn default_config_dir(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
  if let Some(dir) = non_empty(env(ENV_CONFIG_DIR)) {
    return PathBuf::from(dir);
  }
  if let Some(xdg) = non_empty(env("XDG_CONFIG_HOME")) {
    return PathBuf::from(xdg).join("saxansaxo");
  }
  if let Some(home) = non_empty(env("HOME")) {
    return PathBuf::from(home).join(".config").join("saxansaxo");
  }
  PathBuf::from(".saxansaxo")
}

fn parse_setting<T: FromStr<Err = String>>(
  key: &'static str,
  value: Option<String>,
) -> Result<Option<T>, SettingsError> {
  value
    .map(|v| v.parse::<T>())
    .transpose()
    .map_err(|message| SettingsError::Invalid { key, message })
}

impl Settings {
  /// Defaults, then the settings file, then the environment, then `overrides`.
  pub fn load(overrides: SettingsOverrides) -> Result<Self, SettingsError> {
    Self::resolve(overrides, |key| std::env::var(key).ok())
  }

  pub fn resolve(
    overrides: SettingsOverrides,
    env: impl Fn(&str) -> Option<String>,
  ) -> Result<Self, SettingsError> {
    let config_dir = overrides
      .config_dir
      .clone()
      .unwrap_or_else(|| default_config_dir(&env));
    let file = SettingsStore::open(&config_dir.join(SETTINGS_STORE_FILE))?;

    let api_url = non_empty(overrides.api_url)
      .or_else(|| non_empty(env(ENV_API_URL)))
      .or_else(|| non_empty(env(ENV_API_URL_LEGACY)))
      .or_else(|| file.get_string(KEY_API_URL))
      .map(|url| url.trim_end_matches('/').to_string())
      .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let token_storage = match overrides.token_storage {
      Some(storage) => storage,
      None => parse_setting(
        KEY_TOKEN_STORAGE,
        non_empty(env(ENV_TOKEN_STORAGE)).or_else(|| file.get_string(KEY_TOKEN_STORAGE)),
      )?
      .unwrap_or_default(),
    };

    let log_format: LogFormat = parse_setting(
      KEY_LOG_FORMAT,
      non_empty(env(ENV_LOG_FORMAT)).or_else(|| file.get_string(KEY_LOG_FORMAT)),
    )?
    .unwrap_or_default();

    Ok(Self {
      api_url,
      token_storage,
      log_format,
      config_dir,
    })
  }

  pub fn settings_file(&self) -> PathBuf {
    self.config_dir.join(SETTINGS_STORE_FILE)
  }

  pub fn session_file(&self) -> PathBuf {
    self.config_dir.join(SESSION_STORE_FILE)
  }
}
