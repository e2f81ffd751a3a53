use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Parsed `config.toml`. Every section and key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorklogConfig {
    pub store: StoreSection,
    pub ui: UiSection,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// Entry database file. Relative paths resolve against the config file's directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiSection {
    pub clear_screen: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self { clear_screen: true }
    }
}

/// File name of the entry database inside the data directory.
pub const DB_FILE_NAME: &str = "worklog.db";

/// `WORKLOG_HOME`, when set and non-empty, holds both `config.toml` and the
/// default database instead of the platform config and data directories.
fn worklog_home() -> Option<PathBuf> {
    std::env::var_os("WORKLOG_HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Option<PathBuf> {
    worklog_home().or_else(|| dirs::config_dir().map(|d| d.join("worklog")))
}

/// Directory holding the default entry database.
pub fn data_dir() -> Option<PathBuf> {
    worklog_home().or_else(|| dirs::data_local_dir().map(|d| d.join("worklog")))
}

/// Default entry database location when neither `--db` nor `[store] path` is set.
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join(DB_FILE_NAME))
}

/// Location of the user config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load the user config from its default location.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load() -> anyhow::Result<WorklogConfig> {
    config_path().map_or_else(|| Ok(WorklogConfig::default()), |p| load_from(&p))
}

/// Load config from `path`. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or contains invalid TOML.
pub fn load_from(path: &Path) -> anyhow::Result<WorklogConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(WorklogConfig::default());
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read config file: {}", path.display())));
        }
    };
    let mut config: WorklogConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    if let Some(db) = &config.store.path
        && db.is_relative()
        && let Some(dir) = path.parent()
    {
        config.store.path = Some(dir.join(db));
    }
    Ok(config)
}

impl WorklogConfig {
    /// Resolve the entry database path. Priority:
    /// 1. `cli_override` (`--db` / `WORKLOG_DB_PATH`)
    /// 2. `[store] path`
    /// 3. [`default_db_path`]
    pub fn db_path(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.store.path.clone())
            .or_else(default_db_path)
    }
}
