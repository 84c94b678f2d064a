use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "bisync.db";

/// Flags that stay fixed for the whole run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncOptions {
    /// Compute and report decisions without touching the store or the filesystem.
    pub dry_run: bool,
    /// Require matching MD5 digests in addition to matching mtime and size.
    pub hashing: bool,
    /// Do not propagate directory modification times.
    pub ignore_directory_attributes: bool,
    /// Suppress "No operation" and "Entering directory" lines.
    pub silent: bool,
    /// Absolute paths excluded from comparison on both sides.
    pub ignore_paths: HashSet<PathBuf>,
    /// Only start the run if this path exists.
    pub require_path: Option<PathBuf>,
}

impl SyncOptions {
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_paths.contains(path)
    }

    /// Resolve ignore paths the same way the roots are resolved, so that symlinked
    /// or relative spellings still match the paths produced by the walker.
    pub fn canonicalize_ignore_paths(&mut self) {
        self.ignore_paths = self
            .ignore_paths
            .drain()
            .map(|p| fs::canonicalize(&p).unwrap_or(p))
            .collect();
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: String,
    pub sync: SyncOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            sync: SyncOptions::default(),
        }
    }
}

/// Load `Config.{toml,yaml,json,...}` from the working directory if present, then
/// overlay `BISYNC__*` environment variables (e.g. `BISYNC__SYNC__HASHING=true`).
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_configuration_from("Config")
}

pub fn load_configuration_from(name: &str) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name(name).required(false))
        .add_source(Environment::with_prefix("BISYNC").separator("__"))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_config_file() {
        let config = load_configuration_from("does/not/exist/Config").unwrap();
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert!(!config.sync.dry_run);
        assert!(!config.sync.hashing);
        assert!(config.sync.ignore_paths.is_empty());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Sync.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "database_path = \"/var/lib/bisync/history.db\"\n\n[sync]\nhashing = true\nignore_paths = [\"/data/cache\"]"
        )
        .unwrap();

        let name = dir.path().join("Sync");
        let config = load_configuration_from(name.to_str().unwrap()).unwrap();
        assert_eq!(config.database_path, "/var/lib/bisync/history.db");
        assert!(config.sync.hashing);
        assert!(!config.sync.silent);
        assert!(config.sync.is_ignored(Path::new("/data/cache")));
    }

    #[test]
    fn test_canonicalize_keeps_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("keep");
        fs::create_dir(&existing).unwrap();

        let mut options = SyncOptions::default();
        options.ignore_paths.insert(existing.clone());
        options.ignore_paths.insert(PathBuf::from("/no/such/path"));
        options.canonicalize_ignore_paths();

        assert!(options.is_ignored(&fs::canonicalize(&existing).unwrap()));
        assert!(options.is_ignored(Path::new("/no/such/path")));
    }
}
