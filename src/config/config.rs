use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_tmp_path")]
    pub tmp_path: PathBuf,
    #[serde(default = "default_mauve_path")]
    pub mauve_path: String,
    #[serde(default = "default_x2fa_path")]
    pub x2fa_path: String,
    /// Maximum concurrent aligner processes, 0 means one per reference.
    #[serde(default)]
    pub num_threads: usize,
    #[serde(default)]
    pub allow_differences: usize,
}

fn default_tmp_path() -> PathBuf {
    std::env::temp_dir().join("snp-typer")
}

fn default_mauve_path() -> String {
    "progressiveMauve".to_string()
}

fn default_x2fa_path() -> String {
    "x2fa.py".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            tmp_path: default_tmp_path(),
            mauve_path: default_mauve_path(),
            x2fa_path: default_x2fa_path(),
            num_threads: 0,
            allow_differences: 0,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "snp-typer", "snp-typer")
}

impl Config {
    /// Loads `config.toml` from the user's config directory, falling back to defaults.
    pub fn load() -> Self {
        match project_dirs() {
            Some(proj_dirs) => Self::load_from(&proj_dirs.config_dir().join("config.toml")),
            None => Config::default(),
        }
    }

    pub fn load_from(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Config::default();
        }
        match fs::read_to_string(config_path).map(|content| toml::from_str::<Config>(&content)) {
            Ok(Ok(config)) => {
                debug!("Loaded config from {}", config_path.display());
                config
            }
            Ok(Err(e)) => {
                warn!("Ignoring invalid config {}: {}", config_path.display(), e);
                Config::default()
            }
            Err(e) => {
                warn!("Could not read config {}: {}", config_path.display(), e);
                Config::default()
            }
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Database location: configured path, or `snpdb.json` in the user's data directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.db_path {
            return path.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join("snpdb.json"))
            .unwrap_or_else(|| PathBuf::from("snpdb.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_threads = 4\nallow_differences = 1").unwrap();
        let config = Config::load_from(file.path());
        assert_eq!(config.num_threads, 4);
        assert_eq!(config.allow_differences, 1);
        assert_eq!(config.mauve_path, "progressiveMauve");
        assert!(config.db_path.is_none());
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_threads = \"many\"").unwrap();
        let config = Config::load_from(file.path());
        assert_eq!(config.num_threads, 0);
    }

    #[test]
    fn explicit_db_path_wins() {
        let config = Config {
            db_path: Some(PathBuf::from("/data/snps.json")),
            ..Config::default()
        };
        assert_eq!(config.database_path(), PathBuf::from("/data/snps.json"));
    }
}
