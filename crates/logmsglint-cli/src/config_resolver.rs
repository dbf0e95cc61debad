//! Configuration file lookup and loading.
//!
//! The configuration file is chosen in this order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `logmsglint.toml` or `.logmsglint.toml` in the checked directory or one
//!    of its ancestors, up to the enclosing Go module (`go.mod`) or
//!    repository (`.git`) root
//! 3. `$LOGMSGLINT_CONFIG_DIR/config.toml` or `~/.logmsglint/config.toml`
//! 4. built-in defaults

use anyhow::{Context, Result};
use logmsglint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the checked sources.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid configuration.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        } else {
            tracing::debug!("Using config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Config file names looked for in project directories, in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["logmsglint.toml", ".logmsglint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Entries that mark the top of a project; the search stops there.
const PROJECT_ROOT_MARKERS: &[&str] = &["go.mod", ".git"];

/// Resolves the configuration for a run over `target`.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(target, explicit, global_config_dir())
}

fn resolve_inner(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(target) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.is_file() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

fn find_project_config(target: &Path) -> Option<PathBuf> {
    let start = if target.is_file() {
        target.parent().unwrap_or(target)
    } else {
        target
    };
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if PROJECT_ROOT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            break;
        }
    }
    None
}

/// Returns the global config directory: `$LOGMSGLINT_CONFIG_DIR`, else
/// `~/.logmsglint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("LOGMSGLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".logmsglint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A temporary Go module root.
    fn module() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("go.mod"), "module example.com/app\n").unwrap();
        tmp
    }

    fn canonical(path: PathBuf) -> PathBuf {
        path.canonicalize().unwrap()
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let tmp = module();
        fs::write(tmp.path().join("logmsglint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_config_in_target_dir() {
        let tmp = module();
        fs::write(tmp.path().join(".logmsglint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(tmp.path().join(".logmsglint.toml")))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = module();
        fs::write(tmp.path().join("logmsglint.toml"), "").unwrap();
        fs::write(tmp.path().join(".logmsglint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(tmp.path().join("logmsglint.toml")))
        );
    }

    #[test]
    fn project_config_found_in_ancestor() {
        let tmp = module();
        fs::write(tmp.path().join("logmsglint.toml"), "").unwrap();
        let pkg = tmp.path().join("internal").join("server");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("server.go"), "package server\n").unwrap();

        assert_eq!(
            resolve_inner(&pkg, None, None),
            ConfigSource::Project(canonical(tmp.path().join("logmsglint.toml")))
        );
        assert_eq!(
            resolve_inner(&pkg.join("server.go"), None, None),
            ConfigSource::Project(canonical(tmp.path().join("logmsglint.toml")))
        );
    }

    #[test]
    fn search_stops_at_module_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("logmsglint.toml"), "").unwrap();
        let inner = outer.path().join("svc");
        fs::create_dir(&inner).unwrap();
        fs::write(inner.join("go.mod"), "module svc\n").unwrap();

        assert_eq!(resolve_inner(&inner, None, None), ConfigSource::Default);
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = module();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn global_dir_without_config_file_gives_defaults() {
        let project = module();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn load_defaults() {
        let config = ConfigSource::Default.load().unwrap();
        assert!(config.settings.sensitive_patterns.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let tmp = module();
        let path = tmp.path().join("logmsglint.toml");
        fs::write(
            &path,
            "fail_on = \"error\"\n[settings]\nsensitive-patterns = [\"ssn\"]\n",
        )
        .unwrap();

        let config = ConfigSource::Project(path).load().unwrap();
        assert_eq!(config.settings.sensitive_patterns, vec!["ssn".to_string()]);
        assert_eq!(config.fail_threshold(), logmsglint_core::Severity::Error);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/logmsglint.toml"))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
