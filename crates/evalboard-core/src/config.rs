//! evalboard configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_PER_PAGE;

/// Top-level evalboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalboardConfig {
    /// Root of the `<model>/<dataset>/` eval output tree.
    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: PathBuf,
    /// Page size for case listings when the request doesn't give one.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_outputs_dir() -> PathBuf {
    PathBuf::from("simplelr_math_eval/outputs")
}
fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for EvalboardConfig {
    fn default() -> Self {
        Self {
            outputs_dir: default_outputs_dir(),
            per_page: default_per_page(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again. Unset variables become empty.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `evalboard.toml` in the current directory
/// 2. `~/.config/evalboard/config.toml`
///
/// `EVALBOARD_OUTPUTS_DIR` overrides `outputs_dir`.
pub fn load_config() -> Result<EvalboardConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EvalboardConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("evalboard.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => EvalboardConfig::default(),
    };

    if let Ok(dir) = std::env::var("EVALBOARD_OUTPUTS_DIR") {
        config.outputs_dir = PathBuf::from(dir);
    }
    config.outputs_dir = PathBuf::from(resolve_env_vars(&config.outputs_dir.to_string_lossy()));

    anyhow::ensure!(config.per_page >= 1, "per_page must be at least 1");

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<EvalboardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<EvalboardConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("evalboard"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EVALBOARD_TEST_VAR", "runs");
        assert_eq!(resolve_env_vars("${_EVALBOARD_TEST_VAR}"), "runs");
        assert_eq!(
            resolve_env_vars("/data/${_EVALBOARD_TEST_VAR}/outputs"),
            "/data/runs/outputs"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        assert_eq!(
            resolve_env_vars("a/${_EVALBOARD_TEST_VAR}/${unterminated"),
            "a/runs/${unterminated"
        );
        std::env::remove_var("_EVALBOARD_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_reexpand_values() {
        std::env::set_var("_EVALBOARD_SELF_REF", "${_EVALBOARD_SELF_REF}");
        std::env::set_var("_EVALBOARD_NESTED", "${_EVALBOARD_OTHER}/x");
        std::env::set_var("_EVALBOARD_OTHER", "expanded");
        assert_eq!(
            resolve_env_vars("/x/${_EVALBOARD_SELF_REF}"),
            "/x/${_EVALBOARD_SELF_REF}"
        );
        assert_eq!(
            resolve_env_vars("${_EVALBOARD_NESTED}/${_EVALBOARD_OTHER}"),
            "${_EVALBOARD_OTHER}/x/expanded"
        );
        std::env::remove_var("_EVALBOARD_SELF_REF");
        std::env::remove_var("_EVALBOARD_NESTED");
        std::env::remove_var("_EVALBOARD_OTHER");
    }

    #[test]
    fn default_config() {
        let config = EvalboardConfig::default();
        assert_eq!(
            config.outputs_dir,
            PathBuf::from("simplelr_math_eval/outputs")
        );
        assert_eq!(config.per_page, 20);
    }

    #[test]
    fn parse_partial_config() {
        let config: EvalboardConfig = toml::from_str("per_page = 50\n").unwrap();
        assert_eq!(config.per_page, 50);
        assert_eq!(config.outputs_dir, default_outputs_dir());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("evalboard.toml");
        let err = load_config_from(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evalboard.toml");
        std::fs::write(&path, "outputs_dir = \"/srv/eval\"\nper_page = 5\n").unwrap();
        let config = parse_config_file(&path).unwrap();
        assert_eq!(config.outputs_dir, PathBuf::from("/srv/eval"));
        assert_eq!(config.per_page, 5);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evalboard.toml");
        std::fs::write(&path, "per_page = \"many\"").unwrap();
        let err = parse_config_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }
}
