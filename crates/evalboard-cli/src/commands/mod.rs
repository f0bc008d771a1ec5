pub mod cases;
pub mod compare;
pub mod facets;
pub mod init;
pub mod summary;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use evalboard_core::config::{load_config_from, EvalboardConfig};
use evalboard_core::{QueryEngine, ResultStore};

/// Everything a query command needs: the loaded corpus and the config.
pub struct Context {
    pub engine: QueryEngine,
    pub config: EvalboardConfig,
}

/// Load config and the full corpus. Any load failure is fatal.
pub fn load_engine(outputs: Option<PathBuf>, config_path: Option<&Path>) -> Result<Context> {
    let mut config = load_config_from(config_path)?;
    if let Some(dir) = outputs {
        config.outputs_dir = dir;
    }

    let store = ResultStore::load(&config.outputs_dir).with_context(|| {
        format!(
            "failed to load eval results from {}",
            config.outputs_dir.display()
        )
    })?;

    Ok(Context {
        engine: QueryEngine::new(Arc::new(store)),
        config,
    })
}
