//! Result store: discovers and parses eval outputs on disk.
//!
//! The expected layout is `<root>/<model>/<dataset>/`, each dataset directory
//! holding one `*_metrics.json` object and one `*.jsonl` results file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LoadError;
use crate::model::{CaseResult, Metrics, Run};

/// Filename suffix of the per-run metrics artifact.
pub const METRICS_SUFFIX: &str = "_metrics.json";
/// Filename suffix of the per-run line-delimited results artifact.
pub const RESULTS_SUFFIX: &str = ".jsonl";

/// Identity of a run within the corpus.
pub type RunKey = (String, String);

/// Metrics as written by the eval runner. The only place external key
/// names are mapped to [`Metrics`] fields.
#[derive(Debug, Deserialize)]
struct RawMetrics {
    acc: f64,
    num_samples: u64,
    time_use_in_minite: f64,
    empty_samples: u64,
    timeout_samples: u64,
}

impl From<RawMetrics> for Metrics {
    fn from(raw: RawMetrics) -> Self {
        Self {
            accuracy: raw.acc,
            num_samples: raw.num_samples,
            time_minutes: raw.time_use_in_minite,
            empty_samples: raw.empty_samples,
            timeout_samples: raw.timeout_samples,
        }
    }
}

/// The immutable in-memory corpus of runs, keyed by (model, dataset).
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    runs: BTreeMap<RunKey, Run>,
}

impl ResultStore {
    /// Eagerly load every run under `root`.
    ///
    /// Directories missing either artifact are skipped. Any unreadable path or
    /// malformed file aborts the whole load.
    pub fn load(root: &Path) -> Result<Self, LoadError> {
        if !root.is_dir() {
            return Err(LoadError::NotADirectory(root.to_path_buf()));
        }

        let mut runs = BTreeMap::new();
        for model_dir in subdirectories(root)? {
            let model = dir_name(&model_dir);
            for dataset_dir in subdirectories(&model_dir)? {
                let dataset = dir_name(&dataset_dir);
                if let Some(run) = load_run(&model, &dataset, &dataset_dir)? {
                    runs.insert((model.clone(), dataset), run);
                }
            }
        }

        let store = Self { runs };
        tracing::info!(
            runs = store.len(),
            cases = store.total_cases(),
            "loaded eval results from {}",
            root.display()
        );
        Ok(store)
    }

    /// Build a store from already-parsed runs. A later run with the same
    /// (model, dataset) replaces an earlier one.
    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        let runs = runs
            .into_iter()
            .map(|run| ((run.model.clone(), run.dataset.clone()), run))
            .collect();
        Self { runs }
    }

    /// Look up a single run.
    pub fn get(&self, model: &str, dataset: &str) -> Option<&Run> {
        self.runs.get(&(model.to_owned(), dataset.to_owned()))
    }

    /// Iterate runs in (model, dataset) order.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.values()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of case results across all runs.
    pub fn total_cases(&self) -> usize {
        self.runs.values().map(|r| r.results.len()).sum()
    }
}

/// Parse one dataset directory, or `None` if it lacks either artifact.
fn load_run(model: &str, dataset: &str, dir: &Path) -> Result<Option<Run>, LoadError> {
    let files = files_in(dir)?;
    let metrics_path = first_with_suffix(&files, METRICS_SUFFIX, dir);
    let results_path = first_with_suffix(&files, RESULTS_SUFFIX, dir);

    let (Some(metrics_path), Some(results_path)) = (metrics_path, results_path) else {
        tracing::debug!("skipping {}: missing metrics or results file", dir.display());
        return Ok(None);
    };

    Ok(Some(Run {
        model: model.to_owned(),
        dataset: dataset.to_owned(),
        metrics: parse_metrics(metrics_path)?,
        results: parse_results(results_path)?,
    }))
}

/// Parse a metrics artifact into [`Metrics`].
pub fn parse_metrics(path: &Path) -> Result<Metrics, LoadError> {
    let content = read(path)?;
    let raw: RawMetrics = serde_json::from_str(&content).map_err(|source| LoadError::Metrics {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.into())
}

/// Parse a line-delimited results artifact, skipping blank lines.
pub fn parse_results(path: &Path) -> Result<Vec<CaseResult>, LoadError> {
    let content = read(path)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| LoadError::Results {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })
        })
        .collect()
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Entries of `dir`, sorted by path so "first match" is deterministic.
fn entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(io_err))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    Ok(entries(dir)?.into_iter().filter(|p| p.is_dir()).collect())
}

fn files_in(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    Ok(entries(dir)?.into_iter().filter(|p| p.is_file()).collect())
}

/// First file named `*{suffix}`. Hidden files (leading `.`) never match.
fn first_with_suffix<'a>(files: &'a [PathBuf], suffix: &str, dir: &Path) -> Option<&'a Path> {
    let mut matches = files.iter().filter(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| !n.starts_with('.') && n.ends_with(suffix))
    });
    let first = matches.next()?;
    let ignored = matches.count();
    if ignored > 0 {
        tracing::debug!(
            "{}: using {}, ignoring {ignored} other *{suffix} file(s)",
            dir.display(),
            first.display()
        );
    }
    Some(first.as_path())
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
