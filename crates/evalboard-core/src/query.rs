//! Read-only queries over a loaded [`ResultStore`].

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::model::{CaseRecord, CaseResult, Run, SummaryRecord};
use crate::store::ResultStore;

/// Predicates for [`QueryEngine::list_details`]. Every supplied predicate
/// must hold; `None` means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFilter {
    /// Exact model name.
    pub model: Option<String>,
    /// Exact dataset name.
    pub dataset: Option<String>,
    /// Keep only correct (`true`) or only incorrect (`false`) cases.
    pub correct: Option<bool>,
    /// Exact difficulty level. Cases without a level never match.
    pub level: Option<i64>,
    /// Case-insensitive substring of the question.
    pub question_contains: Option<String>,
}

impl DetailFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    pub fn correct(mut self, correct: bool) -> Self {
        self.correct = Some(correct);
        self
    }

    pub fn level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    pub fn question_contains(mut self, needle: impl Into<String>) -> Self {
        self.question_contains = Some(needle.into());
        self
    }

    fn matches_run(&self, run: &Run) -> bool {
        if let Some(model) = &self.model {
            if *model != run.model {
                return false;
            }
        }
        if let Some(dataset) = &self.dataset {
            if *dataset != run.dataset {
                return false;
            }
        }
        true
    }
}

/// Compiled form of the per-case predicates.
struct CaseMatcher {
    correct: Option<bool>,
    level: Option<i64>,
    needle: Option<String>,
}

impl CaseMatcher {
    fn new(filter: &DetailFilter) -> Self {
        Self {
            correct: filter.correct,
            level: filter.level,
            needle: filter.question_contains.as_ref().map(|n| n.to_lowercase()),
        }
    }

    fn matches(&self, case: &CaseResult) -> bool {
        if let Some(want) = self.correct {
            if case.is_correct() != Some(want) {
                return false;
            }
        }
        if let Some(want) = self.level {
            if case.level() != Some(want) {
                return false;
            }
        }
        if let Some(needle) = &self.needle {
            match case.question() {
                Some(q) if q.to_lowercase().contains(needle.as_str()) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Summary records of every model evaluated on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetGroup {
    pub dataset: String,
    pub runs: Vec<SummaryRecord>,
}

/// Summary records grouped by dataset, in first-appearance order.
///
/// Serializes as a JSON object mapping dataset name to its records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    groups: Vec<DatasetGroup>,
}

impl Comparison {
    fn from_summaries(summaries: Vec<SummaryRecord>) -> Self {
        let mut groups: Vec<DatasetGroup> = Vec::new();
        for record in summaries {
            match groups.iter_mut().find(|g| g.dataset == record.dataset) {
                Some(group) => group.runs.push(record),
                None => groups.push(DatasetGroup {
                    dataset: record.dataset.clone(),
                    runs: vec![record],
                }),
            }
        }
        Self { groups }
    }

    /// Records for one dataset.
    pub fn get(&self, dataset: &str) -> Option<&[SummaryRecord]> {
        self.groups
            .iter()
            .find(|g| g.dataset == dataset)
            .map(|g| g.runs.as_slice())
    }

    pub fn groups(&self) -> &[DatasetGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for Comparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.dataset, &group.runs)?;
        }
        map.end()
    }
}

/// Distinct values available for filtering, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub models: Vec<String>,
    pub datasets: Vec<String>,
    pub levels: Vec<i64>,
}

/// Answers read queries over a shared, frozen corpus.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: Arc<ResultStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<ResultStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// One summary record per run, ordered by (model, dataset).
    pub fn summarize(&self) -> Vec<SummaryRecord> {
        self.store.runs().map(Run::summary).collect()
    }

    /// Every case passing `filter`, run by run, in stored order within a run.
    pub fn list_details(&self, filter: &DetailFilter) -> Vec<CaseRecord<'_>> {
        let matcher = &CaseMatcher::new(filter);
        self.store
            .runs()
            .filter(|run| filter.matches_run(run))
            .flat_map(move |run| {
                run.results
                    .iter()
                    .filter(move |case| matcher.matches(case))
                    .map(move |case| CaseRecord {
                        model: &run.model,
                        dataset: &run.dataset,
                        case,
                    })
            })
            .collect()
    }

    /// Summary records grouped by dataset.
    pub fn compare_by_dataset(&self) -> Comparison {
        Comparison::from_summaries(self.summarize())
    }

    /// Distinct models, datasets and difficulty levels in the corpus.
    pub fn facets(&self) -> Facets {
        let mut models = BTreeSet::new();
        let mut datasets = BTreeSet::new();
        let mut levels = BTreeSet::new();
        for run in self.store.runs() {
            models.insert(run.model.clone());
            datasets.insert(run.dataset.clone());
            levels.extend(run.results.iter().filter_map(CaseResult::level));
        }
        Facets {
            models: models.into_iter().collect(),
            datasets: datasets.into_iter().collect(),
            levels: levels.into_iter().collect(),
        }
    }
}
