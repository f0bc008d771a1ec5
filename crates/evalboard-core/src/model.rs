//! Core data model types for evalboard.
//!
//! A [`Run`] is one model's evaluation on one dataset: its aggregate
//! [`Metrics`] plus every [`CaseResult`] in file order.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Aggregate statistics for a single run.
///
/// Built from the runner's metrics file by the result store; not
/// deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Fraction of samples answered correctly.
    pub accuracy: f64,
    /// Number of evaluated samples.
    pub num_samples: u64,
    /// Wall-clock evaluation time in minutes.
    pub time_minutes: f64,
    /// Samples where the model produced no answer.
    pub empty_samples: u64,
    /// Samples that hit the execution timeout.
    pub timeout_samples: u64,
}

/// One evaluated question instance.
///
/// The full source object is kept verbatim so extra keys (generated answer,
/// ground truth, ...) pass through unmodified. The fields the query engine
/// filters on are read once when the record is parsed; a field that is
/// missing or has the wrong type reads as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct CaseResult {
    question: Option<String>,
    correct: Option<bool>,
    level: Option<i64>,
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for CaseResult {
    fn from(fields: Map<String, Value>) -> Self {
        let question = fields
            .get("question")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let correct = fields
            .get("score")
            .and_then(Value::as_array)
            .and_then(|score| score.first())
            .and_then(Value::as_bool);
        let level = fields.get("level").and_then(Value::as_i64);

        Self {
            question,
            correct,
            level,
            fields,
        }
    }
}

impl CaseResult {
    /// The question text, if present.
    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// The correctness flag (first element of `score`), if readable.
    pub fn is_correct(&self) -> Option<bool> {
        self.correct
    }

    /// The difficulty tier, for datasets annotated with one.
    pub fn level(&self) -> Option<i64> {
        self.level
    }

    /// All fields of the source record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Serialize for CaseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// One model's evaluation on one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub model: String,
    pub dataset: String,
    pub metrics: Metrics,
    /// Case results in file line order.
    pub results: Vec<CaseResult>,
}

impl Run {
    /// Flatten this run's metrics into a summary record.
    pub fn summary(&self) -> SummaryRecord {
        SummaryRecord {
            model: self.model.clone(),
            dataset: self.dataset.clone(),
            accuracy: self.metrics.accuracy,
            num_samples: self.metrics.num_samples,
            time_minutes: self.metrics.time_minutes,
            empty_samples: self.metrics.empty_samples,
            timeout_samples: self.metrics.timeout_samples,
        }
    }
}

/// Metrics of one run plus the (model, dataset) pair identifying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub model: String,
    pub dataset: String,
    pub accuracy: f64,
    pub num_samples: u64,
    pub time_minutes: f64,
    pub empty_samples: u64,
    pub timeout_samples: u64,
}

/// A case result annotated with the run it belongs to.
///
/// Borrows from the corpus; serializes as the source object with `model`
/// and `dataset` keys set to the owning run's names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseRecord<'a> {
    pub model: &'a str,
    pub dataset: &'a str,
    pub case: &'a CaseResult,
}

impl Serialize for CaseRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.case.fields();
        let shadowed = fields
            .keys()
            .filter(|k| *k == "model" || *k == "dataset")
            .count();
        let mut map = serializer.serialize_map(Some(fields.len() - shadowed + 2))?;
        for (key, value) in fields {
            if key != "model" && key != "dataset" {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("model", self.model)?;
        map.serialize_entry("dataset", self.dataset)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case(value: Value) -> CaseResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn case_result_reads_known_fields() {
        let c = case(json!({
            "question": "2+2=?",
            "score": [true, "extra"],
            "level": 3,
            "pred": ["4"],
        }));
        assert_eq!(c.question(), Some("2+2=?"));
        assert_eq!(c.is_correct(), Some(true));
        assert_eq!(c.level(), Some(3));
        assert_eq!(c.fields()["pred"], json!(["4"]));
    }

    #[test]
    fn case_result_tolerates_missing_and_mistyped_fields() {
        let c = case(json!({ "score": [], "level": "hard" }));
        assert_eq!(c.question(), None);
        assert_eq!(c.is_correct(), None);
        assert_eq!(c.level(), None);
    }

    #[test]
    fn case_result_rejects_non_objects() {
        assert!(serde_json::from_str::<CaseResult>("[1, 2]").is_err());
    }

    #[test]
    fn case_record_sets_run_identity() {
        let c = case(json!({
            "question": "q",
            "score": [false],
            "model": "stale",
            "gt": "7",
        }));
        let record = CaseRecord {
            model: "qwen-7b",
            dataset: "math500",
            case: &c,
        };
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["model"], "qwen-7b");
        assert_eq!(value["dataset"], "math500");
        assert_eq!(value["gt"], "7");
        assert_eq!(value.as_object().unwrap().len(), 5);
        // Stored record is untouched.
        assert_eq!(c.fields()["model"], "stale");
    }

    #[test]
    fn metrics_serialize_with_semantic_names() {
        let metrics = Metrics {
            accuracy: 0.5,
            num_samples: 10,
            time_minutes: 2.0,
            empty_samples: 0,
            timeout_samples: 1,
        };
        let value = serde_json::to_value(&metrics).unwrap();
        assert_eq!(value["accuracy"], 0.5);
        assert_eq!(value["time_minutes"], 2.0);
        assert!(value.get("acc").is_none());
        assert!(value.get("time_use_in_minite").is_none());
    }

    #[test]
    fn run_summary_flattens_metrics() {
        let run = Run {
            model: "gpt4".into(),
            dataset: "gsm8k".into(),
            metrics: Metrics {
                accuracy: 0.8,
                num_samples: 100,
                time_minutes: 12.5,
                empty_samples: 1,
                timeout_samples: 0,
            },
            results: vec![],
        };
        let summary = run.summary();
        assert_eq!(summary.model, "gpt4");
        assert_eq!(summary.accuracy, 0.8);
        assert_eq!(summary.time_minutes, 12.5);
        assert_eq!(summary.empty_samples, 1);
    }
}
