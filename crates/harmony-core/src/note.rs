//! Journal note records as stored in the `Journals` table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A journal note with its prediction, as returned by the note store.
///
/// `pred_depression` and `pred_schizophrenia` are percentages in [0, 100]
/// rounded to two decimals, always produced by one `predict_both` call on
/// `body` at save time. `prediction_message` is the composed display
/// message from that same call, stored redundantly so history reflects the
/// model version active when the note was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalNote {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    /// ISO 8601 timestamp string, assigned at creation, immutable.
    pub date_time: String,
    pub pred_depression: f64,
    pub pred_schizophrenia: f64,
    pub prediction_message: String,
}

/// A note about to be created. The store assigns `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub user_id: i64,
    pub title: String,
    pub body: String,
    /// ISO 8601 timestamp string.
    pub date_time: String,
    pub pred_depression: f64,
    pub pred_schizophrenia: f64,
    pub prediction_message: String,
}

/// Which prediction column a time-series read projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Depression,
    Schizophrenia,
}

impl Metric {
    /// Column name in the `Journals` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Depression => "pred_depression",
            Self::Schizophrenia => "pred_schizophrenia",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Depression => write!(f, "Depression"),
            Self::Schizophrenia => write!(f, "Schizophrenia"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_json_roundtrip() {
        let note = JournalNote {
            id: 42,
            user_id: 7,
            title: "Tuesday".into(),
            body: "Slept badly, long day at work.".into(),
            date_time: "2026-08-08T09:30:00+00:00".into(),
            pred_depression: 61.24,
            pred_schizophrenia: 12.5,
            prediction_message: "87.5 % confident Not Schizophrenic and 61.24 % confident Depressed"
                .into(),
        };
        let json = serde_json::to_string(&note).unwrap();
        let parsed: JournalNote = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 42);
        assert_eq!(parsed.user_id, 7);
        assert_eq!(parsed.pred_depression, 61.24);
        assert_eq!(parsed.prediction_message, note.prediction_message);
    }

    #[test]
    fn new_note_serializes_without_id() {
        let note = NewNote {
            user_id: 7,
            title: "t".into(),
            body: "b".into(),
            date_time: "2026-08-08T09:30:00+00:00".into(),
            pred_depression: 0.0,
            pred_schizophrenia: 0.0,
            prediction_message: String::new(),
        };
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["user_id"], 7);
    }

    #[test]
    fn metric_columns() {
        assert_eq!(Metric::Depression.column(), "pred_depression");
        assert_eq!(Metric::Schizophrenia.column(), "pred_schizophrenia");
    }

    #[test]
    fn metric_display() {
        assert_eq!(Metric::Depression.to_string(), "Depression");
        assert_eq!(Metric::Schizophrenia.to_string(), "Schizophrenia");
    }
}
