//! The persisted-prediction contract: save, list, delete, replace, and the
//! time-series read path.

use chrono::{DateTime, NaiveDateTime, Utc};
use harmony_core::{JournalNote, Metric, NewNote};
use tracing::{info, warn};

use crate::StoreError;
use crate::client::RestClient;

/// One point of a prediction time series, ascending by time.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub at: DateTime<Utc>,
    pub score: f64,
}

/// Journal note storage in the `Journals` table, scoped by owner.
///
/// This store persists and reads predictions but never computes them:
/// callers run `predict_both` on the body first, so a note is never
/// visible with stale or missing prediction fields.
pub struct NoteStore {
    rest: RestClient,
}

impl NoteStore {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            rest: RestClient::new(base_url, api_key),
        }
    }

    fn url(&self) -> String {
        self.rest.table_url("Journals")
    }

    /// Create one note and return the stored row, id and all.
    pub async fn save_note(&self, note: &NewNote) -> Result<JournalNote, StoreError> {
        let created: Vec<JournalNote> = self.rest.post_json(&self.url(), note).await?;
        let note = created.into_iter().next().ok_or(StoreError::NoRows)?;
        info!(id = note.id, user_id = note.user_id, "saved note");
        Ok(note)
    }

    /// All notes for one owner, newest first.
    pub async fn list_notes(&self, user_id: i64) -> Result<Vec<JournalNote>, StoreError> {
        let url = format!("{}?user_id=eq.{user_id}&order=date_time.desc", self.url());
        let notes: Vec<JournalNote> = self.rest.get_json(&url).await?;
        info!(user_id, count = notes.len(), "listed notes");
        Ok(notes)
    }

    /// Remove one note by id.
    pub async fn delete_note(&self, id: i64) -> Result<(), StoreError> {
        let url = format!("{}?id=eq.{id}", self.url());
        self.rest.delete(&url).await?;
        info!(id, "deleted note");
        Ok(())
    }

    /// Update as delete + recreate.
    ///
    /// The replacement's scores must already have been computed from its
    /// body; this method only sequences the two storage operations.
    pub async fn replace_note(
        &self,
        id: i64,
        note: &NewNote,
    ) -> Result<JournalNote, StoreError> {
        self.delete_note(id).await?;
        self.save_note(note).await
    }

    /// Ordered `(timestamp, score)` pairs for one metric, ascending by
    /// time. A user with no notes yields an empty series.
    pub async fn time_series(
        &self,
        user_id: i64,
        metric: Metric,
    ) -> Result<Vec<SeriesPoint>, StoreError> {
        let column = metric.column();
        let url = format!(
            "{}?user_id=eq.{user_id}&select=date_time,{column}&order=date_time.asc",
            self.url()
        );
        let rows: Vec<serde_json::Value> = self.rest.get_json(&url).await?;
        let points = parse_series(&rows, column);
        info!(user_id, %metric, count = points.len(), "read prediction series");
        Ok(points)
    }
}

/// Extract series points from projected rows, skipping malformed ones.
fn parse_series(rows: &[serde_json::Value], column: &str) -> Vec<SeriesPoint> {
    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(ts) = row.get("date_time").and_then(|v| v.as_str()) else {
            warn!("series row missing date_time, skipping");
            continue;
        };
        let Some(score) = row.get(column).and_then(|v| v.as_f64()) else {
            warn!(column, "series row missing score, skipping");
            continue;
        };
        match parse_timestamp(ts) {
            Some(at) => points.push(SeriesPoint { at, score }),
            None => warn!(timestamp = ts, "unparseable timestamp in series, skipping"),
        }
    }
    points
}

/// Timestamps arrive as RFC 3339 for `timestamptz` columns, or naive ISO
/// 8601 for plain `timestamp` columns; the latter are taken as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_timestamp_rfc3339_and_naive() {
        let tz = parse_timestamp("2026-08-08T09:30:00+02:00").unwrap();
        assert_eq!(tz.to_rfc3339(), "2026-08-08T07:30:00+00:00");

        let naive = parse_timestamp("2026-08-08T09:30:00.123456").unwrap();
        assert_eq!(naive.timestamp_subsec_micros(), 123456);

        assert!(parse_timestamp("yesterday-ish").is_none());
    }

    #[test]
    fn series_preserves_row_order() {
        let rows = vec![
            json!({"date_time": "2026-08-01T08:00:00+00:00", "pred_depression": 12.5}),
            json!({"date_time": "2026-08-02T08:00:00+00:00", "pred_depression": 61.24}),
            json!({"date_time": "2026-08-03T08:00:00+00:00", "pred_depression": 40.0}),
        ];
        let points = parse_series(&rows, "pred_depression");
        assert_eq!(points.len(), 3);
        assert!(points.windows(2).all(|w| w[0].at < w[1].at));
        assert_eq!(points[1].score, 61.24);
    }

    #[test]
    fn series_skips_malformed_rows() {
        let rows = vec![
            json!({"date_time": "not a timestamp", "pred_schizophrenia": 1.0}),
            json!({"pred_schizophrenia": 2.0}),
            json!({"date_time": "2026-08-02T08:00:00+00:00"}),
            json!({"date_time": "2026-08-02T08:00:00+00:00", "pred_schizophrenia": 3.0}),
        ];
        let points = parse_series(&rows, "pred_schizophrenia");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].score, 3.0);
    }

    #[test]
    fn empty_series_is_valid() {
        assert!(parse_series(&[], "pred_depression").is_empty());
    }
}
