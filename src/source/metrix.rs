//! Reader for Disc Golf Metrix JSON exports
//!
//! Three documents feed a draft:
//! - a competition result (`Competition.Results[]` with `UserID`, `Name`, `Sum`)
//! - a course (`RatingValue1/RatingResult1/RatingValue2/RatingResult2`, either
//!   on the course object or on its first `Tracks[]` entry)
//! - a rating list (`players[]` with `Name`, `Rating`)
//!
//! Any document may be wrapped in a CORS-proxy envelope whose `contents`
//! field holds the JSON as a string. Numbers are accepted as JSON numbers or
//! numeric strings. Shapes that cannot be recognized fail closed: a course
//! without usable anchors yields `None` rather than an error.

use crate::error::{DraftError, Result};
use crate::source::provider::ParticipantSource;
use crate::types::{ParticipantEntry, RatingAnchors};
use crate::utils::known_rating;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Round results parsed from a competition export
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionExport {
    pub entries: Vec<ParticipantEntry>,
    pub course_id: Option<String>,
}

fn source_error(message: impl Into<String>) -> anyhow::Error {
    DraftError::SourceError {
        message: message.into(),
    }
    .into()
}

/// Parse a document, unwrapping a proxy envelope if present
fn parse_document(json: &str) -> Result<Value> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| source_error(format!("Malformed JSON: {}", e)))?;

    match value.get("contents").and_then(Value::as_str) {
        Some(contents) => serde_json::from_str(contents)
            .map_err(|e| source_error(format!("Malformed proxied JSON: {}", e))),
        None => Ok(value),
    }
}

/// Read a number that may be encoded as a string; empty and null are absent
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn as_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Parse a competition result export into round entries.
/// Players without a numeric `Sum` did not finish and are dropped.
pub fn parse_competition(json: &str) -> Result<CompetitionExport> {
    let document = parse_document(json)?;
    let competition = document
        .get("Competition")
        .filter(|c| c.is_object())
        .ok_or_else(|| source_error("Invalid competition data"))?;
    let results = competition
        .get("Results")
        .and_then(Value::as_array)
        .ok_or_else(|| source_error("No results found in this competition"))?;

    let mut entries = Vec::with_capacity(results.len());
    for result in results {
        let Some(name) = result.get("Name").and_then(Value::as_str) else {
            warn!("Skipping result without a name: {}", result);
            continue;
        };
        let Some(raw_score) = result.get("Sum").and_then(as_number) else {
            debug!("Skipping '{}' without a total score", name);
            continue;
        };
        let id = result
            .get("UserID")
            .and_then(as_identifier)
            .unwrap_or_else(|| name.to_string());

        entries.push(ParticipantEntry {
            id,
            name: name.to_string(),
            raw_score,
        });
    }

    Ok(CompetitionExport {
        entries,
        course_id: competition.get("CourseID").and_then(as_identifier),
    })
}

/// Locate the object carrying the rating parameters
fn anchor_holder(document: &Value) -> Option<&Value> {
    let course = document.get("course").unwrap_or(document);
    let has_params = |v: &Value| {
        v.get("RatingValue1").and_then(as_number).is_some()
            && v.get("RatingResult1").and_then(as_number).is_some()
    };

    if has_params(course) {
        return Some(course);
    }
    course
        .get("Tracks")
        .and_then(|tracks| tracks.get(0))
        .filter(|track| track.get("RatingValue1").and_then(as_number).is_some())
}

/// Parse a course export into rating anchors. Zero values are treated as
/// missing, matching how the rating service leaves parameters unset.
pub fn parse_course_anchors(json: &str) -> Result<Option<RatingAnchors>> {
    let document = parse_document(json)?;
    let Some(holder) = anchor_holder(&document) else {
        debug!("Course data carries no rating parameters");
        return Ok(None);
    };

    let field = |key: &str| holder.get(key).and_then(as_number).filter(|v| *v != 0.0);
    let anchors = match (
        field("RatingValue1"),
        field("RatingResult1"),
        field("RatingValue2"),
        field("RatingResult2"),
    ) {
        (Some(rating_low), Some(result_low), Some(rating_high), Some(result_high)) => Some(
            RatingAnchors::new(rating_low, result_low, rating_high, result_high),
        ),
        _ => {
            debug!("Course rating parameters are incomplete");
            None
        }
    };

    Ok(anchors)
}

/// Parse a rating list into prior ratings by exact name. Unrated players
/// (rating 0) are left out; for duplicate names the first entry wins.
pub fn parse_rating_list(json: &str) -> Result<HashMap<String, f64>> {
    let document = parse_document(json)?;
    let players = document
        .get("players")
        .and_then(Value::as_array)
        .ok_or_else(|| source_error("Rating list has no players"))?;

    let mut ratings = HashMap::new();
    for player in players {
        let Some(name) = player.get("Name").and_then(Value::as_str) else {
            continue;
        };
        if let Some(rating) = player
            .get("Rating")
            .and_then(as_number)
            .and_then(known_rating)
        {
            ratings.entry(name.to_string()).or_insert(rating);
        }
    }

    Ok(ratings)
}

/// Participant source backed by exported JSON files
#[derive(Debug, Clone)]
pub struct MetrixExportSource {
    results_path: PathBuf,
    course_path: Option<PathBuf>,
    ratings_path: Option<PathBuf>,
}

impl MetrixExportSource {
    pub fn new(results_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            course_path: None,
            ratings_path: None,
        }
    }

    pub fn with_course(mut self, path: impl Into<PathBuf>) -> Self {
        self.course_path = Some(path.into());
        self
    }

    pub fn with_ratings(mut self, path: impl Into<PathBuf>) -> Self {
        self.ratings_path = Some(path.into());
        self
    }

    async fn read(path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| source_error(format!("Failed to read {}: {}", path.display(), e)))
    }
}

#[async_trait]
impl ParticipantSource for MetrixExportSource {
    async fn fetch_entries(&self) -> Result<Vec<ParticipantEntry>> {
        let export = parse_competition(&Self::read(&self.results_path).await?)?;
        if let Some(course_id) = &export.course_id {
            debug!("Competition was played on course {}", course_id);
        }
        Ok(export.entries)
    }

    async fn fetch_anchors(&self) -> Result<Option<RatingAnchors>> {
        match &self.course_path {
            Some(path) => parse_course_anchors(&Self::read(path).await?),
            None => Ok(None),
        }
    }

    async fn fetch_baseline_ratings(&self) -> Result<HashMap<String, f64>> {
        match &self.ratings_path {
            Some(path) => parse_rating_list(&Self::read(path).await?),
            None => Ok(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COMPETITION: &str = r#"{
        "Competition": {
            "Name": "Tuesday Doubles",
            "CourseID": 4471,
            "Results": [
                {"UserID": "101", "Name": "Ada Lovelace", "Sum": 52},
                {"UserID": 102, "Name": "Bo Diddley", "Sum": "55"},
                {"UserID": "103", "Name": "Cy Young", "Sum": null},
                {"UserID": "104", "Name": "Di Prince", "Sum": ""},
                {"Name": "Ed Walk-on", "Sum": 60}
            ]
        }
    }"#;

    #[test]
    fn test_parse_competition() {
        let export = parse_competition(COMPETITION).unwrap();

        assert_eq!(export.course_id.as_deref(), Some("4471"));
        let names: Vec<_> = export.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ada Lovelace", "Bo Diddley", "Ed Walk-on"]);
        assert_eq!(export.entries[0].id, "101");
        assert_eq!(export.entries[1].id, "102");
        assert_eq!(export.entries[1].raw_score, 55.0);
        assert_eq!(export.entries[2].id, "Ed Walk-on");
    }

    #[test]
    fn test_parse_proxied_competition() {
        let wrapped = serde_json::json!({ "contents": COMPETITION }).to_string();
        let export = parse_competition(&wrapped).unwrap();
        assert_eq!(export.entries.len(), 3);
    }

    #[test]
    fn test_invalid_competition_shapes() {
        assert!(parse_competition(r#"{"Errors": ["not found"]}"#).is_err());
        assert!(parse_competition(r#"{"Competition": {"Name": "x"}}"#).is_err());
        assert!(parse_competition("not json").is_err());
    }

    #[test]
    fn test_anchors_on_course_root() {
        let json = r#"{"course": {"RatingValue1": "950", "RatingResult1": "54",
                       "RatingValue2": 1000, "RatingResult2": 50}}"#;
        let anchors = parse_course_anchors(json).unwrap().unwrap();
        assert_eq!(anchors, RatingAnchors::new(950.0, 54.0, 1000.0, 50.0));
    }

    #[test]
    fn test_anchors_on_first_track() {
        let json = r#"{"Name": "Riverside", "Tracks": [
                        {"RatingValue1": 940, "RatingResult1": 57,
                         "RatingValue2": 1010, "RatingResult2": 49},
                        {"RatingValue1": 1, "RatingResult1": 1,
                         "RatingValue2": 2, "RatingResult2": 2}
                      ]}"#;
        let anchors = parse_course_anchors(json).unwrap().unwrap();
        assert_eq!(anchors, RatingAnchors::new(940.0, 57.0, 1010.0, 49.0));
    }

    #[test]
    fn test_missing_anchors_fail_closed() {
        assert_eq!(parse_course_anchors(r#"{"course": {"Name": "x"}}"#).unwrap(), None);
        assert_eq!(
            parse_course_anchors(
                r#"{"RatingValue1": 950, "RatingResult1": 54, "RatingValue2": 0, "RatingResult2": 50}"#
            )
            .unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_rating_list() {
        let json = r#"{"players": [
            {"Name": "Ada Lovelace", "Rating": 912},
            {"Name": "Bo Diddley", "Rating": "0"},
            {"Name": "Ada Lovelace", "Rating": 700},
            {"Name": "Cy Young"}
        ]}"#;
        let ratings = parse_rating_list(json).unwrap();

        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings.get("Ada Lovelace"), Some(&912.0));
    }

    #[tokio::test]
    async fn test_export_source_reads_files() {
        let mut results = tempfile::NamedTempFile::new().unwrap();
        results.write_all(COMPETITION.as_bytes()).unwrap();
        let mut course = tempfile::NamedTempFile::new().unwrap();
        course
            .write_all(br#"{"RatingValue1": 950, "RatingResult1": 54, "RatingValue2": 1000, "RatingResult2": 50}"#)
            .unwrap();
        let mut ratings = tempfile::NamedTempFile::new().unwrap();
        ratings
            .write_all(br#"{"players": [{"Name": "Ada Lovelace", "Rating": 900}]}"#)
            .unwrap();

        let source = MetrixExportSource::new(results.path())
            .with_course(course.path())
            .with_ratings(ratings.path());

        let entries = source.fetch_entries().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert!(source.fetch_anchors().await.unwrap().is_some());
        assert_eq!(
            source.fetch_baseline_ratings().await.unwrap().get("Ada Lovelace"),
            Some(&900.0)
        );
    }

    #[tokio::test]
    async fn test_export_source_without_optional_files() {
        let mut results = tempfile::NamedTempFile::new().unwrap();
        results.write_all(COMPETITION.as_bytes()).unwrap();

        let source = MetrixExportSource::new(results.path());
        assert_eq!(source.fetch_anchors().await.unwrap(), None);
        assert!(source.fetch_baseline_ratings().await.unwrap().is_empty());

        let missing = MetrixExportSource::new("/nonexistent/results.json");
        assert!(missing.fetch_entries().await.is_err());
    }
}
