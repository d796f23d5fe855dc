//! Test fixtures and recording sinks for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use ticket_wheel::draft::RenderSink;
use ticket_wheel::error::Result;
use ticket_wheel::types::{DraftPick, ParticipantEntry, RatingAnchors, Segment};

/// Competition export with five finishers and one player who did not finish
pub const COMPETITION_JSON: &str = r#"{
    "Competition": {
        "ID": 2871144,
        "Name": "Thursday Night Doubles",
        "CourseID": 4471,
        "Results": [
            {"UserID": "9001", "Name": "Ada Lovelace", "Sum": 52},
            {"UserID": "9002", "Name": "Bo Diddley", "Sum": 58},
            {"UserID": 9003, "Name": "Cy Young", "Sum": "54"},
            {"UserID": "9004", "Name": "Di Prince", "Sum": 50},
            {"UserID": "9005", "Name": "Ed Newcomer", "Sum": 56},
            {"UserID": "9006", "Name": "Flo Quit", "Sum": null}
        ]
    }
}"#;

/// Course export carrying the rating anchors on its first track
pub const COURSE_JSON: &str = r#"{
    "course": {
        "ID": 4471,
        "Name": "Riverside Park",
        "Tracks": [
            {"RatingValue1": "950", "RatingResult1": "54",
             "RatingValue2": "1000", "RatingResult2": "50"}
        ]
    }
}"#;

/// Rating list; Ed Newcomer is unrated
pub const RATINGS_JSON: &str = r#"{
    "players": [
        {"Name": "Ada Lovelace", "Rating": 900},
        {"Name": "Bo Diddley", "Rating": 960},
        {"Name": "Cy Young", "Rating": 950},
        {"Name": "Di Prince", "Rating": 1000},
        {"Name": "Ed Newcomer", "Rating": 0}
    ]
}"#;

/// Write a fixture document to a temporary file
pub fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create fixture file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write fixture file");
    file
}

/// Wrap a document the way the CORS proxy does
pub fn proxied(contents: &str) -> String {
    serde_json::json!({ "contents": contents }).to_string()
}

pub fn course_anchors() -> RatingAnchors {
    RatingAnchors::new(950.0, 54.0, 1000.0, 50.0)
}

pub fn entry(id: &str, name: &str, raw_score: f64) -> ParticipantEntry {
    ParticipantEntry {
        id: id.to_string(),
        name: name.to_string(),
        raw_score,
    }
}

/// Render sink that records everything it is shown
#[derive(Debug, Default)]
pub struct RecordingRenderSink {
    frames: Mutex<Vec<(usize, f64)>>,
    announced: Mutex<Vec<DraftPick>>,
    completions: Mutex<Vec<Vec<DraftPick>>>,
}

impl RecordingRenderSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment count and rotation of every rendered frame
    pub fn frames(&self) -> Vec<(usize, f64)> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }

    pub fn announced(&self) -> Vec<DraftPick> {
        self.announced
            .lock()
            .map(|picks| picks.clone())
            .unwrap_or_default()
    }

    pub fn completions(&self) -> Vec<Vec<DraftPick>> {
        self.completions
            .lock()
            .map(|completions| completions.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RenderSink for RecordingRenderSink {
    async fn render_frame(&self, segments: &[Segment], rotation: f64) -> Result<()> {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push((segments.len(), rotation));
        }
        Ok(())
    }

    async fn announce_winner(&self, pick: &DraftPick) -> Result<()> {
        if let Ok(mut announced) = self.announced.lock() {
            announced.push(pick.clone());
        }
        Ok(())
    }

    async fn draft_complete(&self, winners: &[DraftPick]) -> Result<()> {
        if let Ok(mut completions) = self.completions.lock() {
            completions.push(winners.to_vec());
        }
        Ok(())
    }
}
