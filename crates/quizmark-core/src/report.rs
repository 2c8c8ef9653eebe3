//! Session results report with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{QuestionResult, Session, SessionState};

/// The outcome of one session, ready to be saved or rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// The session the results come from.
    pub session_id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Quiz title (first question prompt).
    pub title: String,
    /// State of the session when the report was taken.
    pub state: SessionState,
    pub score: u32,
    pub total: usize,
    /// Per-question results, in the order asked.
    pub results: Vec<QuestionResult>,
}

impl ResultsReport {
    /// Snapshot the results of a session.
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session.id(),
            created_at: Utc::now(),
            title: session.quiz().title().to_string(),
            state: session.state(),
            score: session.score(),
            total: session.total(),
            results: session.results(),
        }
    }

    /// Score as a fraction in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ResultsReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Answer;
    use crate::session::create_session;

    const QUIZ: &str = "---\nshuffleAnswers: false\n---\n# Two plus two?\n1. [ ] 3\n1. [x] 4\n\n# Primes\n- [x] 2\n- [ ] 4\n- [x] 5\n";

    #[test]
    fn snapshot_and_persist() {
        let mut session = create_session(QUIZ).unwrap();
        session.start().unwrap();
        session.submit_answer(0, Answer::Single(1)).unwrap();
        session.submit_answer(1, Answer::Multiple(vec![0])).unwrap();

        let report = ResultsReport::from_session(&session);
        assert_eq!(report.title, "Two plus two?");
        assert_eq!(report.state, SessionState::Reviewing);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 2);
        assert!((report.ratio() - 0.5).abs() < f64::EPSILON);
        assert!(report.results[0].correct);
        assert!(!report.results[1].correct);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/results.json");
        report.save_json(&path).unwrap();
        let loaded = ResultsReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.results, report.results);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ResultsReport::load_json(Path::new("/nonexistent/results.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read report"));
    }
}
