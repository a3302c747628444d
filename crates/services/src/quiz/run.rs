use chrono::{DateTime, Utc};
use quiz_core::QuizSession;
use quiz_core::model::{QuestionBank, ResultRecord};
use quiz_core::time::Elapsed;

/// Score and timing of a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub record: ResultRecord,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizSubmission {
    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        Elapsed::between(self.started_at, self.completed_at)
    }
}

/// A `QuizSession` plus the bookkeeping the services layer needs around it.
#[derive(Debug, Clone, Default)]
pub struct QuizRun {
    session: QuizSession,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    persisted: bool,
}

impl QuizRun {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            session: QuizSession::new(bank),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True once the result record reached the log.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub(crate) fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    pub(crate) fn mark_started(&mut self, at: DateTime<Utc>) {
        self.started_at = Some(at);
        self.completed_at = None;
        self.persisted = false;
    }

    pub(crate) fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    /// Rebuild the submission of a completed run.
    pub(crate) fn submission(&self) -> Option<QuizSubmission> {
        let record = self.session.record()?.clone();
        let completed_at = self.completed_at?;
        Some(QuizSubmission {
            record,
            started_at: self.started_at.unwrap_or(completed_at),
            completed_at,
        })
    }
}
