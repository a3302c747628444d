use std::sync::Arc;

use log::{debug, info, warn};
use quiz_core::QuizError;
use quiz_core::model::AnswerSlot;
use storage::ResultLog;

use super::run::{QuizRun, QuizSubmission};
use super::view::QuestionView;
use crate::Clock;
use crate::error::{QuizServiceError, SubmitError};

/// Orchestrates a quiz attempt and persists its result.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    log: Arc<dyn ResultLog>,
}

impl QuizService {
    #[must_use]
    pub fn new(log: Arc<dyn ResultLog>) -> Self {
        Self {
            clock: Clock::default_clock(),
            log,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Start (or restart) the run for a respondent.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Respondent` if the id or name is blank.
    pub fn start(&self, run: &mut QuizRun, id: &str, name: &str) -> Result<(), QuizError> {
        run.session_mut().start(id, name)?;
        run.mark_started(self.clock.now());
        info!("quiz started for respondent {id:?}");
        Ok(())
    }

    #[must_use]
    pub fn question_view(&self, run: &QuizRun) -> Option<QuestionView> {
        QuestionView::from_session(run.session())
    }

    /// Store a selection for the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside an active attempt.
    pub fn select(&self, run: &mut QuizRun, slot: AnswerSlot) -> Result<(), QuizError> {
        run.session_mut().select_answer(slot)?;
        debug!(
            "question {:?} answered with {}",
            run.session().current_index(),
            slot.raw()
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside an active attempt.
    pub fn advance(&self, run: &mut QuizRun) -> Result<usize, QuizError> {
        let index = run.session_mut().advance()?;
        debug!("moved to question {index}");
        Ok(index)
    }

    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside an active attempt.
    pub fn retreat(&self, run: &mut QuizRun) -> Result<usize, QuizError> {
        let index = run.session_mut().retreat()?;
        debug!("moved to question {index}");
        Ok(index)
    }

    /// Score the run, close it, and append the result to the log.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Quiz` if the run cannot be submitted in its
    /// current state, and `SubmitError::Persistence` if the log append fails.
    /// In the latter case the run is still completed and the submission is
    /// available from the error.
    pub fn submit(&self, run: &mut QuizRun) -> Result<QuizSubmission, SubmitError> {
        let record = run.session_mut().submit()?;
        let completed_at = self.clock.now();
        run.mark_completed(completed_at);

        let submission = QuizSubmission {
            record,
            started_at: run.started_at().unwrap_or(completed_at),
            completed_at,
        };
        info!(
            "quiz submitted for respondent {:?}: {}",
            submission.record.respondent().id(),
            submission.record.score()
        );

        match self.log.append(&submission.record) {
            Ok(()) => {
                run.mark_persisted();
                Ok(submission)
            }
            Err(source) => {
                warn!("failed to save quiz result: {source}");
                Err(SubmitError::Persistence { submission, source })
            }
        }
    }

    /// Retry the log append for a completed run whose earlier append failed.
    ///
    /// Already persisted runs are left alone, so a record is never written
    /// twice.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotSubmitted` if the run is not completed,
    /// or `QuizServiceError::Storage` if the append fails again.
    pub fn retry_persist(&self, run: &mut QuizRun) -> Result<QuizSubmission, QuizServiceError> {
        let submission = run.submission().ok_or(QuizServiceError::NotSubmitted)?;
        if run.is_persisted() {
            return Ok(submission);
        }

        self.log.append(&submission.record)?;
        run.mark_persisted();
        info!("quiz result saved on retry");
        Ok(submission)
    }
}
