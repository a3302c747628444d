//! Navigation and answer state for a single quiz attempt.

use crate::error::QuizError;
use crate::model::{
    AnswerSlot, AnswerSlots, Question, QuestionBank, Respondent, ResultRecord, Score,
};

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress {
        current: usize,
    },
    /// Terminal; holds the record emitted by the submission.
    Completed {
        record: ResultRecord,
    },
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub current: Option<usize>,
    pub is_complete: bool,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// One respondent stepping through the question bank.
///
/// Selections are stored the moment they are made; navigation only moves the
/// current index and never touches another question's slot.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    bank: QuestionBank,
    respondent: Option<Respondent>,
    answers: AnswerSlots,
    state: SessionState,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            respondent: None,
            answers: AnswerSlots::new(),
            state: SessionState::NotStarted,
        }
    }

    /// Begin a fresh attempt at question 0 with every slot unanswered.
    ///
    /// Any previous progress, including a completed attempt, is discarded.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Respondent` if the id or name is blank; the session
    /// is left untouched in that case.
    pub fn start(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), QuizError> {
        let respondent = Respondent::new(id, name)?;
        self.respondent = Some(respondent);
        self.answers.reset();
        self.state = SessionState::InProgress { current: 0 };
        Ok(())
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn respondent(&self) -> Option<&Respondent> {
        self.respondent.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSlots {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { current } => Some(current),
            _ => None,
        }
    }

    /// The question being shown and its index, while in progress.
    #[must_use]
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        let current = self.current_index()?;
        self.bank.get(current).map(|question| (current, question))
    }

    /// Record the selection for the current question immediately.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside an active attempt.
    pub fn select_answer(&mut self, slot: AnswerSlot) -> Result<(), QuizError> {
        let current = self.current_index().ok_or(QuizError::NotInProgress)?;
        self.answers.set(current, slot);
        Ok(())
    }

    /// Move forward one question; stays put on the last question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside an active attempt.
    pub fn advance(&mut self) -> Result<usize, QuizError> {
        let current = self.current_index().ok_or(QuizError::NotInProgress)?;
        let next = if current < self.bank.last_index() {
            current + 1
        } else {
            current
        };
        self.state = SessionState::InProgress { current: next };
        Ok(next)
    }

    /// Move back one question; stays put on the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside an active attempt.
    pub fn retreat(&mut self) -> Result<usize, QuizError> {
        let current = self.current_index().ok_or(QuizError::NotInProgress)?;
        let previous = current.saturating_sub(1);
        self.state = SessionState::InProgress { current: previous };
        Ok(previous)
    }

    /// Stored answer for `index`, or `None` when out of range.
    #[must_use]
    pub fn answer_for(&self, index: usize) -> Option<AnswerSlot> {
        self.answers.get(index)
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_index() == Some(0)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index() == Some(self.bank.last_index())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Completed { .. })
    }

    /// Count of slots matching the answer key. Pure; callable in any state.
    #[must_use]
    pub fn score(&self) -> Score {
        self.bank.key().grade(&self.answers)
    }

    /// Finish the attempt and emit its single result record.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyCompleted` if the attempt was already
    /// submitted, `QuizError::NotInProgress` before `start`, and
    /// `QuizError::NotOnLastQuestion` anywhere but the last question.
    pub fn submit(&mut self) -> Result<ResultRecord, QuizError> {
        match self.state {
            SessionState::Completed { .. } => return Err(QuizError::AlreadyCompleted),
            SessionState::NotStarted => return Err(QuizError::NotInProgress),
            SessionState::InProgress { .. } if !self.is_last() => {
                return Err(QuizError::NotOnLastQuestion);
            }
            SessionState::InProgress { .. } => {}
        }
        let respondent = self.respondent.clone().ok_or(QuizError::NotInProgress)?;
        let record = ResultRecord::new(respondent, self.score());
        self.state = SessionState::Completed {
            record: record.clone(),
        };
        Ok(record)
    }

    /// The record emitted by `submit`, once completed.
    #[must_use]
    pub fn record(&self) -> Option<&ResultRecord> {
        match &self.state {
            SessionState::Completed { record } => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.bank.len(),
            answered: self.answers.answered_count(),
            current: self.current_index(),
            is_complete: self.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionIndex, QUESTION_COUNT};
    use pretty_assertions::assert_eq;

    fn started() -> QuizSession {
        let mut session = QuizSession::new(QuestionBank::standard());
        session.start("42", "Ada").unwrap();
        session
    }

    fn pick(index: usize) -> AnswerSlot {
        AnswerSlot::Chosen(OptionIndex::new(index).unwrap())
    }

    #[test]
    fn start_resets_index_and_slots() {
        let session = started();
        assert_eq!(session.current_index(), Some(0));
        for index in 0..QUESTION_COUNT {
            assert_eq!(session.answer_for(index), Some(AnswerSlot::Unanswered));
        }
        assert!(session.is_first());
        assert!(!session.is_last());
    }

    #[test]
    fn start_rejects_blank_respondent() {
        let mut session = QuizSession::new(QuestionBank::standard());
        let err = session.start("  ", "Ada").unwrap_err();
        assert!(matches!(err, QuizError::Respondent(_)));
        assert_eq!(session.state(), &SessionState::NotStarted);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn navigation_preserves_answers() {
        let mut session = started();
        session.select_answer(pick(1)).unwrap();
        assert_eq!(session.advance().unwrap(), 1);
        session.select_answer(pick(0)).unwrap();
        assert_eq!(session.retreat().unwrap(), 0);
        assert_eq!(session.answer_for(0), Some(pick(1)));
        assert_eq!(session.advance().unwrap(), 1);
        assert_eq!(session.answer_for(1), Some(pick(0)));
    }

    #[test]
    fn reselecting_overwrites_only_current_slot() {
        let mut session = started();
        session.select_answer(pick(2)).unwrap();
        session.advance().unwrap();
        session.select_answer(pick(1)).unwrap();
        session.select_answer(AnswerSlot::Unanswered).unwrap();
        assert_eq!(session.answer_for(0), Some(pick(2)));
        assert_eq!(session.answer_for(1), Some(AnswerSlot::Unanswered));
    }

    #[test]
    fn boundaries_are_idempotent() {
        let mut session = started();
        assert_eq!(session.retreat().unwrap(), 0);
        for _ in 0..10 {
            session.advance().unwrap();
        }
        assert_eq!(session.current_index(), Some(4));
        assert!(session.is_last());
        assert_eq!(session.advance().unwrap(), 4);
    }

    #[test]
    fn operations_require_an_active_attempt() {
        let mut session = QuizSession::new(QuestionBank::standard());
        assert_eq!(session.advance(), Err(QuizError::NotInProgress));
        assert_eq!(session.retreat(), Err(QuizError::NotInProgress));
        assert_eq!(session.select_answer(pick(0)), Err(QuizError::NotInProgress));
        assert_eq!(session.submit(), Err(QuizError::NotInProgress));
        assert!(!session.is_first());
        assert!(!session.is_last());
    }

    #[test]
    fn score_counts_matching_slots() {
        let mut session = started();
        assert_eq!(session.score().correct(), 0);
        for (index, raw) in [1, 0, 1, 0, 1].into_iter().enumerate() {
            session.select_answer(pick(raw)).unwrap();
            if index < 4 {
                session.advance().unwrap();
            }
        }
        assert_eq!(session.score(), Score::new(5, 5));
    }

    #[test]
    fn submit_only_from_last_question_and_only_once() {
        let mut session = started();
        assert_eq!(session.submit(), Err(QuizError::NotOnLastQuestion));
        while !session.is_last() {
            session.advance().unwrap();
        }
        session.select_answer(pick(1)).unwrap();

        let record = session.submit().unwrap();
        assert_eq!(record.to_log_line(), "ID: 42, Name: Ada, Score: 1/5\n");
        assert!(session.is_complete());
        assert_eq!(session.record(), Some(&record));
        assert_eq!(session.submit(), Err(QuizError::AlreadyCompleted));
        assert_eq!(session.select_answer(pick(0)), Err(QuizError::NotInProgress));
    }

    #[test]
    fn restart_after_completion_begins_fresh() {
        let mut session = started();
        session.select_answer(pick(1)).unwrap();
        while !session.is_last() {
            session.advance().unwrap();
        }
        session.submit().unwrap();

        session.start("43", "Grace").unwrap();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.answers().answered_count(), 0);
        assert_eq!(session.respondent().map(Respondent::name), Some("Grace"));
        assert!(session.record().is_none());
    }

    #[test]
    fn progress_reports_answered_slots() {
        let mut session = started();
        session.select_answer(pick(0)).unwrap();
        session.advance().unwrap();
        let progress = session.progress();
        assert_eq!(progress.total, 5);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.current, Some(1));
        assert!(!progress.is_complete);
    }
}
