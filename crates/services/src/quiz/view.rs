use quiz_core::QuizSession;
use quiz_core::model::{AnswerSlot, OptionIndex};

/// One selectable option of the question on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: OptionIndex,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything a front end needs to draw the current question.
///
/// Presentation-agnostic: no pre-formatted strings beyond the bank text, and
/// the navigation flags mirror which controls should be enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub prompt: &'static str,
    pub options: Vec<OptionView>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub can_submit: bool,
}

impl QuestionView {
    /// `None` unless the session is in progress.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let (index, question) = session.current_question()?;
        let selected = session
            .answer_for(index)
            .and_then(AnswerSlot::chosen);

        let options = OptionIndex::all()
            .map(|option| OptionView {
                index: option,
                label: question.option(option),
                selected: selected == Some(option),
            })
            .collect();

        Some(Self {
            index,
            total: session.bank().len(),
            prompt: question.prompt(),
            options,
            can_go_back: !session.is_first(),
            can_go_forward: !session.is_last(),
            can_submit: session.is_last(),
        })
    }

    #[must_use]
    pub fn selected(&self) -> Option<OptionIndex> {
        self.options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionBank;

    #[test]
    fn view_restores_selection_and_flags() {
        let mut session = QuizSession::new(QuestionBank::standard());
        assert!(QuestionView::from_session(&session).is_none());

        session.start("42", "Ada").unwrap();
        let view = QuestionView::from_session(&session).unwrap();
        assert_eq!(view.index, 0);
        assert_eq!(view.total, 5);
        assert_eq!(view.options.len(), 3);
        assert_eq!(view.selected(), None);
        assert!(!view.can_go_back);
        assert!(view.can_go_forward);
        assert!(!view.can_submit);

        session
            .select_answer(AnswerSlot::Chosen(OptionIndex::THIRD))
            .unwrap();
        let view = QuestionView::from_session(&session).unwrap();
        assert_eq!(view.selected(), Some(OptionIndex::THIRD));
        assert_eq!(view.options[2].label, "9");
    }

    #[test]
    fn last_question_enables_submit_only() {
        let mut session = QuizSession::new(QuestionBank::standard());
        session.start("42", "Ada").unwrap();
        while !session.is_last() {
            session.advance().unwrap();
        }
        let view = QuestionView::from_session(&session).unwrap();
        assert!(view.can_go_back);
        assert!(!view.can_go_forward);
        assert!(view.can_submit);
    }
}
