use serde::Serialize;

use crate::model::answer::{AnswerSlot, AnswerSlots, OptionIndex};
use crate::model::result::Score;

/// Number of questions in a bank.
pub const QUESTION_COUNT: usize = 5;

/// Number of options offered by every question.
pub const OPTION_COUNT: usize = 3;

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: &'static str,
    options: [&'static str; OPTION_COUNT],
}

impl Question {
    #[must_use]
    pub const fn new(prompt: &'static str, options: [&'static str; OPTION_COUNT]) -> Self {
        Self { prompt, options }
    }

    #[must_use]
    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[&'static str; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &'static str {
        self.options[index.as_usize()]
    }
}

//
// ─── ANSWER KEY ───────────────────────────────────────────────────────────────
//

/// Correct option per question, parallel to the bank by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerKey([OptionIndex; QUESTION_COUNT]);

impl AnswerKey {
    #[must_use]
    pub const fn new(correct: [OptionIndex; QUESTION_COUNT]) -> Self {
        Self(correct)
    }

    #[must_use]
    pub fn correct_for(&self, index: usize) -> Option<OptionIndex> {
        self.0.get(index).copied()
    }

    /// Counts the positions where the stored answer matches the key.
    ///
    /// Unanswered slots never match.
    #[must_use]
    pub fn grade(&self, answers: &AnswerSlots) -> Score {
        let correct = self
            .0
            .iter()
            .zip(answers.iter())
            .filter(|(key, slot)| **slot == AnswerSlot::Chosen(**key))
            .count();
        let correct = u8::try_from(correct).unwrap_or(u8::MAX);
        Score::new(correct, Score::MAX)
    }
}

//
// ─── QUESTION BANK ────────────────────────────────────────────────────────────
//

const STANDARD_QUESTIONS: [Question; QUESTION_COUNT] = [
    Question::new(
        "1. What is the number of primitive datatypes in Java?",
        ["7", "8", "9"],
    ),
    Question::new(
        "2. Exception created by try block is caught in which block?",
        ["catch", "throw", "finally"],
    ),
    Question::new(
        "3. Identify the return type of a method that does not return any value?",
        ["double", "void", "int"],
    ),
    Question::new(
        "4. Which of the following is used to find and fix bugs in the program?",
        ["JDB", "JDK", "JVM"],
    ),
    Question::new(
        "5. Identify the modifier which cannot be used for a constructor?",
        ["Public", "Private", "Static"],
    ),
];

const STANDARD_KEY: AnswerKey = AnswerKey::new([
    OptionIndex::SECOND,
    OptionIndex::FIRST,
    OptionIndex::SECOND,
    OptionIndex::FIRST,
    OptionIndex::SECOND,
]);

/// Immutable, ordered question bank together with its answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionBank {
    questions: [Question; QUESTION_COUNT],
    key: AnswerKey,
}

impl QuestionBank {
    /// The bank every session is administered from.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            questions: STANDARD_QUESTIONS,
            key: STANDARD_KEY,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question; QUESTION_COUNT] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn key(&self) -> &AnswerKey {
        &self.key
    }

    #[must_use]
    pub fn len(&self) -> usize {
        QUESTION_COUNT
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        QUESTION_COUNT - 1
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slots(raw: [i64; QUESTION_COUNT]) -> AnswerSlots {
        let mut answers = AnswerSlots::new();
        for (index, value) in raw.into_iter().enumerate() {
            answers.set(index, AnswerSlot::from_raw(value).unwrap());
        }
        answers
    }

    #[test]
    fn standard_key_matches_reference_answers() {
        let key = *QuestionBank::standard().key();
        let raw: Vec<u8> = (0..QUESTION_COUNT)
            .map(|i| key.correct_for(i).unwrap().value())
            .collect();
        assert_eq!(raw, vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn grade_counts_exact_matches_only() {
        let key = *QuestionBank::standard().key();
        assert_eq!(key.grade(&slots([1, 0, 1, 0, 1])).correct(), 5);
        assert_eq!(key.grade(&slots([-1, -1, -1, -1, -1])).correct(), 0);
        assert_eq!(key.grade(&slots([1, 1, 1, 1, 1])).correct(), 3);
        assert_eq!(key.grade(&slots([2, 2, 2, 2, 2])).correct(), 0);
    }

    #[test]
    fn every_question_has_three_options() {
        let bank = QuestionBank::standard();
        for question in bank.questions() {
            assert!(!question.prompt().is_empty());
            assert!(question.options().iter().all(|o| !o.is_empty()));
        }
        assert_eq!(bank.get(QUESTION_COUNT), None);
    }

    #[test]
    fn prompts_carry_their_ordinal() {
        let bank = QuestionBank::standard();
        for (index, question) in bank.questions().iter().enumerate() {
            assert!(question.prompt().starts_with(&format!("{}. ", index + 1)));
        }
    }
}
