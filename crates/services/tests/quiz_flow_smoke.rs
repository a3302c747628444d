use std::sync::Arc;

use chrono::Duration;
use pretty_assertions::assert_eq;
use quiz_core::model::{AnswerSlot, OptionIndex, QuestionBank, ResultRecord};
use quiz_core::time::fixed_now;
use services::{Clock, QuizRun, QuizService, SubmitError};
use storage::{FileResultLog, InMemoryResultLog, ResultLog, StorageError};

fn pick(index: usize) -> AnswerSlot {
    AnswerSlot::Chosen(OptionIndex::new(index).unwrap())
}

/// Fails until `healthy` is flipped.
struct FlakyLog {
    healthy: std::sync::atomic::AtomicBool,
    inner: InMemoryResultLog,
}

impl ResultLog for FlakyLog {
    fn append(&self, record: &ResultRecord) -> Result<(), StorageError> {
        if self.healthy.load(std::sync::atomic::Ordering::SeqCst) {
            self.inner.append(record)
        } else {
            Err(StorageError::Io {
                path: "quiz_results.txt".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }
}

#[test]
fn navigation_scenario_preserves_answers() {
    let log = InMemoryResultLog::new();
    let svc = QuizService::new(Arc::new(log.clone())).with_clock(Clock::fixed(fixed_now()));
    let mut run = QuizRun::new(QuestionBank::standard());

    svc.start(&mut run, "42", "Ada").unwrap();
    svc.select(&mut run, pick(1)).unwrap();
    svc.advance(&mut run).unwrap();
    svc.select(&mut run, pick(0)).unwrap();
    svc.retreat(&mut run).unwrap();
    assert_eq!(run.session().answer_for(0), Some(pick(1)));
    svc.advance(&mut run).unwrap();
    assert_eq!(run.session().answer_for(1), Some(pick(0)));

    let view = svc.question_view(&run).unwrap();
    assert_eq!(view.selected(), Some(OptionIndex::FIRST));
}

#[test]
fn perfect_run_is_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiz_results.txt");
    let mut clock = Clock::fixed(fixed_now());
    let svc = QuizService::new(Arc::new(FileResultLog::new(&path))).with_clock(clock);
    let mut run = QuizRun::new(QuestionBank::standard());

    svc.start(&mut run, "42", "Ada").unwrap();
    for (index, raw) in [1, 0, 1, 0, 1].into_iter().enumerate() {
        svc.select(&mut run, pick(raw)).unwrap();
        if index < 4 {
            svc.advance(&mut run).unwrap();
        }
    }

    clock.advance(Duration::minutes(3));
    let svc = svc.with_clock(clock);
    let submission = svc.submit(&mut run).unwrap();

    assert_eq!(submission.record.score().to_string(), "5/5");
    assert_eq!(submission.elapsed().duration(), Duration::minutes(3));
    assert_eq!(submission.elapsed().to_string(), "3m 00s");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "ID: 42, Name: Ada, Score: 5/5\n"
    );
}

#[test]
fn unanswered_run_scores_zero() {
    let log = InMemoryResultLog::new();
    let svc = QuizService::new(Arc::new(log.clone()));
    let mut run = QuizRun::new(QuestionBank::standard());

    svc.start(&mut run, "7", "Grace").unwrap();
    while !run.session().is_last() {
        svc.advance(&mut run).unwrap();
    }
    let submission = svc.submit(&mut run).unwrap();

    assert_eq!(submission.record.score().correct(), 0);
    assert_eq!(log.lines().unwrap(), vec!["ID: 7, Name: Grace, Score: 0/5\n"]);
}

#[test]
fn failed_append_keeps_score_and_can_be_retried() {
    let flaky = Arc::new(FlakyLog {
        healthy: std::sync::atomic::AtomicBool::new(false),
        inner: InMemoryResultLog::new(),
    });
    let svc = QuizService::new(flaky.clone());
    let mut run = QuizRun::new(QuestionBank::standard());

    svc.start(&mut run, "42", "Ada").unwrap();
    while !run.session().is_last() {
        svc.advance(&mut run).unwrap();
    }
    svc.select(&mut run, pick(1)).unwrap();

    let err = svc.submit(&mut run).unwrap_err();
    assert!(matches!(err, SubmitError::Persistence { .. }));
    assert_eq!(err.submission().unwrap().record.score().correct(), 1);
    assert!(run.session().is_complete());
    assert!(!run.is_persisted());

    flaky
        .healthy
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let submission = svc.retry_persist(&mut run).unwrap();
    assert_eq!(submission.record.score().correct(), 1);
    assert!(run.is_persisted());
    assert_eq!(
        flaky.inner.lines().unwrap(),
        vec!["ID: 42, Name: Ada, Score: 1/5\n"]
    );
}

#[test]
fn restarting_after_submit_resets_answers() {
    let log = InMemoryResultLog::new();
    let svc = QuizService::new(Arc::new(log.clone()));
    let mut run = QuizRun::new(QuestionBank::standard());

    svc.start(&mut run, "1", "First").unwrap();
    svc.select(&mut run, pick(1)).unwrap();
    while !run.session().is_last() {
        svc.advance(&mut run).unwrap();
    }
    svc.submit(&mut run).unwrap();

    svc.start(&mut run, "2", "Second").unwrap();
    assert!(!run.is_persisted());
    assert_eq!(run.session().answers().answered_count(), 0);
    assert_eq!(run.session().current_index(), Some(0));
}
