//! Line-oriented front end driving `QuizService` over any reader/writer pair.

use std::io::{self, BufRead, Write};

use quiz_core::model::{AnswerSlot, OptionIndex, QuestionBank, validate_respondent};
use services::{QuestionView, QuizRun, QuizService, QuizSubmission, SubmitError};

const INVALID_RESPONDENT: &str = "Please enter both ID and Name.";

/// What the respondent asked for at the question prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Select(OptionIndex),
    Clear,
    Next,
    Previous,
    Submit,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "1" => Some(Self::Select(OptionIndex::FIRST)),
            "2" => Some(Self::Select(OptionIndex::SECOND)),
            "3" => Some(Self::Select(OptionIndex::THIRD)),
            "c" | "clear" => Some(Self::Clear),
            "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "s" | "submit" => Some(Self::Submit),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// How a single attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Submitted,
    Quit,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run attempts until the respondent quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying reader or writer.
    pub fn run(&mut self, service: &QuizService, bank: QuestionBank) -> io::Result<()> {
        let mut run = QuizRun::new(bank);
        loop {
            if !self.start(service, &mut run)? {
                return Ok(());
            }
            if self.attempt(service, &mut run)? == Outcome::Quit {
                return Ok(());
            }
            if !self.confirm("Take the quiz again? [y/N] ")? {
                return Ok(());
            }
        }
    }

    /// Prompt until a valid respondent is entered. `false` on end of input.
    fn start(&mut self, service: &QuizService, run: &mut QuizRun) -> io::Result<bool> {
        loop {
            let Some(id) = self.prompt("ID: ")? else {
                return Ok(false);
            };
            let Some(name) = self.prompt("Name: ")? else {
                return Ok(false);
            };

            if !validate_respondent(&id, &name) {
                writeln!(self.output, "{INVALID_RESPONDENT}")?;
                continue;
            }

            match service.start(run, &id, &name) {
                Ok(()) => return Ok(true),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn attempt(&mut self, service: &QuizService, run: &mut QuizRun) -> io::Result<Outcome> {
        while let Some(view) = service.question_view(run) {
            self.render(&view)?;

            let Some(line) = self.prompt("> ")? else {
                return Ok(Outcome::Quit);
            };
            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "Unknown command: {}", line.trim())?;
                continue;
            };

            let result = match command {
                Command::Select(option) => service.select(run, AnswerSlot::Chosen(option)),
                Command::Clear => service.select(run, AnswerSlot::Unanswered),
                Command::Next if view.can_go_forward => service.advance(run).map(drop),
                Command::Next => {
                    writeln!(self.output, "Already at the last question.")?;
                    Ok(())
                }
                Command::Previous if view.can_go_back => service.retreat(run).map(drop),
                Command::Previous => {
                    writeln!(self.output, "Already at the first question.")?;
                    Ok(())
                }
                Command::Submit if view.can_submit => {
                    self.submit(service, run)?;
                    return Ok(Outcome::Submitted);
                }
                Command::Submit => {
                    writeln!(self.output, "Submit is available on the last question.")?;
                    Ok(())
                }
                Command::Quit => return Ok(Outcome::Quit),
            };

            if let Err(err) = result {
                writeln!(self.output, "{err}")?;
            }
        }
        Ok(Outcome::Quit)
    }

    fn submit(&mut self, service: &QuizService, run: &mut QuizRun) -> io::Result<()> {
        match service.submit(run) {
            Ok(submission) => {
                self.report_score(&submission)?;
                writeln!(self.output, "Details saved successfully!")?;
            }
            Err(SubmitError::Persistence { submission, source }) => {
                self.report_score(&submission)?;
                writeln!(self.output, "Error saving details: {source}")?;
                self.offer_retry(service, run)?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn offer_retry(&mut self, service: &QuizService, run: &mut QuizRun) -> io::Result<()> {
        while self.confirm("Retry saving? [y/N] ")? {
            match service.retry_persist(run) {
                Ok(_) => {
                    writeln!(self.output, "Details saved successfully!")?;
                    break;
                }
                Err(err) => writeln!(self.output, "Error saving details: {err}")?,
            }
        }
        Ok(())
    }

    fn report_score(&mut self, submission: &QuizSubmission) -> io::Result<()> {
        writeln!(self.output, "Your Score: {}", submission.record.score())?;
        writeln!(self.output, "Time taken: {}", submission.elapsed())
    }

    fn render(&mut self, view: &QuestionView) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Question {} of {}",
            view.index + 1,
            view.total
        )?;
        writeln!(self.output, "{}", view.prompt)?;
        for option in &view.options {
            let mark = if option.selected { 'x' } else { ' ' };
            writeln!(
                self.output,
                "  ({}) [{mark}] {}",
                option.index.as_usize() + 1,
                option.label
            )?;
        }

        let mut controls = vec!["[1-3] choose", "[c] clear"];
        if view.can_go_back {
            controls.push("[p] previous");
        }
        if view.can_go_forward {
            controls.push("[n] next");
        }
        if view.can_submit {
            controls.push("[s] submit");
        }
        controls.push("[q] quit");
        writeln!(self.output, "{}", controls.join("  "))
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self
            .prompt(question)?
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes")))
    }

    /// Read one line without its terminator. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}
