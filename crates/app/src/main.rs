use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use quiz_core::model::QuestionBank;
use services::QuizService;
use storage::file::DEFAULT_RESULTS_FILE;
use storage::{FileResultLog, InMemoryResultLog, ResultLog};

mod terminal;

use terminal::Terminal;

const RESULTS_PATH_ENV: &str = "QUIZ_RESULTS_PATH";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidResultsPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidResultsPath { raw } => write!(f, "invalid --results value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [take] [--results <path>] [--dry-run]");
    eprintln!("  quiz questions [--json]");
    eprintln!();
    eprintln!("Defaults for take:");
    eprintln!("  --results {DEFAULT_RESULTS_FILE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {RESULTS_PATH_ENV}, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Take,
    Questions,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "take" => Some(Self::Take),
            "questions" => Some(Self::Questions),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Args {
    Take {
        results_path: PathBuf,
        dry_run: bool,
    },
    Questions {
        json: bool,
    },
}

impl Args {
    fn parse_take(
        args: &mut impl Iterator<Item = String>,
        env_path: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut results_path = env_path
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_RESULTS_FILE), PathBuf::from);
        let mut dry_run = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--results" => {
                    let value = require_value(args, "--results")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidResultsPath { raw: value });
                    }
                    results_path = PathBuf::from(value);
                }
                "--dry-run" => dry_run = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self::Take {
            results_path,
            dry_run,
        })
    }

    fn parse_questions(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut json = false;
        for arg in args {
            match arg.as_str() {
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Self::Questions { json })
    }

    fn parse(argv: Vec<String>, env_path: Option<String>) -> Result<Self, ArgsError> {
        let cmd = match argv.first().map(String::as_str) {
            None => Command::Take,
            Some(first) if first.starts_with('-') => Command::Take,
            Some(first) => {
                Command::from_arg(first).ok_or_else(|| ArgsError::UnknownArg(first.to_string()))?
            }
        };

        let mut iter = argv.into_iter().peekable();
        if iter.peek().is_some_and(|first| !first.starts_with('-')) {
            iter.next();
        }

        match cmd {
            Command::Take => Self::parse_take(&mut iter, env_path),
            Command::Questions => Self::parse_questions(&mut iter),
        }
    }
}

fn print_questions(bank: &QuestionBank, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(bank.questions())?);
        return Ok(());
    }

    for question in bank.questions() {
        println!("{}", question.prompt());
        for (index, option) in question.options().iter().enumerate() {
            println!("  ({}) {option}", index + 1);
        }
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = Args::parse(argv, std::env::var(RESULTS_PATH_ENV).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let bank = QuestionBank::standard();

    match parsed {
        Args::Questions { json } => print_questions(&bank, json),
        Args::Take {
            results_path,
            dry_run,
        } => {
            let log: Arc<dyn ResultLog> = if dry_run {
                info!("dry run: results are kept in memory");
                Arc::new(InMemoryResultLog::new())
            } else {
                info!("writing results to {}", results_path.display());
                Arc::new(FileResultLog::new(results_path))
            };

            let service = QuizService::new(log);
            let stdin = io::stdin();
            Terminal::new(stdin.lock(), io::stdout()).run(&service, bank)?;
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
