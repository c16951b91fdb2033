use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use services::{
    CatalogLoader, Clock, QuizWorkflow, RandomSource, SilentSpeaker, Speaker, VocabularyShelf,
};
use storage::Storage;
use vocab_core::model::{MAX_SESSION_QUESTIONS, QuizSettings, Tier};

mod render;
mod speaker;

use render::{QuizCommand, render_entry, render_snapshot};
use speaker::TerminalSpeaker;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTier { raw: String },
    InvalidCount { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTier { raw } => write!(f, "invalid --tier value: {raw}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
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
    eprintln!("  vocab-quiz quiz  [--data-dir <dir>] [--tier <B1|B2|C1|C2>] [--count <n>] [--seed <n>] [--no-speech] [--no-reveal]");
    eprintln!("  vocab-quiz words [--data-dir <dir>] [--tier <B1|B2|C1|C2>] [--search <text>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir data");
    eprintln!("  --tier B1");
    eprintln!("  --count {MAX_SESSION_QUESTIONS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VOCAB_DATA_DIR, VOCAB_TIER, VOCAB_QUESTION_COUNT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quiz,
    Words,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "words" => Some(Self::Words),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    data_dir: PathBuf,
    tier: Tier,
    count: usize,
    seed: Option<u64>,
    speech: bool,
    reveal: bool,
    search: String,
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let data_dir = std::env::var("VOCAB_DATA_DIR").map_or_else(|_| "data".into(), PathBuf::from);
        let tier = match std::env::var("VOCAB_TIER") {
            Ok(raw) => parse_tier(raw)?,
            Err(_) => Tier::B1,
        };
        let count = match std::env::var("VOCAB_QUESTION_COUNT") {
            Ok(raw) => parse_count(raw)?,
            Err(_) => MAX_SESSION_QUESTIONS,
        };

        Ok(Self {
            data_dir,
            tier,
            count,
            seed: None,
            speech: true,
            reveal: true,
            search: String::new(),
        })
    }

    fn parse(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => self.data_dir = require_value(args, "--data-dir")?.into(),
                "--tier" => self.tier = parse_tier(require_value(args, "--tier")?)?,
                "--count" => self.count = parse_count(require_value(args, "--count")?)?,
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    self.seed = Some(seed);
                }
                "--search" => self.search = require_value(args, "--search")?,
                "--no-speech" => self.speech = false,
                "--no-reveal" => self.reveal = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }
}

fn parse_tier(raw: String) -> Result<Tier, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidTier { raw })
}

fn parse_count(raw: String) -> Result<usize, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidCount { raw })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means quiz.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Quiz,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Quiz,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::from_env()
        .and_then(|defaults| defaults.parse(&mut argv.into_iter()))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    debug!("parsed arguments: {parsed:?}");

    let storage = Storage::files(&parsed.data_dir);
    let loader = Arc::new(CatalogLoader::new(Arc::clone(&storage.catalogs)));

    match cmd {
        Command::Quiz => run_quiz(&parsed, loader).await,
        Command::Words => run_words(&parsed, &loader).await,
    }
}

async fn run_quiz(
    args: &Args,
    loader: Arc<CatalogLoader>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = QuizSettings::default()
        .with_question_count(args.count)?
        .with_auto_speak(args.speech)
        .with_reveal_answers(args.reveal);
    let random = args.seed.map_or(RandomSource::Entropy, RandomSource::seeded);
    let speaker: Arc<dyn Speaker> = if args.speech {
        Arc::new(TerminalSpeaker::default())
    } else {
        Arc::new(SilentSpeaker)
    };

    let mut workflow = QuizWorkflow::new(loader, settings)
        .with_random(random)
        .with_clock(Clock::default())
        .with_speaker(speaker);
    workflow.subscribe(|snapshot| {
        println!("{}", render_snapshot(snapshot));
    });

    info!("starting quiz for tier {}", args.tier);
    // Failures are already rendered through the subscription.
    let _ = workflow.load_tier(args.tier).await;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let command = match QuizCommand::parse(&line) {
            Ok(command) => command,
            Err(hint) => {
                println!("{hint}");
                continue;
            }
        };

        let result = match command {
            QuizCommand::Answer(index) => workflow.select_answer(index).map(drop),
            QuizCommand::Next => workflow.next().map(drop),
            QuizCommand::Previous => workflow.previous().map(drop),
            QuizCommand::Finish => workflow.finish().map(drop),
            QuizCommand::Reset => workflow.reset().map(drop),
            QuizCommand::Again => workflow.restart().map(drop),
            QuizCommand::Speak => workflow.speak_current().map(drop),
            QuizCommand::Retry => workflow.retry().await.map(drop),
            QuizCommand::Tier(tier) => workflow.load_tier(tier).await.map(drop),
            QuizCommand::Quit => break,
        };
        if let Err(err) = result {
            debug!("command failed: {err}");
            println!("{}", err.message());
        }
    }

    Ok(())
}

async fn run_words(args: &Args, loader: &CatalogLoader) -> Result<(), Box<dyn std::error::Error>> {
    let mut shelf = VocabularyShelf::open(loader, args.tier).await?;
    shelf.set_query(args.search.as_str());

    let matches = shelf.filtered();
    println!(
        "{}: {} of {} words",
        args.tier.display_name(),
        matches.len(),
        shelf.len()
    );
    for entry in matches {
        println!("{}", render_entry(entry));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
