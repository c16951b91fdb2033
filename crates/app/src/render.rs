use std::fmt::Write as _;

use services::{OptionState, QuizPhase, QuizSnapshot};
use vocab_core::model::{OPTIONS_PER_QUESTION, Tier, VocabularyEntry};

/// A line typed at the quiz prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    /// Zero-based option index.
    Answer(usize),
    Next,
    Previous,
    Finish,
    Reset,
    Again,
    Speak,
    Retry,
    Tier(Tier),
    Quit,
}

const HELP: &str = "commands: 1-4 answer, n next, p previous, f finish, r reset, \
a new questions, s speak, t <tier> switch level, retry, q quit";

impl QuizCommand {
    /// Parse one input line. `Err` carries a hint to show instead.
    pub fn parse(line: &str) -> Result<Self, &'static str> {
        let line = line.trim();
        if let Ok(number) = line.parse::<usize>() {
            return match number {
                1..=OPTIONS_PER_QUESTION => Ok(Self::Answer(number - 1)),
                _ => Err("pick an option between 1 and 4"),
            };
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("n" | "next"), None) => Ok(Self::Next),
            (Some("p" | "prev" | "previous"), None) => Ok(Self::Previous),
            (Some("f" | "finish"), None) => Ok(Self::Finish),
            (Some("r" | "reset"), None) => Ok(Self::Reset),
            (Some("a" | "again"), None) => Ok(Self::Again),
            (Some("s" | "say" | "speak"), None) => Ok(Self::Speak),
            (Some("retry"), None) => Ok(Self::Retry),
            (Some("q" | "quit" | "exit"), None) => Ok(Self::Quit),
            (Some("t" | "tier"), Some(raw)) => raw
                .parse()
                .map(Self::Tier)
                .map_err(|_| "unknown level, use B1, B2, C1 or C2"),
            _ => Err(HELP),
        }
    }
}

pub fn render_snapshot(snapshot: &QuizSnapshot) -> String {
    let mut out = String::new();
    let tier = snapshot
        .tier
        .map_or_else(|| "no level".to_owned(), Tier::display_name);

    match snapshot.phase {
        QuizPhase::Idle => {
            let _ = writeln!(out, "Pick a level with `t <tier>`.");
        }
        QuizPhase::Loading => {
            let _ = writeln!(out, "Loading {tier}...");
        }
        QuizPhase::Failed => {
            if let Some(error) = &snapshot.error {
                let _ = writeln!(out, "{}", error.message);
                if error.retryable {
                    let _ = writeln!(out, "Type `retry` to try again.");
                }
            }
        }
        QuizPhase::InProgress => {
            if let (Some(question), Some(progress)) = (&snapshot.question, &snapshot.progress) {
                let _ = writeln!(
                    out,
                    "\n{tier}  question {}/{}  score {}",
                    progress.position(),
                    progress.total,
                    snapshot.score
                );
                let _ = writeln!(out, "{}", question.prompt);
                for (i, option) in question.options.iter().enumerate() {
                    let marker = match option.state {
                        OptionState::Idle => ' ',
                        OptionState::Selected => '>',
                        OptionState::Correct => '+',
                        OptionState::Wrong => 'x',
                    };
                    let _ = writeln!(out, " {marker} {}. {}", i + 1, option.text);
                }
                if question.chosen.is_some() && !question.explanation.is_empty() {
                    let _ = writeln!(out, "   {}", question.explanation);
                }
            }
        }
        QuizPhase::Completed => {
            if let Some(outcome) = &snapshot.outcome {
                let _ = writeln!(
                    out,
                    "\n{tier} finished: {}/{} ({:.0}%) {}",
                    outcome.correct,
                    outcome.total,
                    outcome.percentage,
                    outcome.band.label()
                );
                for review in outcome.mistakes() {
                    let chosen = review.chosen_option.as_deref().unwrap_or("(no answer)");
                    let _ = writeln!(
                        out,
                        "  {}: you chose {chosen}, answer {}",
                        review.prompt, review.correct_option
                    );
                }
                let _ = writeln!(out, "Type `r` to retake or `a` for new questions.");
            }
        }
    }

    out.trim_end().to_owned()
}

pub fn render_entry(entry: &VocabularyEntry) -> String {
    let mut line = format!(
        "{:<16} {:<6} {}",
        entry.word(),
        entry.part_of_speech(),
        entry.meaning()
    );
    if !entry.example_sentence().is_empty() {
        let _ = write!(line, "\n{:<23} {}", "", entry.example_sentence());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_answers_as_zero_based() {
        assert_eq!(QuizCommand::parse(" 1 "), Ok(QuizCommand::Answer(0)));
        assert_eq!(QuizCommand::parse("4"), Ok(QuizCommand::Answer(3)));
        assert!(QuizCommand::parse("5").is_err());
        assert!(QuizCommand::parse("0").is_err());
    }

    #[test]
    fn parses_tier_switch() {
        assert_eq!(QuizCommand::parse("t c2"), Ok(QuizCommand::Tier(Tier::C2)));
        assert!(QuizCommand::parse("t A1").is_err());
        assert_eq!(QuizCommand::parse("t"), Err(HELP));
    }

    #[test]
    fn idle_snapshot_prompts_for_tier() {
        let text = render_snapshot(&QuizSnapshot::idle());
        assert!(text.contains("t <tier>"));
    }

    #[test]
    fn entry_line_includes_example() {
        let entry = VocabularyEntry::new("cat", "n.", "貓", "The cat sleeps.").unwrap();
        let text = render_entry(&entry);
        assert!(text.starts_with("cat"));
        assert!(text.contains("貓"));
        assert!(text.contains("The cat sleeps."));
    }
}
