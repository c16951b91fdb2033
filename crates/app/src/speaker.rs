use log::debug;
use services::Speaker;

/// Speaks by echoing the text to stderr.
///
/// Output is synchronous, so an utterance is never still in progress when
/// the workflow asks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSpeaker;

impl Speaker for TerminalSpeaker {
    fn speak(&self, text: &str, language: &str) {
        debug!("speaking {text:?} in {language}");
        eprintln!("  [say {language}] {text}");
    }

    fn stop(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}
