/// Text-to-speech collaborator.
///
/// The quiz only asks for playback and reads the speaking flag; it never waits
/// for an utterance to finish. Implementations should stop any utterance in
/// progress before starting a new one.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str, language: &str);

    fn stop(&self);

    fn is_speaking(&self) -> bool;
}

/// Speaker that never produces sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, _text: &str, _language: &str) {}

    fn stop(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}
