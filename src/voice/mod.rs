//! Voice input and output
//!
//! The dialogue talks to the customer through [`SpeechIo`], which sits on
//! two seams:
//! - [`Recognizer`] captures one utterance and transcribes it
//! - [`Synthesizer`] speaks text and shows text on screen
//!
//! Cloud implementations use the microphone, speakers and HTTP STT/TTS
//! services. Console implementations read and write lines for headless use.

mod capture;
mod cloud;
mod console;
mod playback;
mod stt;
mod tts;
mod utterance;

use async_trait::async_trait;

pub use capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
pub use cloud::{CloudRecognizer, CloudSynthesizer};
pub use console::{ConsoleRecognizer, ConsoleSynthesizer};
pub use playback::{AudioPlayback, PLAYBACK_SAMPLE_RATE};
pub use stt::SpeechToText;
pub use tts::TextToSpeech;
pub use utterance::{DetectorState, UtteranceDetector};

use crate::Result;

/// Spoken when the transcript was empty or could not be made sense of
pub const UNINTELLIGIBLE_APOLOGY: &str = "Sorry, I couldn't understand. Please try again.";

/// Spoken when the recognition service could not be used
pub const SERVICE_APOLOGY: &str = "Sorry, there is an issue with the speech recognition service.";

/// Outcome of capturing and transcribing one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    /// Raw transcript of what was said
    Heard(String),
    /// Audio was captured but nothing usable came back
    Unintelligible,
    /// The recognition service could not be reached or failed
    Unavailable(String),
}

/// Captures and transcribes the customer's speech
#[async_trait(?Send)]
pub trait Recognizer {
    /// Block until one utterance has been captured, then transcribe it
    ///
    /// # Errors
    ///
    /// Returns error if the input device or stream cannot be used
    async fn recognize(&mut self) -> Result<Recognition>;
}

/// Speaks to the customer
#[async_trait(?Send)]
pub trait Synthesizer {
    /// Speak `text`, returning once playback has finished
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    async fn speak(&mut self, text: &str) -> Result<()>;

    /// Show a line of text to the customer
    fn display(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Speech adapter used by the dialogue
pub struct SpeechIo<R, S> {
    recognizer: R,
    synthesizer: S,
}

impl<R: Recognizer, S: Synthesizer> SpeechIo<R, S> {
    /// Create a speech adapter from its two halves
    pub const fn new(recognizer: R, synthesizer: S) -> Self {
        Self {
            recognizer,
            synthesizer,
        }
    }

    /// Speak `text` and wait for playback to finish
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    pub async fn speak(&mut self, text: &str) -> Result<()> {
        tracing::debug!(text, "speaking");
        self.synthesizer.speak(text).await
    }

    /// Show a line of text
    pub fn display(&mut self, text: &str) {
        self.synthesizer.display(text);
    }

    /// Listen for one utterance
    ///
    /// Returns the normalized transcript, or `None` after apologizing when
    /// nothing usable was heard.
    ///
    /// # Errors
    ///
    /// Returns error if the input device fails, the input is closed, or the
    /// apology cannot be spoken
    pub async fn listen(&mut self) -> Result<Option<String>> {
        tracing::debug!("listening");

        match self.recognizer.recognize().await? {
            Recognition::Heard(raw) => {
                let text = normalize_transcript(&raw);
                if text.is_empty() {
                    self.speak(UNINTELLIGIBLE_APOLOGY).await?;
                    return Ok(None);
                }
                tracing::info!(transcript = %text, "heard");
                Ok(Some(text))
            }
            Recognition::Unintelligible => {
                tracing::debug!("utterance not understood");
                self.speak(UNINTELLIGIBLE_APOLOGY).await?;
                Ok(None)
            }
            Recognition::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "speech recognition unavailable");
                self.speak(SERVICE_APOLOGY).await?;
                Ok(None)
            }
        }
    }
}

/// Lowercase and trim a transcript, dropping trailing sentence punctuation
///
/// Cloud STT services punctuate; the dialogue matches on bare words.
#[must_use]
pub fn normalize_transcript(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', '!', '?', ','])
        .trim()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_transcript() {
        assert_eq!(normalize_transcript("  Show me the Menu. "), "show me the menu");
        assert_eq!(normalize_transcript("Veg!"), "veg");
        assert_eq!(normalize_transcript("Non-veg?"), "non-veg");
        assert_eq!(normalize_transcript("..."), "");
        assert_eq!(normalize_transcript("   "), "");
    }
}
