//! Microphone and speaker backed by cloud STT/TTS

use std::time::Duration;

use async_trait::async_trait;

use super::{
    AudioCapture, AudioPlayback, Recognition, Recognizer, SAMPLE_RATE, SpeechToText, Synthesizer,
    TextToSpeech, UtteranceDetector, samples_to_wav,
};
use crate::Result;

/// How often the capture buffer is drained into the detector
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Recognizes speech from the default microphone
pub struct CloudRecognizer {
    capture: AudioCapture,
    detector: UtteranceDetector,
    stt: SpeechToText,
}

impl CloudRecognizer {
    /// Create a recognizer that cuts utterances off after `max_utterance_secs`
    ///
    /// # Errors
    ///
    /// Returns error if no suitable input device is available
    pub fn new(stt: SpeechToText, max_utterance_secs: u64) -> Result<Self> {
        let max_samples = usize::try_from(max_utterance_secs.saturating_mul(u64::from(SAMPLE_RATE)))
            .unwrap_or(usize::MAX);

        Ok(Self {
            capture: AudioCapture::new()?,
            detector: UtteranceDetector::new(max_samples),
            stt,
        })
    }

    /// Record until the detector reports a complete utterance
    async fn capture_utterance(&mut self) -> Result<Vec<f32>> {
        self.detector.reset();
        self.capture.clear_buffer();
        self.capture.start()?;

        let utterance = loop {
            tokio::time::sleep(POLL_INTERVAL).await;
            let samples = self.capture.take_buffer();
            if self.detector.process(&samples) {
                break self.detector.take_utterance();
            }
        };

        self.capture.stop();
        Ok(utterance)
    }
}

#[async_trait(?Send)]
impl Recognizer for CloudRecognizer {
    async fn recognize(&mut self) -> Result<Recognition> {
        let utterance = self.capture_utterance().await?;
        tracing::debug!(samples = utterance.len(), "utterance captured");

        let wav = samples_to_wav(&utterance, SAMPLE_RATE)?;
        match self.stt.transcribe(&wav).await {
            Ok(text) if text.trim().is_empty() => Ok(Recognition::Unintelligible),
            Ok(text) => Ok(Recognition::Heard(text)),
            Err(e) => Ok(Recognition::Unavailable(e.to_string())),
        }
    }
}

/// Speaks through cloud TTS and the default speaker
pub struct CloudSynthesizer {
    tts: TextToSpeech,
    playback: AudioPlayback,
}

impl CloudSynthesizer {
    /// Create a synthesizer on the default output device
    ///
    /// # Errors
    ///
    /// Returns error if no suitable output device is available
    pub fn new(tts: TextToSpeech) -> Result<Self> {
        Ok(Self {
            tts,
            playback: AudioPlayback::new()?,
        })
    }
}

#[async_trait(?Send)]
impl Synthesizer for CloudSynthesizer {
    async fn speak(&mut self, text: &str) -> Result<()> {
        let audio = self.tts.synthesize(text).await?;
        self.playback.play_mp3(&audio).await
    }
}
