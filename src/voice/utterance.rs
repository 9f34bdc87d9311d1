//! End-of-utterance detection
//!
//! Splits the microphone stream into one utterance using RMS energy: the
//! utterance starts at the first loud chunk and ends after a pause, or when
//! it reaches the configured maximum length.

/// Minimum audio energy threshold to consider speech
const ENERGY_THRESHOLD: f32 = 0.03;

/// Minimum duration of speech to count as an utterance (in samples at 16kHz)
const MIN_SPEECH_SAMPLES: usize = 4800; // 0.3 seconds

/// Pause that ends an utterance (in samples)
const PAUSE_SAMPLES: usize = 12800; // 0.8 seconds

/// State of the utterance detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// Waiting for speech
    Idle,
    /// Speech started, accumulating
    Speaking,
}

/// Detects one complete utterance in a stream of audio chunks
pub struct UtteranceDetector {
    state: DetectorState,
    speech_buffer: Vec<f32>,
    silence_counter: usize,
    max_samples: usize,
}

impl UtteranceDetector {
    /// Create a detector that cuts utterances off at `max_samples`
    #[must_use]
    pub fn new(max_samples: usize) -> Self {
        Self {
            state: DetectorState::Idle,
            speech_buffer: Vec::new(),
            silence_counter: 0,
            max_samples: max_samples.max(MIN_SPEECH_SAMPLES + 1),
        }
    }

    /// Feed a chunk of samples
    ///
    /// Returns true once the utterance is complete; take it with
    /// [`Self::take_utterance`].
    pub fn process(&mut self, samples: &[f32]) -> bool {
        let energy = calculate_energy(samples);
        let is_speech = energy > ENERGY_THRESHOLD;

        match self.state {
            DetectorState::Idle => {
                if is_speech {
                    self.state = DetectorState::Speaking;
                    self.speech_buffer.clear();
                    self.speech_buffer.extend_from_slice(samples);
                    self.silence_counter = 0;
                    tracing::trace!(energy, "speech started");
                }
            }
            DetectorState::Speaking => {
                self.speech_buffer.extend_from_slice(samples);

                if is_speech {
                    self.silence_counter = 0;
                } else {
                    self.silence_counter += samples.len();
                }

                tracing::trace!(
                    buffer_len = self.speech_buffer.len(),
                    silence = self.silence_counter,
                    is_speech,
                    energy,
                    "speaking state"
                );

                if self.is_complete() {
                    tracing::debug!(samples = self.speech_buffer.len(), "utterance complete");
                    return true;
                }

                // A short blip followed by a long pause is noise, not speech
                if self.silence_counter > PAUSE_SAMPLES * 2
                    && self.speech_buffer.len() <= MIN_SPEECH_SAMPLES + self.silence_counter
                {
                    tracing::trace!("noise burst - resetting");
                    self.reset();
                }
            }
        }

        false
    }

    /// Whether the buffered speech forms a complete utterance
    #[must_use]
    pub fn is_complete(&self) -> bool {
        if self.state != DetectorState::Speaking {
            return false;
        }

        let paused = self.silence_counter > PAUSE_SAMPLES
            && self.speech_buffer.len() > MIN_SPEECH_SAMPLES + self.silence_counter;

        paused || self.speech_buffer.len() >= self.max_samples
    }

    /// Take the utterance, returning the detector to idle
    pub fn take_utterance(&mut self) -> Vec<f32> {
        let utterance = std::mem::take(&mut self.speech_buffer);
        self.reset();
        utterance
    }

    /// Reset detector to idle state
    pub fn reset(&mut self) {
        self.state = DetectorState::Idle;
        self.speech_buffer.clear();
        self.silence_counter = 0;
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> DetectorState {
        self.state
    }
}

/// Calculate RMS energy of audio samples
#[allow(clippy::cast_precision_loss)]
fn calculate_energy(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}
