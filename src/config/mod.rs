//! Configuration management for the Saffron assistant

pub mod file;

use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, Result};

pub use file::SaffronConfigFile;

/// Saffron assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the `SQLite` order store
    pub db_path: PathBuf,

    /// Voice configuration
    pub voice: VoiceConfig,

    /// API keys
    pub api_keys: ApiKeys,

    /// Dialogue tuning
    pub dialogue: DialogueConfig,
}

/// Speech-to-text backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SttProvider {
    Whisper,
    Deepgram,
}

impl SttProvider {
    /// Model used when none is configured
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Whisper => "whisper-1",
            Self::Deepgram => "nova-2",
        }
    }
}

impl FromStr for SttProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "whisper" | "openai" => Ok(Self::Whisper),
            "deepgram" => Ok(Self::Deepgram),
            other => Err(Error::Config(format!("unknown STT provider: {other}"))),
        }
    }
}

/// Text-to-speech backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtsProvider {
    OpenAi,
    ElevenLabs,
}

impl TtsProvider {
    /// Model used when none is configured
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "tts-1",
            Self::ElevenLabs => "eleven_monolingual_v1",
        }
    }
}

impl FromStr for TtsProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "elevenlabs" => Ok(Self::ElevenLabs),
            other => Err(Error::Config(format!("unknown TTS provider: {other}"))),
        }
    }
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT backend
    pub stt_provider: SttProvider,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: String,

    /// Spoken language hint passed to the STT backend
    pub language: String,

    /// TTS backend
    pub tts_provider: TtsProvider,

    /// TTS model (e.g. "tts-1")
    pub tts_model: String,

    /// TTS voice identifier (`OpenAI` voice name or `ElevenLabs` voice id)
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,

    /// Longest utterance captured before it is cut off
    pub max_utterance_secs: u64,
}

/// API keys for external services
#[derive(Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (for Whisper and TTS)
    pub openai: Option<String>,

    /// `Deepgram` API key (optional STT)
    pub deepgram: Option<String>,

    /// `ElevenLabs` API key (optional TTS)
    pub elevenlabs: Option<String>,
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |key: &Option<String>| if key.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("ApiKeys")
            .field("openai", &mask(&self.openai))
            .field("deepgram", &mask(&self.deepgram))
            .field("elevenlabs", &mask(&self.elevenlabs))
            .finish()
    }
}

/// Dialogue tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueConfig {
    /// How many times to ask for a dietary preference before giving up
    pub max_preference_attempts: u32,

    /// Range the announced wait is drawn from, in minutes
    pub wait_minutes: RangeInclusive<u32>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_preference_attempts: 3,
            wait_minutes: 10..=30,
        }
    }
}

/// Default order store location (`~/.local/share/saffron/restaurant.db` on Linux)
fn default_db_path() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("restaurant.db"),
        |d| d.data_dir().join("saffron").join("restaurant.db"),
    )
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if a configured value is invalid
    pub fn load() -> Result<Self> {
        // env > toml > default
        let fc = file::load_config_file();
        Self::from_sources(fc, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from a parsed file and an environment lookup
    ///
    /// # Errors
    ///
    /// Returns error if a configured value is invalid
    pub fn from_sources<F>(fc: SaffronConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = env("SAFFRON_DB_PATH")
            .or(fc.database.path)
            .map_or_else(default_db_path, PathBuf::from);

        let api_keys = ApiKeys {
            openai: env("OPENAI_API_KEY").or(fc.api_keys.openai),
            deepgram: env("DEEPGRAM_API_KEY").or(fc.api_keys.deepgram),
            elevenlabs: env("ELEVENLABS_API_KEY").or(fc.api_keys.elevenlabs),
        };

        let stt_provider: SttProvider = env("SAFFRON_STT_PROVIDER")
            .or(fc.voice.stt_provider)
            .map_or(Ok(SttProvider::Whisper), |s| s.parse())?;
        let tts_provider: TtsProvider = env("SAFFRON_TTS_PROVIDER")
            .or(fc.voice.tts_provider)
            .map_or(Ok(TtsProvider::OpenAi), |s| s.parse())?;

        let tts_speed = fc.voice.tts_speed.unwrap_or(1.0);
        if !(0.25..=4.0).contains(&tts_speed) {
            return Err(Error::Config(format!(
                "tts_speed must be between 0.25 and 4.0, got {tts_speed}"
            )));
        }

        let voice = VoiceConfig {
            stt_provider,
            stt_model: env("SAFFRON_STT_MODEL")
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| stt_provider.default_model().to_string()),
            language: env("SAFFRON_LANGUAGE")
                .or(fc.voice.language)
                .unwrap_or_else(|| "en".to_string()),
            tts_provider,
            tts_model: env("SAFFRON_TTS_MODEL")
                .or(fc.voice.tts_model)
                .unwrap_or_else(|| tts_provider.default_model().to_string()),
            tts_voice: env("SAFFRON_TTS_VOICE")
                .or(fc.voice.tts_voice)
                .unwrap_or_else(|| "alloy".to_string()),
            tts_speed,
            max_utterance_secs: fc.voice.max_utterance_secs.unwrap_or(15).max(1),
        };

        let defaults = DialogueConfig::default();
        let max_preference_attempts = fc
            .dialogue
            .max_preference_attempts
            .unwrap_or(defaults.max_preference_attempts);
        if max_preference_attempts == 0 {
            return Err(Error::Config(
                "max_preference_attempts must be at least 1".to_string(),
            ));
        }

        let wait_min = fc
            .dialogue
            .wait_minutes_min
            .unwrap_or(*defaults.wait_minutes.start());
        let wait_max = fc
            .dialogue
            .wait_minutes_max
            .unwrap_or(*defaults.wait_minutes.end());
        if wait_min > wait_max {
            return Err(Error::Config(format!(
                "wait_minutes_min ({wait_min}) exceeds wait_minutes_max ({wait_max})"
            )));
        }

        Ok(Self {
            db_path,
            voice,
            api_keys,
            dialogue: DialogueConfig {
                max_preference_attempts,
                wait_minutes: wait_min..=wait_max,
            },
        })
    }
}
