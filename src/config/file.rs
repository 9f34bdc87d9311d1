//! TOML configuration file loading
//!
//! Supports `~/.config/saffron/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct SaffronConfigFile {
    /// Order store configuration
    #[serde(default)]
    pub database: DatabaseFileConfig,

    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Dialogue tuning
    #[serde(default)]
    pub dialogue: DialogueFileConfig,
}

/// Order store configuration
#[derive(Debug, Default, Deserialize)]
pub struct DatabaseFileConfig {
    /// Path to the `SQLite` file
    pub path: Option<String>,
}

/// Voice processing configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// STT provider ("whisper" or "deepgram")
    pub stt_provider: Option<String>,

    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,

    /// Spoken language hint (e.g. "en")
    pub language: Option<String>,

    /// TTS provider ("openai" or "elevenlabs")
    pub tts_provider: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice identifier (e.g. "alloy")
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f32>,

    /// Longest utterance captured before it is cut off
    pub max_utterance_secs: Option<u64>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub deepgram: Option<String>,
    pub elevenlabs: Option<String>,
}

/// Dialogue tuning
#[derive(Debug, Default, Deserialize)]
pub struct DialogueFileConfig {
    /// How many times to ask for a dietary preference before giving up
    pub max_preference_attempts: Option<u32>,

    /// Lower bound of the announced wait, in minutes
    pub wait_minutes_min: Option<u32>,

    /// Upper bound of the announced wait, in minutes
    pub wait_minutes_max: Option<u32>,
}

/// Load the TOML config file from the standard path
///
/// Returns `SaffronConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> SaffronConfigFile {
    config_file_path().map_or_else(SaffronConfigFile::default, |path| load_config_file_from(&path))
}

/// Load a TOML config file from an explicit path
///
/// Missing, unreadable or malformed files yield the defaults.
pub fn load_config_file_from(path: &Path) -> SaffronConfigFile {
    if !path.exists() {
        return SaffronConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                SaffronConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            SaffronConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/saffron/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("saffron").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [voice]
            stt_provider = "deepgram"
            tts_speed = 1.25

            [dialogue]
            max_preference_attempts = 5
            "#,
        )
        .unwrap();

        let fc = load_config_file_from(&path);
        assert_eq!(fc.voice.stt_provider.as_deref(), Some("deepgram"));
        assert_eq!(fc.voice.tts_speed, Some(1.25));
        assert_eq!(fc.dialogue.max_preference_attempts, Some(5));
        assert!(fc.database.path.is_none());
        assert!(fc.api_keys.openai.is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fc = load_config_file_from(&dir.path().join("absent.toml"));
        assert!(fc.voice.stt_model.is_none());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[voice\nstt_model = ").unwrap();

        let fc = load_config_file_from(&path);
        assert!(fc.voice.stt_model.is_none());
    }
}
