//! Text-to-speech over HTTP

use serde::Serialize;

use crate::config::{ApiKeys, TtsProvider, VoiceConfig};
use crate::{Error, Result};

const OPENAI_SPEECH_URL: &str = "https://api.openai.com/v1/audio/speech";
const ELEVENLABS_SPEECH_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";

#[derive(Serialize)]
struct OpenAiSpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
    response_format: &'a str,
}

#[derive(Serialize)]
struct ElevenLabsSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// Synthesizes MP3 speech through `OpenAI` or `ElevenLabs`
pub struct TextToSpeech {
    client: reqwest::Client,
    provider: TtsProvider,
    api_key: String,
    model: String,
    voice: String,
    speed: f32,
}

impl TextToSpeech {
    /// Create a synthesizer for `provider`
    ///
    /// `voice` is an `OpenAI` voice name or an `ElevenLabs` voice id. `ElevenLabs`
    /// ignores `speed`.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(
        provider: TtsProvider,
        api_key: String,
        model: String,
        voice: String,
        speed: f32,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config(format!("{provider:?} API key required for TTS")));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            provider,
            api_key,
            model,
            voice,
            speed,
        })
    }

    /// Create the synthesizer selected by the voice configuration
    ///
    /// # Errors
    ///
    /// Returns error if the provider's API key is not configured
    pub fn from_config(voice: &VoiceConfig, keys: &ApiKeys) -> Result<Self> {
        let key = match voice.tts_provider {
            TtsProvider::OpenAi => keys.openai.clone(),
            TtsProvider::ElevenLabs => keys.elevenlabs.clone(),
        };

        Self::new(
            voice.tts_provider,
            key.unwrap_or_default(),
            voice.tts_model.clone(),
            voice.tts_voice.clone(),
            voice.tts_speed,
        )
    }

    /// Synthesize `text`, returning MP3 bytes
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects it
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        tracing::debug!(provider = ?self.provider, chars = text.len(), "synthesizing");

        let request = match self.provider {
            TtsProvider::OpenAi => self
                .client
                .post(OPENAI_SPEECH_URL)
                .bearer_auth(&self.api_key)
                .json(&OpenAiSpeechRequest {
                    model: &self.model,
                    input: text,
                    voice: &self.voice,
                    speed: self.speed,
                    response_format: "mp3",
                }),
            TtsProvider::ElevenLabs => self
                .client
                .post(format!("{ELEVENLABS_SPEECH_URL}/{}", self.voice))
                .header("xi-api-key", &self.api_key)
                .json(&ElevenLabsSpeechRequest {
                    text,
                    model_id: &self.model,
                }),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(provider = ?self.provider, status = %status, body = %body, "TTS API error");
            return Err(Error::Tts(format!("{:?} TTS error {status}: {body}", self.provider)));
        }

        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let result = TextToSpeech::new(
            TtsProvider::ElevenLabs,
            String::new(),
            "eleven_monolingual_v1".to_string(),
            "voice-id".to_string(),
            1.0,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_openai_request_body() {
        let body = serde_json::to_value(OpenAiSpeechRequest {
            model: "tts-1",
            input: "Namaste",
            voice: "alloy",
            speed: 1.0,
            response_format: "mp3",
        })
        .unwrap();
        assert_eq!(body["input"], "Namaste");
        assert_eq!(body["response_format"], "mp3");
    }
}
