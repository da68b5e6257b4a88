//! Text-to-speech client. Turns short scripts into MP3 bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Professional narrator voice used for all outreach and negotiation audio.
pub const VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const MODEL_ID: &str = "eleven_multilingual_v2";

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TTS API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("TTS returned no audio")]
    EmptyAudio,
}

/// Text-in / audio-bytes-out capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize_speech(&self, text: &str) -> Result<Bytes, TtsError>;
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.75,
            similarity_boost: 0.8,
            style: 0.2,
            use_speaker_boost: true,
        }
    }
}

#[derive(Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, TtsError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(60)).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize_speech(&self, text: &str) -> Result<Bytes, TtsError> {
        let body = SpeechRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .client
            .post(format!("{}/text-to-speech/{VOICE_ID}", self.base_url))
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TtsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ElevenLabsClient {
        ElevenLabsClient::new("tts-key".to_string(), &server.uri())
            .expect("client construction should not fail")
    }

    #[tokio::test]
    async fn test_synthesize_returns_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/text-to-speech/{VOICE_ID}")))
            .and(header("xi-api-key", "tts-key"))
            .and(body_partial_json(serde_json::json!({
                "text": "Hi Maya",
                "model_id": MODEL_ID,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3fakeaudio".to_vec()))
            .mount(&server)
            .await;

        let audio = client(&server).synthesize_speech("Hi Maya").await.unwrap();
        assert_eq!(&audio[..], b"ID3fakeaudio");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client(&server).synthesize_speech("hello").await.unwrap_err();
        match err {
            TtsError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = client(&server).synthesize_speech("hello").await.unwrap_err();
        assert!(matches!(err, TtsError::EmptyAudio));
    }
}
