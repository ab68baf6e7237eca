//! Модуль для интеграции с ElevenLabs API
//!
//! Этот модуль содержит клиент для генерации речи через ElevenLabs
//! Text-to-Speech API. Выполняется ровно одна попытка на задание:
//! повторные запросы и backoff не предусмотрены, ошибка возвращается
//! вызывающей стороне.

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, error, info};
use reqwest::Client;
use serde::Serialize;

use crate::config::{SynthesisConfig, VoiceSettings};
use crate::error::{Result, SeedVoiceError};
use crate::tts::payload::{AudioChunk, RawPayload};

/// Режим синтеза: определяет праймирующий контекст перед текстом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Озвучивание отдельного слова
    Word,
    /// Озвучивание предложения
    Sentence,
}

/// Абстракция над удаленным сервисом синтеза речи
#[async_trait]
pub trait SpeechSynthesizer {
    /// Синтезирует речь для текста и возвращает полезную нагрузку как есть,
    /// без какой-либо обработки на стороне клиента
    async fn synthesize(&self, text: &str, mode: SynthesisMode) -> Result<RawPayload>;
}

/// Параметры запроса к ElevenLabs TTS API
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    previous_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
    voice_settings: &'a VoiceSettings,
}

/// Клиент ElevenLabs Text-to-Speech API
pub struct ElevenLabsClient {
    client: Client,
    config: SynthesisConfig,
}

impl ElevenLabsClient {
    /// Создает клиент с указанной конфигурацией
    pub fn new(config: SynthesisConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, mode: SynthesisMode) -> Result<RawPayload> {
        if self.config.api_key.trim().is_empty() {
            return Err(SeedVoiceError::Configuration(
                "ElevenLabs API key is required for speech synthesis".to_string(),
            ));
        }

        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url, self.config.voice_id
        );
        let previous_text = match mode {
            SynthesisMode::Word => &self.config.word_priming,
            SynthesisMode::Sentence => &self.config.sentence_priming,
        };

        let request_body = TtsRequest {
            text,
            model_id: &self.config.model_id,
            previous_text,
            language_code: self.config.language_code.as_deref(),
            voice_settings: &self.config.voice_settings,
        };

        debug!("Sending TTS request for text: {:?}", text);
        let response = self
            .client
            .post(&url)
            .query(&[("output_format", self.config.output_format.as_str())])
            .header("xi-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = match response.text().await {
                Ok(text) => text,
                Err(e) => format!("Failed to read error response: {}", e),
            };
            error!("ElevenLabs API error (status {}): {}", status, error_text);
            return Err(SeedVoiceError::Synthesis(format!(
                "ElevenLabs API error (status {}): {}",
                status, error_text
            )));
        }

        // Собираем потоковое тело ответа в последовательность чанков,
        // сохраняя порядок поступления
        let mut chunks = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            chunks.push(AudioChunk::Bytes(chunk?));
        }

        info!(
            "Received audio response for {:?}: {} chunk(s)",
            text,
            chunks.len()
        );
        Ok(RawPayload::Chunks(chunks))
    }
}
