//! Модуль конфигурации библиотеки seedvoice
//!
//! Этот модуль содержит структуры для настройки синтеза речи,
//! нормализации громкости и чтения исходной таблицы.

use serde::{Deserialize, Serialize};

/// Настройки голоса для ElevenLabs API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceSettings {
    /// Стабильность голоса (0.0 - 1.0)
    pub stability: f32,
    /// Схожесть с оригинальным голосом (0.0 - 1.0)
    pub similarity_boost: f32,
    /// Выразительность (0.0 - 1.0)
    pub style: f32,
    /// Усиление голоса диктора
    pub use_speaker_boost: bool,
    /// Скорость речи
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
            speed: 1.0,
        }
    }
}

/// Конфигурация синтеза речи
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// API ключ ElevenLabs
    pub api_key: String,
    /// Базовый URL API
    pub base_url: String,
    /// Идентификатор голоса
    pub voice_id: String,
    /// Идентификатор модели
    pub model_id: String,
    /// Формат выходного аудио (кодек, частота, битрейт)
    pub output_format: String,
    /// Код языка; None для мультиязычных моделей
    pub language_code: Option<String>,
    /// Контекст перед словом (режим отдельных слов)
    pub word_priming: String,
    /// Контекст перед предложением (режим предложений)
    pub sentence_priming: String,
    /// Настройки голоса
    pub voice_settings: VoiceSettings,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.elevenlabs.io".to_string(),
            voice_id: "GvswFWTd71hi9q17e2su".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            output_format: "mp3_44100_192".to_string(),
            language_code: None,
            word_priming: "Let's pronounce the word".to_string(),
            sentence_priming: "Listen to the sentence".to_string(),
            voice_settings: VoiceSettings::default(),
        }
    }
}

/// Конфигурация нормализации громкости
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Целевая средняя громкость в dBFS
    pub target_dbfs: f32,
    /// Битрейт при перекодировании (аргумент -b:a для ffmpeg)
    pub bitrate: String,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            target_dbfs: -20.0,
            bitrate: "192k".to_string(),
        }
    }
}

/// Конфигурация чтения исходной таблицы
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSourceConfig {
    /// Имя обязательной колонки со словом
    pub word_column: String,
    /// Имена колонок с предложениями, в фиксированном порядке
    pub sentence_columns: Vec<String>,
    /// Расширение выходных файлов
    pub extension: String,
}

impl Default for JobSourceConfig {
    fn default() -> Self {
        Self {
            word_column: "Word".to_string(),
            sentence_columns: vec![
                "Sentence 1".to_string(),
                "Sentence 2".to_string(),
                "Sentence 3".to_string(),
            ],
            extension: "mp3".to_string(),
        }
    }
}
