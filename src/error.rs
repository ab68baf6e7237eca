//! Модуль обработки ошибок библиотеки seedvoice
//!
//! Этот модуль содержит типы ошибок, которые могут возникнуть при работе библиотеки.

use thiserror::Error;

/// Ошибки библиотеки seedvoice
#[derive(Debug, Error)]
pub enum SeedVoiceError {
    /// Ошибка HTTP запроса
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ошибка ввода-вывода
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации/десериализации JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка чтения CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Ошибка синтеза речи
    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    /// Ошибка обработки аудио
    #[error("Audio processing error: {0}")]
    AudioProcessing(String),

    /// Ошибка источника заданий
    #[error("Job source error: {0}")]
    JobSource(String),

    /// Ошибка конфигурации
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Файл не найден
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Другая ошибка
    #[error("Other error: {0}")]
    Other(String),
}

impl From<&str> for SeedVoiceError {
    fn from(s: &str) -> Self {
        SeedVoiceError::Other(s.to_string())
    }
}

impl From<String> for SeedVoiceError {
    fn from(s: String) -> Self {
        SeedVoiceError::Other(s)
    }
}

/// Тип Result для библиотеки seedvoice
pub type Result<T> = std::result::Result<T, SeedVoiceError>;
