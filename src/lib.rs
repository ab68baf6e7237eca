//! # seedvoice
//!
//! Библиотека пакетной генерации озвучки для списков слов.
//! Выполняет следующие задачи:
//! 1. Чтение CSV-таблицы со словами и примерами-предложениями,
//!    проверка обязательных колонок и дедупликация слов.
//! 2. Генерация аудио через ElevenLabs TTS API (одна попытка на задание,
//!    без повторов).
//! 3. Сборка потокового ответа в единый байтовый буфер с сохранением
//!    порядка чанков.
//! 4. Нормализация средней громкости к целевому уровню в dBFS и
//!    перекодирование MP3 с фиксированным битрейтом.
//! 5. Запись результатов под детерминированными именами; ошибка одного
//!    задания не прерывает пакет.
//! 6. Выгрузка таблицы фонем из корпуса произношений для офлайн-потребителя.
//!
//! **Замечание:** для перекодирования аудио требуется установленный ffmpeg.

pub mod audio;
pub mod config;
pub mod error;
pub mod jobs;
pub mod output;
pub mod phoneme;
pub mod pipeline;
pub mod tts;
pub mod utils;

pub use config::{JobSourceConfig, NormalizationConfig, SynthesisConfig, VoiceSettings};
pub use error::{Result, SeedVoiceError};
pub use jobs::{JobKind, JobSource, SynthesisJob};
pub use pipeline::{BatchRunner, RunSummary};
pub use tts::{ElevenLabsClient, RawPayload, SpeechSynthesizer, SynthesisMode};
