//! Модуль синтеза речи
//!
//! Содержит клиент ElevenLabs API и типы для работы с полезной нагрузкой,
//! возвращаемой сервисом синтеза (единый буфер либо поток чанков).

pub mod elevenlabs;
pub mod payload;

pub use elevenlabs::{ElevenLabsClient, SpeechSynthesizer, SynthesisMode};
pub use payload::{AudioChunk, RawPayload};
