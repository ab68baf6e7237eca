//! Полезная нагрузка синтеза речи
//!
//! Сервис синтеза может вернуть аудио как единый буфер или как конечную
//! последовательность чанков разной природы. Этот модуль сводит любую
//! форму ответа к единому байтовому буферу, сохраняя порядок чанков.

use base64::Engine;
use bytes::Bytes;
use log::warn;
use serde_json::Value;

/// Один чанк потокового ответа сервиса синтеза
#[derive(Debug, Clone)]
pub enum AudioChunk {
    /// Готовые байты аудио
    Bytes(Bytes),
    /// Текстовый чанк; кодируется в UTF-8 при сборке
    Text(String),
    /// Чанк неизвестного вида; выполняется попытка приведения к байтам
    Other(Value),
}

impl AudioChunk {
    /// Приводит чанк к байтам.
    ///
    /// Для неопознанных чанков выполняется консервативное приведение:
    /// JSON-строка трактуется как base64-кодированное аудио, массив чисел
    /// 0..=255 — как байты, объект — через поле `audio`. Если приведение
    /// невозможно, возвращается None.
    fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            AudioChunk::Bytes(bytes) => Some(bytes.to_vec()),
            AudioChunk::Text(text) => Some(text.into_bytes()),
            AudioChunk::Other(value) => coerce_value(&value),
        }
    }
}

/// Приведение JSON-значения к байтам
fn coerce_value(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::String(s) => base64::engine::general_purpose::STANDARD.decode(s).ok(),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
            .collect::<Option<Vec<u8>>>(),
        Value::Object(map) => match map.get("audio") {
            Some(Value::String(s)) => {
                base64::engine::general_purpose::STANDARD.decode(s).ok()
            }
            _ => None,
        },
        _ => None,
    }
}

/// Результат одного вызова синтеза: единый буфер или поток чанков
#[derive(Debug)]
pub enum RawPayload {
    /// Весь ответ получен одним буфером
    Buffer(Bytes),
    /// Ответ получен по частям; порядок чанков значим
    Chunks(Vec<AudioChunk>),
}

impl RawPayload {
    /// Собирает полезную нагрузку в один байтовый буфер.
    ///
    /// Буфер возвращается как есть. Чанки склеиваются строго в порядке
    /// поступления; пустые (`null`) чанки пропускаются молча, чанк, не
    /// приводимый к байтам, отбрасывается с предупреждением — задание
    /// при этом продолжается с уже собранными байтами.
    pub fn collect(self) -> Vec<u8> {
        match self {
            RawPayload::Buffer(bytes) => bytes.to_vec(),
            RawPayload::Chunks(chunks) => {
                let mut collected = Vec::new();
                for chunk in chunks {
                    if let AudioChunk::Other(Value::Null) = chunk {
                        continue;
                    }
                    let described = describe_chunk(&chunk);
                    match chunk.into_bytes() {
                        Some(bytes) => collected.extend_from_slice(&bytes),
                        None => {
                            warn!("Skipping non-bytes chunk of type {}", described);
                        }
                    }
                }
                collected
            }
        }
    }
}

fn describe_chunk(chunk: &AudioChunk) -> &'static str {
    match chunk {
        AudioChunk::Bytes(_) => "bytes",
        AudioChunk::Text(_) => "text",
        AudioChunk::Other(Value::Null) => "null",
        AudioChunk::Other(Value::Bool(_)) => "bool",
        AudioChunk::Other(Value::Number(_)) => "number",
        AudioChunk::Other(Value::String(_)) => "string",
        AudioChunk::Other(Value::Array(_)) => "array",
        AudioChunk::Other(Value::Object(_)) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_buffer_passes_through() {
        let payload = RawPayload::Buffer(Bytes::from_static(b"abc"));
        assert_eq!(payload.collect(), b"abc");
    }

    #[test]
    fn test_chunks_preserve_order() {
        let payload = RawPayload::Chunks(vec![
            AudioChunk::Bytes(Bytes::from_static(b"ab")),
            AudioChunk::Text("cd".to_string()),
            AudioChunk::Bytes(Bytes::from_static(b"ef")),
        ]);
        assert_eq!(payload.collect(), b"abcdef");
    }

    #[test]
    fn test_text_chunk_is_utf8_encoded() {
        let payload = RawPayload::Chunks(vec![AudioChunk::Text("звук".to_string())]);
        assert_eq!(payload.collect(), "звук".as_bytes());
    }

    #[test]
    fn test_unrecognized_chunk_is_dropped_not_inserted() {
        let payload = RawPayload::Chunks(vec![
            AudioChunk::Bytes(Bytes::from_static(b"ab")),
            AudioChunk::Other(json!(3.14)),
            AudioChunk::Bytes(Bytes::from_static(b"cd")),
        ]);
        assert_eq!(payload.collect(), b"abcd");
    }

    #[test]
    fn test_null_chunk_is_skipped() {
        let payload = RawPayload::Chunks(vec![
            AudioChunk::Other(Value::Null),
            AudioChunk::Bytes(Bytes::from_static(b"xy")),
        ]);
        assert_eq!(payload.collect(), b"xy");
    }

    #[test]
    fn test_base64_string_chunk_is_decoded() {
        // "aGk=" -> "hi"
        let payload = RawPayload::Chunks(vec![AudioChunk::Other(json!("aGk="))]);
        assert_eq!(payload.collect(), b"hi");
    }

    #[test]
    fn test_object_chunk_with_audio_field() {
        let payload = RawPayload::Chunks(vec![AudioChunk::Other(json!({"audio": "aGk="}))]);
        assert_eq!(payload.collect(), b"hi");
    }

    #[test]
    fn test_byte_array_chunk_is_coerced() {
        let payload = RawPayload::Chunks(vec![AudioChunk::Other(json!([104, 105]))]);
        assert_eq!(payload.collect(), b"hi");
    }

    #[test]
    fn test_out_of_range_array_is_dropped() {
        let payload = RawPayload::Chunks(vec![
            AudioChunk::Other(json!([300, 105])),
            AudioChunk::Bytes(Bytes::from_static(b"ok")),
        ]);
        assert_eq!(payload.collect(), b"ok");
    }

    #[test]
    fn test_empty_chunks_collect_to_empty() {
        let payload = RawPayload::Chunks(Vec::new());
        assert!(payload.collect().is_empty());
    }
}
