//! Модуль заданий синтеза
//!
//! Этот модуль содержит модель задания и источник заданий,
//! разворачивающий строки исходной таблицы в задания синтеза.

pub mod source;

pub use source::JobSource;

use std::path::PathBuf;

/// Категория задания синтеза
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Озвучивание отдельного слова
    Word,
    /// Озвучивание примера-предложения с порядковым номером колонки
    Sentence(usize),
}

/// Одно задание синтеза: ровно один выходной файл
#[derive(Debug, Clone)]
pub struct SynthesisJob {
    /// Ключ идентичности, производный от слова (нижний регистр, без спецсимволов)
    pub identity: String,
    /// Категория задания
    pub kind: JobKind,
    /// Текст для синтеза (исходный, без изменения регистра)
    pub text: String,
    /// Путь к выходному файлу
    pub output_path: PathBuf,
}
