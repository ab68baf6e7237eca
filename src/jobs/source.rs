//! Источник заданий синтеза
//!
//! Читает табличный источник (CSV), проверяет наличие обязательных колонок
//! и лениво разворачивает каждую строку в задания синтеза: одно задание для
//! слова и по одному для каждого непустого предложения. Дубликаты слов
//! (без учета регистра) отбрасываются целиком — выигрывает первое вхождение.

use std::collections::{HashSet, VecDeque};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, warn};

use crate::config::JobSourceConfig;
use crate::error::{Result, SeedVoiceError};
use crate::jobs::{JobKind, SynthesisJob};
use crate::utils::common::sanitize_filename;

/// Ленивый источник заданий синтеза поверх CSV-таблицы
pub struct JobSource<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    config: JobSourceConfig,
    /// Позиция колонки со словом в заголовке
    word_pos: usize,
    /// Позиции колонок с предложениями; None, если колонка отсутствует
    sentence_pos: Vec<Option<usize>>,
    /// Ключи идентичности, уже выданные в этом запуске
    seen: HashSet<String>,
    /// Задания, развернутые из текущей строки и еще не выданные
    pending: VecDeque<SynthesisJob>,
    words_dir: PathBuf,
    sentences_dir: PathBuf,
}

impl JobSource<File> {
    /// Открывает CSV-файл как источник заданий
    pub fn from_path(
        path: &Path,
        config: JobSourceConfig,
        words_dir: &Path,
        sentences_dir: &Path,
    ) -> Result<Self> {
        if !path.exists() {
            return Err(SeedVoiceError::FileNotFound(format!(
                "CSV file not found at: {}",
                path.display()
            )));
        }
        let file = File::open(path)?;
        Self::from_reader(file, config, words_dir, sentences_dir)
    }
}

impl<R: Read> JobSource<R> {
    /// Создает источник заданий поверх произвольного читателя CSV.
    ///
    /// Отсутствие обязательной колонки со словом — ошибка конфигурации,
    /// прерывающая весь запуск до создания первого задания.
    pub fn from_reader(
        reader: R,
        config: JobSourceConfig,
        words_dir: &Path,
        sentences_dir: &Path,
    ) -> Result<Self> {
        // Неполные строки допустимы: недостающие поля читаются как пустые
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let word_pos = headers
            .iter()
            .position(|h| h == config.word_column)
            .ok_or_else(|| {
                SeedVoiceError::JobSource(format!(
                    "'{}' column not found in CSV. Found columns: {:?}",
                    config.word_column,
                    headers.iter().collect::<Vec<_>>()
                ))
            })?;

        // Колонки предложений опциональны: отсутствующая колонка
        // эквивалентна пустому значению в каждой строке
        let sentence_pos = config
            .sentence_columns
            .iter()
            .map(|name| headers.iter().position(|h| h == name))
            .collect();

        Ok(Self {
            records: csv_reader.into_records(),
            config,
            word_pos,
            sentence_pos,
            seen: HashSet::new(),
            pending: VecDeque::new(),
            words_dir: words_dir.to_path_buf(),
            sentences_dir: sentences_dir.to_path_buf(),
        })
    }

    /// Количество различных слов, уже выданных источником
    pub fn distinct_words(&self) -> usize {
        self.seen.len()
    }

    /// Разворачивает одну строку таблицы в задания
    fn expand_record(&mut self, record: &StringRecord) {
        let word = record.get(self.word_pos).unwrap_or("").trim();
        if word.is_empty() {
            // Пустое слово — строка пропускается молча
            return;
        }

        let identity = sanitize_filename(word);
        if !self.seen.insert(identity.clone()) {
            warn!("Skipping duplicate word: {:?} (identity {:?})", word, identity);
            return;
        }

        let word_file = format!("{}.{}", identity, self.config.extension);
        self.pending.push_back(SynthesisJob {
            identity: identity.clone(),
            kind: JobKind::Word,
            text: word.to_string(),
            output_path: self.words_dir.join(word_file),
        });

        for (i, pos) in self.sentence_pos.iter().enumerate() {
            let index = i + 1;
            let sentence = pos
                .and_then(|p| record.get(p))
                .unwrap_or("")
                .trim();
            if sentence.is_empty() {
                // Пропуски допустимы: отсутствие предложения с номером i
                // не влияет на предложения с большими номерами
                continue;
            }

            let sentence_file =
                format!("{}_sentence_{}.{}", identity, index, self.config.extension);
            self.pending.push_back(SynthesisJob {
                identity: identity.clone(),
                kind: JobKind::Sentence(index),
                text: sentence.to_string(),
                output_path: self.sentences_dir.join(sentence_file),
            });
        }

        debug!(
            "Expanded word {:?} into {} job(s)",
            word,
            self.pending.len()
        );
    }
}

impl<R: Read> Iterator for JobSource<R> {
    type Item = Result<SynthesisJob>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(job) = self.pending.pop_front() {
                return Some(Ok(job));
            }

            match self.records.next() {
                None => return None,
                Some(Err(e)) => return Some(Err(e.into())),
                Some(Ok(record)) => self.expand_record(&record),
            }
        }
    }
}
