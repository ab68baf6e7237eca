//! Пакетный запуск синтеза
//!
//! Последовательно проводит каждое задание через стадии
//! синтез → сборка → нормализация → запись. Ошибка любой стадии
//! изолируется на границе задания: она логируется вместе с текстом
//! задания, и запуск продолжается со следующего задания.

use std::collections::HashSet;

use log::{error, info};

use crate::audio::normalize_loudness;
use crate::config::NormalizationConfig;
use crate::error::Result;
use crate::jobs::{JobKind, SynthesisJob};
use crate::output::write_audio;
use crate::tts::{SpeechSynthesizer, SynthesisMode};

/// Итог одного пакетного запуска
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Количество заданий, для которых была начата обработка
    pub attempted: usize,
    /// Количество успешно записанных файлов
    pub succeeded: usize,
    /// Количество заданий, завершившихся ошибкой
    pub failed: usize,
    /// Количество различных слов среди обработанных заданий
    pub distinct_words: usize,
}

/// Последовательный исполнитель пакета заданий синтеза
pub struct BatchRunner<'a, S: SpeechSynthesizer> {
    synthesizer: &'a S,
    normalization: &'a NormalizationConfig,
}

impl<'a, S: SpeechSynthesizer> BatchRunner<'a, S> {
    /// Создает исполнитель с указанным клиентом синтеза и настройками нормализации
    pub fn new(synthesizer: &'a S, normalization: &'a NormalizationConfig) -> Self {
        Self {
            synthesizer,
            normalization,
        }
    }

    /// Выполняет все задания в порядке поступления.
    ///
    /// Ошибка источника заданий (например, поврежденная строка таблицы)
    /// фатальна и прерывает запуск; ошибка отдельного задания — нет.
    /// Запуск, в котором все задания завершились ошибкой, все равно
    /// считается завершенным успешно — итог виден в `RunSummary`.
    pub async fn run<I>(&self, jobs: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<SynthesisJob>>,
    {
        let mut summary = RunSummary::default();
        let mut words = HashSet::new();

        for job in jobs {
            let job = job?;
            summary.attempted += 1;
            words.insert(job.identity.clone());

            info!(
                "Synthesizing {:?} -> {}",
                job.text,
                job.output_path.display()
            );
            match self.process_job(&job).await {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    error!(
                        "Error synthesizing {:?} ({:?}): {}",
                        job.text, job.kind, e
                    );
                    summary.failed += 1;
                }
            }
        }

        summary.distinct_words = words.len();
        info!(
            "Done. Generated {} audio file(s) ({} failed, {} distinct word(s))",
            summary.succeeded, summary.failed, summary.distinct_words
        );
        Ok(summary)
    }

    /// Проводит одно задание через все стадии конвейера
    async fn process_job(&self, job: &SynthesisJob) -> Result<()> {
        let mode = match job.kind {
            JobKind::Word => SynthesisMode::Word,
            JobKind::Sentence(_) => SynthesisMode::Sentence,
        };

        let payload = self.synthesizer.synthesize(&job.text, mode).await?;
        let raw_bytes = payload.collect();
        let normalized = normalize_loudness(&raw_bytes, self.normalization)?;
        write_audio(&job.output_path, &normalized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedVoiceError;
    use crate::tts::RawPayload;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Клиент-заглушка: возвращает пустой буфер либо ошибку транспорта
    /// для текстов, начинающихся с "fail"
    struct StubSynthesizer;

    #[async_trait]
    impl SpeechSynthesizer for StubSynthesizer {
        async fn synthesize(&self, text: &str, _mode: SynthesisMode) -> Result<RawPayload> {
            if text.starts_with("fail") {
                return Err(SeedVoiceError::Synthesis(
                    "simulated transport error".to_string(),
                ));
            }
            Ok(RawPayload::Buffer(Bytes::new()))
        }
    }

    fn job(identity: &str, kind: JobKind, text: &str, path: PathBuf) -> Result<SynthesisJob> {
        Ok(SynthesisJob {
            identity: identity.to_string(),
            kind,
            text: text.to_string(),
            output_path: path,
        })
    }

    #[tokio::test]
    async fn test_failed_job_does_not_stop_the_batch() {
        let dir = tempdir().unwrap();
        let config = NormalizationConfig::default();
        let runner = BatchRunner::new(&StubSynthesizer, &config);

        let jobs = vec![
            job("cat", JobKind::Word, "Cat", dir.path().join("cat.mp3")),
            job("fail", JobKind::Word, "fail me", dir.path().join("fail.mp3")),
            job("dog", JobKind::Word, "Dog", dir.path().join("dog.mp3")),
        ];

        let summary = runner.run(jobs).await.unwrap();

        // Подсчет попыток включает неудавшееся задание
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.distinct_words, 3);

        // Задания после сбоя все равно были выполнены
        assert!(dir.path().join("cat.mp3").exists());
        assert!(dir.path().join("dog.mp3").exists());
        assert!(!dir.path().join("fail.mp3").exists());
    }

    #[tokio::test]
    async fn test_all_failed_run_still_completes() {
        let dir = tempdir().unwrap();
        let config = NormalizationConfig::default();
        let runner = BatchRunner::new(&StubSynthesizer, &config);

        let jobs = vec![
            job("a", JobKind::Word, "fail a", dir.path().join("a.mp3")),
            job("b", JobKind::Word, "fail b", dir.path().join("b.mp3")),
        ];

        let summary = runner.run(jobs).await.unwrap();
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.succeeded, 0);
    }

    #[tokio::test]
    async fn test_source_error_is_fatal() {
        let dir = tempdir().unwrap();
        let config = NormalizationConfig::default();
        let runner = BatchRunner::new(&StubSynthesizer, &config);

        let jobs = vec![
            job("cat", JobKind::Word, "Cat", dir.path().join("cat.mp3")),
            Err(SeedVoiceError::JobSource("broken record".to_string())),
            job("dog", JobKind::Word, "Dog", dir.path().join("dog.mp3")),
        ];

        assert!(runner.run(jobs).await.is_err());
        // Задания до ошибки источника успели выполниться
        assert!(dir.path().join("cat.mp3").exists());
        assert!(!dir.path().join("dog.mp3").exists());
    }

    #[tokio::test]
    async fn test_sentence_jobs_count_toward_their_word() {
        let dir = tempdir().unwrap();
        let config = NormalizationConfig::default();
        let runner = BatchRunner::new(&StubSynthesizer, &config);

        let jobs = vec![
            job("cat", JobKind::Word, "Cat", dir.path().join("cat.mp3")),
            job(
                "cat",
                JobKind::Sentence(1),
                "The cat sat.",
                dir.path().join("cat_sentence_1.mp3"),
            ),
        ];

        let summary = runner.run(jobs).await.unwrap();
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.distinct_words, 1);
    }
}
