//! Нормализация громкости
//!
//! Приводит среднюю громкость MP3 к целевому уровню в dBFS:
//! измерение выполняется в процессе (symphonia), равномерное усиление
//! и перекодирование с фиксированным битрейтом — через FFmpeg.

use log::{info, warn};

use crate::audio::{decode_mp3, measure_dbfs};
use crate::config::NormalizationConfig;
use crate::error::{Result, SeedVoiceError};
use crate::utils::ffmpeg::run_ffmpeg_command;

/// Нормализует громкость MP3 данных к целевому уровню.
///
/// Пустой вход возвращается без изменений — это не ошибка. Для остальных
/// данных: декодирование, измерение средней громкости, вычисление усиления
/// `gain = target - measured` и перекодирование с этим усилением при
/// фиксированном битрейте.
///
/// # Аргументы
///
/// * `audio` - Закодированные MP3 данные
/// * `config` - Целевая громкость и битрейт перекодирования
///
/// # Возвращает
///
/// Нормализованные MP3 данные
///
/// # Ошибки
///
/// Возвращает `SeedVoiceError::AudioProcessing`, если данные не декодируются,
/// поток после декодирования пуст или перекодирование завершилось неудачно.
pub fn normalize_loudness(audio: &[u8], config: &NormalizationConfig) -> Result<Vec<u8>> {
    if audio.is_empty() {
        return Ok(Vec::new());
    }

    let (samples, _sample_rate) = decode_mp3(audio)?;
    if samples.is_empty() {
        return Err(SeedVoiceError::AudioProcessing(
            "Decoded audio stream is empty".to_string(),
        ));
    }

    let measured = measure_dbfs(&samples);
    let mut gain = config.target_dbfs - measured;
    if !gain.is_finite() {
        // Тишина: усиление не определено, оставляем уровень как есть
        warn!("Measured loudness is not finite, skipping gain adjustment");
        gain = 0.0;
    }

    info!(
        "Measured loudness {:.2} dBFS, applying gain {:+.2} dB",
        measured, gain
    );

    let temp_dir = tempfile::tempdir()?;
    let input_path = temp_dir.path().join("input.mp3");
    let output_path = temp_dir.path().join("normalized.mp3");
    std::fs::write(&input_path, audio)?;

    let input_str = input_path.to_string_lossy();
    let output_str = output_path.to_string_lossy();
    let filter = format!("volume={:.4}dB", gain);
    let args = vec![
        "-i",
        input_str.as_ref(),
        "-filter:a",
        &filter,
        "-b:a",
        &config.bitrate,
        "-y",
        output_str.as_ref(),
    ];

    run_ffmpeg_command(&args)?;

    Ok(std::fs::read(&output_path)?)
}
