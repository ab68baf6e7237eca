//! Модуль для работы с аудио
//!
//! Декодирование MP3 в PCM семплы и измерение громкости.
//! Для многоканального аудио выполняется микширование в моно.

pub mod normalize;

pub use normalize::normalize_loudness;

use log::{info, warn};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::probe::Hint;

use crate::error::{Result, SeedVoiceError};

/// Декодирует MP3 данные в PCM семплы.
///
/// # Аргументы
///
/// * `mp3_data` - Бинарные данные MP3
///
/// # Возвращает
///
/// Кортеж из вектора PCM семплов (f32, моно) и частоты дискретизации
///
/// # Ошибки
///
/// Возвращает `SeedVoiceError::AudioProcessing`, если формат не распознан,
/// аудио-трек не найден или не удалось создать декодер.
pub fn decode_mp3(mp3_data: &[u8]) -> Result<(Vec<f32>, u32)> {
    let cursor = std::io::Cursor::new(mp3_data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let format_opts = FormatOptions {
        enable_gapless: false,
        ..Default::default()
    };

    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &Default::default())
        .map_err(|e| {
            SeedVoiceError::AudioProcessing(format!("Failed to probe audio format: {}", e))
        })?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| {
            SeedVoiceError::AudioProcessing("No audio track found in MP3 data".to_string())
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions { verify: true })
        .map_err(|e| {
            SeedVoiceError::AudioProcessing(format!("Failed to create MP3 decoder: {}", e))
        })?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let channels = track.codec_params.channels.unwrap_or_default().count();

    let mut pcm_data = Vec::new();

    while let Ok(packet) = format.next_packet() {
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let mut sample_buf =
                    SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                sample_buf.copy_planar_ref(decoded);
                let samples = sample_buf.samples();

                // Объединяем каналы в моно, если их больше одного
                if channels > 1 {
                    let frames_per_channel = samples.len() / channels;
                    for frame in 0..frames_per_channel {
                        let mut sum = 0.0;
                        for ch in 0..channels {
                            sum += samples[ch * frames_per_channel + frame];
                        }
                        pcm_data.push(sum / channels as f32);
                    }
                } else {
                    pcm_data.extend_from_slice(samples);
                }
            }
            Err(e) => {
                // Пропускаем проблемный пакет и продолжаем
                warn!("Failed to decode MP3 packet: {}", e);
                continue;
            }
        }
    }

    info!(
        "Decoded {} MP3 sample(s) at {} Hz",
        pcm_data.len(),
        sample_rate
    );
    Ok((pcm_data, sample_rate))
}

/// Вычисляет среднеквадратичное значение (RMS) для массива семплов
pub fn compute_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f32 = samples.iter().map(|&s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Измеряет среднюю громкость сигнала в dBFS.
///
/// Семплы ожидаются в диапазоне [-1.0, 1.0]; полная шкала соответствует
/// 0 dBFS. Для тишины возвращается минус бесконечность.
pub fn measure_dbfs(samples: &[f32]) -> f32 {
    let rms = compute_rms(samples);
    if rms <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * rms.log10()
    }
}
