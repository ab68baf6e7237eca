//! Модуль для работы с FFmpeg
//!
//! Этот модуль содержит функции для запуска FFmpeg. Перекодирование
//! аудио выполняется внешним процессом, поэтому FFmpeg должен быть
//! установлен в системе.

use std::process::Command;

use crate::error::{Result, SeedVoiceError};

/// Проверка наличия FFmpeg
pub fn check_ffmpeg_installed() -> Result<bool> {
    let output = Command::new("ffmpeg").arg("-version").output()?;

    Ok(output.status.success())
}

/// Получение версии FFmpeg
pub fn get_ffmpeg_version() -> Result<String> {
    let output = Command::new("ffmpeg").arg("-version").output()?;

    if !output.status.success() {
        return Err(SeedVoiceError::Other(
            "Failed to get FFmpeg version".to_string(),
        ));
    }

    let version_str = String::from_utf8_lossy(&output.stdout);
    let first_line = version_str.lines().next().unwrap_or("");

    Ok(first_line.to_string())
}

/// Запуск команды FFmpeg
///
/// Возвращает ошибку с выводом stderr, если процесс завершился неуспешно.
pub fn run_ffmpeg_command(args: &[&str]) -> Result<()> {
    let output = Command::new("ffmpeg").args(args).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SeedVoiceError::AudioProcessing(format!(
            "FFmpeg command failed with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}
