//! Запись выходных файлов
//!
//! Гарантирует существование целевой директории и перезаписывает
//! файл целиком. Версионирования и дозаписи нет: повторный запуск
//! воспроизводит тот же файл.

use std::path::Path;

use log::debug;

use crate::error::Result;

/// Записывает байты по указанному пути, создавая недостающие директории.
///
/// Существующий файл перезаписывается полностью.
pub async fn write_audio(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, data).await?;

    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets").join("audio").join("cat.mp3");

        write_audio(&path, b"audio bytes").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"audio bytes");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cat.mp3");

        write_audio(&path, b"first").await.unwrap();
        write_audio(&path, b"second").await.unwrap();

        // Старое содержимое не сохраняется, дозаписи нет
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
