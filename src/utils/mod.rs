//! Вспомогательные модули

pub mod common;
pub mod ffmpeg;
