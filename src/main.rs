//! Консольный драйвер seedvoice
//!
//! Три режима, соответствующие трем видам генерируемых артефактов:
//! - `words` — озвучка отдельных слов;
//! - `sentences` — озвучка примеров-предложений;
//! - `phonemes` — выгрузка таблицы фонем.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use env_logger::{Builder, Env};
use log::info;

use seedvoice::jobs::JobKind;
use seedvoice::utils::ffmpeg;
use seedvoice::{
    BatchRunner, ElevenLabsClient, JobSource, JobSourceConfig, NormalizationConfig,
    SynthesisConfig,
};

/// Инициализация логгера: базовый фильтр с переопределением через RUST_LOG
fn init_logger() {
    let env = Env::default().filter_or("RUST_LOG", "warn,seedvoice=info");

    Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

/// Проверка конфигурации до запуска первого задания.
///
/// Отсутствие ключа API, входной таблицы или ffmpeg — фатальная ошибка.
fn check_config(config: &SynthesisConfig, csv_path: &Path) -> anyhow::Result<()> {
    if config.api_key.trim().is_empty() {
        bail!("ELEVENLABS_API_KEY not set. Set it in your environment before running.");
    }
    if !csv_path.exists() {
        bail!("CSV file not found at: {}", csv_path.display());
    }
    if !ffmpeg::check_ffmpeg_installed().unwrap_or(false) {
        bail!("ffmpeg not found on PATH; it is required for loudness normalization");
    }
    Ok(())
}

/// Какие задания выполняет текущий запуск
enum JobFilter {
    Words,
    Sentences,
}

async fn run_batch(csv: &str, out_dir: &str, filter: JobFilter) -> anyhow::Result<()> {
    let api_key = std::env::var("ELEVENLABS_API_KEY").unwrap_or_default();
    let synthesis = SynthesisConfig {
        api_key,
        ..SynthesisConfig::default()
    };

    let csv_path = Path::new(csv);
    check_config(&synthesis, csv_path)?;

    let out_dir = PathBuf::from(out_dir);
    let source = JobSource::from_path(csv_path, JobSourceConfig::default(), &out_dir, &out_dir)
        .context("failed to open job source")?;

    let keep_words = matches!(filter, JobFilter::Words);
    let jobs = source.filter(move |job| match job {
        Ok(j) => match j.kind {
            JobKind::Word => keep_words,
            JobKind::Sentence(_) => !keep_words,
        },
        // Ошибки источника пропускаем дальше: они фатальны для запуска
        Err(_) => true,
    });

    let client = ElevenLabsClient::new(synthesis);
    let normalization = NormalizationConfig::default();
    let runner = BatchRunner::new(&client, &normalization);
    let summary = runner.run(jobs).await?;

    info!(
        "Batch finished: {} attempted, {} succeeded, {} failed, {} distinct word(s)",
        summary.attempted, summary.succeeded, summary.failed, summary.distinct_words
    );
    Ok(())
}

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("  seedvoice words <seed_words.csv> <output_dir>");
    eprintln!("  seedvoice sentences <seed_words.csv> <output_dir>");
    eprintln!("  seedvoice phonemes <corpus.txt> <word_list.txt> <output.dart>");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("words") if args.len() == 4 => {
            run_batch(&args[2], &args[3], JobFilter::Words).await
        }
        Some("sentences") if args.len() == 4 => {
            run_batch(&args[2], &args[3], JobFilter::Sentences).await
        }
        Some("phonemes") if args.len() == 5 => {
            let covered = seedvoice::phoneme::export_phoneme_map(
                Path::new(&args[2]),
                Path::new(&args[3]),
                Path::new(&args[4]),
            )?;
            info!("Phoneme map exported: {} word(s)", covered);
            Ok(())
        }
        _ => usage(),
    }
}
