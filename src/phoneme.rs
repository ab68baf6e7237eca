//! Экспорт таблицы фонем
//!
//! Строит таблицу соответствия "слово → список фонетических символов"
//! из корпуса произношений и справочного списка слов, и выгружает ее
//! как исходный файл со статическими данными (Dart-словарь) для
//! офлайн-потребителя.
//!
//! Формат корпуса: одна запись на строку, `слово<TAB>PH PH PH`.

use std::collections::HashMap;
use std::path::Path;

use log::info;

use crate::error::{Result, SeedVoiceError};

/// Разбирает корпус произношений.
///
/// Слова приводятся к нижнему регистру; при повторе слова выигрывает
/// первое произношение. Пустые и неполные строки пропускаются.
pub fn parse_pronunciation_corpus(text: &str) -> HashMap<String, Vec<String>> {
    let mut corpus = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(2, '\t');
        let word = parts.next().unwrap_or("").trim();
        let phonemes: Vec<String> = parts
            .next()
            .unwrap_or("")
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if word.is_empty() || phonemes.is_empty() {
            continue;
        }

        corpus.entry(word.to_lowercase()).or_insert(phonemes);
    }

    corpus
}

/// Разбирает справочный список слов: первое поле каждой строки,
/// в нижнем регистре, в порядке следования в файле
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.trim().split('\t').next())
        .map(str::to_lowercase)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Экранирует слово для Dart-литерала в одинарных кавычках
fn escape_dart(word: &str) -> String {
    word.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Формирует исходный текст Dart-словаря для слов, присутствующих
/// и в списке, и в корпусе. Порядок записей повторяет порядок списка.
pub fn render_dart_map(words: &[String], corpus: &HashMap<String, Vec<String>>) -> String {
    let mut out = String::from("final Map<String, List<String>> cmuDict = {\n");

    for word in words {
        if let Some(phonemes) = corpus.get(word) {
            let phoneme_list = phonemes
                .iter()
                .map(|p| format!("'{}'", p))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("  '{}': [{}],\n", escape_dart(word), phoneme_list));
        }
    }

    out.push_str("};\n");
    out
}

/// Выгружает таблицу фонем в файл.
///
/// # Аргументы
///
/// * `corpus_path` - Путь к корпусу произношений
/// * `word_list_path` - Путь к справочному списку слов
/// * `output_path` - Путь к создаваемому Dart-файлу
///
/// # Возвращает
///
/// Количество записанных слов
pub fn export_phoneme_map(
    corpus_path: &Path,
    word_list_path: &Path,
    output_path: &Path,
) -> Result<usize> {
    if !corpus_path.exists() {
        return Err(SeedVoiceError::FileNotFound(format!(
            "Pronunciation corpus not found at: {}",
            corpus_path.display()
        )));
    }
    if !word_list_path.exists() {
        return Err(SeedVoiceError::FileNotFound(format!(
            "Word list not found at: {}",
            word_list_path.display()
        )));
    }

    let corpus = parse_pronunciation_corpus(&std::fs::read_to_string(corpus_path)?);
    let words = parse_word_list(&std::fs::read_to_string(word_list_path)?);

    let covered = words.iter().filter(|w| corpus.contains_key(*w)).count();
    let rendered = render_dart_map(&words, &corpus);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, rendered)?;

    info!(
        "Exported {} of {} word(s) to {}",
        covered,
        words.len(),
        output_path.display()
    );
    Ok(covered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_corpus() {
        let corpus = parse_pronunciation_corpus("cat\tK AE1 T\nDOG\tD AO1 G\n\nbroken\n");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus["cat"], vec!["K", "AE1", "T"]);
        assert_eq!(corpus["dog"], vec!["D", "AO1", "G"]);
    }

    #[test]
    fn test_parse_corpus_first_pronunciation_wins() {
        let corpus = parse_pronunciation_corpus("cat\tK AE1 T\nCat\tK AE0 T\n");
        assert_eq!(corpus["cat"], vec!["K", "AE1", "T"]);
    }

    #[test]
    fn test_parse_word_list_takes_first_field() {
        let words = parse_word_list("Cat\tK AE1 T\ndog\n\n");
        assert_eq!(words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_render_dart_map() {
        let corpus = parse_pronunciation_corpus("cat\tK AE1 T\ndon't\tD OW1 N T\n");
        let words = vec!["cat".to_string(), "don't".to_string(), "absent".to_string()];

        let rendered = render_dart_map(&words, &corpus);
        assert!(rendered.starts_with("final Map<String, List<String>> cmuDict = {\n"));
        assert!(rendered.contains("  'cat': ['K', 'AE1', 'T'],\n"));
        // Апостроф экранируется, отсутствующие в корпусе слова не попадают в выгрузку
        assert!(rendered.contains("  'don\\'t': ['D', 'OW1', 'N', 'T'],\n"));
        assert!(!rendered.contains("absent"));
        assert!(rendered.ends_with("};\n"));
    }

    #[test]
    fn test_export_phoneme_map() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("cmu_words.txt");
        let words_path = dir.path().join("words.txt");
        let output_path = dir.path().join("lib").join("cmu_map.dart");

        std::fs::write(&corpus_path, "cat\tK AE1 T\ndog\tD AO1 G\n").unwrap();
        std::fs::write(&words_path, "cat\nbird\n").unwrap();

        let covered = export_phoneme_map(&corpus_path, &words_path, &output_path).unwrap();
        assert_eq!(covered, 1);

        let rendered = std::fs::read_to_string(&output_path).unwrap();
        assert!(rendered.contains("'cat'"));
        assert!(!rendered.contains("'bird'"));
    }
}
