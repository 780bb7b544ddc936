use crate::RandomSource;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const BUILTIN_WORDS: &str = include_str!("../words/tech_words.txt");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            hint: hint.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("word bank has no entries")]
    Empty,
    #[error("line {line}: \"{word}\" must contain only letters and spaces")]
    InvalidWord { line: usize, word: String },
    #[error("line {line}: expected `word|hint`")]
    MissingHint { line: usize },
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixed table of words and hints, read-only once built.
#[derive(Debug, Clone)]
pub struct WordBank {
    entries: Vec<WordEntry>,
}

impl WordBank {
    /// Build a bank from entries, lowercasing words and trimming both fields.
    pub fn new(entries: Vec<WordEntry>) -> Result<Self, WordBankError> {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Self::normalize(index + 1, entry))
            .collect::<Result<Vec<_>, _>>()?;

        if entries.is_empty() {
            return Err(WordBankError::Empty);
        }

        Ok(Self { entries })
    }

    /// Parse a `word|hint` list. Blank lines and `#` comments are skipped.
    pub fn from_word_list(word_list: &str) -> Result<Self, WordBankError> {
        let mut entries = Vec::new();

        for (index, line) in word_list.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (word, hint) = trimmed
                .split_once('|')
                .ok_or(WordBankError::MissingHint { line: line_number })?;
            if hint.trim().is_empty() {
                return Err(WordBankError::MissingHint { line: line_number });
            }

            entries.push(Self::normalize(line_number, WordEntry::new(word, hint))?);
        }

        if entries.is_empty() {
            return Err(WordBankError::Empty);
        }

        Ok(Self { entries })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WordBankError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let bank = Self::from_word_list(&contents)?;
        info!(
            "Loaded {} words from {}",
            bank.len(),
            path.as_ref().display()
        );
        Ok(bank)
    }

    /// The embedded tech vocabulary.
    pub fn builtin() -> Result<Self, WordBankError> {
        Self::from_word_list(BUILTIN_WORDS)
    }

    /// Draw one entry uniformly at random.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> &WordEntry {
        &self.entries[rng.next_index(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    fn normalize(line: usize, entry: WordEntry) -> Result<WordEntry, WordBankError> {
        let word = entry.word.trim().to_lowercase();
        let valid = word.chars().all(|c| c.is_ascii_lowercase() || c == ' ')
            && word.chars().any(|c| c.is_ascii_lowercase());

        if !valid {
            return Err(WordBankError::InvalidWord { line, word });
        }

        Ok(WordEntry {
            word,
            hint: entry.hint.trim().to_string(),
        })
    }
}
