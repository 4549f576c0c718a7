//! Secret-word source shared read-only by every session.

use rand::Rng;
use shared::MAX_WORD_LEN;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound on the number of words kept from a word file.
pub const MAX_WORDS: usize = 1024;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read word list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no usable words (1-{max} ASCII letters) in word list", max = MAX_WORD_LEN)]
    Empty,
}

/// Immutable list of candidate secret words, all lowercase ASCII letters.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Loads a newline-separated word file.
    ///
    /// Blank lines, lines containing anything but ASCII letters, and words
    /// longer than a board update can carry are skipped. Kept words are
    /// lowercased.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .filter_map(|word| normalize(word.as_ref()))
            .take(MAX_WORDS)
            .collect();

        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(Self { words })
    }

    /// Picks a word uniformly at random.
    ///
    /// Uses the calling thread's generator, so concurrent sessions never share
    /// generator state.
    pub fn pick_random(&self) -> &str {
        let index = rand::thread_rng().gen_range(0..self.words.len());
        &self.words[index]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

fn normalize(line: &str) -> Option<String> {
    let word = line.trim_end_matches(['\r', '\n']);
    if word.is_empty() || word.len() > MAX_WORD_LEN {
        return None;
    }
    if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some(word.to_ascii_lowercase())
}
