use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Word lookup used by move validation.
pub trait Dictionary {
    fn is_defined(&self, word: &str) -> bool;
}

impl<D: Dictionary + ?Sized> Dictionary for &D {
    fn is_defined(&self, word: &str) -> bool {
        (**self).is_defined(word)
    }
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Case-insensitive set of words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for word in words {
            list.insert(word.as_ref());
        }
        list
    }

    /// One word per line. Blank lines and lines starting with `#` are skipped.
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut list = Self::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            list.insert(word);
        }
        Ok(list)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let read_error = |source| DictionaryError::Read {
            source,
            path: path.to_path_buf(),
        };
        let file = File::open(path).map_err(read_error)?;
        Self::from_reader(file).map_err(read_error)
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn is_defined(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }
}
