use std::collections::HashSet;
use std::io::{self, BufRead};

use crate::normalize::normalize;

/// Set of normalized stop words; membership is case-insensitive.
#[derive(Debug, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str) {
        if !word.is_empty() {
            self.words.insert(normalize(word));
        }
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in words {
            self.insert(w.as_ref());
        }
    }

    // One word per newline-delimited record; carriage returns tolerated,
    // empty records skipped. Words inserted before an I/O failure stay in
    // the set.
    pub fn load<R: BufRead>(&mut self, reader: R) -> io::Result<usize> {
        let mut loaded = 0;
        for line in reader.lines() {
            let line = line?;
            let word = line.trim_end_matches('\r');
            if word.is_empty() {
                continue;
            }
            self.insert(word);
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    pub(crate) fn contains_normalized(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
