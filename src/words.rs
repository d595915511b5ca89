//! Word source: the comma-separated word list, the built-in fallback, and the
//! cyclic sequence of display strings handed to the layout.

/// Built-in list used when the word list resource is missing or empty.
pub const FALLBACK_WORDS: &[&str] = &[
    "time", "person", "year", "way", "day", "thing", "man", "world", "life", "hand",
    "part", "child", "eye", "woman", "place", "work", "week", "case", "point", "government",
    "company", "number", "group", "problem", "fact", "be", "have", "do", "say", "get",
    "make", "go", "know", "take", "see", "come", "think", "look", "want", "give",
    "use", "find", "tell", "ask", "work", "seem", "feel", "try", "leave", "call",
    "good", "new", "first", "last", "long", "great", "little", "own", "other", "old",
    "right", "big", "high", "different", "small", "large", "next", "early", "young", "important",
    "few", "public", "bad", "same", "able", "to", "of", "in", "for", "on",
    "with", "at", "by", "from", "up", "about", "into", "over", "after", "beneath",
    "under", "above", "often", "always", "never", "however", "during", "within", "through", "across",
    "example", "group", "system", "program", "question", "number", "process", "result", "service", "policy",
];

/// Split a comma-separated blob, trimming entries and dropping empty ones.
pub fn parse_word_list(body: &str) -> Vec<String> {
    body.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Uppercase the first character; the rest of the string is kept as is.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cyclic supply of display strings.
#[derive(Clone, Debug)]
pub struct WordSource {
    words: Vec<String>,
}

impl WordSource {
    /// Use `words` when non-empty, otherwise the built-in list.
    pub fn new(words: Vec<String>) -> Self {
        if words.is_empty() {
            Self::fallback()
        } else {
            Self { words }
        }
    }

    pub fn fallback() -> Self {
        Self {
            words: FALLBACK_WORDS.iter().map(|w| (*w).to_owned()).collect(),
        }
    }

    pub fn from_body(body: &str) -> Self {
        Self::new(parse_word_list(body))
    }

    /// Raw (uncapitalised) word for slot `i`.
    pub fn raw(&self, i: usize) -> &str {
        &self.words[i % self.words.len()]
    }

    /// Capitalised display text for slot `i`.
    pub fn display(&self, i: usize) -> String {
        capitalize_first(self.raw(i))
    }

    /// The first `n` display strings.
    pub fn take(&self, n: usize) -> Vec<String> {
        (0..n).map(|i| self.display(i)).collect()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for WordSource {
    fn default() -> Self {
        Self::fallback()
    }
}
