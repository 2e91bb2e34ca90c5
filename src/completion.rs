//! Command Name Completion
//!
//! Completes the first token of the input line against the names the
//! dispatcher knows. Arguments are never completed.

/// Completion candidates for command names
#[derive(Debug, Clone, Default)]
pub struct CommandCompleter {
    /// Sorted, de-duplicated, lowercase names
    names: Vec<String>,
}

/// Outcome of completing a prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matches, or the input is not completable
    None,
    /// Exactly one name matches
    Unique(String),
    /// Several names match; `common` is their longest common prefix
    Ambiguous {
        common: String,
        candidates: Vec<String>,
    },
}

impl CommandCompleter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Names starting with `prefix` (case-insensitive)
    pub fn candidates(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    /// Complete the command name in `input`
    ///
    /// Input that already has arguments, or is blank, is left alone.
    pub fn complete(&self, input: &str) -> Completion {
        let trimmed = input.trim_start();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Completion::None;
        }

        let candidates = self.candidates(trimmed);
        match candidates.as_slice() {
            [] => Completion::None,
            [only] => Completion::Unique((*only).to_string()),
            many => Completion::Ambiguous {
                common: longest_common_prefix(many),
                candidates: many.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Longest prefix shared by every string, on char boundaries
pub fn longest_common_prefix(words: &[&str]) -> String {
    let Some((first, rest)) = words.split_first() else {
        return String::new();
    };
    let mut end = first.len();
    for word in rest {
        end = first[..end]
            .char_indices()
            .zip(word.chars())
            .find(|((_, a), b)| a != b)
            .map(|((i, _), _)| i)
            .unwrap_or_else(|| end.min(word.len()));
    }
    first[..end].to_string()
}
