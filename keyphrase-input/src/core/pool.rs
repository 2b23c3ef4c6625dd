//! Suggestion pool management.
//!
//! Holds the candidate completions still consistent with the committed
//! text, most-preferred first. Entries are full display texts (committed
//! text plus a completion suffix), so consistency is a plain prefix check.
//! Order comes from the source; no further ranking is applied.

/// Ordered candidate completions for one field
#[derive(Debug, Clone, Default)]
pub struct SuggestionPool {
    entries: Vec<String>,
}

impl SuggestionPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of remaining candidates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current best candidate
    pub fn head(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    /// All remaining candidates in order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Drop all candidates
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the pool contents
    pub fn replace(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }

    /// Keep only candidates that still complete `text`: strict extensions
    /// of it. A candidate equal to the text has been fully typed and is
    /// no longer a completion.
    pub fn retain_completions_of(&mut self, text: &str) {
        self.entries
            .retain(|entry| entry.starts_with(text) && entry != text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(entries: &[&str]) -> SuggestionPool {
        let mut pool = SuggestionPool::new();
        pool.replace(entries.iter().map(|s| s.to_string()).collect());
        pool
    }

    #[test]
    fn test_head_is_first_entry() {
        let pool = pool(&["poulet", "poulet frit"]);
        assert_eq!(pool.head(), Some("poulet"));
    }

    #[test]
    fn test_retain_drops_diverged_candidates() {
        let mut pool = pool(&["pou", "poule", "poulet", "poulet frit", "poulet au miel"]);
        pool.retain_completions_of("pou");
        assert_eq!(
            pool.entries(),
            &["poule", "poulet", "poulet frit", "poulet au miel"]
        );
        pool.retain_completions_of("poulet f");
        assert_eq!(pool.entries(), &["poulet frit"]);
        pool.retain_completions_of("poulet frit");
        assert!(pool.is_empty());
    }

    #[test]
    fn test_retain_drops_exact_match() {
        let mut pool = pool(&["poule", "poulet"]);
        pool.retain_completions_of("poule");
        assert_eq!(pool.entries(), &["poulet"]);
    }

    #[test]
    fn test_retain_on_empty_prefix_keeps_everything() {
        let mut pool = pool(&["a", "b"]);
        pool.retain_completions_of("");
        assert_eq!(pool.len(), 2);
    }
}
