// ============================================================
// Vocabulary
// ============================================================
// Token-string → integer-id mapping, built once from the
// training corpus (or restored from a persisted snapshot) and
// treated as immutable for the duration of training.
//
// Id layout follows the torchtext convention the shards were
// produced with:
//   0 → <unk>   (all out-of-vocabulary lookups land here)
//   1 → <pad>
//   2.. → corpus tokens in descending frequency order
//
// Ties in frequency are broken alphabetically so that two
// builds over the same corpus always produce the same ids.

use std::collections::HashMap;

pub const UNK_TOKEN: &str = "<unk>";
pub const PAD_TOKEN: &str = "<pad>";

/// Immutable token → id mapping.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    stoi: HashMap<String, u32>,
    itos: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from an iterator of token occurrences.
    /// Duplicates are counted; ids are assigned by descending
    /// frequency with an alphabetical tie-break.
    pub fn build<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut freq: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            *freq.entry(token.as_ref().to_string()).or_insert(0) += 1;
        }

        let mut ordered: Vec<(String, usize)> = freq.into_iter().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut itos = vec![UNK_TOKEN.to_string(), PAD_TOKEN.to_string()];
        itos.extend(ordered.into_iter().map(|(token, _)| token));
        Self::from_itos(itos)
    }

    /// Rebuild a vocabulary from a persisted id → token list.
    pub fn from_itos(itos: Vec<String>) -> Self {
        let stoi = itos
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id as u32))
            .collect();
        Self { stoi, itos }
    }

    /// Look up a token, falling back to <unk> when absent.
    pub fn id(&self, token: &str) -> u32 {
        self.stoi.get(token).copied().unwrap_or(0)
    }

    /// Exact lookup with no <unk> fallback.
    pub fn get(&self, token: &str) -> Option<u32> {
        self.stoi.get(token).copied()
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.itos.get(id as usize).map(String::as_str)
    }

    /// Total number of ids, special tokens included.
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// The id → token list, for persistence.
    pub fn itos(&self) -> &[String] {
        &self.itos
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specials_come_first() {
        let vocab = Vocabulary::build(["good", "good", "bad"]);
        assert_eq!(vocab.id(UNK_TOKEN), 0);
        assert_eq!(vocab.id(PAD_TOKEN), 1);
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn test_frequency_order_with_alphabetical_ties() {
        // "food" twice, "great" and "awful" once each
        let vocab = Vocabulary::build(["food", "great", "food", "awful"]);
        assert_eq!(vocab.id("food"), 2);
        // tie between "awful" and "great" → alphabetical
        assert_eq!(vocab.id("awful"), 3);
        assert_eq!(vocab.id("great"), 4);
    }

    #[test]
    fn test_unknown_maps_to_unk() {
        let vocab = Vocabulary::build(["pizza"]);
        assert_eq!(vocab.id("never seen"), 0);
        assert_eq!(vocab.get("never seen"), None);
        assert_eq!(vocab.get("pizza"), Some(2));
    }

    #[test]
    fn test_itos_roundtrip() {
        let vocab = Vocabulary::build(["a", "b", "a"]);
        let restored = Vocabulary::from_itos(vocab.itos().to_vec());
        assert_eq!(restored.len(), vocab.len());
        assert_eq!(restored.id("a"), vocab.id("a"));
        assert_eq!(restored.id("b"), vocab.id("b"));
        assert_eq!(restored.token(2), Some("a"));
    }
}
