// ============================================================
// Tokenizer
// ============================================================
// Reimplements torchtext's "basic_english" normalisation so
// that text tokenized here produces the same token strings the
// pre-tokenized shards were built from: lowercase, punctuation
// split off as separate tokens, quotes/semicolons/colons
// dropped, whitespace collapsed.
//
// ngrams_iterator then expands a token sequence into the bag
// the model consumes: all unigrams plus every space-joined
// n-gram up to the configured order.

/// Normalise and split a raw text into lowercase tokens.
pub fn basic_english(text: &str) -> Vec<String> {
    let normalised = text
        .to_lowercase()
        .replace('\'', " ' ")
        .replace('"', "")
        .replace("<br />", " ")
        .replace('.', " . ")
        .replace(',', " , ")
        .replace('(', " ( ")
        .replace(')', " ) ")
        .replace('!', " ! ")
        .replace('?', " ? ")
        .replace(';', " ")
        .replace(':', " ");

    normalised.split_whitespace().map(str::to_string).collect()
}

/// Expand tokens into unigrams plus all n-grams up to `ngrams`.
/// N-grams are space-joined ("very good"), matching the token
/// strings the vocabulary was built over. `ngrams = 1` yields
/// the tokens unchanged.
pub fn ngrams_iterator(tokens: &[String], ngrams: usize) -> Vec<String> {
    let mut out = tokens.to_vec();
    for n in 2..=ngrams {
        for window in tokens.windows(n) {
            out.push(window.join(" "));
        }
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_english_lowercases_and_splits_punctuation() {
        let tokens = basic_english("Great food, really!");
        assert_eq!(tokens, vec!["great", "food", ",", "really", "!"]);
    }

    #[test]
    fn test_basic_english_drops_quotes_and_colons() {
        let tokens = basic_english("\"Best\" pizza: ever; truly");
        assert_eq!(tokens, vec!["best", "pizza", "ever", "truly"]);
    }

    #[test]
    fn test_basic_english_handles_html_breaks() {
        let tokens = basic_english("line one<br />line two");
        assert_eq!(tokens, vec!["line", "one", "line", "two"]);
    }

    #[test]
    fn test_empty_text_yields_no_tokens() {
        assert!(basic_english("   ").is_empty());
    }

    #[test]
    fn test_bigram_expansion() {
        let tokens = basic_english("not very good");
        let expanded = ngrams_iterator(&tokens, 2);
        assert_eq!(
            expanded,
            vec!["not", "very", "good", "not very", "very good"]
        );
    }

    #[test]
    fn test_unigram_order_is_identity() {
        let tokens = basic_english("ok food");
        assert_eq!(ngrams_iterator(&tokens, 1), tokens);
    }

    #[test]
    fn test_trigram_count() {
        let tokens: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        // 4 unigrams + 3 bigrams + 2 trigrams
        assert_eq!(ngrams_iterator(&tokens, 3).len(), 9);
    }
}
