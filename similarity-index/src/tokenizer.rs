/// Lowercased word tokens: maximal runs of alphanumeric or underscore
/// characters, kept only when at least two characters long.
pub fn word_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut cur = String::new();
    let mut cur_chars = 0usize;
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            for lc in ch.to_lowercase() {
                cur.push(lc);
            }
            cur_chars += 1;
        } else {
            if cur_chars >= 2 {
                tokens.push(std::mem::take(&mut cur));
            } else {
                cur.clear();
            }
            cur_chars = 0;
        }
    }
    if cur_chars >= 2 {
        tokens.push(cur);
    }
    tokens
}

/// Terms used for vectorization: unigram tokens in position order, followed
/// by adjacent-pair bigrams joined with a single space.
pub fn terms(text: &str) -> Vec<String> {
    let tokens = word_tokens(text);
    let mut bigrams = Vec::with_capacity(tokens.len().saturating_sub(1));
    for pair in tokens.windows(2) {
        bigrams.push(format!("{} {}", pair[0], pair[1]));
    }
    let mut terms = tokens;
    terms.append(&mut bigrams);
    terms
}
