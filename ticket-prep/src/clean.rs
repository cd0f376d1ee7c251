/// Normalize raw ticket text for vectorization.
///
/// Lowercases, drops URL-ish tokens (leading `http`) and e-mail-ish tokens
/// (containing `@`), maps everything outside `[a-z0-9]` to a space, drops
/// standalone digit runs of six or more (order numbers, phone numbers), and
/// collapses whitespace.
pub fn clean_text(raw: &str) -> String {
    let lowered = raw.to_lowercase();

    // URL and e-mail tokens go first, while their delimiters are intact.
    let mut kept = String::with_capacity(lowered.len());
    for tok in lowered.split_whitespace() {
        if tok.starts_with("http") || tok.contains('@') {
            continue;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(tok);
    }

    let mapped: String = kept
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    let mut out = String::with_capacity(mapped.len());
    for tok in mapped.split_whitespace() {
        if tok.len() >= 6 && tok.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(tok);
    }
    out
}
