use unicode_normalization::UnicodeNormalization;

/// Turn a category or English term into a filesystem-safe path token.
///
/// Diacritics are folded away (NFKD, non-ASCII dropped), letters are
/// lowercased, and each run of anything outside `[a-z0-9]` becomes one `_`.
pub fn clean_file_name(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.nfkd().filter(char::is_ascii) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }

    if out.is_empty() {
        out.push('_');
    }
    out
}
