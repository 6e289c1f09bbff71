use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static BROKEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\p{L})-[ \t]*\r?\n[ \t]*(?P<tail>\p{L})").unwrap());

/// Cleans text pulled out of a past-performance page before it goes into a
/// prompt. Column spacing inside a line is kept since it carries the table
/// layout; only line ends, control characters and blank runs are tidied.
pub fn normalize_page_text(raw: &str) -> String {
    let composed: String = raw.nfkc().collect();
    let joined = BROKEN_WORD.replace_all(&composed, "$head$tail");

    let mut out = String::with_capacity(joined.len());
    let mut pending_blank = false;

    for line in joined.lines() {
        let line: String = line
            .chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .collect();
        let line = line.trim_end();

        if line.trim().is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }

        if !out.is_empty() {
            out.push_str(if pending_blank { "\n\n" } else { "\n" });
        }
        out.push_str(line);
        pending_blank = false;
    }

    out
}
