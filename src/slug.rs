use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Turn a title into a URL-safe slug: lowercase, drop everything that is not
/// a word character, whitespace or hyphen, collapse separator runs into a
/// single hyphen, trim hyphens at both ends. Idempotent.
pub(crate) fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let collapsed = SEPARATOR_RUN.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
