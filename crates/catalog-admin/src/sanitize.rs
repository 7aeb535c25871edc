//! Markup stripping for free-text fields.

use crate::form::FormValue;
use regex::Regex;
use std::sync::LazyLock;

/// `<script ...> ... </script>` blocks, any case, across lines. Stops at the first closing tag.
static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid script pattern"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Removes script blocks, then every remaining tag, then surrounding whitespace.
pub fn sanitize(input: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    TAG.replace_all(&without_scripts, "").trim().to_string()
}

/// Sanitizes a form part. File parts and missing fields become the empty string.
pub fn sanitize_value(value: Option<&FormValue>) -> String {
    match value {
        Some(FormValue::Text(text)) => sanitize(text),
        Some(FormValue::File(_)) | None => String::new(),
    }
}
