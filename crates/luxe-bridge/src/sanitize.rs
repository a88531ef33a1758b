//! Input cleaning applied to every form field before validation.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const MAX_TEXT_LEN: usize = 10_000;
const MAX_EMAIL_LEN: usize = 254;
const MAX_PHONE_LEN: usize = 20;

static SCRIPT_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script regex should compile")
});

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex should compile"));

static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("scheme regex should compile"));

/// Inline handlers with a quoted value, e.g. ` onclick="..."`.
static EVENT_HANDLERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s*on\w+\s*=\s*["'][^"']*["']"#).expect("handler regex should compile")
});

/// `data:` URIs; the optional group marks the image ones that are kept.
static DATA_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)data:(image)?").expect("data regex should compile"));

static EMAIL_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9@._-]").expect("email filter should compile"));

static PHONE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9\s\-()+]").expect("phone filter should compile"));

/// Cleans free text: trims it, strips `<script>` blocks and any other markup,
/// removes `javascript:`, quoted inline `on...=` handlers and non-image
/// `data:` URIs, then caps the length.
pub fn sanitize_text(input: &str) -> String {
    let text = SCRIPT_BLOCKS.replace_all(input.trim(), "");
    let text = TAGS.replace_all(&text, "");
    let text = JAVASCRIPT_SCHEME.replace_all(&text, "");
    let text = EVENT_HANDLERS.replace_all(&text, "");
    let text = DATA_SCHEME.replace_all(&text, |caps: &Captures| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            String::new()
        }
    });

    text.chars().take(MAX_TEXT_LEN).collect()
}

/// Lowercases and keeps only characters that can appear in a plain address.
pub fn sanitize_email(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    EMAIL_DISALLOWED
        .replace_all(&lowered, "")
        .chars()
        .take(MAX_EMAIL_LEN)
        .collect()
}

/// Keeps digits, whitespace and common phone punctuation.
pub fn sanitize_phone(input: &str) -> String {
    PHONE_DISALLOWED
        .replace_all(input.trim(), "")
        .chars()
        .take(MAX_PHONE_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_loses_scripts_and_markup() {
        assert_eq!(
            sanitize_text("  Hello <script>alert('x')</script><b>world</b>  "),
            "Hello world"
        );
        assert_eq!(sanitize_text("<SCRIPT src=x></Script>ok"), "ok");
    }

    #[test]
    fn quoted_handlers_are_removed_with_their_value() {
        assert_eq!(
            sanitize_text("Hi there onclick=\"steal(document.cookie)\" bye"),
            "Hi there bye"
        );
        assert_eq!(sanitize_text("x onMouseOver = 'go()' y"), "x y");
    }

    #[test]
    fn javascript_scheme_is_removed() {
        assert_eq!(sanitize_text("JavaScript:alert(1)"), "alert(1)");
    }

    #[test]
    fn only_image_data_uris_survive() {
        assert_eq!(
            sanitize_text("see data:text/html,payload"),
            "see text/html,payload"
        );
        assert_eq!(
            sanitize_text("logo data:image/png;base64,AAAA"),
            "logo data:image/png;base64,AAAA"
        );
        assert_eq!(sanitize_text("DATA:Text/plain"), "Text/plain");
    }

    #[test]
    fn ordinary_words_starting_with_on_survive() {
        assert_eq!(
            sanitize_text("Only one event, on Saturday = fun"),
            "Only one event, on Saturday = fun"
        );
    }

    #[test]
    fn text_is_capped() {
        let long = "a".repeat(MAX_TEXT_LEN + 50);
        assert_eq!(sanitize_text(&long).len(), MAX_TEXT_LEN);
    }

    #[test]
    fn text_keeps_non_ascii() {
        assert_eq!(sanitize_text("Adéwálé's party ₦"), "Adéwálé's party ₦");
    }

    #[test]
    fn email_is_lowercased_and_filtered() {
        assert_eq!(
            sanitize_email("  Ada.Obi+events@Example.COM "),
            "ada.obievents@example.com"
        );
    }

    #[test]
    fn phone_keeps_digits_and_punctuation() {
        assert_eq!(sanitize_phone(" +234 (803) 123-4567 ext"), "+234 (803) 123-4567 ");
        assert_eq!(sanitize_phone("1234567890123456789012345").len(), MAX_PHONE_LEN);
    }
}
