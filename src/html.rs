//! Comment bodies come back from the API as HTML fragments. This turns them into a
//! single line of plain text suitable for a short preview.

static WHITESPACE_RE: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"\s+").expect("valid regex"));

const WRAP_WIDTH: usize = 1000;

pub(crate) fn html_to_plain_text(html: &str) -> anyhow::Result<String> {
    // The trivial decorator emits text only: no `[...]` around links, no
    // backticks around code, no `*` around emphasis.
    let text = html2text::config::with_decorator(html2text::render::TrivialDecorator::new())
        .raw_mode(true)
        .link_footnotes(false)
        .string_from_read(html.as_bytes(), WRAP_WIDTH)?;

    let text = WHITESPACE_RE.replace_all(&text, " ");

    Ok(text.trim().to_string())
}
