use anyhow::Context;

const SEPARATOR_WIDTH: usize = 60;
pub(crate) const MAX_COMMENTS_SHOWN: usize = 3;
pub(crate) const COMMENT_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RenderOptions {
    /// Convert comment HTML to plain text before previewing it.
    pub(crate) plain_text: bool,
}

/// Unix seconds to `YYYY-MM-DD HH:MM:SS`, always in UTC.
pub(crate) fn format_timestamp(secs: i64) -> anyhow::Result<String> {
    let time = chrono::DateTime::from_timestamp(secs, 0)
        .with_context(|| format!("Timestamp {secs} is out of range"))?;
    Ok(time.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub(crate) fn write_header(out: &mut impl std::io::Write, limit: usize) -> anyhow::Result<()> {
    writeln!(out, "Fetching the top {limit} stories...\n")?;
    Ok(())
}

pub(crate) fn write_post(
    out: &mut impl std::io::Write,
    index: usize,
    post: &crate::Post,
    comments: &[crate::Comment],
    options: RenderOptions,
) -> anyhow::Result<()> {
    writeln!(out, "{index}. {}", post.title)?;
    writeln!(out, "   URL: {}", post.url.as_deref().unwrap_or("-"))?;
    writeln!(out, "   Score: {} | Author: {}", post.score, post.author)?;
    writeln!(out, "   Time: {}", format_timestamp(post.created_at)?)?;

    if comments.is_empty() {
        writeln!(out, "   No comments found.")?;
    } else {
        writeln!(out, "   Comments:")?;
        for comment in comments.iter().take(MAX_COMMENTS_SHOWN) {
            write_comment(out, comment, options)?;
        }
    }

    writeln!(out, "{}", separator())?;
    Ok(())
}

fn write_comment(
    out: &mut impl std::io::Write,
    comment: &crate::Comment,
    options: RenderOptions,
) -> anyhow::Result<()> {
    let raw = comment.text.as_deref().unwrap_or_default();
    let text = if options.plain_text {
        crate::html::html_to_plain_text(raw)?
    } else {
        raw.to_string()
    };

    writeln!(
        out,
        "      - Author: {}",
        comment.author.as_deref().unwrap_or("[deleted]")
    )?;
    writeln!(out, "        {}...", preview(&text, COMMENT_PREVIEW_CHARS))?;
    let created_at = comment
        .created_at
        .context("Comment shown in the report is missing `time`")?;
    writeln!(out, "        Time: {}", format_timestamp(created_at)?)?;
    writeln!(out, "{}", separator())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> crate::Post {
        crate::Post {
            title: "Show HN: A thing".to_string(),
            url: Some("https://example.com".to_string()),
            score: 42,
            author: "alice".to_string(),
            created_at: 1_700_000_000,
            id: 1,
        }
    }

    fn comment(author: Option<&str>, text: Option<&str>) -> crate::Comment {
        crate::Comment {
            author: author.map(str::to_string),
            text: text.map(str::to_string),
            created_at: Some(0),
        }
    }

    fn render(post: &crate::Post, comments: &[crate::Comment], options: RenderOptions) -> String {
        let mut out = Vec::new();
        write_post(&mut out, 1, post, comments, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_timestamp_epoch() {
        assert_eq!(format_timestamp(0).unwrap(), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_format_timestamp_is_utc() {
        assert_eq!(format_timestamp(1_700_000_000).unwrap(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert!(format_timestamp(i64::MAX).is_err());
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        assert_eq!(preview("héllo wörld", 5), "héllo");
        assert_eq!(preview("short", 100), "short");
        assert_eq!(preview(&"x".repeat(150), 100).len(), 100);
    }

    #[test]
    fn test_post_without_comments() {
        let text = render(&post(), &[], RenderOptions::default());

        assert_eq!(
            text,
            format!(
                "1. Show HN: A thing\n   URL: https://example.com\n   Score: 42 | Author: alice\n   Time: 2023-11-14 22:13:20\n   No comments found.\n{}\n",
                "-".repeat(60)
            )
        );
    }

    #[test]
    fn test_post_without_url() {
        let post = crate::Post { url: None, ..post() };
        assert!(render(&post, &[], RenderOptions::default()).contains("   URL: -\n"));
    }

    #[test]
    fn test_at_most_three_comments_shown() {
        let comments = vec![
            comment(Some("a"), Some("one")),
            comment(Some("b"), Some("two")),
            comment(Some("c"), Some("three")),
            comment(Some("d"), Some("four")),
        ];

        let text = render(&post(), &comments, RenderOptions::default());

        assert!(text.contains("   Comments:\n"));
        assert!(text.contains("      - Author: c\n        three...\n        Time: 1970-01-01 00:00:00\n"));
        assert!(!text.contains("Author: d"));
        assert!(!text.contains("No comments found."));
    }

    #[test]
    fn test_missing_time_only_matters_for_shown_comments() {
        let untimed = crate::Comment {
            created_at: None,
            ..comment(Some("late"), Some("no time"))
        };
        let mut comments = vec![
            comment(Some("a"), Some("one")),
            comment(Some("b"), Some("two")),
            comment(Some("c"), Some("three")),
            untimed.clone(),
        ];

        let text = render(&post(), &comments, RenderOptions::default());
        assert!(!text.contains("Author: late"));

        comments.insert(0, untimed);
        let mut out = Vec::new();
        let err = write_post(&mut out, 1, &post(), &comments, RenderOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("time"));
    }

    #[test]
    fn test_comment_text_is_truncated() {
        let long = "y".repeat(250);
        let text = render(&post(), &[comment(Some("a"), Some(&long))], RenderOptions::default());

        assert!(text.contains(&format!("        {}...\n", "y".repeat(100))));
        assert!(!text.contains(&"y".repeat(101)));
    }

    #[test]
    fn test_deleted_comment() {
        let text = render(&post(), &[comment(None, None)], RenderOptions::default());
        assert!(text.contains("      - Author: [deleted]\n        ...\n"));
    }

    #[test]
    fn test_plain_text_option_strips_html() {
        let comments = [comment(Some("a"), Some("I&#x27;d agree.<p>Mostly."))];

        let raw = render(&post(), &comments, RenderOptions::default());
        assert!(raw.contains("I&#x27;d agree.<p>Mostly...."));

        let plain = render(&post(), &comments, RenderOptions { plain_text: true });
        assert!(plain.contains("I'd agree. Mostly...."));
    }
}
