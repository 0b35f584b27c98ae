use std::path::Path;

use anyhow::Context as _;

use crate::formats::Comic;

/// Loads the JSONL metadata feed, one comic per non-blank line, preserving
/// feed order. A malformed line fails the whole load: every downstream stage
/// keys on feed ids, so a partial parse is worthless.
pub fn load_feed(path: &Path) -> anyhow::Result<Vec<Comic>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read metadata feed: {}", path.display()))?;

    let mut comics = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let comic: Comic = serde_json::from_str(line).with_context(|| {
            format!("parse metadata line {}: {}", idx + 1, path.display())
        })?;
        comics.push(comic);
    }

    Ok(comics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_feed(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp feed");
        file.write_all(contents.as_bytes()).expect("write feed");
        file
    }

    #[test]
    fn loads_comics_in_feed_order_and_skips_blank_lines() {
        let feed = write_feed(concat!(
            r#"{"id":1,"title":"Barrel","image_url":"https://example.com/1.png"}"#,
            "\n\n   \n",
            r#"{"id":2,"title":"Petit Trees"}"#,
            "\n\n",
        ));

        let comics = load_feed(feed.path()).expect("load feed");
        assert_eq!(comics.len(), 2);
        assert_eq!(comics[0].id, 1);
        assert_eq!(comics[0].title, "Barrel");
        assert_eq!(comics[1].id, 2);
        assert_eq!(comics[1].image_url, "");
        assert_eq!(comics[1].width, 0);
    }

    #[test]
    fn malformed_line_fails_with_line_number() {
        let feed = write_feed("{\"id\":1}\nnot json\n");

        let err = load_feed(feed.path()).expect_err("expected parse failure");
        assert!(format!("{err:#}").contains("line 2"));
    }
}
