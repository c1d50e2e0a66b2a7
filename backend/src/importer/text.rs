//! Parsing helpers for raw text files: file name layout, whitespace cleanup
//! and the title/date metadata carried in the first and last lines.

use super::ImportError;
use chrono::NaiveDate;
use regex::Regex;

/// `writings.title` is a VARCHAR(255).
const MAX_TITLE_CHARS: usize = 255;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

/// Identifiers encoded in a file name of the form `<source_id>-<id>-<page_num>.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileKey {
    pub source_id: i64,
    pub id: i64,
    pub page_num: i64,
}

/// Title and creation date read from a cleaned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub created_date: Option<NaiveDate>,
}

/// Precompiled patterns shared by every file of an import.
pub struct TextParser {
    file_name: Regex,
    trailing: Regex,
    blank_lines: Regex,
    spaces: Regex,
}

impl TextParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            file_name: Regex::new(r"^(\d+)-(\d+)-(\d+)\.txt$")?,
            trailing: Regex::new(r"(?m)[ \t]+$")?,
            blank_lines: Regex::new(r"\n{3,}")?,
            spaces: Regex::new(r"[ \t]{2,}")?,
        })
    }

    pub fn parse_file_name(&self, name: &str) -> Result<FileKey, ImportError> {
        let invalid = || ImportError::InvalidFileName(name.to_string());
        let caps = self.file_name.captures(name).ok_or_else(invalid)?;
        let number = |i: usize| caps[i].parse::<i64>().map_err(|_| invalid());

        Ok(FileKey {
            source_id: number(1)?,
            id: number(2)?,
            page_num: number(3)?,
        })
    }

    /// Trims the text, squeezes runs of blank lines down to one empty line
    /// and runs of spaces or tabs down to a single space. Lines holding only
    /// spaces or tabs count as blank.
    pub fn clean(&self, raw: &str) -> String {
        let text = raw.replace("\r\n", "\n");
        let text = self.trailing.replace_all(&text, "");
        let text = self.blank_lines.replace_all(text.trim(), "\n\n");
        self.spaces.replace_all(&text, " ").into_owned()
    }
}

/// Title is the first line, the creation date is the last line when it parses
/// as one of the known date formats.
pub fn extract_metadata(text: &str) -> Metadata {
    let first = text.lines().next().map(str::trim).unwrap_or_default();
    let last = text.lines().last().map(str::trim).unwrap_or_default();

    let title: Option<String> =
        (!first.is_empty()).then(|| first.chars().take(MAX_TITLE_CHARS).collect());
    let created_date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(last, fmt).ok());

    Metadata {
        title,
        created_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TextParser {
        TextParser::new().unwrap()
    }

    #[test]
    fn parses_well_formed_name() {
        let key = parser().parse_file_name("01-123-007.txt").unwrap();
        assert_eq!(
            key,
            FileKey {
                source_id: 1,
                id: 123,
                page_num: 7
            }
        );
    }

    #[test]
    fn rejects_malformed_names() {
        let parser = parser();
        for name in [
            "notes.txt",
            "01-123.txt",
            "01-123-007-2.txt",
            "01-abc-007.txt",
            "01-123-007.md",
            "99999999999999999999-1-1.txt",
        ] {
            assert!(
                matches!(parser.parse_file_name(name), Err(ImportError::InvalidFileName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn clean_squeezes_whitespace_and_keeps_paragraphs() {
        let raw = "  \r\nTitle\r\n\r\n\r\n\r\nFirst   paragraph\t\twith  gaps\n\nSecond\n  ";
        assert_eq!(
            parser().clean(raw),
            "Title\n\nFirst paragraph with gaps\n\nSecond"
        );
    }

    #[test]
    fn clean_treats_whitespace_lines_as_blank() {
        let parser = parser();
        assert_eq!(parser.clean("A\n \n \n \n \nB"), "A\n\nB");
        assert_eq!(parser.clean("A  \t\n\t\n\nB \nC"), "A\n\nB\nC");
    }

    #[test]
    fn clean_of_blank_text_is_empty() {
        assert_eq!(parser().clean(" \n\n\t "), "");
    }

    #[test]
    fn metadata_from_first_and_last_line() {
        let meta = extract_metadata("Ein Brief\n\nText\n\n02.05.1943");
        assert_eq!(meta.title.as_deref(), Some("Ein Brief"));
        assert_eq!(meta.created_date, NaiveDate::from_ymd_opt(1943, 5, 2));
    }

    #[test]
    fn metadata_accepts_iso_and_slash_dates() {
        assert_eq!(
            extract_metadata("t\n1950-01-31").created_date,
            NaiveDate::from_ymd_opt(1950, 1, 31)
        );
        assert_eq!(
            extract_metadata("t\n31/01/1950").created_date,
            NaiveDate::from_ymd_opt(1950, 1, 31)
        );
    }

    #[test]
    fn unparseable_date_is_none() {
        let meta = extract_metadata("Title\nbody\nsometime in spring");
        assert_eq!(meta.title.as_deref(), Some("Title"));
        assert_eq!(meta.created_date, None);
    }

    #[test]
    fn empty_text_has_no_metadata() {
        let meta = extract_metadata("");
        assert_eq!(meta.title, None);
        assert_eq!(meta.created_date, None);
    }

    #[test]
    fn long_title_is_truncated() {
        let text = "x".repeat(300);
        let meta = extract_metadata(&text);
        assert_eq!(meta.title.map(|t| t.chars().count()), Some(MAX_TITLE_CHARS));
    }
}
