//! Rows and options in rofi's script-mode format
//!
//! A row is its text, optionally followed by a NUL and `key\x1fvalue` pairs
//! separated by `\x1f`, terminated by a newline. Mode options use the same
//! pair syntax on a line of their own that starts with a NUL.

use crate::adapter::Outcome;
use crate::context::InfoToken;
use crate::index::{Candidate, Kind};
use std::io::{self, Write};

const UNIT_SEPARATOR: u8 = 0x1f;

/// One printed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    pub text: String,
    /// Token rofi hands back in `ROFI_INFO` when the row is selected
    pub info: Option<String>,
    pub icon: Option<&'static str>,
    pub selectable: bool,
}

impl ResultLine {
    /// A row that only carries text and can't be selected
    pub fn placeholder(text: &str) -> Self {
        Self {
            text: escape_text(text),
            info: None,
            icon: None,
            selectable: false,
        }
    }
}

/// Render a candidate as a row. Pure: equal candidates give equal rows.
pub fn format(candidate: &Candidate, show_icons: bool) -> ResultLine {
    let mut text = escape_text(&candidate.label);
    if candidate.kind == Kind::Folder {
        text.push('/');
    }

    let info = InfoToken::new(candidate.kind, candidate.identifier.as_str()).encode();

    ResultLine {
        text,
        info: Some(info),
        icon: show_icons.then(|| icon_name(candidate.kind)),
        selectable: true,
    }
}

/// Breadcrumb row leading back up to `parent`
pub fn parent_row(parent: &str, show_icons: bool) -> ResultLine {
    ResultLine {
        text: "..".to_string(),
        info: Some(InfoToken::new(Kind::Folder, parent).encode()),
        icon: show_icons.then_some("go-up"),
        selectable: true,
    }
}

fn icon_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Folder => "folder",
        Kind::File => "text-x-generic",
        Kind::Other => "unknown",
    }
}

/// Make text safe for a single row: no newlines, no NULs
pub fn escape_text(s: &str) -> String {
    s.replace(['\n', '\r'], " ").replace('\0', "")
}

/// Escape text for option values rofi renders as Pango markup
pub fn escape_markup(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Write a single row
pub fn write_row<W: Write>(writer: &mut W, line: &ResultLine) -> io::Result<()> {
    let mut meta: Vec<(&str, &str)> = Vec::new();
    if let Some(info) = &line.info {
        meta.push(("info", info.as_str()));
    }
    if let Some(icon) = line.icon {
        meta.push(("icon", icon));
    }
    if !line.selectable {
        meta.push(("nonselectable", "true"));
    }

    writer.write_all(line.text.as_bytes())?;
    if !meta.is_empty() {
        writer.write_all(&[0])?;
        write_pairs(writer, &meta)?;
    }
    writer.write_all(b"\n")
}

/// Write a mode option line such as `message` or `data`
pub fn write_option<W: Write>(writer: &mut W, key: &str, value: &str) -> io::Result<()> {
    writer.write_all(&[0])?;
    write_pairs(writer, &[(key, escape_text(value).as_str())])?;
    writer.write_all(b"\n")
}

fn write_pairs<W: Write>(writer: &mut W, pairs: &[(&str, &str)]) -> io::Result<()> {
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            writer.write_all(&[UNIT_SEPARATOR])?;
        }
        writer.write_all(key.as_bytes())?;
        writer.write_all(&[UNIT_SEPARATOR])?;
        writer.write_all(value.as_bytes())?;
    }
    Ok(())
}

/// Write a whole invocation result: options first, then the rows
pub fn write_outcome<W: Write>(writer: &mut W, outcome: &Outcome) -> io::Result<()> {
    if let Some(message) = &outcome.message {
        write_option(writer, "message", &escape_markup(message))?;
    }
    if let Some(data) = &outcome.next_context {
        write_option(writer, "data", data)?;
    }
    for line in &outcome.lines {
        write_row(writer, line)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(label: &str, id: &str) -> Candidate {
        Candidate::new(label, Kind::File, id)
    }

    #[test]
    fn test_format_is_deterministic() {
        let c = Candidate::new("Projects [/home/alice]", Kind::Folder, "file:///home/alice/Projects");
        assert_eq!(format(&c, true), format(&c, true));
        assert_eq!(format(&c, false), format(&c, false));
    }

    #[test]
    fn test_format_marks_folders() {
        let c = Candidate::new("Projects", Kind::Folder, "file:///p");
        let line = format(&c, true);
        assert_eq!(line.text, "Projects/");
        assert_eq!(line.icon, Some("folder"));

        let line = format(&file("a.txt", "file:///a.txt"), false);
        assert_eq!(line.text, "a.txt");
        assert_eq!(line.icon, None);
    }

    #[test]
    fn test_format_token_decodes_to_candidate() {
        let c = file("a.txt", "file:///a.txt");
        let info = format(&c, true).info.unwrap();
        assert_eq!(
            InfoToken::decode(&info),
            Some(InfoToken::new(Kind::File, "file:///a.txt"))
        );
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a\nb\r\nc\0d"), "a b  cd");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("/home/alice/R&D <old>"), "/home/alice/R&amp;D &lt;old&gt;");
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn test_message_is_markup_escaped() {
        let outcome = Outcome {
            message: Some("/home/alice/R&D".to_string()),
            ..Outcome::default()
        };
        let mut buf = Vec::new();
        write_outcome(&mut buf, &outcome).unwrap();
        assert_eq!(buf, b"\0message\x1f/home/alice/R&amp;D\n");
    }

    #[test]
    fn test_write_row() {
        let mut buf = Vec::new();
        let line = ResultLine {
            text: "a.txt".to_string(),
            info: Some("rt1:f:1:a".to_string()),
            icon: Some("text-x-generic"),
            selectable: true,
        };
        write_row(&mut buf, &line).unwrap();
        assert_eq!(buf, b"a.txt\0info\x1frt1:f:1:a\x1ficon\x1ftext-x-generic\n");
    }

    #[test]
    fn test_write_placeholder() {
        let mut buf = Vec::new();
        write_row(&mut buf, &ResultLine::placeholder("no results")).unwrap();
        assert_eq!(buf, b"no results\0nonselectable\x1ftrue\n");
    }

    #[test]
    fn test_write_plain_row() {
        let mut buf = Vec::new();
        let line = ResultLine {
            text: "x".to_string(),
            info: None,
            icon: None,
            selectable: true,
        };
        write_row(&mut buf, &line).unwrap();
        assert_eq!(buf, b"x\n");
    }

    #[test]
    fn test_write_outcome_options_first() {
        let outcome = Outcome {
            lines: vec![format(&file("a", "file:///a"), false)],
            next_context: Some("rt1:d:9:file:///d".to_string()),
            message: Some("/d".to_string()),
        };
        let mut buf = Vec::new();
        write_outcome(&mut buf, &outcome).unwrap();

        let expected: &[u8] =
            b"\0message\x1f/d\n\0data\x1frt1:d:9:file:///d\na\0info\x1frt1:f:9:file:///a\n";
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_write_empty_outcome() {
        let mut buf = Vec::new();
        write_outcome(&mut buf, &Outcome::default()).unwrap();
        assert!(buf.is_empty());
    }
}
