//! Info tokens and the context decoded from them
//!
//! Every row we print carries an info token. rofi hands the token of the
//! selected row back to the next invocation, and it is the only state that
//! survives between processes. Token grammar:
//!
//! ```text
//! token  = "rt1:" tag ":" length ":" ident
//! tag    = "f" | "d" | "o"            (file, folder, other)
//! length = byte length of ident, decimal, no leading zeros
//! ident  = identifier with control bytes and '%' percent-encoded
//! ```
//!
//! The escaping keeps NUL, the unit separator and newlines (all reserved by
//! rofi's row format) out of the token; the length prefix makes truncated or
//! concatenated input fail to decode instead of decoding to something else.

use crate::index::Kind;
use crate::resolver::{resolve, Decision};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

const PREFIX: &str = "rt1:";

/// Bytes escaped inside the identifier field
const IDENT_ESCAPE: &AsciiSet = &CONTROLS.add(b'%');

/// Decoded `(kind, identifier)` pair carried by a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoToken {
    pub kind: Kind,
    pub identifier: String,
}

impl InfoToken {
    pub fn new(kind: Kind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
        }
    }

    pub fn encode(&self) -> String {
        let ident = utf8_percent_encode(&self.identifier, IDENT_ESCAPE).to_string();
        format!("{}{}:{}:{}", PREFIX, self.kind.tag(), ident.len(), ident)
    }

    /// Parse a token; `None` for anything not produced by [`encode`](Self::encode)
    pub fn decode(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(PREFIX)?;

        let mut chars = rest.chars();
        let kind = Kind::from_tag(chars.next()?)?;
        let rest = chars.as_str().strip_prefix(':')?;

        let (len, ident) = rest.split_once(':')?;
        if len.is_empty()
            || !len.bytes().all(|b| b.is_ascii_digit())
            || (len.len() > 1 && len.starts_with('0'))
        {
            return None;
        }
        let len: usize = len.parse().ok()?;
        if ident.len() != len {
            return None;
        }

        let identifier = percent_decode_str(ident).decode_utf8().ok()?.into_owned();
        // Only the canonical encoding is accepted, so stray '%', raw control
        // bytes and alternative escapes all fail here
        if utf8_percent_encode(&identifier, IDENT_ESCAPE).to_string() != ident {
            return None;
        }
        Some(Self { kind, identifier })
    }
}

/// What the current invocation was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// No usable prior context: plain search
    FreshQuery,
    /// Search inside the given container
    Drilldown(String),
    /// Open the given entity
    Action(String),
}

impl Context {
    /// Derive the context from the raw prior-context string
    ///
    /// Absent, empty or malformed input is a fresh query, never an error.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return Context::FreshQuery;
        };

        match InfoToken::decode(raw) {
            Some(token) => match resolve(&token) {
                Decision::Narrow(scope) => Context::Drilldown(scope),
                Decision::OpenAction(target) => Context::Action(target),
            },
            None => {
                tracing::debug!(context = raw, "ignoring unrecognized context");
                Context::FreshQuery
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_format() {
        let token = InfoToken::new(Kind::Folder, "file:///home/alice/Projects");
        assert_eq!(token.encode(), "rt1:d:27:file:///home/alice/Projects");
    }

    #[test]
    fn test_roundtrip_awkward_identifiers() {
        let idents = [
            "",
            "file:///a%20b",
            "rt1:f:3:abc",
            "line\nbreak\u{1f}sep\0nul",
            "ünïcødé:::",
        ];
        for kind in [Kind::File, Kind::Folder, Kind::Other] {
            for ident in idents {
                let token = InfoToken::new(kind, ident);
                let encoded = token.encode();
                assert!(!encoded.bytes().any(|b| b.is_ascii_control()), "{:?}", encoded);
                assert_eq!(InfoToken::decode(&encoded), Some(token));
            }
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let bad = [
            "",
            "invoice",
            "rt1:",
            "rt1:x:3:abc",
            "rt1:f:3abc",
            "rt1:f:4:abc",
            "rt1:f:2:abc",
            "rt1:f:03:abc",
            "rt1:f:+3:abc",
            "rt1:f::",
            "rt2:f:3:abc",
            "RT1:f:3:abc",
            "rt1:f:3:%zz",
            "rt1:f:3:%ff",
            "rt1:f:3:%41",
            "rt1:f:1:\n",
        ];
        for raw in bad {
            assert_eq!(InfoToken::decode(raw), None, "{:?}", raw);
        }
    }

    #[test]
    fn test_decode_zero_length() {
        assert_eq!(
            InfoToken::decode("rt1:o:0:"),
            Some(InfoToken::new(Kind::Other, ""))
        );
    }

    #[test]
    fn test_context_defaults_to_fresh_query() {
        assert_eq!(Context::decode(None), Context::FreshQuery);
        assert_eq!(Context::decode(Some("")), Context::FreshQuery);
        assert_eq!(Context::decode(Some("report")), Context::FreshQuery);
        assert_eq!(Context::decode(Some("rt1:q:1:a")), Context::FreshQuery);
    }

    #[test]
    fn test_context_from_tokens() {
        let folder = InfoToken::new(Kind::Folder, "/home/alice/Projects").encode();
        let file = InfoToken::new(Kind::File, "/home/alice/file.pdf").encode();
        let other = InfoToken::new(Kind::Other, "urn:contact:1").encode();

        assert_eq!(
            Context::decode(Some(&folder)),
            Context::Drilldown("/home/alice/Projects".to_string())
        );
        assert_eq!(
            Context::decode(Some(&file)),
            Context::Action("/home/alice/file.pdf".to_string())
        );
        assert_eq!(
            Context::decode(Some(&other)),
            Context::Action("urn:contact:1".to_string())
        );
    }
}
