//! Nugget tokenizer contract and the default regex-based implementation.
//!
//! A nugget is a delimited span such as `[[[Hello %0|||name///greeting]]]`:
//! the message id comes first, optional format items follow the delimiter
//! token and an optional trailing comment follows the comment token.
//!
//! The scan core only ever reads nuggets, so the contract is a plain
//! callback-driven scan with no way to rewrite the matched text.

use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The four delimiter tokens that make up nugget syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuggetTokens {
    pub begin: String,
    pub end: String,
    pub delimiter: String,
    pub comment: String,
}

impl Default for NuggetTokens {
    fn default() -> Self {
        Self {
            begin: "[[[".to_string(),
            end: "]]]".to_string(),
            delimiter: "|||".to_string(),
            comment: "///".to_string(),
        }
    }
}

/// Structured value of one recognized nugget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Nugget {
    pub msgid: String,
    pub format_items: Vec<String>,
    /// `None` when the nugget has no comment section or the comment is empty.
    pub comment: Option<String>,
}

/// One tokenizer match handed to the scan callback.
#[derive(Debug, Clone, Copy)]
pub struct NuggetMatch<'a> {
    /// The full matched text, delimiters included.
    pub raw: &'a str,
    /// Byte offset of the match in the scanned text.
    pub position: usize,
    pub nugget: &'a Nugget,
    /// Auxiliary context supplied by the tokenizer (may be empty).
    pub entity: &'a str,
}

/// Read-only nugget scanner.
///
/// Implementations call `on_match` once per nugget in left-to-right order.
/// Returning an error means the text contained malformed nugget syntax;
/// callers must then discard every match already seen for that text.
pub trait NuggetTokenizer: Send + Sync {
    fn scan(&self, text: &str, on_match: &mut dyn FnMut(NuggetMatch<'_>)) -> Result<()>;
}

/// Default tokenizer used in source-processing mode.
#[derive(Debug, Clone)]
pub struct NuggetParser {
    tokens: NuggetTokens,
    regex: Regex,
}

static DEFAULT_PARSER: LazyLock<NuggetParser> = LazyLock::new(|| {
    NuggetParser::new(NuggetTokens::default()).expect("default nugget tokens are valid")
});

impl NuggetParser {
    /// Build a parser for the given tokens.
    ///
    /// Returns an error if the tokens cannot form a valid nugget pattern.
    pub fn new(tokens: NuggetTokens) -> Result<Self> {
        if tokens.begin.is_empty() || tokens.end.is_empty() {
            bail!("Nugget begin and end tokens must not be empty");
        }
        if tokens.delimiter.is_empty() || tokens.comment.is_empty() {
            bail!("Nugget delimiter and comment tokens must not be empty");
        }
        // (?s) so a nugget may span several lines; lazy body stops at the first end token.
        let pattern = format!(
            "(?s){}(.*?){}",
            regex::escape(&tokens.begin),
            regex::escape(&tokens.end)
        );
        let regex = Regex::new(&pattern)?;
        Ok(Self { tokens, regex })
    }

    pub fn tokens(&self) -> &NuggetTokens {
        &self.tokens
    }

    /// Split the body of a nugget (the text between begin and end tokens).
    pub fn parse_body(&self, body: &str) -> Nugget {
        let (content, comment) = match body.find(&self.tokens.comment) {
            Some(idx) => (
                &body[..idx],
                Some(&body[idx + self.tokens.comment.len()..]),
            ),
            None => (body, None),
        };

        let mut parts = content.split(self.tokens.delimiter.as_str());
        let msgid = parts.next().unwrap_or_default().to_string();
        let format_items = parts.map(str::to_string).collect();

        Nugget {
            msgid,
            format_items,
            comment: comment.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }
}

impl Default for NuggetParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}

impl NuggetTokenizer for NuggetParser {
    fn scan(&self, text: &str, on_match: &mut dyn FnMut(NuggetMatch<'_>)) -> Result<()> {
        for captures in self.regex.captures_iter(text) {
            let (Some(whole), Some(body)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let nugget = self.parse_body(body.as_str());
            if nugget.msgid.is_empty() {
                bail!(
                    "Malformed nugget at offset {}: empty message id in {:?}",
                    whole.start(),
                    whole.as_str()
                );
            }
            on_match(NuggetMatch {
                raw: whole.as_str(),
                position: whole.start(),
                nugget: &nugget,
                entity: "",
            });
        }
        Ok(())
    }
}
