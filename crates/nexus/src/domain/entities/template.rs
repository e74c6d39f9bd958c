//! Pattern - Text with `{placeholder}` tokens
//!
//! A placeholder is `{` + one or more of `[a-z0-9_]` + `}`. Braces around
//! anything else are ordinary text.

use crate::domain::value_objects::Category;

/// One piece of a parsed pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Token(String),
}

/// A parsed template string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

/// Post template targeting a forum category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTemplate {
    pub category: Category,
    pub title: Pattern,
    pub body: Pattern,
}

impl Pattern {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_token_name(&after[..close]) => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Token(after[..close].to_string()));
                    rest = &after[close + 1..];
                }
                _ => {
                    text.push('{');
                    rest = after;
                }
            }
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance, repeats included
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }
}

/// True when `text` still contains at least one `{placeholder}`
pub fn has_placeholder(text: &str) -> bool {
    Pattern::parse(text).tokens().next().is_some()
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
