//! REST path decomposition.

use std::fmt;

/// One path segment: either a fixed name or a `{parameter}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Fixed(String),
    Parameter(String),
}

/// A parsed REST path such as `/users/{id}/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RestPath {
    segments: Vec<Segment>,
}

impl RestPath {
    /// Parse a path string. Empty segments (double slashes, trailing slash)
    /// are dropped.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s.starts_with('{') && s.ends_with('}') {
                    Segment::Parameter(s[1..s.len() - 1].to_string())
                } else {
                    Segment::Fixed(s.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the `{parameter}` segments, in order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Parameter(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Lower-cased word tokens of every fixed segment, splitting on `-`,
    /// `_`, `.` and camelCase boundaries.
    pub fn tokens(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Fixed(name) => Some(name.as_str()),
                _ => None,
            })
            .flat_map(split_words)
            .collect()
    }

    /// Whether `other` extends this path by appending segments.
    pub fn is_ancestor_of(&self, other: &RestPath) -> bool {
        other.segments.len() > self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for RestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Fixed(name) => write!(f, "/{name}")?,
                Segment::Parameter(name) => write!(f, "/{{{name}}}")?,
            }
        }
        if self.segments.is_empty() {
            write!(f, "/")?;
        }
        Ok(())
    }
}

/// Split an identifier into lower-cased word tokens.
pub fn split_words(ident: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in ident.chars() {
        if c == '-' || c == '_' || c == '.' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.extend(c.to_lowercase());
        } else {
            current.extend(c.to_lowercase());
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
