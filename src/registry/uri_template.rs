//! URI pattern matching for resource templates
//!
//! A template is a `/`-separated pattern whose `{placeholder}` segments
//! capture the corresponding segment of a concrete URI.

use std::collections::BTreeMap;

use thiserror::Error;

/// Placeholder values captured while matching a concrete URI.
pub type TemplateValues = BTreeMap<String, String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UriTemplateError {
    #[error("uri template {template:?} has a malformed segment {segment:?}")]
    MalformedSegment { template: String, segment: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Debug, Clone)]
pub struct UriTemplate {
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Parses a pattern such as `users://{user_id}/profile`. A placeholder
    /// must span a whole segment; braces anywhere else are rejected.
    pub fn parse(template: &str) -> Result<Self, UriTemplateError> {
        let segments = template
            .split('/')
            .map(|segment| {
                let inner = segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'));
                match inner {
                    Some(name) if !name.is_empty() && !name.contains(['{', '}']) => {
                        Ok(Segment::Placeholder(name.to_string()))
                    }
                    Some(_) => Err(UriTemplateError::MalformedSegment {
                        template: template.to_string(),
                        segment: segment.to_string(),
                    }),
                    None if segment.contains(['{', '}']) => {
                        Err(UriTemplateError::MalformedSegment {
                            template: template.to_string(),
                            segment: segment.to_string(),
                        })
                    }
                    None => Ok(Segment::Literal(segment.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Matches a concrete URI against the pattern, returning the captured
    /// placeholder values. Placeholders never match an empty segment.
    pub fn matches(&self, uri: &str) -> Option<TemplateValues> {
        let parts: Vec<&str> = uri.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut values = TemplateValues::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Placeholder(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    values.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(values)
    }
}
