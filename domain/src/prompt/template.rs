//! `{name}` placeholder templates

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// An opaque prompt text with named `{placeholder}` slots.
///
/// `{{` and `}}` render as literal braces. Rendering fails when a
/// placeholder has no value; unused arguments are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }

    /// Names of all placeholders, in order of appearance.
    pub fn placeholders(&self) -> Result<Vec<String>, DomainError> {
        let mut names = Vec::new();
        self.walk(|segment| {
            if let Segment::Placeholder(name) = segment {
                names.push(name.to_string());
            }
            Ok(())
        })?;
        Ok(names)
    }

    pub fn render(&self, args: &[(&str, &str)]) -> Result<String, DomainError> {
        let mut out = String::with_capacity(self.0.len());
        self.walk(|segment| {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Brace(c) => out.push(c),
                Segment::Placeholder(name) => {
                    let value = args
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            DomainError::Template(format!(
                                "no value for placeholder {{{}}}",
                                name
                            ))
                        })?;
                    out.push_str(value);
                }
            }
            Ok(())
        })?;
        Ok(out)
    }

    fn walk<'a>(
        &'a self,
        mut visit: impl FnMut(Segment<'a>) -> Result<(), DomainError>,
    ) -> Result<(), DomainError> {
        let src = self.0.as_str();
        let bytes = src.as_bytes();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => {
                    visit(Segment::Literal(&src[literal_start..i]))?;
                    visit(Segment::Brace(bytes[i] as char))?;
                    i += 2;
                    literal_start = i;
                }
                b'{' => {
                    let close = src[i + 1..].find('}').ok_or_else(|| {
                        DomainError::Template(format!("unclosed '{{' at byte {}", i))
                    })?;
                    let name = &src[i + 1..i + 1 + close];
                    if name.is_empty() || name.contains('{') {
                        return Err(DomainError::Template(format!(
                            "malformed placeholder at byte {}",
                            i
                        )));
                    }
                    visit(Segment::Literal(&src[literal_start..i]))?;
                    visit(Segment::Placeholder(name.trim()))?;
                    i += close + 2;
                    literal_start = i;
                }
                b'}' => {
                    return Err(DomainError::Template(format!(
                        "single '}}' at byte {}",
                        i
                    )));
                }
                _ => i += 1,
            }
        }
        visit(Segment::Literal(&src[literal_start..]))
    }
}

impl From<&str> for PromptTemplate {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Brace(char),
    Placeholder(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_named_placeholders() {
        let template = PromptTemplate::new("Topic: {topic}, rounds: {n_rounds}.");
        let rendered = template
            .render(&[("topic", "Rust vs Go"), ("n_rounds", "2")])
            .unwrap();
        assert_eq!(rendered, "Topic: Rust vs Go, rounds: 2.");
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = PromptTemplate::new("{n} rounds, meaning {n} back and forths");
        assert_eq!(
            template.render(&[("n", "3")]).unwrap(),
            "3 rounds, meaning 3 back and forths"
        );
    }

    #[test]
    fn test_escaped_braces() {
        let template = PromptTemplate::new("Return {{\"points\": [...]}} for {topic}");
        assert_eq!(
            template.render(&[("topic", "t")]).unwrap(),
            "Return {\"points\": [...]} for t"
        );
    }

    #[test]
    fn test_missing_value_fails() {
        let template = PromptTemplate::new("Hello {name}");
        let err = template.render(&[]).unwrap_err();
        assert!(matches!(err, DomainError::Template(_)));
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let template = PromptTemplate::new("No placeholders here");
        assert_eq!(
            template.render(&[("unused", "x")]).unwrap(),
            "No placeholders here"
        );
    }

    #[test]
    fn test_malformed_templates() {
        assert!(PromptTemplate::new("oops {").render(&[]).is_err());
        assert!(PromptTemplate::new("oops }").render(&[]).is_err());
        assert!(PromptTemplate::new("oops {}").render(&[]).is_err());
    }

    #[test]
    fn test_placeholders_listing() {
        let template = PromptTemplate::new("{a} and {{b}} and {c}");
        assert_eq!(template.placeholders().unwrap(), vec!["a", "c"]);
    }

    #[test]
    fn test_substituted_values_are_not_reparsed() {
        let template = PromptTemplate::new("Said: {utterance}");
        assert_eq!(
            template.render(&[("utterance", "use {braces} freely")]).unwrap(),
            "Said: use {braces} freely"
        );
    }
}
