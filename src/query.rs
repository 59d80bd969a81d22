//! Query types accepted by the resolution engine
//!
//! A [`SelectorPath`] names one element per shadow boundary; a [`TextQuery`]
//! names a piece of rendered text. Both validate their structure on
//! construction so that a malformed query fails before any browser call.

use crate::error::{Result, ShadowError};
use std::fmt;
use std::str::FromStr;

/// An ordered chain of CSS selectors, one per shadow boundary.
///
/// Each segment after the first is looked up inside the shadow root of the
/// previous match, so order is significant. Paths can be written as a
/// single `>`-delimited string:
///
/// ```
/// use shadow_pierce::SelectorPath;
///
/// let path = SelectorPath::parse("user-profile > settings-card > button.save").unwrap();
/// assert_eq!(path.segments(), ["user-profile", "settings-card", "button.save"]);
/// ```
///
/// or supplied pre-split via [`SelectorPath::from_segments`]. Segment
/// strings are not validated as CSS; only the structure (non-empty,
/// ordered) is checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPath {
    segments: Vec<String>,
}

impl SelectorPath {
    /// Parse a `>`-delimited path string.
    ///
    /// Surrounding whitespace is trimmed from every segment and segments
    /// that are empty after trimming are dropped. Fails with
    /// [`ShadowError::InvalidQuery`] when no segments remain.
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path
            .split('>')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            return Err(ShadowError::InvalidQuery(
                "selector path is empty".to_string(),
            ));
        }

        Ok(Self { segments })
    }

    /// Build a path from an already-ordered sequence of selectors.
    ///
    /// Segments are stored unmodified. Fails with
    /// [`ShadowError::InvalidQuery`] when the sequence is empty or contains
    /// a blank segment.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(ShadowError::InvalidQuery(
                "selector path is empty".to_string(),
            ));
        }

        if segments.iter().any(|segment| segment.trim().is_empty()) {
            return Err(ShadowError::InvalidQuery(
                "selector path contains an empty segment".to_string(),
            ));
        }

        Ok(Self { segments })
    }

    /// The ordered selector segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of shadow boundaries the path pierces.
    pub fn boundary_count(&self) -> usize {
        self.segments.len() - 1
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(" > "))
    }
}

impl FromStr for SelectorPath {
    type Err = ShadowError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for SelectorPath {
    type Error = ShadowError;

    fn try_from(path: &str) -> Result<Self> {
        Self::parse(path)
    }
}

impl TryFrom<String> for SelectorPath {
    type Error = ShadowError;

    fn try_from(path: String) -> Result<Self> {
        Self::parse(&path)
    }
}

impl TryFrom<Vec<String>> for SelectorPath {
    type Error = ShadowError;

    fn try_from(segments: Vec<String>) -> Result<Self> {
        Self::from_segments(segments)
    }
}

impl TryFrom<Vec<&str>> for SelectorPath {
    type Error = ShadowError;

    fn try_from(segments: Vec<&str>) -> Result<Self> {
        Self::from_segments(segments)
    }
}

impl TryFrom<&[&str]> for SelectorPath {
    type Error = ShadowError;

    fn try_from(segments: &[&str]) -> Result<Self> {
        Self::from_segments(segments.iter().copied())
    }
}

/// A literal substring to look for in rendered text.
///
/// Matching is plain substring containment: not case-folded, not a
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery(String);

impl TextQuery {
    /// Fails with [`ShadowError::InvalidQuery`] when the text is blank.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ShadowError::InvalidQuery("text query is empty".to_string()));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TextQuery {
    type Err = ShadowError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for TextQuery {
    type Error = ShadowError;

    fn try_from(text: &str) -> Result<Self> {
        Self::new(text)
    }
}

impl TryFrom<String> for TextQuery {
    type Error = ShadowError;

    fn try_from(text: String) -> Result<Self> {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimited_path() {
        let path = SelectorPath::parse("host > nested > target").unwrap();
        assert_eq!(path.segments(), ["host", "nested", "target"]);
        assert_eq!(path.boundary_count(), 2);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let path = SelectorPath::parse("  host>   nested   >target  ").unwrap();
        assert_eq!(path.segments(), ["host", "nested", "target"]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let path = SelectorPath::parse("a > b > c > d").unwrap();
        assert_eq!(path.segments(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_parse_single_segment() {
        let path = SelectorPath::parse("button.save").unwrap();
        assert_eq!(path.segments(), ["button.save"]);
        assert_eq!(path.boundary_count(), 0);
    }

    #[test]
    fn test_parse_drops_blank_segments() {
        let path = SelectorPath::parse("a > > b").unwrap();
        assert_eq!(path.segments(), ["a", "b"]);
    }

    #[test]
    fn test_parse_empty_path_is_invalid() {
        assert!(matches!(
            SelectorPath::parse(""),
            Err(ShadowError::InvalidQuery(_))
        ));
        assert!(matches!(
            SelectorPath::parse("   "),
            Err(ShadowError::InvalidQuery(_))
        ));
        assert!(matches!(
            SelectorPath::parse(" > > "),
            Err(ShadowError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_from_segments_keeps_segments_unmodified() {
        let path = SelectorPath::from_segments(vec![" div#host ", "button"]).unwrap();
        assert_eq!(path.segments(), [" div#host ", "button"]);
    }

    #[test]
    fn test_from_segments_rejects_empty_sequence() {
        assert!(matches!(
            SelectorPath::from_segments(Vec::<String>::new()),
            Err(ShadowError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_from_segments_rejects_blank_segment() {
        assert!(matches!(
            SelectorPath::from_segments(vec!["host", "  "]),
            Err(ShadowError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_display_reconstructs_path() {
        let path = SelectorPath::parse("host>nested>  target").unwrap();
        assert_eq!(path.to_string(), "host > nested > target");
    }

    #[test]
    fn test_from_str() {
        let path: SelectorPath = "host > target".parse().unwrap();
        assert_eq!(path.segments(), ["host", "target"]);
    }

    #[test]
    fn test_text_query() {
        let query = TextQuery::new("Save changes").unwrap();
        assert_eq!(query.as_str(), "Save changes");
        assert_eq!(query.to_string(), "Save changes");
    }

    #[test]
    fn test_text_query_rejects_blank() {
        assert!(matches!(
            TextQuery::new(""),
            Err(ShadowError::InvalidQuery(_))
        ));
        assert!(matches!(
            TextQuery::new("  \n "),
            Err(ShadowError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_text_query_is_not_trimmed() {
        // Leading/trailing spaces are part of the match target.
        let query = TextQuery::new(" exact ").unwrap();
        assert_eq!(query.as_str(), " exact ");
    }
}
