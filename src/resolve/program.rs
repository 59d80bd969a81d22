use crate::query::{SelectorPath, TextQuery};
use std::fmt;

// Keeping the page-side logic in .js files preserves editor support and
// keeps the Rust side free of script literals.
const TRAVERSE_PATH_JS: &str = include_str!("traverse_path.js");
const SEARCH_TEXT_JS: &str = include_str!("search_text.js");

/// A self-contained lookup routine, run once per poll attempt against the
/// current document.
///
/// A program is immutable once built and safe to re-execute: it reads the
/// document and returns at most one element, so repeated runs against a
/// changing page simply reflect whatever the page looks like at that
/// moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchProgram {
    /// Walk an ordered selector chain, entering a shadow root at every hop.
    PathTraversal { path: SelectorPath },

    /// Scan the document and every nested shadow subtree for a leaf
    /// element whose rendered text contains the query.
    TextSearch { query: TextQuery },
}

impl SearchProgram {
    pub fn path_traversal(path: SelectorPath) -> Self {
        Self::PathTraversal { path }
    }

    pub fn text_search(query: TextQuery) -> Self {
        Self::TextSearch { query }
    }

    /// Render the program as a JavaScript expression.
    ///
    /// The embedded scripts are parenthesized function literals; the query
    /// is applied as their argument, encoded as a JSON literal so selector
    /// strings and search text need no manual escaping.
    pub fn expression(&self) -> String {
        match self {
            Self::PathTraversal { path } => {
                let selectors = serde_json::Value::from(path.segments().to_vec());
                format!("{}({})", TRAVERSE_PATH_JS.trim_end(), selectors)
            }
            Self::TextSearch { query } => {
                let needle = serde_json::Value::from(query.as_str());
                format!("{}({})", SEARCH_TEXT_JS.trim_end(), needle)
            }
        }
    }
}

impl fmt::Display for SearchProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTraversal { path } => write!(f, "shadow path '{path}'"),
            Self::TextSearch { query } => write!(f, "text '{query}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_expression_embeds_segments_as_json() {
        let path = SelectorPath::parse("host > nested > button.save").unwrap();
        let expr = SearchProgram::path_traversal(path).expression();

        assert!(expr.contains(r#"["host","nested","button.save"]"#));
        assert!(expr.contains("querySelector"));
        assert!(expr.contains("shadowRoot"));
        assert!(expr.ends_with(')'));
    }

    #[test]
    fn test_text_expression_embeds_needle_as_json() {
        let query = TextQuery::new("Save changes").unwrap();
        let expr = SearchProgram::text_search(query).expression();

        assert!(expr.contains(r#"("Save changes")"#));
        assert!(expr.contains("innerText"));
        assert!(expr.contains("children.length === 0"));
    }

    #[test]
    fn test_expression_escapes_quotes() {
        let query = TextQuery::new(r#"say "hi""#).unwrap();
        let expr = SearchProgram::text_search(query).expression();

        assert!(expr.contains(r#""say \"hi\"""#));
    }

    #[test]
    fn test_display_names_the_query() {
        let path = SelectorPath::parse("host > target").unwrap();
        assert_eq!(
            SearchProgram::path_traversal(path).to_string(),
            "shadow path 'host > target'"
        );

        let query = TextQuery::new("Submit").unwrap();
        assert_eq!(SearchProgram::text_search(query).to_string(), "text 'Submit'");
    }
}
