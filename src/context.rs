//! Context passages a question is evaluated against.
//!
//! The collection is loaded once during startup and is read-only afterwards.
//! Requests select a passage by index; a request without an index is served
//! the first passage.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::common::error::ServerError;

/// Passage served when no context file is configured.
const DEFAULT_CONTEXT: &str = "Jamarat suna da duwatsu uku a Mina wa\u{0257}anda \
ke wakiltar Shaidan. Alhazai suna jifansu da duwatsu yayin Hajj.";

/// Ordered, immutable collection of context passages.
#[derive(Debug, Clone)]
pub struct ContextStore {
    passages: Vec<String>,
}

impl ContextStore {
    /// Single-passage collection holding the built-in context.
    pub fn builtin() -> ContextStore {
        ContextStore {
            passages: vec![DEFAULT_CONTEXT.to_string()],
        }
    }

    /// Loads passages from a JSON array of strings. An empty collection is
    /// rejected: a server with no context cannot answer anything.
    pub fn from_file(path: &Path) -> Result<ContextStore, ServerError> {
        let file = File::open(path)?;
        let passages: Vec<String> = serde_json::from_reader(BufReader::new(file))?;
        if passages.is_empty() {
            return Err(ServerError::LoadError(format!(
                "no context passages found in {}",
                path.display()
            )));
        }
        Ok(ContextStore { passages })
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Selects a passage by index. Negative and out-of-range indices are
    /// rejected without any further processing.
    pub fn select(&self, index: i64) -> Result<&str, ServerError> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.passages.get(index))
            .map(String::as_str)
            .ok_or_else(|| ServerError::ValidationError("Invalid context index".to_string()))
    }

    /// Passage used when a request does not specify an index.
    ///
    /// Both constructors guarantee at least one passage.
    pub fn default_passage(&self) -> &str {
        &self.passages[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_of(passages: &[&str]) -> ContextStore {
        ContextStore {
            passages: passages.iter().map(|passage| passage.to_string()).collect(),
        }
    }

    #[test]
    fn selects_passages_within_range() {
        let store = store_of(&["first passage", "second passage"]);
        assert_eq!(store.select(0).unwrap(), "first passage");
        assert_eq!(store.select(1).unwrap(), "second passage");
    }

    #[test]
    fn rejects_out_of_range_and_negative_indices() {
        let store = store_of(&["first passage", "second passage"]);
        assert!(matches!(
            store.select(2),
            Err(ServerError::ValidationError(_))
        ));
        assert!(matches!(
            store.select(-1),
            Err(ServerError::ValidationError(_))
        ));
    }

    #[test]
    fn builtin_store_serves_the_fixed_passage() {
        let store = ContextStore::builtin();
        assert_eq!(store.len(), 1);
        assert!(store.default_passage().contains("Jamarat"));
    }

    #[test]
    fn loads_passages_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["passage one", "passage two", "passage three"]"#).unwrap();
        let store = ContextStore::from_file(file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.select(2).unwrap(), "passage three");
    }

    #[test]
    fn rejects_empty_context_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        assert!(matches!(
            ContextStore::from_file(file.path()),
            Err(ServerError::LoadError(_))
        ));
    }

    #[test]
    fn rejects_malformed_context_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();
        assert!(matches!(
            ContextStore::from_file(file.path()),
            Err(ServerError::LoadError(_))
        ));
    }
}
