//! Parsed expression cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::parser::{AuthorizationExpression, ParseError};

/// Append-only cache of parsed expressions keyed by their source text.
///
/// Expressions are static source text, so entries are never invalidated.
/// Lookups take a shared lock; a miss parses outside the lock and inserts.
#[derive(Debug, Default)]
pub struct ExpressionCache {
    entries: RwLock<HashMap<String, Arc<AuthorizationExpression>>>,
}

impl ExpressionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed expression for `source`, parsing it on first use.
    ///
    /// Malformed expressions are not cached.
    pub fn get_or_parse(&self, source: &str) -> Result<Arc<AuthorizationExpression>, ParseError> {
        if let Some(parsed) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            return Ok(Arc::clone(parsed));
        }

        let parsed = Arc::new(AuthorizationExpression::parse(source)?);
        debug!(expression = source, "caching parsed expression");

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            entries.entry(source.to_string()).or_insert(parsed),
        ))
    }

    /// Returns the number of cached expressions.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
