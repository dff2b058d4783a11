use gqlkit_parser::ParseError;
use gqlkit_parser::ast::Document;
use moka::sync::Cache;
use std::sync::Arc;

type CachedParse = Result<Arc<Document>, ParseError>;

/// Bounded cache of parsed documents, keyed by the raw document text.
///
/// Parse failures are cached alongside successes, so a broken document is
/// only parsed once. Under contention, concurrent lookups of the same
/// uncached text run the parser exactly once and all observe its result.
#[derive(Clone)]
pub struct DocumentCache {
    cache: Cache<String, CachedParse>,
}

impl DocumentCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: Cache::new(max_capacity),
        }
    }

    pub fn get_or_parse(&self, source: &str) -> CachedParse {
        self.get_or_parse_with(source, gqlkit_parser::parse_document)
    }

    /// Like [`DocumentCache::get_or_parse()`], with a caller-supplied parse
    /// function for cache misses.
    pub fn get_or_parse_with<F>(&self, source: &str, parse: F) -> CachedParse
    where
        F: FnOnce(&str) -> Result<Document, ParseError>,
    {
        self.cache.get_with_by_ref(source, || {
            tracing::debug!("Document cache miss ({} bytes).", source.len());
            parse(source).map(Arc::new)
        })
    }

    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
