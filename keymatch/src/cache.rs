use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::{matcher::KeyMatcher, pattern::KeyPattern};

/// Concurrent cache of compiled [`KeyPattern`]s for a single matcher.
///
/// Policy rules are evaluated against many paths, so tokenizing each pattern once pays off. The
/// cache is safe to share between threads (e.g. in an `Arc`) and has no global instance; its
/// lifetime is the owner's. Entries are never evicted implicitly; use [`clear`](Self::clear) when
/// the policy set is reloaded.
///
/// # Examples
/// ```
/// use keymatch::{KeyMatcher, PatternCache};
///
/// let cache = PatternCache::new(KeyMatcher::BRACE);
///
/// assert!(cache.is_match("/api/users/123", "/api/users/{id}"));
/// assert!(!cache.is_match("/api/users", "/api/users/{id}"));
/// assert_eq!(cache.get("/api/users/123", "/api/users/{id}", "id"), Some("123"));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct PatternCache {
    matcher: KeyMatcher,
    patterns: DashMap<String, Arc<KeyPattern>>,
}

impl PatternCache {
    /// Constructs an empty cache for `matcher`.
    pub fn new(matcher: KeyMatcher) -> Self {
        PatternCache {
            matcher,
            patterns: DashMap::new(),
        }
    }

    /// Constructs an empty cache for `matcher` with room for `capacity` patterns.
    pub fn with_capacity(matcher: KeyMatcher, capacity: usize) -> Self {
        PatternCache {
            matcher,
            patterns: DashMap::with_capacity(capacity),
        }
    }

    /// Returns the matcher patterns are compiled for.
    pub fn matcher(&self) -> KeyMatcher {
        self.matcher
    }

    /// Returns the compiled form of `pattern`, compiling and caching it on first use.
    pub fn get_or_compile(&self, pattern: &str) -> Arc<KeyPattern> {
        if let Some(compiled) = self.patterns.get(pattern) {
            return Arc::clone(compiled.value());
        }

        trace!(pattern, "key pattern cache miss");

        let compiled = Arc::new(KeyPattern::new(self.matcher, pattern));

        // another thread may have inserted it meanwhile; keep whichever landed first
        let entry = self.patterns.entry(pattern.to_owned()).or_insert(compiled);
        Arc::clone(entry.value())
    }

    /// Returns `true` if `path` satisfies `pattern`.
    pub fn is_match(&self, path: &str, pattern: &str) -> bool {
        self.get_or_compile(pattern).is_match(path)
    }

    /// Returns the value bound to placeholder `name` of `pattern` in `path`.
    pub fn get<'a>(&self, path: &'a str, pattern: &str, name: &str) -> Option<&'a str> {
        self.get_or_compile(pattern).get(path, name)
    }

    /// Returns the number of cached patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if no patterns are cached.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Removes all cached patterns.
    pub fn clear(&self) {
        debug!(evicted = self.patterns.len(), "clearing key pattern cache");
        self.patterns.clear();
    }
}
