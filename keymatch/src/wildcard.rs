//! First-generation key functions with a single free-form `*`.
//!
//! Unlike the segment-based matchers, `*` here is not tied to segment boundaries: everything
//! before the first `*` must be a literal prefix of the path and the wildcard matches whatever
//! follows, including nothing and including further slashes.

/// Returns `true` if `path` matches `pattern`, where the first `*` in `pattern` matches any
/// suffix.
///
/// Text after the first `*` is ignored. A pattern without `*` must be equal to the path.
///
/// # Examples
/// ```
/// use keymatch::key_match;
///
/// assert!(key_match("/foo/bar", "/foo/*"));
/// assert!(key_match("/foo/", "/foo/*"));
/// assert!(key_match("/foobar", "/foo*"));
/// assert!(!key_match("/foo", "/foo/*"));
/// assert!(key_match("/foo", "/foo"));
/// ```
pub fn key_match(path: &str, pattern: &str) -> bool {
    match pattern.find('*') {
        Some(idx) => path.starts_with(&pattern[..idx]),
        None => path == pattern,
    }
}

/// Returns the part of `path` matched by the first `*` in `pattern`.
///
/// Returns `""` if `pattern` has no `*`, if `path` does not start with the text before it, or if
/// nothing is left for the wildcard.
///
/// # Examples
/// ```
/// use keymatch::key_get;
///
/// assert_eq!(key_get("/foo/bar", "/foo/*"), "bar");
/// assert_eq!(key_get("/foo/bar/baz", "/foo*"), "/bar/baz");
/// assert_eq!(key_get("/foo/", "/foo/*"), "");
/// assert_eq!(key_get("/bar/baz", "/foo/*"), "");
/// ```
pub fn key_get<'a>(path: &'a str, pattern: &str) -> &'a str {
    pattern
        .find('*')
        .and_then(|idx| path.strip_prefix(&pattern[..idx]))
        .unwrap_or("")
}
