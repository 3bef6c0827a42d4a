use crate::{
    segment::{is_tail_value, is_var_value, segments},
    syntax::{Syntax, Token},
};

/// Extracts the concrete value bound to a named placeholder.
///
/// Extraction does not check that the whole path matches the pattern; callers are expected to
/// have matched already. Pattern segments are walked position by position and the first
/// placeholder with the requested name yields its aligned path segment. A named trailing wildcard
/// yields the rest of the path.
///
/// Only values a matcher would bind are returned: an aligned segment that is empty or carries a
/// `?` gives `None`, as does a wildcard remainder with a `?`.
///
/// # Examples
/// ```
/// use keymatch::KeyExtractor;
///
/// let get = |path, pattern, name| KeyExtractor::BRACE.get(path, pattern, name);
///
/// assert_eq!(get("/api/users/123/posts", "/api/users/{id}/*", "id"), Some("123"));
/// assert_eq!(get("/blob/main/LICENSE", "/blob/{path}*", "path"), Some("main/LICENSE"));
/// assert_eq!(get("/api/users/123", "/api/users/{id}", "name"), None);
/// assert_eq!(get("/api", "/api/users/{id}", "id"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyExtractor {
    syntax: Syntax,
}

impl KeyExtractor {
    /// Extracts `:name` placeholders. Matches `keyGet2`.
    pub const PREFIX: KeyExtractor = KeyExtractor::new(Syntax::Prefix);

    /// Extracts `{name}` placeholders. Matches `keyGet3`.
    pub const BRACE: KeyExtractor = KeyExtractor::new(Syntax::Brace);

    /// Constructs an extractor for `syntax`.
    pub const fn new(syntax: Syntax) -> Self {
        KeyExtractor { syntax }
    }

    /// Returns the placeholder syntax.
    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Returns the value bound to placeholder `name`, or `None` if the pattern has no such
    /// placeholder or the path has no bindable segment aligned with it.
    pub fn get<'a>(&self, path: &'a str, pattern: &str, name: &str) -> Option<&'a str> {
        // no placeholders to look at
        if self.syntax.is_static(pattern) {
            return None;
        }

        extract_tokens(self.syntax.tokenize(pattern), path, name)
    }
}

/// Walks pattern tokens alongside the segments of `path` until placeholder `name` is found.
pub(crate) fn extract_tokens<'p, 'a, I>(tokens: I, path: &'a str, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = Token<'p>>,
{
    let mut path_segments = segments(path);

    for token in tokens {
        match token {
            Token::Var(var) if var == name => {
                return path_segments.next().filter(|segment| is_var_value(segment))
            }
            Token::Tail(Some(var)) if var == name => {
                return path_segments.remainder().filter(|rest| is_tail_value(rest))
            }
            Token::Tail(_) => return None,
            Token::Literal(_) | Token::Var(_) => {
                path_segments.next()?;
            }
        }
    }

    None
}

/// Returns the value of `:name` placeholder `name` in `path`, or `""` if absent.
///
/// # Examples
/// ```
/// use keymatch::key_get2;
///
/// assert_eq!(key_get2("/api/users/123", "/api/users/:id", "id"), "123");
/// assert_eq!(key_get2("/api/users/123/posts", "/api/users/:id/*", "id"), "123");
/// assert_eq!(key_get2("/api/users/123", "/api/users/:id", "name"), "");
/// ```
#[inline]
pub fn key_get2<'a>(path: &'a str, pattern: &str, name: &str) -> &'a str {
    KeyExtractor::PREFIX.get(path, pattern, name).unwrap_or("")
}

/// Returns the value of `{name}` placeholder `name` in `path`, or `""` if absent.
///
/// # Examples
/// ```
/// use keymatch::key_get3;
///
/// assert_eq!(key_get3("/api/users/123/posts", "/api/users/{id}/*", "id"), "123");
/// assert_eq!(key_get3("/api/users/123", "/api/users/:id", "id"), "");
/// ```
#[inline]
pub fn key_get3<'a>(path: &'a str, pattern: &str, name: &str) -> &'a str {
    KeyExtractor::BRACE.get(path, pattern, name).unwrap_or("")
}
