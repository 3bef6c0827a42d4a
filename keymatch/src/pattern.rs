use tracing::trace;

use crate::{
    extract::extract_tokens,
    matcher::{match_tokens, KeyMatcher},
    syntax::Token,
};

/// A key pattern tokenized once for repeated matching.
///
/// `KeyPattern` gives the same answers as [`KeyMatcher::is_match`] and
/// [`KeyExtractor::get`](crate::KeyExtractor::get) for its matcher, without re-parsing the pattern
/// on every call. Patterns without placeholders or wildcards keep the plain equality fast path.
///
/// If the matcher strips query strings, the stored pattern has its query removed and paths given
/// to [`is_match`](Self::is_match) and [`get`](Self::get) are stripped too.
///
/// # Examples
/// ```
/// use keymatch::{KeyMatcher, KeyPattern};
///
/// let pattern = KeyPattern::new(KeyMatcher::REPEAT_CONSISTENT, "/org/{org}/team/{org}/*");
///
/// assert!(pattern.is_match("/org/acme/team/acme/members"));
/// assert!(!pattern.is_match("/org/acme/team/other/members"));
/// assert_eq!(pattern.get("/org/acme/team/acme/members", "org"), Some("acme"));
/// assert_eq!(pattern.var_names().collect::<Vec<_>>(), ["org", "org"]);
/// ```
#[derive(Debug, Clone)]
pub struct KeyPattern {
    matcher: KeyMatcher,

    /// Pattern text, without query string if the matcher strips it.
    pattern: String,

    /// Parsed segments; `None` for static patterns.
    segments: Option<Vec<PatternSegment>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    /// Literal segment.
    Const(String),

    /// Name of placeholder segment.
    Var(String),

    /// Trailing wildcard and its optional name.
    Tail(Option<String>),
}

impl PatternSegment {
    fn token(&self) -> Token<'_> {
        match self {
            PatternSegment::Const(literal) => Token::Literal(literal),
            PatternSegment::Var(name) => Token::Var(name),
            PatternSegment::Tail(name) => Token::Tail(name.as_deref()),
        }
    }
}

impl From<Token<'_>> for PatternSegment {
    fn from(token: Token<'_>) -> Self {
        match token {
            Token::Literal(literal) => PatternSegment::Const(literal.to_owned()),
            Token::Var(name) => PatternSegment::Var(name.to_owned()),
            Token::Tail(name) => PatternSegment::Tail(name.map(ToOwned::to_owned)),
        }
    }
}

impl KeyPattern {
    /// Tokenizes `pattern` for use with `matcher`.
    pub fn new(matcher: KeyMatcher, pattern: impl Into<String>) -> Self {
        let mut pattern = pattern.into();

        let len = matcher.prepare(&pattern).len();
        pattern.truncate(len);

        let syntax = matcher.syntax();

        let segments = if syntax.is_static(&pattern) {
            None
        } else {
            Some(
                syntax
                    .tokenize(&pattern)
                    .map(PatternSegment::from)
                    .collect::<Vec<_>>(),
            )
        };

        trace!(
            pattern = %pattern,
            is_static = segments.is_none(),
            "compiled key pattern"
        );

        KeyPattern {
            matcher,
            pattern,
            segments,
        }
    }

    /// Returns the matcher this pattern was compiled for.
    pub fn matcher(&self) -> KeyMatcher {
        self.matcher
    }

    /// Returns the pattern text.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` if the pattern has no placeholders or wildcards.
    pub fn is_static(&self) -> bool {
        self.segments.is_none()
    }

    /// Returns placeholder and named wildcard names in pattern order, including repeats.
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .flatten()
            .filter_map(|segment| match segment {
                PatternSegment::Var(name) => Some(name.as_str()),
                PatternSegment::Tail(name) => name.as_deref(),
                PatternSegment::Const(_) => None,
            })
    }

    /// Returns `true` if `path` satisfies this pattern.
    #[inline]
    pub fn is_match(&self, path: &str) -> bool {
        let path = self.matcher.prepare(path);

        match &self.segments {
            None => path == self.pattern,
            Some(segments) => match_tokens(
                segments.iter().map(PatternSegment::token),
                path,
                self.matcher.bindings(),
            ),
        }
    }

    /// Returns the value bound to placeholder `name` in `path`.
    ///
    /// Like [`KeyExtractor::get`](crate::KeyExtractor::get), this does not verify that the whole
    /// path matches.
    pub fn get<'a>(&self, path: &'a str, name: &str) -> Option<&'a str> {
        let path = self.matcher.prepare(path);
        let segments = self.segments.as_deref()?;
        extract_tokens(segments.iter().map(PatternSegment::token), path, name)
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &KeyPattern) -> bool {
        self.matcher == other.matcher && self.pattern == other.pattern
    }
}

impl Eq for KeyPattern {}
