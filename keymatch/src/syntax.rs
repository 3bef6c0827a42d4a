use std::iter::Peekable;

use crate::segment::{segments, Segments};

/// Placeholder syntax used by a pattern.
///
/// | Syntax   | Placeholder | Named wildcard | Unnamed wildcard |
/// |----------|-------------|----------------|------------------|
/// | `Prefix` | `:id`       | `*rest`        | `*`              |
/// | `Brace`  | `{id}`      | `{rest}*`      | `*`              |
///
/// Placeholders and wildcards are recognized per segment only. Anything else, including a
/// sentinel in the middle of a segment or a wildcard that is not the last segment, is literal
/// text.
///
/// A wildcard name must be an identifier: an ASCII letter or `_` followed by ASCII letters,
/// digits or `_`. Glob-like segments such as `*.txt` or `{a.b}*` are therefore literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// Placeholders are written as `:name`.
    Prefix,

    /// Placeholders are written as `{name}`.
    Brace,
}

/// A single pattern segment, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Segment that must be equal to the concrete segment.
    Literal(&'a str),

    /// Named placeholder; matches any non-empty concrete segment without a `?`.
    Var(&'a str),

    /// Trailing wildcard, optionally named; matches one or more remaining path segments.
    Tail(Option<&'a str>),
}

impl Syntax {
    /// Returns `true` if `pattern` contains none of this syntax's special characters.
    ///
    /// Static patterns only ever match by plain string equality.
    ///
    /// # Examples
    /// ```
    /// use keymatch::Syntax;
    ///
    /// assert!(Syntax::Prefix.is_static("/api/users"));
    /// assert!(Syntax::Prefix.is_static("/api/{id}"));
    /// assert!(!Syntax::Prefix.is_static("/api/:id"));
    ///
    /// assert!(Syntax::Brace.is_static("/api/:id"));
    /// assert!(!Syntax::Brace.is_static("/api/{id}"));
    /// assert!(!Syntax::Brace.is_static("/api/*"));
    /// ```
    #[inline]
    pub fn is_static(self, pattern: &str) -> bool {
        match self {
            Syntax::Prefix => !pattern.contains([':', '*']),
            Syntax::Brace => !pattern.contains(['{', '*']),
        }
    }

    /// Classifies a single pattern segment. Wildcards are only recognized when `is_last` is set.
    ///
    /// # Examples
    /// ```
    /// use keymatch::{Syntax, Token};
    ///
    /// assert_eq!(Syntax::Brace.token("{id}", false), Token::Var("id"));
    /// assert_eq!(Syntax::Brace.token("{id", false), Token::Literal("{id"));
    /// assert_eq!(Syntax::Brace.token("{path}*", true), Token::Tail(Some("path")));
    /// assert_eq!(Syntax::Prefix.token("*", true), Token::Tail(None));
    /// assert_eq!(Syntax::Prefix.token("*", false), Token::Literal("*"));
    /// ```
    pub fn token(self, segment: &str, is_last: bool) -> Token<'_> {
        if is_last {
            if let Some(name) = self.tail_name(segment) {
                return Token::Tail(name);
            }
        }

        match self.var_name(segment) {
            Some(name) => Token::Var(name),
            None => Token::Literal(segment),
        }
    }

    /// Splits `pattern` into classified segments.
    ///
    /// # Examples
    /// ```
    /// use keymatch::{Syntax, Token};
    ///
    /// let tokens = Syntax::Prefix.tokenize("/users/:id/*").collect::<Vec<_>>();
    /// assert_eq!(
    ///     tokens,
    ///     [
    ///         Token::Literal(""),
    ///         Token::Literal("users"),
    ///         Token::Var("id"),
    ///         Token::Tail(None),
    ///     ]
    /// );
    /// ```
    pub fn tokenize(self, pattern: &str) -> Tokens<'_> {
        Tokens {
            syntax: self,
            segments: segments(pattern).peekable(),
        }
    }

    fn var_name(self, segment: &str) -> Option<&str> {
        let name = match self {
            Syntax::Prefix => segment.strip_prefix(':')?,
            Syntax::Brace => {
                let name = segment.strip_prefix('{')?.strip_suffix('}')?;

                // nested or stray braces are not a placeholder
                if name.contains(['{', '}']) {
                    return None;
                }

                name
            }
        };

        (!name.is_empty()).then_some(name)
    }

    fn tail_name(self, segment: &str) -> Option<Option<&str>> {
        if segment == "*" {
            return Some(None);
        }

        let name = match self {
            Syntax::Prefix => segment.strip_prefix('*')?,
            Syntax::Brace => segment.strip_suffix('*')?.strip_prefix('{')?.strip_suffix('}')?,
        };

        is_ident(name).then_some(Some(name))
    }
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();

    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Iterator over the classified segments of a pattern. See [`Syntax::tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    syntax: Syntax,
    segments: Peekable<Segments<'a>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.segments.next()?;
        let is_last = self.segments.peek().is_none();
        Some(self.syntax.token(segment, is_last))
    }
}
