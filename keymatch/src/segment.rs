//! Path segment tokenizer shared by all matchers and extractors.

/// Splits `path` into its `/`-delimited segments.
///
/// Every empty segment is kept, so leading, trailing and repeated slashes are all significant:
/// `""` yields one empty segment, `"/a"` yields `["", "a"]` and `"/a/"` yields `["", "a", ""]`.
/// No normalization is performed; a pattern with a trailing slash only matches paths that also
/// have one.
///
/// # Examples
/// ```
/// let segments = keymatch::segments("/user/123/").collect::<Vec<_>>();
/// assert_eq!(segments, ["", "user", "123", ""]);
///
/// assert_eq!(keymatch::segments("").collect::<Vec<_>>(), [""]);
/// assert_eq!(keymatch::segments("a//b").collect::<Vec<_>>(), ["a", "", "b"]);
/// ```
#[inline]
pub fn segments(path: &str) -> Segments<'_> {
    Segments { rem: Some(path) }
}

/// Iterator over the segments of a path. See [`segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    /// Unconsumed input; `None` once the last segment has been yielded.
    rem: Option<&'a str>,
}

impl<'a> Segments<'a> {
    /// Returns the not yet consumed part of the path, starting at the next segment.
    ///
    /// Returns `None` once every segment has been yielded. `Some("")` means exactly one empty
    /// segment is left.
    ///
    /// # Examples
    /// ```
    /// let mut segments = keymatch::segments("/blob/main/LICENSE");
    /// segments.next();
    /// segments.next();
    /// assert_eq!(segments.remainder(), Some("main/LICENSE"));
    /// ```
    #[inline]
    pub fn remainder(&self) -> Option<&'a str> {
        self.rem
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rem = self.rem?;

        match rem.find('/') {
            Some(idx) => {
                self.rem = Some(&rem[idx + 1..]);
                Some(&rem[..idx])
            }
            None => {
                self.rem = None;
                Some(rem)
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

/// Returns `path` without its query string, i.e. cut at the first `?`.
///
/// # Examples
/// ```
/// assert_eq!(keymatch::strip_query("/users/1?active=true"), "/users/1");
/// assert_eq!(keymatch::strip_query("/users/1"), "/users/1");
/// ```
#[inline]
pub fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Returns `true` if `segment` can be bound to a placeholder.
///
/// Placeholder values are non-empty and never carry a query string.
#[inline]
pub(crate) fn is_var_value(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains('?')
}

/// Returns `true` if `rest` can be bound to a named trailing wildcard.
#[inline]
pub(crate) fn is_tail_value(rest: &str) -> bool {
    !rest.contains('?')
}
