//! Resource path key matching and placeholder extraction.
//!
//! This crate implements the key functions that access-control policies use to compare a
//! concrete request path with a declared resource pattern:
//!
//! | Function       | Pattern syntax          | Notes                                        |
//! |----------------|-------------------------|----------------------------------------------|
//! | [`key_match`]  | `/api/*`                | `*` matches any suffix                       |
//! | [`key_match2`] | `/api/users/:id/*`      | segment placeholders, trailing wildcard      |
//! | [`key_match3`] | `/api/users/{id}/*`     | segment placeholders, trailing wildcard      |
//! | [`key_match4`] | `/p/{id}/c/{id}`        | repeated names must bind the same value      |
//! | [`key_match5`] | `/api/users/{id}`       | query string of the path is ignored          |
//! | [`key_get`]    | `/api/*`                | returns the suffix matched by `*`            |
//! | [`key_get2`]   | `/api/users/:id`        | returns the value of a named placeholder     |
//! | [`key_get3`]   | `/api/users/{id}`       | returns the value of a named placeholder     |
//!
//! All of them are total: they never panic or fail, and malformed placeholders are compared as
//! literal text. See [`KeyMatcher`] for the exact segment matching rules.
//!
//! # Examples
//! ```
//! use keymatch::{key_get3, key_match2, key_match4, key_match5};
//!
//! assert!(key_match2("/api/users/123/posts", "/api/users/:id/*"));
//! assert!(key_match4("/parent/1/child/1", "/parent/{id}/child/{id}"));
//! assert!(key_match5("/api/users/123?status=1", "/api/users/{id}"));
//! assert_eq!(key_get3("/api/users/123/posts", "/api/users/{id}/*", "id"), "123");
//! ```
//!
//! # Crate Features
//! - `cache` (default): [`PatternCache`], a concurrent cache of compiled patterns.
//! - `serde`: (de)serialization of [`KeyMatchFn`] and [`KeyGetFn`] by function name.

#[cfg(feature = "cache")]
mod cache;
mod extract;
mod function;
mod matcher;
mod pattern;
mod segment;
mod syntax;
mod wildcard;

#[cfg(feature = "cache")]
pub use self::cache::PatternCache;
pub use self::extract::{key_get2, key_get3, KeyExtractor};
pub use self::function::{KeyGetFn, KeyMatchFn, UnknownFunction};
pub use self::matcher::{key_match2, key_match3, key_match4, key_match5, Bindings, KeyMatcher};
pub use self::pattern::KeyPattern;
pub use self::segment::{segments, strip_query, Segments};
pub use self::syntax::{Syntax, Token, Tokens};
pub use self::wildcard::{key_get, key_match};
