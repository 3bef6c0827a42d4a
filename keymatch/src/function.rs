//! Key functions addressable by the names policy expressions use.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};

use crate::{
    extract::{key_get2, key_get3},
    matcher::{key_match2, key_match3, key_match4, key_match5},
    wildcard::{key_get, key_match},
};

/// Error returned when parsing an unknown key function name.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display(fmt = "unknown key function: \"{}\"", name)]
pub struct UnknownFunction {
    name: String,
}

impl UnknownFunction {
    fn new(name: &str) -> Self {
        UnknownFunction {
            name: name.to_owned(),
        }
    }

    /// Returns the name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Boolean key matching functions.
///
/// # Examples
/// ```
/// use keymatch::KeyMatchFn;
///
/// let func: KeyMatchFn = "keyMatch4".parse().unwrap();
/// assert_eq!(func, KeyMatchFn::KeyMatch4);
/// assert!(func.call("/parent/7/child/7", "/parent/{id}/child/{id}"));
///
/// assert!("keyMatch9".parse::<KeyMatchFn>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMatchFn {
    /// `keyMatch`; see [`key_match`](crate::key_match).
    KeyMatch,
    /// `keyMatch2`; see [`key_match2`](crate::key_match2).
    KeyMatch2,
    /// `keyMatch3`; see [`key_match3`](crate::key_match3).
    KeyMatch3,
    /// `keyMatch4`; see [`key_match4`](crate::key_match4).
    KeyMatch4,
    /// `keyMatch5`; see [`key_match5`](crate::key_match5).
    KeyMatch5,
}

impl KeyMatchFn {
    /// All matching functions.
    pub const ALL: [KeyMatchFn; 5] = [
        KeyMatchFn::KeyMatch,
        KeyMatchFn::KeyMatch2,
        KeyMatchFn::KeyMatch3,
        KeyMatchFn::KeyMatch4,
        KeyMatchFn::KeyMatch5,
    ];

    /// Returns the name used in policy expressions.
    pub const fn name(self) -> &'static str {
        match self {
            KeyMatchFn::KeyMatch => "keyMatch",
            KeyMatchFn::KeyMatch2 => "keyMatch2",
            KeyMatchFn::KeyMatch3 => "keyMatch3",
            KeyMatchFn::KeyMatch4 => "keyMatch4",
            KeyMatchFn::KeyMatch5 => "keyMatch5",
        }
    }

    /// Runs the function.
    pub fn call(self, path: &str, pattern: &str) -> bool {
        match self {
            KeyMatchFn::KeyMatch => key_match(path, pattern),
            KeyMatchFn::KeyMatch2 => key_match2(path, pattern),
            KeyMatchFn::KeyMatch3 => key_match3(path, pattern),
            KeyMatchFn::KeyMatch4 => key_match4(path, pattern),
            KeyMatchFn::KeyMatch5 => key_match5(path, pattern),
        }
    }
}

/// Placeholder extraction functions.
///
/// # Examples
/// ```
/// use keymatch::KeyGetFn;
///
/// let func: KeyGetFn = "keyGet2".parse().unwrap();
/// assert_eq!(func.call("/api/users/123", "/api/users/:id", "id"), "123");
///
/// // `keyGet` has no placeholder names; the name argument is ignored
/// assert_eq!(KeyGetFn::KeyGet.call("/api/users/123", "/api/*", ""), "users/123");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyGetFn {
    /// `keyGet`; see [`key_get`](crate::key_get).
    KeyGet,
    /// `keyGet2`; see [`key_get2`](crate::key_get2).
    KeyGet2,
    /// `keyGet3`; see [`key_get3`](crate::key_get3).
    KeyGet3,
}

impl KeyGetFn {
    /// All extraction functions.
    pub const ALL: [KeyGetFn; 3] = [KeyGetFn::KeyGet, KeyGetFn::KeyGet2, KeyGetFn::KeyGet3];

    /// Returns the name used in policy expressions.
    pub const fn name(self) -> &'static str {
        match self {
            KeyGetFn::KeyGet => "keyGet",
            KeyGetFn::KeyGet2 => "keyGet2",
            KeyGetFn::KeyGet3 => "keyGet3",
        }
    }

    /// Runs the function, returning `""` if nothing is bound.
    pub fn call<'a>(self, path: &'a str, pattern: &str, name: &str) -> &'a str {
        match self {
            KeyGetFn::KeyGet => key_get(path, pattern),
            KeyGetFn::KeyGet2 => key_get2(path, pattern, name),
            KeyGetFn::KeyGet3 => key_get3(path, pattern, name),
        }
    }
}

macro_rules! impl_by_name {
    ($($ty:ident),+) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownFunction;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|func| func.name() == name)
                    .ok_or_else(|| UnknownFunction::new(name))
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name: std::borrow::Cow<'de, str> = serde::Deserialize::deserialize(deserializer)?;
                name.parse().map_err(serde::de::Error::custom)
            }
        }
    )+};
}

impl_by_name!(KeyMatchFn, KeyGetFn);
