//! Namespaced resource keys such as `minecraft:ender_pearl`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// An error returned when parsing an [`Identifier`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The namespace or path was empty.
    #[error("Identifier `{0}` has an empty namespace or path")]
    Empty(String),
    /// The identifier contained a character outside `[a-z0-9_.-/]`.
    #[error("Identifier `{0}` contains an invalid character")]
    InvalidCharacter(String),
}

/// A namespaced key. Parsing a bare path defaults the namespace to `minecraft`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The namespace, e.g. `minecraft`.
    pub namespace: Cow<'static, str>,
    /// The path, e.g. `ender_pearl`.
    pub path: Cow<'static, str>,
}

impl Identifier {
    /// The vanilla namespace.
    pub const VANILLA_NAMESPACE: &'static str = "minecraft";

    /// Creates a `minecraft:` identifier from a static path.
    #[must_use]
    pub const fn vanilla_static(path: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(Self::VANILLA_NAMESPACE),
            path: Cow::Borrowed(path),
        }
    }

    /// Creates an identifier, validating both parts.
    pub fn new(
        namespace: impl Into<Cow<'static, str>>,
        path: impl Into<Cow<'static, str>>,
    ) -> Result<Self, IdentifierError> {
        let namespace = namespace.into();
        let path = path.into();
        if namespace.is_empty() || path.is_empty() {
            return Err(IdentifierError::Empty(format!("{namespace}:{path}")));
        }
        let valid_namespace = namespace.chars().all(is_valid_namespace_char);
        let valid_path = path
            .chars()
            .all(|c| is_valid_namespace_char(c) || c == '/');
        if !valid_namespace || !valid_path {
            return Err(IdentifierError::InvalidCharacter(format!(
                "{namespace}:{path}"
            )));
        }
        Ok(Self { namespace, path })
    }
}

const fn is_valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace.to_owned(), path.to_owned()),
            None => Self::new(Self::VANILLA_NAMESPACE, s.to_owned()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_defaults_to_minecraft() {
        let id: Identifier = "ender_pearl".parse().expect("valid identifier");
        assert_eq!(id, Identifier::vanilla_static("ender_pearl"));
        assert_eq!(id.to_string(), "minecraft:ender_pearl");
    }

    #[test]
    fn custom_namespace_is_kept() {
        let id: Identifier = "pearls:warp_token".parse().expect("valid identifier");
        assert_eq!(id.namespace, "pearls");
        assert_eq!(id.path, "warp_token");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            "minecraft:".parse::<Identifier>(),
            Err(IdentifierError::Empty(_))
        ));
        assert!(matches!(
            "Minecraft:Ender Pearl".parse::<Identifier>(),
            Err(IdentifierError::InvalidCharacter(_))
        ));
    }
}
