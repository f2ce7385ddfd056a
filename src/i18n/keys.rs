//! Translation key whitelisting.
//!
//! The server configures which key prefixes may ever leave the process.
//! Clients may narrow that set with `?allowed_keys=a,b`, never widen it.

use serde::{Deserialize, Serialize};

/// Key prefixes exportable to clients.
///
/// Deserializes from either the string `"*"` or a list of prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "AllowedKeysRepr", into = "AllowedKeysRepr")]
pub enum AllowedKeys {
    /// Every key is exportable.
    #[default]
    All,
    /// Only keys under one of these dotted prefixes.
    Prefixes(Vec<String>),
}

impl AllowedKeys {
    /// Build a prefix list from anything string-like.
    pub fn prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Prefixes(prefixes.into_iter().map(Into::into).collect())
    }

    /// Returns true if `key` starts with one of the allowed prefixes.
    pub fn permits(&self, key: &str) -> bool {
        match self {
            AllowedKeys::All => true,
            AllowedKeys::Prefixes(prefixes) => {
                prefixes.iter().any(|allowed| key.starts_with(allowed.as_str()))
            }
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum AllowedKeysRepr {
    Wildcard(String),
    List(Vec<String>),
}

impl TryFrom<AllowedKeysRepr> for AllowedKeys {
    type Error = String;

    fn try_from(repr: AllowedKeysRepr) -> Result<Self, Self::Error> {
        match repr {
            AllowedKeysRepr::Wildcard(s) if s == "*" => Ok(AllowedKeys::All),
            AllowedKeysRepr::Wildcard(s) => Err(format!(
                "allowed_keys must be \"*\" or a list of prefixes, got {s:?}"
            )),
            AllowedKeysRepr::List(prefixes) => Ok(AllowedKeys::Prefixes(prefixes)),
        }
    }
}

impl From<AllowedKeys> for AllowedKeysRepr {
    fn from(keys: AllowedKeys) -> Self {
        match keys {
            AllowedKeys::All => AllowedKeysRepr::Wildcard("*".to_string()),
            AllowedKeys::Prefixes(prefixes) => AllowedKeysRepr::List(prefixes),
        }
    }
}

/// Compute the keys to export for one request.
///
/// Without a request filter the configuration is returned as-is. With one,
/// each comma-separated entry survives only if it starts with a configured
/// prefix; a wildcard configuration lets every non-empty entry through.
pub fn effective_keys(allowed: &AllowedKeys, requested: Option<&str>) -> AllowedKeys {
    let Some(requested) = requested else {
        return allowed.clone();
    };

    AllowedKeys::Prefixes(
        requested
            .split(',')
            .filter(|key| !key.is_empty() && allowed.permits(key))
            .map(str::to_string)
            .collect(),
    )
}
