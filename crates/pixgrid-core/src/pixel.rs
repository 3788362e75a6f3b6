use std::fmt;

use serde::{Deserialize, Serialize};

/// A symbolic pixel value.
///
/// Pixels carry no color semantics; they are opaque tokens such as `"O"` or
/// `"J"`. Tokens are usually one character wide but any string is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pixel(String);

impl Pixel {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pixel {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Pixel {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&String> for Pixel {
    fn from(token: &String) -> Self {
        Self(token.clone())
    }
}

impl From<char> for Pixel {
    fn from(token: char) -> Self {
        Self(token.to_string())
    }
}

impl PartialEq<str> for Pixel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Pixel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
