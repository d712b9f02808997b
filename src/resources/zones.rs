//! Zone identifiers.
//!
//! Zones themselves are only a namespace for record sets here; the key type
//! exists so every caller builds the same escaped path.

use std::fmt;

/// The name of a zone, usually fully qualified (`example.com.`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneKey(pub String);

impl ZoneKey {
    /// Resource path for this zone, with the name percent-escaped.
    pub fn uri(&self) -> String {
        format!("zones/{}", urlencoding::encode(&self.0))
    }
}

impl From<&str> for ZoneKey {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for ZoneKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_keeps_trailing_dot() {
        assert_eq!(ZoneKey::from("example.com.").uri(), "zones/example.com.");
    }

    #[test]
    fn uri_escapes_reserved_characters() {
        assert_eq!(ZoneKey::from("a b/c").uri(), "zones/a%20b%2Fc");
    }
}
