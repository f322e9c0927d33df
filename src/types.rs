//! Common types used throughout the Trakt client
//!
//! Shared type definitions used across multiple modules.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Write verbs carry the parameters as a JSON body; GET carries them as
    /// a URL query string. A request never has both.
    pub fn has_body(self) -> bool {
        !matches!(self, Self::GET)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Media entity
// ============================================================================

/// One target of a check-in, comment or sync payload.
///
/// The wire format embeds the object under a key derived from its kind
/// (`{"movie": {...}}`, `{"show": {...}}`, ...). An explicit variant type
/// with its own writer keeps that mapping in one place; the inner shape is
/// endpoint data and stays an opaque JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEntity {
    Movie(serde_json::Value),
    Show(serde_json::Value),
    Episode(serde_json::Value),
    List(serde_json::Value),
}

impl MediaEntity {
    /// Wire key the payload is embedded under.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Movie(_) => "movie",
            Self::Show(_) => "show",
            Self::Episode(_) => "episode",
            Self::List(_) => "list",
        }
    }

    fn value(&self) -> &serde_json::Value {
        match self {
            Self::Movie(v) | Self::Show(v) | Self::Episode(v) | Self::List(v) => v,
        }
    }
}

impl Serialize for MediaEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key(), self.value())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_method_conversion() {
        let get: reqwest::Method = Method::GET.into();
        assert_eq!(reqwest::Method::GET, get);
        let post: reqwest::Method = Method::POST.into();
        assert_eq!(reqwest::Method::POST, post);
    }

    #[test]
    fn test_method_body_branch() {
        assert!(!Method::GET.has_body());
        assert!(Method::POST.has_body());
        assert!(Method::PUT.has_body());
        assert!(Method::PATCH.has_body());
        assert!(Method::DELETE.has_body());
    }

    #[test]
    fn test_media_entity_serializes_under_variant_key() {
        let entity = MediaEntity::Movie(json!({"ids": {"trakt": 28}}));
        let encoded = serde_json::to_value(&entity).unwrap();
        assert_eq!(encoded, json!({"movie": {"ids": {"trakt": 28}}}));

        let entity = MediaEntity::Episode(json!({"ids": {"trakt": 9}}));
        let encoded = serde_json::to_value(&entity).unwrap();
        assert_eq!(encoded, json!({"episode": {"ids": {"trakt": 9}}}));
    }

    #[test]
    fn test_media_entity_key() {
        assert_eq!(MediaEntity::Show(json!({})).key(), "show");
        assert_eq!(MediaEntity::List(json!({})).key(), "list");
    }
}
