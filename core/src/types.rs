//! Wire DTOs for the GeoServer styles resource.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Every optional field is skipped when absent so a `Style` carrying only a
//! name encodes as `{"name": ...}` and nothing else. Integration tests catch
//! any schema drift between the two crates.

use serde::{Deserialize, Deserializer, Serialize};

/// Extension appended to a style name to derive its definition filename.
pub const SLD_EXTENSION: &str = "sld";

/// A named styling resource as sent to the server on creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<LanguageVersion>,
}

impl Style {
    /// A style named `name` whose definition lives in `<name>.sld`.
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            filename: Some(format!("{name}.{SLD_EXTENSION}")),
            ..Self::default()
        }
    }
}

/// Version of the styling language a definition is written in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Envelope wrapping a single `Style` under the `style` key for writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleBody {
    pub style: Style,
}

/// Lightweight reference to a style, as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleRef {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Listing envelope. A missing or `null` `style` key is an empty listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub style: Vec<StyleRef>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
