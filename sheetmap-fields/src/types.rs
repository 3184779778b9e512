//! Renderer types and explicit renderer configuration.
//!
//! An explicit configuration entry is either a built-in renderer type tag or
//! a caller-supplied function. Tags serialize to/from their lowercase names.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FieldsError;
use crate::presentation::Presentation;
use crate::value::{FieldValue, Record};

/// The closed set of built-in presentation categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererType {
    #[default]
    Text,
    Url,
    Email,
    Phone,
    Array,
    Boolean,
}

impl RendererType {
    pub const ALL: [RendererType; 6] = [
        RendererType::Text,
        RendererType::Url,
        RendererType::Email,
        RendererType::Phone,
        RendererType::Array,
        RendererType::Boolean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RendererType::Text => "text",
            RendererType::Url => "url",
            RendererType::Email => "email",
            RendererType::Phone => "phone",
            RendererType::Array => "array",
            RendererType::Boolean => "boolean",
        }
    }

    /// Whether fields of this type render as a link.
    pub fn is_link(self) -> bool {
        matches!(
            self,
            RendererType::Url | RendererType::Email | RendererType::Phone
        )
    }

    /// Parse a tag, degrading unknown tags to `Text` with a warning.
    pub fn from_tag_lenient(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|err: FieldsError| {
            warn!(%tag, %err, "unrecognized renderer type, falling back to text");
            RendererType::Text
        })
    }
}

impl fmt::Display for RendererType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RendererType {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        RendererType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| FieldsError::UnknownRendererType { tag: s.to_string() })
    }
}

/// Signature shared by built-in and custom renderers:
/// `(value, field_name, record) -> presentation`.
pub type RenderFn = dyn Fn(&FieldValue, &str, &Record) -> Presentation + Send + Sync;

/// A caller-supplied renderer function.
#[derive(Clone)]
pub struct CustomRenderer(Arc<RenderFn>);

impl CustomRenderer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&FieldValue, &str, &Record) -> Presentation + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn render(&self, value: &FieldValue, field_name: &str, record: &Record) -> Presentation {
        (self.0)(value, field_name, record)
    }
}

impl fmt::Debug for CustomRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRenderer(..)")
    }
}

/// An explicit, field-name keyed renderer choice.
#[derive(Debug, Clone)]
pub enum RendererConfig {
    Builtin(RendererType),
    Custom(CustomRenderer),
}

impl RendererConfig {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&FieldValue, &str, &Record) -> Presentation + Send + Sync + 'static,
    {
        RendererConfig::Custom(CustomRenderer::new(f))
    }

    /// The type reported for this entry. Custom functions report `Text`.
    pub fn nominal_type(&self) -> RendererType {
        match self {
            RendererConfig::Builtin(renderer_type) => *renderer_type,
            RendererConfig::Custom(_) => RendererType::Text,
        }
    }
}

impl From<RendererType> for RendererConfig {
    fn from(renderer_type: RendererType) -> Self {
        RendererConfig::Builtin(renderer_type)
    }
}

impl From<CustomRenderer> for RendererConfig {
    fn from(renderer: CustomRenderer) -> Self {
        RendererConfig::Custom(renderer)
    }
}

/// Tags are parsed leniently; see [`RendererType::from_tag_lenient`].
impl From<&str> for RendererConfig {
    fn from(tag: &str) -> Self {
        RendererConfig::Builtin(RendererType::from_tag_lenient(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("URL".parse::<RendererType>().unwrap(), RendererType::Url);
        assert_eq!(" Boolean ".parse::<RendererType>().unwrap(), RendererType::Boolean);
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        let err = "hyperlink".parse::<RendererType>().unwrap_err();
        assert!(matches!(err, FieldsError::UnknownRendererType { ref tag } if tag == "hyperlink"));
    }

    #[test]
    fn lenient_parse_falls_back_to_text() {
        assert_eq!(RendererType::from_tag_lenient("sparkline"), RendererType::Text);
        assert_eq!(RendererType::from_tag_lenient("phone"), RendererType::Phone);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for renderer_type in RendererType::ALL {
            assert_eq!(
                renderer_type.to_string().parse::<RendererType>().unwrap(),
                renderer_type
            );
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&RendererType::Boolean).unwrap();
        assert_eq!(json, "\"boolean\"");
        let parsed: RendererType = serde_yaml_ng::from_str("email").unwrap();
        assert_eq!(parsed, RendererType::Email);
    }

    #[test]
    fn link_types() {
        let links: Vec<RendererType> = RendererType::ALL
            .into_iter()
            .filter(|t| t.is_link())
            .collect();
        assert_eq!(
            links,
            [RendererType::Url, RendererType::Email, RendererType::Phone]
        );
    }

    #[test]
    fn custom_config_reports_text() {
        let config = RendererConfig::custom(|_, _, _| Presentation::Empty);
        assert_eq!(config.nominal_type(), RendererType::Text);
        assert_eq!(
            RendererConfig::from(RendererType::Array).nominal_type(),
            RendererType::Array
        );
    }

    #[test]
    fn custom_renderer_receives_arguments() {
        let renderer = CustomRenderer::new(|value, field, record| {
            Presentation::Text(format!("{field}={value} ({} cols)", record.len()))
        });
        let mut record = Record::new();
        record.insert("a".into(), FieldValue::from(1));
        assert_eq!(
            renderer.render(&FieldValue::from("x"), "name", &record),
            Presentation::Text("name=x (1 cols)".into())
        );
    }
}
