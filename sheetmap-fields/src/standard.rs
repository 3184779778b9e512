//! Name-based mapping for common contact fields.
//!
//! Only the field name is considered, never the value. Matching is exact
//! after normalization; there is no fuzzy or partial matching.

use crate::types::RendererType;

const STANDARD_FIELDS: &[(&str, RendererType)] = &[
    ("website", RendererType::Url),
    ("url", RendererType::Url),
    ("link", RendererType::Url),
    ("homepage", RendererType::Url),
    ("email", RendererType::Email),
    ("mail", RendererType::Email),
    ("emailaddress", RendererType::Email),
    ("phone", RendererType::Phone),
    ("telephone", RendererType::Phone),
    ("tel", RendererType::Phone),
    ("mobile", RendererType::Phone),
    ("cell", RendererType::Phone),
    ("fax", RendererType::Phone),
];

/// Map a well-known field name to its renderer type.
///
/// The name is lowercased and stripped of underscores, spaces and hyphens, so
/// `"E-mail Address"` and `"email_address"` both map to `email`.
pub fn map_standard_field(field_name: &str) -> Option<RendererType> {
    let key = standard_key(field_name);
    STANDARD_FIELDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, renderer_type)| *renderer_type)
}

fn standard_key(field_name: &str) -> String {
    field_name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
