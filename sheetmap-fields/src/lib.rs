//! Field rendering registry for spreadsheet-backed map and table widgets
//!
//! `sheetmap-fields` decides how an untyped `(field name, value)` pair pulled
//! from a spreadsheet row is presented: plain text, a hyperlink, a `mailto:`
//! or `tel:` link, a list, or a yes/no flag.
//!
//! # Architecture
//!
//! - **Detection**: ordered, first-match content heuristics ([`detect()`])
//! - **Standard fields**: a fixed vocabulary of contact field names ([`map_standard_field`])
//! - **Renderers**: one pure function per [`RendererType`]
//! - **Registry**: explicit configuration, then standard names, then detection,
//!   then text ([`FieldRendererRegistry`])
//!
//! Rendering is total. Malformed lists and booleans degrade through parser
//! fallbacks, and unknown renderer tags become `text` with a warning.

pub mod config;
pub mod detect;
pub mod error;
pub mod parse;
pub mod presentation;
pub mod registry;
pub mod renderers;
pub mod standard;
pub mod types;
pub mod value;

pub use config::RegistryConfig;
pub use detect::{detect, Confidence, DetectionResult};
pub use error::{FieldsError, Result};
pub use parse::{parse_array_string, parse_boolean_string};
pub use presentation::{LinkKind, Presentation};
pub use registry::{
    FieldRendererRegistry, FieldRendererRegistryBuilder, RenderedField, Resolution,
    ResolutionSource, ResolvedRenderer,
};
pub use standard::map_standard_field;
pub use types::{CustomRenderer, RendererConfig, RendererType};
pub use value::{FieldValue, Record};
