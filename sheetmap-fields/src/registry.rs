//! FieldRendererRegistry: main API surface for field rendering.
//!
//! Decides how a raw `(field name, value)` pair from a spreadsheet row is
//! presented. Resolution walks a priority chain and the first hit wins:
//!
//! 1. Explicit configuration for the normalized field name
//! 2. Standard field-name mapping (`website`, `email`, `phone`, ...)
//! 3. Content detection, when auto-detect is enabled
//! 4. Plain text
//!
//! Nothing is cached. Every call re-runs the chain against the current
//! configuration, so registrations take effect immediately.
//!
//! Each widget instance owns its own registry. The registry is not internally
//! synchronized; callers that share one across threads must serialize
//! mutation against rendering themselves.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::detect::{detect, DetectionResult};
use crate::presentation::Presentation;
use crate::renderers::builtin_renderer;
use crate::standard::map_standard_field;
use crate::types::{CustomRenderer, RendererConfig, RendererType};
use crate::value::{normalize_field_name, FieldValue, Record};

/// Which step of the priority chain produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum ResolutionSource {
    Explicit,
    StandardField,
    Detected(DetectionResult),
    Fallback,
}

/// The renderer chosen for a field.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedRenderer<'a> {
    Builtin(RendererType),
    Custom(&'a CustomRenderer),
}

impl ResolvedRenderer<'_> {
    /// The type label. Custom renderers report `Text`.
    pub fn renderer_type(&self) -> RendererType {
        match self {
            ResolvedRenderer::Builtin(renderer_type) => *renderer_type,
            ResolvedRenderer::Custom(_) => RendererType::Text,
        }
    }

    pub fn render(&self, value: &FieldValue, field_name: &str, record: &Record) -> Presentation {
        match self {
            ResolvedRenderer::Builtin(renderer_type) => {
                builtin_renderer(*renderer_type)(value, field_name, record)
            }
            ResolvedRenderer::Custom(custom) => custom.render(value, field_name, record),
        }
    }
}

/// A resolved renderer together with the step that chose it.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub renderer: ResolvedRenderer<'a>,
    pub source: ResolutionSource,
}

impl Resolution<'_> {
    pub fn renderer_type(&self) -> RendererType {
        self.renderer.renderer_type()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.renderer, ResolvedRenderer::Custom(_))
    }
}

/// One rendered field of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub name: String,
    pub renderer_type: RendererType,
    pub presentation: Presentation,
}

/// Builder for `FieldRendererRegistry`. Created by `FieldRendererRegistry::builder()`.
#[derive(Debug, Clone)]
pub struct FieldRendererRegistryBuilder {
    renderers: IndexMap<String, RendererConfig>,
    auto_detect: bool,
}

impl FieldRendererRegistryBuilder {
    /// Add an explicit renderer. Later entries for the same name win.
    pub fn renderer(mut self, field_name: &str, config: impl Into<RendererConfig>) -> Self {
        self.renderers.insert(normalize_field_name(field_name), config.into());
        self
    }

    /// Enable or disable content detection. Defaults to enabled.
    pub fn auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect = enabled;
        self
    }

    pub fn build(self) -> FieldRendererRegistry {
        debug!(
            renderers = self.renderers.len(),
            auto_detect = self.auto_detect,
            "field renderer registry built"
        );
        FieldRendererRegistry {
            renderers: self.renderers,
            auto_detect: self.auto_detect,
        }
    }
}

/// Per-widget field renderer configuration and resolution.
///
/// ```
/// use sheetmap_fields::{FieldRendererRegistry, FieldValue, Presentation, Record, RendererConfig};
///
/// let registry = FieldRendererRegistry::builder()
///     .renderer(
///         "rating",
///         RendererConfig::custom(|value, _, _| {
///             let stars = value.as_number().unwrap_or(0.0) as usize;
///             Presentation::Text("★".repeat(stars))
///         }),
///     )
///     .build();
///
/// let shown = registry.render("rating", &FieldValue::from(3), &Record::new());
/// assert_eq!(shown, Presentation::text("★★★"));
/// ```
#[derive(Debug, Clone)]
pub struct FieldRendererRegistry {
    renderers: IndexMap<String, RendererConfig>,
    auto_detect: bool,
}

impl FieldRendererRegistry {
    /// An empty registry with auto-detect enabled.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> FieldRendererRegistryBuilder {
        FieldRendererRegistryBuilder {
            renderers: IndexMap::new(),
            auto_detect: true,
        }
    }

    /// Build a registry from deserialized configuration.
    ///
    /// Unknown tags have already been degraded to `text` by the config layer.
    pub fn from_config(config: &RegistryConfig) -> Self {
        config
            .renderers
            .iter()
            .fold(Self::builder(), |builder, (name, renderer_type)| {
                builder.renderer(name, *renderer_type)
            })
            .auto_detect(config.auto_detect)
            .build()
    }

    // --- Configuration ---

    /// Insert or replace the explicit renderer for a field. Returns the
    /// previous entry, if any.
    pub fn register_renderer(
        &mut self,
        field_name: &str,
        config: impl Into<RendererConfig>,
    ) -> Option<RendererConfig> {
        let key = normalize_field_name(field_name);
        let config = config.into();
        debug!(
            field = %key,
            renderer = %config.nominal_type(),
            custom = matches!(config, RendererConfig::Custom(_)),
            "registered field renderer"
        );
        self.renderers.insert(key, config)
    }

    /// Remove the explicit renderer for a field.
    pub fn unregister_renderer(&mut self, field_name: &str) -> Option<RendererConfig> {
        let key = normalize_field_name(field_name);
        let removed = self.renderers.shift_remove(&key);
        if removed.is_some() {
            debug!(field = %key, "unregistered field renderer");
        }
        removed
    }

    pub fn set_auto_detect(&mut self, enabled: bool) {
        self.auto_detect = enabled;
    }

    pub fn auto_detect(&self) -> bool {
        self.auto_detect
    }

    /// The explicit entry for a field, if one is registered.
    pub fn renderer_config(&self, field_name: &str) -> Option<&RendererConfig> {
        self.renderers.get(&normalize_field_name(field_name))
    }

    pub fn has_renderer(&self, field_name: &str) -> bool {
        self.renderer_config(field_name).is_some()
    }

    /// Normalized names of explicitly configured fields, in registration order.
    pub fn registered_fields(&self) -> Vec<&str> {
        self.renderers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    // --- Resolution ---

    /// Walk the priority chain for a field and report what was chosen and why.
    pub fn resolve(&self, field_name: &str, value: &FieldValue) -> Resolution<'_> {
        let resolution = self.resolve_uninstrumented(field_name, value);
        trace!(
            field = %field_name,
            renderer = %resolution.renderer_type(),
            source = ?resolution.source,
            "resolved field renderer"
        );
        resolution
    }

    fn resolve_uninstrumented(&self, field_name: &str, value: &FieldValue) -> Resolution<'_> {
        if let Some(config) = self.renderers.get(&normalize_field_name(field_name)) {
            let renderer = match config {
                RendererConfig::Builtin(renderer_type) => ResolvedRenderer::Builtin(*renderer_type),
                RendererConfig::Custom(custom) => ResolvedRenderer::Custom(custom),
            };
            return Resolution {
                renderer,
                source: ResolutionSource::Explicit,
            };
        }

        if let Some(renderer_type) = map_standard_field(field_name) {
            return Resolution {
                renderer: ResolvedRenderer::Builtin(renderer_type),
                source: ResolutionSource::StandardField,
            };
        }

        if self.auto_detect {
            if let Some(detection) = detect(value) {
                return Resolution {
                    renderer: ResolvedRenderer::Builtin(detection.renderer_type),
                    source: ResolutionSource::Detected(detection),
                };
            }
        }

        Resolution {
            renderer: ResolvedRenderer::Builtin(RendererType::Text),
            source: ResolutionSource::Fallback,
        }
    }

    /// The renderer that [`render`](Self::render) would invoke.
    pub fn resolve_renderer(&self, field_name: &str, value: &FieldValue) -> ResolvedRenderer<'_> {
        self.resolve(field_name, value).renderer
    }

    /// The renderer type label for a field. Custom renderers report `Text`.
    pub fn resolve_renderer_type(&self, field_name: &str, value: &FieldValue) -> RendererType {
        self.resolve(field_name, value).renderer_type()
    }

    // --- Rendering ---

    /// Render one field. `record` is passed through to custom renderers.
    pub fn render(&self, field_name: &str, value: &FieldValue, record: &Record) -> Presentation {
        self.resolve_renderer(field_name, value)
            .render(value, field_name, record)
    }

    /// Render every non-blank field of a record, in column order.
    pub fn render_record(&self, record: &Record) -> Vec<RenderedField> {
        record
            .iter()
            .filter(|(_, value)| !value.is_blank())
            .map(|(name, value)| {
                let resolution = self.resolve(name, value);
                RenderedField {
                    name: name.clone(),
                    renderer_type: resolution.renderer_type(),
                    presentation: resolution.renderer.render(value, name, record),
                }
            })
            .collect()
    }
}

impl Default for FieldRendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Confidence;
    use crate::presentation::LinkKind;

    fn value(v: impl Into<FieldValue>) -> FieldValue {
        v.into()
    }

    #[test]
    fn new_registry_is_empty_with_auto_detect() {
        let registry = FieldRendererRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.auto_detect());
    }

    #[test]
    fn explicit_tag_beats_detection() {
        let registry = FieldRendererRegistry::builder()
            .renderer("status", RendererType::Url)
            .build();
        let resolution = registry.resolve("status", &value("hello"));
        assert_eq!(resolution.renderer_type(), RendererType::Url);
        assert_eq!(resolution.source, ResolutionSource::Explicit);
    }

    #[test]
    fn explicit_lookup_is_case_insensitive() {
        let mut registry = FieldRendererRegistry::new();
        registry.register_renderer("  Tags ", RendererType::Array);
        assert!(registry.has_renderer("TAGS"));
        assert_eq!(registry.registered_fields(), ["tags"]);
        assert_eq!(
            registry.resolve_renderer_type("tags", &value("one")),
            RendererType::Array
        );
    }

    #[test]
    fn explicit_beats_standard_field() {
        let registry = FieldRendererRegistry::builder()
            .renderer("website", RendererType::Text)
            .build();
        assert_eq!(
            registry.resolve_renderer_type("Website", &value("https://a.io")),
            RendererType::Text
        );
    }

    #[test]
    fn standard_field_ignores_value() {
        let registry = FieldRendererRegistry::new();
        let resolution = registry.resolve("Website", &value("not a url at all"));
        assert_eq!(resolution.renderer_type(), RendererType::Url);
        assert_eq!(resolution.source, ResolutionSource::StandardField);
    }

    #[test]
    fn detection_reports_confidence() {
        let registry = FieldRendererRegistry::new();
        let resolution = registry.resolve("contact", &value("user@example.com"));
        match resolution.source {
            ResolutionSource::Detected(detection) => {
                assert_eq!(detection.renderer_type, RendererType::Email);
                assert_eq!(detection.confidence, Confidence::EMAIL);
            }
            other => panic!("expected detection, got {other:?}"),
        }
    }

    #[test]
    fn auto_detect_can_be_disabled() {
        let mut registry = FieldRendererRegistry::new();
        registry.set_auto_detect(false);
        let resolution = registry.resolve("contact", &value("user@example.com"));
        assert_eq!(resolution.renderer_type(), RendererType::Text);
        assert_eq!(resolution.source, ResolutionSource::Fallback);

        // Standard mapping still applies without detection
        assert_eq!(
            registry.resolve_renderer_type("email", &value("x")),
            RendererType::Email
        );
    }

    #[test]
    fn unregister_restores_default_chain() {
        let mut registry = FieldRendererRegistry::new();
        registry.register_renderer("homepage", RendererType::Text);
        assert!(registry.unregister_renderer("HomePage").is_some());
        assert!(registry.unregister_renderer("homepage").is_none());
        assert_eq!(
            registry.resolve_renderer_type("homepage", &value("x")),
            RendererType::Url
        );
    }

    #[test]
    fn register_returns_previous_entry() {
        let mut registry = FieldRendererRegistry::new();
        assert!(registry.register_renderer("a", RendererType::Url).is_none());
        let previous = registry.register_renderer("A", RendererType::Email);
        assert_eq!(previous.map(|c| c.nominal_type()), Some(RendererType::Url));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_tag_registers_as_text() {
        let mut registry = FieldRendererRegistry::new();
        registry.register_renderer("website", "hyperlink");
        assert_eq!(
            registry.resolve_renderer_type("website", &value("https://a.io")),
            RendererType::Text
        );
    }

    #[test]
    fn custom_renderer_reports_text_and_sees_record() {
        let registry = FieldRendererRegistry::builder()
            .renderer(
                "price",
                RendererConfig::custom(|value, _, record| {
                    let currency = record
                        .get("currency")
                        .map(|c| c.to_text().into_owned())
                        .unwrap_or_default();
                    Presentation::Text(format!("{value} {currency}"))
                }),
            )
            .build();

        let mut record = Record::new();
        record.insert("price".into(), value(12));
        record.insert("currency".into(), value("EUR"));

        let resolution = registry.resolve("price", &record["price"]);
        assert!(resolution.is_custom());
        assert_eq!(resolution.renderer_type(), RendererType::Text);
        assert_eq!(
            registry.render("price", &record["price"], &record),
            Presentation::text("12 EUR")
        );
    }

    #[test]
    fn render_is_idempotent() {
        let registry = FieldRendererRegistry::new();
        let record = Record::new();
        let v = value("Red, Blue, Green");
        assert_eq!(
            registry.render("colors", &v, &record),
            registry.render("colors", &v, &record)
        );
    }

    #[test]
    fn registration_takes_effect_on_next_call() {
        let mut registry = FieldRendererRegistry::new();
        let v = value("555-123-4567");
        assert_eq!(registry.resolve_renderer_type("line", &v), RendererType::Phone);
        registry.register_renderer("line", RendererType::Text);
        assert_eq!(registry.resolve_renderer_type("line", &v), RendererType::Text);
    }

    #[test]
    fn render_record_skips_blank_values_in_column_order() {
        let registry = FieldRendererRegistry::new();
        let mut record = Record::new();
        record.insert("Name".into(), value("Cafe"));
        record.insert("Notes".into(), value("  "));
        record.insert("Phone".into(), value("555 123 4567"));
        record.insert("Open".into(), value(true));

        let rendered = registry.render_record(&record);
        let names: Vec<&str> = rendered.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Name", "Phone", "Open"]);
        assert_eq!(rendered[0].presentation, Presentation::text("Cafe"));
        assert_eq!(rendered[1].renderer_type, RendererType::Phone);
        assert!(matches!(
            rendered[1].presentation,
            Presentation::Link {
                kind: LinkKind::Phone,
                ..
            }
        ));
        assert_eq!(rendered[2].presentation, Presentation::Flag(true));
    }

    #[test]
    fn registries_are_independent() {
        let mut first = FieldRendererRegistry::new();
        let second = FieldRendererRegistry::new();
        first.register_renderer("notes", RendererType::Array);
        assert!(first.has_renderer("notes"));
        assert!(!second.has_renderer("notes"));
    }
}
