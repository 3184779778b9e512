//! Structured presentation produced by renderers.
//!
//! Hosts either consume the descriptor directly (it serializes as
//! `{"kind": ..., "payload": ...}`) or ask for escaped HTML markup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown for a field with nothing to display.
pub const EMPTY_PLACEHOLDER: &str = "-";

/// Which scheme a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// External web link, opened in a new browsing context.
    Url,
    /// `mailto:` link.
    Email,
    /// `tel:` link.
    Phone,
}

/// How a single field value is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum Presentation {
    Text(String),
    Link {
        kind: LinkKind,
        href: String,
        label: String,
    },
    /// Two or more items, one per line.
    List(Vec<String>),
    /// Yes/no flag. The two states are styled differently.
    Flag(bool),
    Empty,
}

impl Presentation {
    pub fn text(text: impl Into<String>) -> Self {
        Presentation::Text(text.into())
    }

    /// Label-only text, for table cells and sorting.
    pub fn to_plain_text(&self) -> String {
        match self {
            Presentation::Text(text) => text.clone(),
            Presentation::Link { label, .. } => label.clone(),
            Presentation::List(items) => items.join(", "),
            Presentation::Flag(value) => yes_no(*value).to_string(),
            Presentation::Empty => EMPTY_PLACEHOLDER.to_string(),
        }
    }

    /// Escaped HTML markup.
    pub fn to_html(&self) -> String {
        match self {
            Presentation::Text(text) => html_escape::encode_text(text).into_owned(),
            Presentation::Link { kind, href, label } => {
                let href = html_escape::encode_double_quoted_attribute(href);
                let label = html_escape::encode_text(label);
                match kind {
                    LinkKind::Url => format!(
                        r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{label}</a>"#
                    ),
                    LinkKind::Email | LinkKind::Phone => {
                        format!(r#"<a href="{href}">{label}</a>"#)
                    }
                }
            }
            Presentation::List(items) => {
                let mut html = String::from(r#"<ul class="field-list">"#);
                for item in items {
                    html.push_str("<li>");
                    html.push_str(&html_escape::encode_text(item));
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
                html
            }
            Presentation::Flag(value) => {
                let state = if *value { "yes" } else { "no" };
                format!(
                    r#"<span class="field-flag field-flag-{state}">{}</span>"#,
                    yes_no(*value)
                )
            }
            Presentation::Empty => {
                format!(r#"<span class="field-empty">{EMPTY_PLACEHOLDER}</span>"#)
            }
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_text())
    }
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        let p = Presentation::text("<b>Tom & Jerry</b>");
        assert_eq!(p.to_html(), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
        assert_eq!(p.to_plain_text(), "<b>Tom & Jerry</b>");
    }

    #[test]
    fn url_link_opens_new_context() {
        let p = Presentation::Link {
            kind: LinkKind::Url,
            href: "https://example.com/?a=1&b=\"2\"".into(),
            label: "example.com".into(),
        };
        assert_eq!(
            p.to_html(),
            r#"<a href="https://example.com/?a=1&amp;b=&quot;2&quot;" target="_blank" rel="noopener noreferrer">example.com</a>"#
        );
    }

    #[test]
    fn mailto_link_has_no_target() {
        let p = Presentation::Link {
            kind: LinkKind::Email,
            href: "mailto:a@b.co".into(),
            label: "a@b.co".into(),
        };
        assert_eq!(p.to_html(), r#"<a href="mailto:a@b.co">a@b.co</a>"#);
    }

    #[test]
    fn list_markup() {
        let p = Presentation::List(vec!["a".into(), "<b>".into()]);
        assert_eq!(
            p.to_html(),
            r#"<ul class="field-list"><li>a</li><li>&lt;b&gt;</li></ul>"#
        );
        assert_eq!(p.to_plain_text(), "a, <b>");
    }

    #[test]
    fn flags_are_distinct() {
        let yes = Presentation::Flag(true).to_html();
        let no = Presentation::Flag(false).to_html();
        assert!(yes.contains("field-flag-yes") && yes.contains(">Yes<"));
        assert!(no.contains("field-flag-no") && no.contains(">No<"));
    }

    #[test]
    fn empty_placeholder() {
        assert_eq!(Presentation::Empty.to_string(), "-");
        assert!(Presentation::Empty.to_html().contains(">-<"));
    }

    #[test]
    fn serializes_as_kind_and_payload() {
        let json = serde_json::to_value(Presentation::Flag(true)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "flag", "payload": true}));

        let json = serde_json::to_value(Presentation::Link {
            kind: LinkKind::Phone,
            href: "tel:5551234".into(),
            label: "555-1234".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "link",
                "payload": {"kind": "phone", "href": "tel:5551234", "label": "555-1234"}
            })
        );

        let json = serde_json::to_value(Presentation::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "empty"}));
    }
}
