//! Built-in renderers, one per [`RendererType`].
//!
//! Every renderer has the [`RenderFn`](crate::types::RenderFn) shape
//! `(value, field_name, record)` so custom renderers are interchangeable with
//! them. Built-ins ignore the record.

use std::borrow::Cow;

use crate::parse::{coerce_bool, list_items, parse_array_string};
use crate::presentation::{yes_no, LinkKind, Presentation};
use crate::types::RendererType;
use crate::value::{FieldValue, Record};

/// Function pointer form of a built-in renderer.
pub type BuiltinRenderFn = fn(&FieldValue, &str, &Record) -> Presentation;

/// URL labels longer than this are truncated.
pub const MAX_URL_LABEL_CHARS: usize = 48;

/// Look up the built-in renderer for a type.
pub fn builtin_renderer(renderer_type: RendererType) -> BuiltinRenderFn {
    match renderer_type {
        RendererType::Text => render_text,
        RendererType::Url => render_url,
        RendererType::Email => render_email,
        RendererType::Phone => render_phone,
        RendererType::Array => render_array,
        RendererType::Boolean => render_boolean,
    }
}

/// Booleans read as Yes/No, everything else as its string form.
pub fn render_text(value: &FieldValue, _field_name: &str, _record: &Record) -> Presentation {
    match value {
        FieldValue::Bool(b) => Presentation::text(yes_no(*b)),
        other => Presentation::Text(other.to_text().into_owned()),
    }
}

/// External hyperlink. The label is the cleaned URL, not the field name.
pub fn render_url(value: &FieldValue, _field_name: &str, _record: &Record) -> Presentation {
    let text = value.to_text();
    let raw = text.trim();
    if raw.is_empty() {
        return Presentation::Empty;
    }
    Presentation::Link {
        kind: LinkKind::Url,
        href: normalize_url(raw).into_owned(),
        label: display_url(raw),
    }
}

pub fn render_email(value: &FieldValue, _field_name: &str, _record: &Record) -> Presentation {
    let text = value.to_text();
    let email = text.trim();
    if email.is_empty() {
        return Presentation::Empty;
    }
    Presentation::Link {
        kind: LinkKind::Email,
        href: format!("mailto:{email}"),
        label: email.to_string(),
    }
}

/// `tel:` link; the visible label keeps the original formatting.
pub fn render_phone(value: &FieldValue, _field_name: &str, _record: &Record) -> Presentation {
    let text = value.to_text();
    let phone = text.trim();
    if phone.is_empty() {
        return Presentation::Empty;
    }
    Presentation::Link {
        kind: LinkKind::Phone,
        href: tel_href(phone),
        label: phone.to_string(),
    }
}

/// No items render as the placeholder, one item inline, more as a list.
pub fn render_array(value: &FieldValue, _field_name: &str, _record: &Record) -> Presentation {
    let mut items = match value {
        FieldValue::List(items) => list_items(items),
        other => parse_array_string(&other.to_text()),
    };
    match items.len() {
        0 => Presentation::Empty,
        1 => Presentation::Text(items.remove(0)),
        _ => Presentation::List(items),
    }
}

pub fn render_boolean(value: &FieldValue, _field_name: &str, _record: &Record) -> Presentation {
    Presentation::Flag(coerce_bool(value))
}

/// Prepend `https://` unless the URL already has an http(s) scheme.
pub fn normalize_url(url: &str) -> Cow<'_, str> {
    let url = url.trim();
    if strip_scheme(url).is_some() {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("https://{url}"))
    }
}

/// Scheme, leading `www.` and a trailing `/` removed, truncated with `…`.
pub fn display_url(url: &str) -> String {
    let url = url.trim();
    let without_scheme = strip_scheme(url).unwrap_or(url);
    let without_www = strip_prefix_ignore_case(without_scheme, "www.").unwrap_or(without_scheme);
    let cleaned = without_www.strip_suffix('/').unwrap_or(without_www);

    if cleaned.chars().count() > MAX_URL_LABEL_CHARS {
        let mut truncated: String = cleaned.chars().take(MAX_URL_LABEL_CHARS - 1).collect();
        truncated.push('…');
        truncated
    } else {
        cleaned.to_string()
    }
}

/// Digits only, keeping a single leading `+`.
pub fn tel_href(phone: &str) -> String {
    let phone = phone.trim();
    let mut href = String::from("tel:");
    if phone.starts_with('+') {
        href.push('+');
    }
    href.extend(phone.chars().filter(char::is_ascii_digit));
    href
}

fn strip_scheme(url: &str) -> Option<&str> {
    strip_prefix_ignore_case(url, "https://").or_else(|| strip_prefix_ignore_case(url, "http://"))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then_some(&s[prefix.len()..])
}
