//! Content-based detection of a value's renderer type.
//!
//! Rules run in a fixed order and the first match wins. The order encodes
//! precedence: distinctive shapes (URL, email) are claimed before looser
//! ones (list, phone), and bare boolean words are tried last.
//!
//! | Rule | Type | Confidence |
//! |------|------|------------|
//! | native boolean | `boolean` | 1.0 |
//! | native list | `array` | 1.0 |
//! | URL | `url` | 0.95 |
//! | email | `email` | 0.9 |
//! | list string | `array` | 0.85 |
//! | phone | `phone` | 0.7 |
//! | boolean word | `boolean` | 0.8 |

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::parse::{is_boolean_string, is_bracketed};
use crate::types::RendererType;
use crate::value::FieldValue;

/// A detection confidence bounded to `[0.0, 1.0]`.
///
/// Values are fixed per rule. They document relative trust between rules and
/// are never compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Confidence(f32);

impl Confidence {
    pub const CERTAIN: Confidence = Confidence(1.0);
    pub const URL: Confidence = Confidence(0.95);
    pub const EMAIL: Confidence = Confidence(0.9);
    pub const ARRAY: Confidence = Confidence(0.85);
    pub const BOOLEAN_WORD: Confidence = Confidence(0.8);
    pub const PHONE: Confidence = Confidence(0.7);

    /// Create a confidence, clamping into `[0.0, 1.0]`. NaN becomes 0.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Confidence(0.0);
        }
        Confidence(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// The outcome of a successful detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionResult {
    pub renderer_type: RendererType,
    pub confidence: Confidence,
}

impl DetectionResult {
    fn new(renderer_type: RendererType, confidence: Confidence) -> Self {
        Self {
            renderer_type,
            confidence,
        }
    }
}

/// Estimate how a value should be rendered from its content alone.
///
/// Returns `None` when nothing matches, meaning plain text.
pub fn detect(value: &FieldValue) -> Option<DetectionResult> {
    match value {
        FieldValue::Bool(_) => {
            return Some(DetectionResult::new(
                RendererType::Boolean,
                Confidence::CERTAIN,
            ));
        }
        FieldValue::List(_) => {
            return Some(DetectionResult::new(
                RendererType::Array,
                Confidence::CERTAIN,
            ));
        }
        FieldValue::Text(_) | FieldValue::Number(_) => {}
    }

    let text = value.to_text();
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if looks_like_url(s) {
        Some(DetectionResult::new(RendererType::Url, Confidence::URL))
    } else if looks_like_email(s) {
        Some(DetectionResult::new(RendererType::Email, Confidence::EMAIL))
    } else if looks_like_array(s) {
        Some(DetectionResult::new(RendererType::Array, Confidence::ARRAY))
    } else if looks_like_phone(s) {
        Some(DetectionResult::new(RendererType::Phone, Confidence::PHONE))
    } else if is_boolean_string(s) {
        Some(DetectionResult::new(
            RendererType::Boolean,
            Confidence::BOOLEAN_WORD,
        ))
    } else {
        None
    }
}

/// `http(s)://` prefix, `www.` prefix, or a bare `host.tld` without an `@`.
pub fn looks_like_url(s: &str) -> bool {
    let s = s.trim();
    scheme_regex().is_match(s)
        || www_regex().is_match(s)
        || (!s.contains('@') && bare_domain_regex().is_match(s))
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn looks_like_email(s: &str) -> bool {
    email_regex().is_match(s.trim())
}

/// A bracketed list with a quoted item, or a comma list of at least two
/// items that are not all numbers.
///
/// A place followed by a region code, such as `"Springfield, IL"`, is left
/// as text.
pub fn looks_like_array(s: &str) -> bool {
    let s = s.trim();
    if is_bracketed(s) && quoted_item_regex().is_match(s) {
        return true;
    }
    if !s.contains(',') {
        return false;
    }
    let segments: Vec<&str> = s
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    let all_numeric = segments
        .iter()
        .all(|segment| numeric_regex().is_match(segment));
    if all_numeric {
        return false;
    }
    match segments.as_slice() {
        [] | [_] => false,
        [_, region] => !region_code_regex().is_match(region),
        _ => true,
    }
}

/// Seven to fifteen digits making up at least half of the string, with only
/// digits, spaces, dashes, parentheses, dots and plus signs present.
pub fn looks_like_phone(s: &str) -> bool {
    let s = s.trim();
    if !phone_chars_regex().is_match(s) {
        return false;
    }
    let total = s.chars().count();
    let digits = s.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits) && digits * 2 >= total
}

fn scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^https?://").expect("Invalid URL scheme regex"))
}

fn www_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^www\.").expect("Invalid www regex"))
}

fn bare_domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}(?:[/?#]\S*)?$",
        )
        .expect("Invalid bare domain regex")
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"))
}

fn quoted_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[\[,]\s*['"]"#).expect("Invalid quoted item regex"))
}

fn numeric_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("Invalid numeric regex"))
}

fn region_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2,3}$").expect("Invalid region code regex"))
}

fn phone_chars_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\s\-().+]+$").expect("Invalid phone character regex"))
}
