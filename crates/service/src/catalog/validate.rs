//! Per-field validation rules shared by create and update payloads.
//!
//! One declarative rule per field, evaluated in a fixed order with
//! short-circuit on the first violation; only that single message is
//! surfaced to the caller. Create passes every field as `Some`, update
//! passes fields as submitted, so both payloads share the same table.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Rating;
use crate::errors::ServiceError;

/// Unified optional-field view over create and update payloads.
pub(crate) struct FieldsView<'a> {
    pub id: Option<u64>,
    pub title: Option<&'a str>,
    pub price: Option<f64>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub image: Option<&'a str>,
    pub rating: Option<&'a Rating>,
}

/// A rule returns the violation message, or `None` when its field passes
/// or is absent from the payload.
type FieldRule = fn(&FieldsView<'_>) -> Option<String>;

const RULES: &[FieldRule] = &[
    |v| v.id.and_then(|id| min_integer("id", id, 1)),
    |v| v.title.and_then(|t| text_length("title", t, 3, 100)),
    |v| {
        v.price
            .and_then(|p| min_number("price", p, 0.01).or_else(|| max_decimals("price", p, 2)))
    },
    |v| v.description.and_then(|d| text_length("description", d, 10, 800)),
    |v| v.category.and_then(|c| text_length("category", c, 3, 20)),
    |v| v.image.and_then(url_like),
    |v| {
        v.rating.and_then(|r| {
            min_number("rating.rate", r.rate, 0.0)
                .or_else(|| max_number("rating.rate", r.rate, 5.0))
                .or_else(|| max_decimals("rating.rate", r.rate, 1))
        })
    },
    |v| v.rating.and_then(|r| min_integer("rating.count", r.count, 1)),
];

/// Evaluate the rule table in order, surfacing only the first violation.
pub(crate) fn check_fields(view: &FieldsView<'_>) -> Result<(), ServiceError> {
    for rule in RULES {
        if let Some(message) = rule(view) {
            return Err(ServiceError::Validation(message));
        }
    }
    Ok(())
}

fn text_length(field: &'static str, value: &str, min: usize, max: usize) -> Option<String> {
    let len = value.chars().count();
    if len < min {
        return Some(format!(
            "\"{field}\" length must be at least {min} characters long"
        ));
    }
    if len > max {
        return Some(format!(
            "\"{field}\" length must be less than or equal to {max} characters long"
        ));
    }
    None
}

fn min_number(field: &'static str, value: f64, min: f64) -> Option<String> {
    (value < min).then(|| format!("\"{field}\" must be greater than or equal to {min}"))
}

fn max_number(field: &'static str, value: f64, max: f64) -> Option<String> {
    (value > max).then(|| format!("\"{field}\" must be less than or equal to {max}"))
}

fn min_integer(field: &'static str, value: u64, min: u64) -> Option<String> {
    (value < min).then(|| format!("\"{field}\" must be greater than or equal to {min}"))
}

fn max_decimals(field: &'static str, value: f64, places: u32) -> Option<String> {
    let scaled = value * 10f64.powi(places as i32);
    ((scaled - scaled.round()).abs() > 1e-9)
        .then(|| format!("\"{field}\" must have no more than {places} decimal places"))
}

// The remainder after the optional scheme and `www.` prefix: a bare
// domain-with-suffix, then optional path segments, then an optional final
// query segment.
static URL_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]+(\.[a-zA-Z]+)+(/[\w#.-]+)*(/\w+\?[a-zA-Z0-9_]+=\w+(&[a-zA-Z0-9_]+=\w+)*)?$")
        .expect("url body pattern")
});

// Scheme and `www.` tokens may appear once at the front only.
static URL_FORBIDDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ftp|http|www.").expect("url token pattern"));

fn url_like(value: &str) -> Option<String> {
    let rest = value
        .strip_prefix("ftp://")
        .or_else(|| value.strip_prefix("http://"))
        .or_else(|| value.strip_prefix("https://"))
        .unwrap_or(value);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    if URL_FORBIDDEN.is_match(rest) || !URL_BODY.is_match(rest) {
        return Some("\"image\" fails to match the required pattern".to_string());
    }
    None
}
