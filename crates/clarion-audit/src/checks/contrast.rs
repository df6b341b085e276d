//! Text color contrast (WCAG 1.4.3).
//!
//! Only inline `style` declarations are considered: resolving the full
//! cascade needs a style engine. Foreground and background must both be
//! declared on the element itself; font size and weight may come from the
//! nearest ancestor that declares them.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::snippet;
use crate::{Issue, IssueKind};

/// Minimum ratio for normal text.
pub(crate) const NORMAL_TEXT_RATIO: f64 = 4.5;
/// Minimum ratio for large text.
pub(crate) const LARGE_TEXT_RATIO: f64 = 3.0;

const DEFAULT_FONT_SIZE_PX: f64 = 16.0;
const DEFAULT_FONT_WEIGHT: u16 = 400;

static TEXT_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3, h4, h5, h6, li, td, th, label").unwrap());

static RGB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*[\d.]+%?\s*)?\)$").unwrap());

static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)(px|pt|em|rem|%)$").unwrap());

/// A text element whose contrast falls below its minimum.
pub(crate) struct LowContrast<'a> {
    pub element: ElementRef<'a>,
    pub ratio: f64,
    pub required: f64,
}

pub(crate) fn check_contrast(document: &Html) -> Vec<Issue> {
    low_contrast_elements(document)
        .into_iter()
        .map(|found| {
            Issue::new(
                IssueKind::Contrast,
                format!(
                    "Insufficient color contrast ratio {:.2}:1 (required {}:1)",
                    found.ratio, found.required
                ),
            )
            .with_element(snippet(found.element))
            .with_ratio(found.ratio, found.required)
        })
        .collect()
}

/// All text elements with statically known colors that fail their minimum.
pub(crate) fn low_contrast_elements(document: &Html) -> Vec<LowContrast<'_>> {
    document
        .select(&TEXT_ELEMENTS)
        .filter_map(|element| {
            let style = element.value().attr("style")?;
            let foreground = style_value(style, "color").and_then(parse_color)?;
            let background = style_value(style, "background-color")
                .or_else(|| style_value(style, "background"))
                .and_then(parse_color)?;

            let ratio = contrast_ratio(foreground, background);
            let required = required_ratio(element);
            (ratio < required).then_some(LowContrast {
                element,
                ratio,
                required,
            })
        })
        .collect()
}

/// 3:1 for large text (at least 18px, or 14px and bold), otherwise 4.5:1.
fn required_ratio(element: ElementRef<'_>) -> f64 {
    let size = inherited_value(element, "font-size")
        .and_then(parse_font_size)
        .unwrap_or(DEFAULT_FONT_SIZE_PX);
    let weight = inherited_value(element, "font-weight")
        .and_then(parse_font_weight)
        .unwrap_or(DEFAULT_FONT_WEIGHT);

    let large = size >= 18.0 || (size >= 14.0 && weight >= 700);
    if large {
        LARGE_TEXT_RATIO
    } else {
        NORMAL_TEXT_RATIO
    }
}

/// Value of a property on the element or its nearest ancestor declaring it.
fn inherited_value<'a>(element: ElementRef<'a>, property: &str) -> Option<&'a str> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find_map(|el| el.value().attr("style").and_then(|s| style_value(s, property)))
}

/// Last declaration of `property` in an inline style, without `!important`.
fn style_value<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().trim_end_matches("!important").trim())
        .filter(|value| !value.is_empty())
        .next_back()
}

/// Parse `#rgb`, `#rrggbb`, `rgb()` or `rgba()` into an RGB triple.
pub(crate) fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_color(hex);
    }
    let caps = RGB_RE.captures(&value)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?))
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => Some((
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

fn parse_font_size(value: &str) -> Option<f64> {
    let value = value.to_ascii_lowercase();
    let caps = FONT_SIZE_RE.captures(&value)?;
    let number: f64 = caps[1].parse().ok()?;
    Some(match &caps[2] {
        "px" => number,
        "pt" => number * 4.0 / 3.0,
        "%" => number / 100.0 * DEFAULT_FONT_SIZE_PX,
        _ => number * DEFAULT_FONT_SIZE_PX,
    })
}

fn parse_font_weight(value: &str) -> Option<u16> {
    match value.to_ascii_lowercase().as_str() {
        "bold" | "bolder" => Some(700),
        "normal" | "lighter" => Some(400),
        other => other.parse().ok(),
    }
}

/// Relative luminance per WCAG 2.x.
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub(crate) fn relative_luminance((r, g, b): (u8, u8, u8)) -> f64 {
    let [r, g, b] = [r, g, b].map(|c| {
        let v = f64::from(c) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio between two colors, from 1.0 to 21.0.
pub(crate) fn contrast_ratio(a: (u8, u8, u8), b: (u8, u8, u8)) -> f64 {
    let (l1, l2) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}
