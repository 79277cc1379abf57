// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 tekgraph contributors

//! Label width estimation
//!
//! Node widths are driven by their label text. The rendering surface the
//! model ultimately feeds measures text against real font metrics; headless
//! contexts need a deterministic stand-in, and tests pin their expectations
//! to it.

/// Horizontal padding added around the label text, in pixels.
pub const LABEL_PADDING: f64 = 40.0;

/// Fixed per-character advance of the fallback estimator, in pixels.
const CHAR_WIDTH: f64 = 8.0;

/// Width estimation for node labels.
pub trait LabelMeasure {
    /// Pixel width of the rendered label text, excluding padding.
    fn text_width(&self, label: &str) -> f64;

    /// Node width for a label: text width plus fixed padding, rounded up.
    fn node_width(&self, label: &str) -> f64 {
        (self.text_width(label) + LABEL_PADDING).ceil()
    }
}

/// Deterministic fallback: every character advances a fixed 8px.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCharMeasure;

impl LabelMeasure for FixedCharMeasure {
    fn text_width(&self, label: &str) -> f64 {
        label.chars().count() as f64 * CHAR_WIDTH
    }
}

/// Table-driven approximation of proportional glyph advances for the
/// renderer's 0.875rem reference font. Still deterministic; closer to what
/// an actual text-metrics facility reports for typical task names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalMeasure;

impl LabelMeasure for ProportionalMeasure {
    fn text_width(&self, label: &str) -> f64 {
        label.chars().map(advance).sum()
    }
}

fn advance(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | '\'' | '|' => 4.0,
        'f' | 't' | 'r' | '-' | ' ' | '(' | ')' | '[' | ']' => 5.5,
        'm' | 'w' | 'M' | 'W' => 12.0,
        'A'..='Z' => 9.5,
        '0'..='9' => 8.0,
        _ => 7.5,
    }
}
