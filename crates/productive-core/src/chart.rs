// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fixed-width text bars

/// Width of the bars in the published chart
pub const BAR_WIDTH: usize = 21;

/// Glyph for the filled part of a bar
pub const FILLED: char = '█';

/// Glyph for the empty part of a bar
pub const EMPTY: char = '░';

/// Render `percent` (0-100) as a bar of exactly `width` glyphs.
///
/// The filled length is `percent / 100 * width` rounded half up, clamped to
/// `[0, width]` so small float drift outside 0-100 still yields a full-width
/// bar. NaN renders as an empty bar.
#[must_use]
pub fn render_bar(percent: f64, width: usize) -> String {
    let filled = filled_cells(percent, width);
    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar
}

fn filled_cells(percent: f64, width: usize) -> usize {
    let exact = percent / 100.0 * width as f64;
    if exact.is_nan() {
        return 0;
    }
    // f64::round is half-away-from-zero, which is half-up for the
    // non-negative values that survive the clamp
    exact.round().clamp(0.0, width as f64) as usize
}
