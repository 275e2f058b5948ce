//! Time-of-day ambient presentation tables.
//!
//! Pure lookups, fully independent of the cycle engine: one background
//! gradient per hour of the day, plus the star-field visibility rule.
//! Rendering is the frontend's job; this module only answers "what should
//! hour N look like".

use serde::Serialize;

/// One color stop of a vertical background gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradientStop {
    /// Hex color without the leading `#`.
    pub color: &'static str,
    /// Position along the gradient, 0-100.
    pub position: u8,
}

const fn stop(color: &'static str, position: u8) -> GradientStop {
    GradientStop { color, position }
}

/// Background gradients indexed by hour, midnight first.
pub const HOUR_GRADIENTS: [&[GradientStop]; 24] = [
    &[stop("00000c", 0), stop("00000c", 0)],
    &[stop("020111", 85), stop("191621", 100)],
    &[stop("020111", 60), stop("20202c", 100)],
    &[stop("020111", 10), stop("3a3a52", 100)],
    &[stop("20202c", 0), stop("515175", 100)],
    &[stop("40405c", 0), stop("6f71aa", 80), stop("8a76ab", 100)],
    &[stop("4a4969", 0), stop("7072ab", 50), stop("cd82a0", 100)],
    &[stop("757abf", 0), stop("8583be", 60), stop("eab0d1", 100)],
    &[stop("82addb", 0), stop("ebb2b1", 100)],
    &[stop("94c5f8", 1), stop("a6e6ff", 70), stop("b1b5ea", 100)],
    &[stop("b7eaff", 0), stop("94dfff", 100)],
    &[stop("9be2fe", 0), stop("67d1fb", 100)],
    &[stop("90dffe", 0), stop("38a3d1", 100)],
    &[stop("57c1eb", 0), stop("246fa8", 100)],
    &[stop("2d91c2", 0), stop("1e528e", 100)],
    &[stop("2473ab", 0), stop("1e528e", 70), stop("5b7983", 100)],
    &[stop("1e528e", 0), stop("265889", 50), stop("9da671", 100)],
    &[stop("1e528e", 0), stop("728a7c", 50), stop("e9ce5d", 100)],
    &[
        stop("154277", 0),
        stop("576e71", 30),
        stop("e1c45e", 70),
        stop("b26339", 100),
    ],
    &[
        stop("163C52", 0),
        stop("4F4F47", 30),
        stop("C5752D", 60),
        stop("B7490F", 80),
        stop("2F1107", 100),
    ],
    &[
        stop("071B26", 0),
        stop("071B26", 30),
        stop("8A3B12", 80),
        stop("240E03", 100),
    ],
    &[stop("010A10", 30), stop("59230B", 80), stop("2F1107", 100)],
    &[stop("090401", 50), stop("4B1D06", 100)],
    &[stop("00000c", 80), stop("150800", 100)],
];

/// Gradient stops for an hour of the day. Hours past 23 clamp to 23.
pub fn gradient_for_hour(hour: u32) -> &'static [GradientStop] {
    HOUR_GRADIENTS[hour.min(23) as usize]
}

/// Render stops as the CSS `linear-gradient` the web client sets on the
/// page body.
pub fn to_css(stops: &[GradientStop]) -> String {
    let body = stops
        .iter()
        .map(|s| format!(" #{} {}%", s.color, s.position))
        .collect::<Vec<_>>()
        .join(",");
    format!("linear-gradient(to bottom,{body})")
}

/// Stars show through the night window, 8 PM to 4 AM inclusive.
pub fn stars_visible(hour: u32) -> bool {
    hour >= 20 || hour <= 4
}

/// Star counts per parallax layer, front to back. The reduced set keeps
/// low-end mobile devices responsive.
pub fn star_layer_counts(mobile: bool) -> [u32; 3] {
    if mobile {
        [20, 12, 8]
    } else {
        [40, 25, 15]
    }
}
