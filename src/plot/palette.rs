//! Color maps and fixed color lists used by the charts.

use plotters::style::RGBColor;

/// Piecewise-linear color map through evenly spaced stops.
#[derive(Debug, Clone, Copy)]
pub struct Gradient(pub &'static [RGBColor]);

impl Gradient {
    /// Color at `t` in [0, 1]; out-of-range and NaN inputs are clamped.
    pub fn at(&self, t: f64) -> RGBColor {
        let stops = self.0;
        if stops.len() == 1 {
            return stops[0];
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - idx as f64;
        let (a, b) = (stops[idx], stops[idx + 1]);
        RGBColor(lerp(a.0, b.0, frac), lerp(a.1, b.1, frac), lerp(a.2, b.2, frac))
    }

    /// `n` colors spread over the whole map.
    pub fn sample(&self, n: usize) -> Vec<RGBColor> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.5)],
            _ => (0..n).map(|i| self.at(i as f64 / (n - 1) as f64)).collect(),
        }
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

pub const VIRIDIS: Gradient = Gradient(&[
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 74, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(109, 205, 89),
    RGBColor(180, 222, 44),
    RGBColor(253, 231, 37),
]);

/// Light to dark.
pub const ROCKET_R: Gradient = Gradient(&[
    RGBColor(250, 235, 221),
    RGBColor(246, 180, 143),
    RGBColor(243, 118, 81),
    RGBColor(225, 51, 66),
    RGBColor(171, 24, 88),
    RGBColor(112, 31, 87),
    RGBColor(53, 25, 62),
    RGBColor(3, 5, 26),
]);

pub const MAKO: Gradient = Gradient(&[
    RGBColor(11, 4, 5),
    RGBColor(43, 28, 53),
    RGBColor(62, 53, 107),
    RGBColor(59, 86, 152),
    RGBColor(53, 123, 162),
    RGBColor(52, 159, 170),
    RGBColor(73, 193, 173),
    RGBColor(151, 223, 185),
    RGBColor(222, 245, 229),
]);

pub const COOLWARM: Gradient = Gradient(&[
    RGBColor(59, 76, 192),
    RGBColor(124, 159, 249),
    RGBColor(192, 212, 245),
    RGBColor(242, 203, 183),
    RGBColor(238, 132, 104),
    RGBColor(180, 4, 38),
]);

pub const YL_OR_RD: Gradient = Gradient(&[
    RGBColor(255, 255, 204),
    RGBColor(255, 237, 160),
    RGBColor(254, 217, 118),
    RGBColor(254, 178, 76),
    RGBColor(253, 141, 60),
    RGBColor(252, 78, 42),
    RGBColor(227, 26, 28),
    RGBColor(189, 0, 38),
    RGBColor(128, 0, 38),
]);

/// Series colors for grouped bars and scatter points.
const CATEGORICAL: &[RGBColor] = &[
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

pub fn categorical(idx: usize) -> RGBColor {
    CATEGORICAL[idx % CATEGORICAL.len()]
}

/// Pastel set shared by the A* breakdown and the radar chart.
pub const PASTEL: &[RGBColor] = &[
    RGBColor(0xFF, 0x6B, 0x6B),
    RGBColor(0x4E, 0xCD, 0xC4),
    RGBColor(0x45, 0xB7, 0xD1),
    RGBColor(0x96, 0xCE, 0xB4),
    RGBColor(0xFF, 0xEA, 0xA7),
    RGBColor(0xDF, 0xE6, 0xE9),
];

pub fn pastel(idx: usize) -> RGBColor {
    PASTEL[idx % PASTEL.len()]
}

pub const SUCCESS_GREEN: RGBColor = RGBColor(0, 128, 0);

/// Black or white, whichever reads better on `background`.
pub fn text_on(background: RGBColor) -> RGBColor {
    let luma = 0.299 * background.0 as f64
        + 0.587 * background.1 as f64
        + 0.114 * background.2 as f64;
    if luma > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
