use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color: h in degrees, s and l in [0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl fmt::Display for Hsl {
    /// Format as CSS HSL:
    ///   hsl({h:.1},{s:.0}%,{l:.0}%)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // normalize hue into [0,360)
        let h = (self.h % 360.0 + 360.0) % 360.0;
        let s = (self.s * 100.0).clamp(0.0, 100.0);
        let l = (self.l * 100.0).clamp(0.0, 100.0);
        write!(f, "hsl({:.1},{:.0}%,{:.0}%)", h, s, l)
    }
}

const GOLDEN_ANGLE: f64 = 137.50776405;

impl Hsl {
    /// The `index`-th hue stepping around the wheel by the golden angle, so
    /// neighbouring indices never land on similar hues.
    pub fn golden_angle(index: usize) -> Self {
        Hsl { h: ((index as f64) * GOLDEN_ANGLE) % 360.0, s: 0.70, l: 0.55 }
    }
}
