//! 24-bit colours and the distance shading applied to wall columns.

/// Distance beyond which fog stops getting denser.
pub const FOG_DISTANCE: f64 = 5.0;
/// Strongest fog, subtracted from every channel at `FOG_DISTANCE` and beyond.
pub const FOG_STRENGTH: f64 = 128.0;
/// Brightening applied to silhouette edges before fog.
pub const EDGE_BOOST: u8 = 30;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const GRAY: Self = Self::new(128, 128, 128);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise mean of two colours.
    pub const fn average(self, other: Self) -> Self {
        Self {
            r: ((self.r as u16 + other.r as u16) / 2) as u8,
            g: ((self.g as u16 + other.g as u16) / 2) as u8,
            b: ((self.b as u16 + other.b as u16) / 2) as u8,
        }
    }

    /// Subtracts `amount` from every channel, stopping at zero.
    pub const fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }

    /// Adds `amount` to every channel, stopping at 255.
    pub const fn brighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }

    /// Wall colour as seen from `distance` away.
    pub fn shaded(self, distance: f64) -> Self {
        self.darken(fog(distance))
    }

    /// Outline colour for a wall seen from `distance` away.
    pub fn edge(self, distance: f64) -> Self {
        self.brighten(EDGE_BOOST).darken(fog(distance))
    }

    /// `0x00RRGGBB`, the layout softbuffer expects.
    #[inline]
    pub const fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// Amount subtracted from each channel for a wall `distance` units away.
pub fn fog(distance: f64) -> u8 {
    // NaN and negative distances clamp to no fog
    (distance.clamp(0.0, FOG_DISTANCE) / FOG_DISTANCE * FOG_STRENGTH) as u8
}
