//! RGB colour values
//!
//! Colours are authored as 24-bit sRGB hex literals (`0x8B5C2B`) and kept in
//! sRGB space on the CPU. Conversion to linear happens when data is packed
//! for the GPU.

/// An sRGB colour with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Packs the colour back into a `0xRRGGBB` literal
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Component-wise interpolation from `self` (t = 0) to `other` (t = 1)
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Converts each component from sRGB to linear light
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_hex(hex)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_for_skin_tone() {
        let skin = Color::from_hex(0x8B5C2B);
        assert!((skin.r - 139.0 / 255.0).abs() < 1e-6);
        assert!((skin.g - 92.0 / 255.0).abs() < 1e-6);
        assert!((skin.b - 43.0 / 255.0).abs() < 1e-6);
        assert_eq!(skin.to_hex(), 0x8B5C2B);
    }

    #[test]
    fn test_lerp_endpoints() {
        let bottom = Color::from_hex(0x6B3A1B);
        let top = Color::from_hex(0x9C6B3B);
        assert_eq!(bottom.lerp(top, 0.0), bottom);
        assert_eq!(bottom.lerp(top, 1.0).to_hex(), 0x9C6B3B);
    }

    #[test]
    fn test_linear_conversion_bounds() {
        assert_eq!(Color::BLACK.to_linear(), [0.0, 0.0, 0.0]);
        let white = Color::WHITE.to_linear();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
        // mid grey is darker in linear space
        assert!(Color::new(0.5, 0.5, 0.5).to_linear()[0] < 0.25);
    }
}
