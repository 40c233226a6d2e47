use serde::{Deserialize, Serialize};

/// Handle to a body in a `BodyTree` arena.
/// Index-based: reading a parent's position never borrows the parent itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 8-bit RGB color, passed through untouched to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    /// Normalized channels for GPU-side consumers.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Which overlay the renderer should draw on top of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Overlay {
    /// Drawn as-is (the light source itself).
    #[default]
    Normal = 0,
    /// Lit sphere with a night-side terminator fan.
    Terminator = 1,
    /// Inside another body's shadow cone.
    Eclipsed = 2,
}

impl Overlay {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_serializes_as_triple() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Rgb = serde_json::from_str("[200,150,100]").unwrap();
        assert_eq!(back, Rgb::new(200, 150, 100));
    }

    #[test]
    fn rgb_to_f32_normalizes() {
        assert_eq!(Rgb::WHITE.to_f32(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb::new(0, 0, 0).to_f32(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn overlay_wire_values() {
        assert_eq!(Overlay::Normal.as_u8(), 0);
        assert_eq!(Overlay::Terminator.as_u8(), 1);
        assert_eq!(Overlay::Eclipsed.as_u8(), 2);
    }
}
