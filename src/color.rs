// Simple color struct, created from an unsigned 32 representing RRGGBBAA

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    // CSS color string using this color's own alpha
    pub fn to_css(&self) -> String {
        self.to_css_with_alpha(self.alpha())
    }

    // CSS color string keeping the rgb channels but overriding alpha,
    // used for connection lines whose opacity depends on distance
    pub fn to_css_with_alpha(&self, alpha: f64) -> String {
        let alpha = (alpha.max(0.0).min(1.0) * 1000.0).round() / 1000.0;
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0xa5b4fc99);
        assert_eq!((c.r, c.g, c.b, c.a), (165, 180, 252, 153));
    }

    #[test]
    fn css_uses_own_alpha() {
        let c = Color::from_u32(0xa5b4fc99);
        assert_eq!(c.to_css(), "rgba(165,180,252,0.6)");
    }

    #[test]
    fn css_alpha_override_is_clamped() {
        let c = Color::from_u32(0xa5b4fcff);
        assert_eq!(c.to_css_with_alpha(0.2), "rgba(165,180,252,0.2)");
        assert_eq!(c.to_css_with_alpha(-1.0), "rgba(165,180,252,0)");
        assert_eq!(c.to_css_with_alpha(3.0), "rgba(165,180,252,1)");
    }
}
