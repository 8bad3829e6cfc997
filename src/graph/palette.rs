//! Depth color schemes
//!
//! Each scheme is a short list of anchor colors; depths are mapped onto the
//! `[0, max_depth]` range and linearly interpolated between anchors.

/// Named color scheme for depth coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Viridis,
    Plasma,
    Rainbow,
    Coolwarm,
    Spring,
    Winter,
}

impl ColorScheme {
    /// Every scheme, in the order shown by `--help`
    pub const ALL: [ColorScheme; 6] = [
        ColorScheme::Viridis,
        ColorScheme::Plasma,
        ColorScheme::Rainbow,
        ColorScheme::Coolwarm,
        ColorScheme::Spring,
        ColorScheme::Winter,
    ];

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viridis" => Some(ColorScheme::Viridis),
            "plasma" => Some(ColorScheme::Plasma),
            "rainbow" => Some(ColorScheme::Rainbow),
            "coolwarm" => Some(ColorScheme::Coolwarm),
            "spring" => Some(ColorScheme::Spring),
            "winter" => Some(ColorScheme::Winter),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Viridis => "viridis",
            ColorScheme::Plasma => "plasma",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Coolwarm => "coolwarm",
            ColorScheme::Spring => "spring",
            ColorScheme::Winter => "winter",
        }
    }

    fn anchors(self) -> &'static [[u8; 3]] {
        match self {
            ColorScheme::Viridis => &[
                [0x44, 0x01, 0x54],
                [0x3b, 0x52, 0x8b],
                [0x21, 0x91, 0x8c],
                [0x5e, 0xc9, 0x62],
                [0xfd, 0xe7, 0x25],
            ],
            ColorScheme::Plasma => &[
                [0x0d, 0x08, 0x87],
                [0x7e, 0x03, 0xa8],
                [0xcc, 0x47, 0x78],
                [0xf8, 0x95, 0x40],
                [0xf0, 0xf9, 0x21],
            ],
            ColorScheme::Rainbow => &[
                [0x80, 0x00, 0xff],
                [0x19, 0x96, 0xf3],
                [0x4d, 0xf3, 0xce],
                [0xb2, 0xf3, 0x96],
                [0xff, 0x96, 0x4f],
                [0xff, 0x00, 0x00],
            ],
            ColorScheme::Coolwarm => &[
                [0x3b, 0x4c, 0xc0],
                [0x8d, 0xb0, 0xfe],
                [0xdd, 0xdd, 0xdd],
                [0xf4, 0x9a, 0x7b],
                [0xb4, 0x04, 0x26],
            ],
            ColorScheme::Spring => &[[0xff, 0x00, 0xff], [0xff, 0xff, 0x00]],
            ColorScheme::Winter => &[[0x00, 0x00, 0xff], [0x00, 0xff, 0x80]],
        }
    }

    /// Hex color (`#rrggbb`) for a depth on a `[0, max_depth]` scale
    pub fn color_for(self, depth: usize, max_depth: usize) -> String {
        let t = if max_depth == 0 {
            0.0
        } else {
            (depth as f64 / max_depth as f64).clamp(0.0, 1.0)
        };

        let anchors = self.anchors();
        let span = (anchors.len() - 1) as f64;
        let pos = t * span;
        let lower = (pos.floor() as usize).min(anchors.len() - 1);
        let upper = (lower + 1).min(anchors.len() - 1);
        let frac = pos - lower as f64;

        let mix = |i: usize| {
            let a = anchors[lower][i] as f64;
            let b = anchors[upper][i] as f64;
            (a + (b - a) * frac).round() as u8
        };
        format!("#{:02x}{:02x}{:02x}", mix(0), mix(1), mix(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_every_name() {
        for scheme in ColorScheme::ALL {
            assert_eq!(ColorScheme::from_str(scheme.name()), Some(scheme));
        }
        assert_eq!(ColorScheme::from_str("PLASMA"), Some(ColorScheme::Plasma));
        assert_eq!(ColorScheme::from_str("jet"), None);
    }

    #[test]
    fn test_endpoints_match_first_and_last_anchor() {
        assert_eq!(ColorScheme::Viridis.color_for(0, 3), "#440154");
        assert_eq!(ColorScheme::Viridis.color_for(3, 3), "#fde725");
        assert_eq!(ColorScheme::Winter.color_for(1, 1), "#00ff80");
    }

    #[test]
    fn test_zero_max_depth_uses_first_anchor() {
        assert_eq!(ColorScheme::Plasma.color_for(0, 0), "#0d0887");
    }

    #[test]
    fn test_depth_beyond_range_is_clamped() {
        assert_eq!(
            ColorScheme::Spring.color_for(9, 2),
            ColorScheme::Spring.color_for(2, 2)
        );
    }

    #[test]
    fn test_midpoint_interpolates() {
        // Halfway between #ff00ff and #ffff00
        assert_eq!(ColorScheme::Spring.color_for(1, 2), "#ff8080");
    }
}
