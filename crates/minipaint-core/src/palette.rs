//! The swatches offered by the color picker.

use crate::shapes::SerializableColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: SerializableColor,
}

pub const PURPLE: SerializableColor = SerializableColor::new(0x9b, 0x87, 0xf5, 255);
pub const CORAL: SerializableColor = SerializableColor::new(0xf9, 0x70, 0x66, 255);
pub const TEAL: SerializableColor = SerializableColor::new(0x22, 0xd3, 0xee, 255);
pub const MINT: SerializableColor = SerializableColor::new(0x4a, 0xde, 0x80, 255);
pub const AMBER: SerializableColor = SerializableColor::new(0xfb, 0xbf, 0x24, 255);
pub const INK: SerializableColor = SerializableColor::new(0x1a, 0x1a, 0x1a, 255);

/// Selected when the board opens.
pub const DEFAULT_COLOR: SerializableColor = PURPLE;

pub const SWATCHES: [Swatch; 6] = [
    Swatch { name: "Purple", color: PURPLE },
    Swatch { name: "Coral", color: CORAL },
    Swatch { name: "Teal", color: TEAL },
    Swatch { name: "Mint", color: MINT },
    Swatch { name: "Amber", color: AMBER },
    Swatch { name: "Black", color: INK },
];

/// Look up a swatch by name, ignoring case.
pub fn swatch(name: &str) -> Option<Swatch> {
    SWATCHES
        .iter()
        .copied()
        .find(|s| s.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatches_match_hex() {
        let hex: Vec<String> = SWATCHES.iter().map(|s| s.color.to_hex()).collect();
        assert_eq!(
            hex,
            ["#9b87f5", "#f97066", "#22d3ee", "#4ade80", "#fbbf24", "#1a1a1a"]
        );
    }

    #[test]
    fn test_lookup() {
        assert_eq!(swatch("teal").map(|s| s.color), Some(TEAL));
        assert!(swatch("magenta").is_none());
        assert_eq!(DEFAULT_COLOR.to_hex(), "#9b87f5");
    }
}
