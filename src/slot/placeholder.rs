/// Deterministic placeholders for slots without a persisted image
///
/// A placeholder is a pure function of (seed, size, shape): the same inputs
/// always produce the same initials, colours and geometry.
use super::props::{Shape, SizeCategory};

/// Background colours a placeholder can pick from
const PALETTE: [[u8; 3]; 10] = [
    [0x1e, 0x88, 0xe5],
    [0x43, 0xa0, 0x47],
    [0xe5, 0x39, 0x35],
    [0x8e, 0x24, 0xaa],
    [0xfb, 0x8c, 0x00],
    [0x00, 0x89, 0x7b],
    [0x3f, 0x51, 0xb5],
    [0x6d, 0x4c, 0x41],
    [0xd8, 0x1b, 0x60],
    [0x54, 0x6e, 0x7a],
];

const FOREGROUND: [u8; 3] = [0xff, 0xff, 0xff];

/// A generated avatar-like image description
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    pub initials: String,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    /// Edge length in logical pixels
    pub size: u16,
    /// Corner radius as a percentage of the edge length
    pub radius_percent: u8,
}

impl Placeholder {
    /// Corner radius in pixels
    pub fn radius(&self) -> f32 {
        f32::from(self.size) * f32::from(self.radius_percent) / 100.0
    }
}

/// Produces placeholders from a seed name
pub trait PlaceholderGenerator: Send + Sync {
    fn generate(&self, seed: &str, size: SizeCategory, shape: Shape) -> Placeholder;
}

/// Initials on a coloured background
#[derive(Debug, Clone, Copy, Default)]
pub struct InitialsGenerator;

impl PlaceholderGenerator for InitialsGenerator {
    fn generate(&self, seed: &str, size: SizeCategory, shape: Shape) -> Placeholder {
        let index = (fnv1a(seed.as_bytes()) % PALETTE.len() as u64) as usize;

        Placeholder {
            initials: initials(seed),
            background: PALETTE[index],
            foreground: FOREGROUND,
            size: size.pixels(),
            radius_percent: shape.radius_percent(),
        }
    }
}

/// First letter of the first two words, or the first two letters of a
/// single word, uppercased
pub fn initials(seed: &str) -> String {
    let words: Vec<&str> = seed.split_whitespace().collect();

    let letters: String = match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };

    letters.to_uppercase()
}

/// 64-bit FNV-1a, stable across platforms and toolchains
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes
        .iter()
        .fold(OFFSET, |hash, &byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Jane Doe"), "JD");
        assert_eq!(initials("  jane   van doe "), "JV");
        assert_eq!(initials("Madonna"), "MA");
        assert_eq!(initials("X"), "X");
        assert_eq!(initials(""), "");
        assert_eq!(initials("élodie durand"), "ÉD");
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = InitialsGenerator;
        let sizes = [
            SizeCategory::Xs,
            SizeCategory::Sm,
            SizeCategory::Md,
            SizeCategory::Lg,
            SizeCategory::Xl,
        ];
        let shapes = [Shape::Circle, Shape::Square, Shape::Rounded];

        for name in ["Jane Doe", "John", "", "Ünïcode Nâme"] {
            for size in sizes {
                for shape in shapes {
                    let first = generator.generate(name, size, shape);
                    let second = generator.generate(name, size, shape);
                    assert_eq!(first, second);
                }
            }
        }
    }

    #[test]
    fn test_geometry_follows_size_and_shape() {
        let generator = InitialsGenerator;

        let circle = generator.generate("Jane Doe", SizeCategory::Md, Shape::Circle);
        assert_eq!(circle.size, 96);
        assert_eq!(circle.radius_percent, 50);
        assert_eq!(circle.radius(), 48.0);

        let square = generator.generate("Jane Doe", SizeCategory::Xl, Shape::Square);
        assert_eq!(square.size, 200);
        assert_eq!(square.radius(), 0.0);

        // Colour depends on the seed only
        assert_eq!(circle.background, square.background);
    }

    #[test]
    fn test_fnv_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
