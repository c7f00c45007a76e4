//! Face traits and codepoint coverage used for fallback selection.

use std::fmt;

bitflags::bitflags! {
    /// Coarse properties of a face, read from its tables.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct FontFlags: u32 {
        /// `post.isFixedPitch` is set.
        const MONOSPACE = 1 << 0;
        /// PANOSE classifies the face as Latin text with serifs.
        const SERIF = 1 << 1;
        /// The face has a `MATH` table.
        const MATH = 1 << 2;
        /// The face has variation axes.
        const VARIABLE = 1 << 3;
    }
}

impl FontFlags {
    /// Whether PANOSE bytes describe a serif face: family kind 2 (Latin
    /// text) with a serif style between 2 (cove) and 10 (triangle).
    pub fn is_serif_panose(panose: &[u8]) -> bool {
        matches!(panose, [2, 2..=10, ..])
    }
}

/// The set of codepoints a face maps, stored as sorted inclusive ranges.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    ranges: Vec<(u32, u32)>,
}

impl Coverage {
    pub fn from_codepoints(codepoints: impl IntoIterator<Item = u32>) -> Self {
        let mut codepoints: Vec<u32> = codepoints.into_iter().collect();
        codepoints.sort_unstable();
        codepoints.dedup();

        let mut ranges: Vec<(u32, u32)> = Vec::new();
        for c in codepoints {
            match ranges.last_mut() {
                Some((_, end)) if *end + 1 == c => *end = c,
                _ => ranges.push((c, c)),
            }
        }
        Self { ranges }
    }

    pub fn contains(&self, c: u32) -> bool {
        let i = self.ranges.partition_point(|&(_, end)| end < c);
        self.ranges.get(i).is_some_and(|&(start, _)| start <= c)
    }

    /// Number of covered codepoints.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|&(start, end)| (end - start) as usize + 1).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl fmt::Debug for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coverage({} codepoints in {} runs)", self.len(), self.ranges.len())
    }
}

/// Unicode `Default_Ignorable_Code_Point` ranges.
const DEFAULT_IGNORABLE: &[(u32, u32)] = &[
    (0x00AD, 0x00AD),
    (0x034F, 0x034F),
    (0x061C, 0x061C),
    (0x115F, 0x1160),
    (0x17B4, 0x17B5),
    (0x180B, 0x180F),
    (0x200B, 0x200F),
    (0x202A, 0x202E),
    (0x2060, 0x206F),
    (0x3164, 0x3164),
    (0xFE00, 0xFE0F),
    (0xFEFF, 0xFEFF),
    (0xFFA0, 0xFFA0),
    (0xFFF0, 0xFFF8),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0xE0000, 0xE0FFF),
];

/// Whether `c` is normally invisible and never needs a glyph of its own.
pub fn is_default_ignorable(c: char) -> bool {
    let c = c as u32;
    let i = DEFAULT_IGNORABLE.partition_point(|&(_, end)| end < c);
    DEFAULT_IGNORABLE.get(i).is_some_and(|&(start, _)| start <= c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_merges_adjacent_codepoints() {
        let coverage = Coverage::from_codepoints([0x41, 0x43, 0x42, 0x42, 0x600, 0x10FFFF]);
        assert_eq!(coverage.len(), 5);
        assert_eq!(coverage.ranges, [(0x41, 0x43), (0x600, 0x600), (0x10FFFF, 0x10FFFF)]);
        for c in [0x41, 0x42, 0x43, 0x600, 0x10FFFF] {
            assert!(coverage.contains(c), "{c:#x}");
        }
        for c in [0, 0x40, 0x44, 0x5FF, 0x601] {
            assert!(!coverage.contains(c), "{c:#x}");
        }
    }

    #[test]
    fn empty_coverage_contains_nothing() {
        let coverage = Coverage::default();
        assert!(coverage.is_empty());
        assert!(!coverage.contains(0x41));
    }

    #[test]
    fn default_ignorables() {
        for c in ['\u{AD}', '\u{200D}', '\u{FE0F}', '\u{FEFF}', '\u{E0041}'] {
            assert!(is_default_ignorable(c), "{c:?}");
        }
        for c in ['a', ' ', '\u{600}', '\u{2070}', '\u{1F600}'] {
            assert!(!is_default_ignorable(c), "{c:?}");
        }
    }

    #[test]
    fn serif_panose() {
        assert!(FontFlags::is_serif_panose(&[2, 2, 6, 3, 5, 4, 5, 2, 3, 4]));
        assert!(!FontFlags::is_serif_panose(&[2, 11, 5, 2, 4, 5, 4, 2, 2, 4]));
        assert!(!FontFlags::is_serif_panose(&[0; 10]));
        assert!(!FontFlags::is_serif_panose(&[]));
    }
}
