//! Channel remapping
//!
//! A swizzle describes how the four output channels are sourced when a
//! native format's channel layout differs from the color type's layout
//! (e.g. an alpha-only color type stored in a single red channel).

use std::fmt;
use std::str::FromStr;

use crate::CapsError;

/// Source of one output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Component {
    R = 0,
    G = 1,
    B = 2,
    A = 3,
    Zero = 4,
    One = 5,
}

impl Component {
    const fn from_char(c: u8) -> Option<Self> {
        match c {
            b'r' => Some(Self::R),
            b'g' => Some(Self::G),
            b'b' => Some(Self::B),
            b'a' => Some(Self::A),
            b'0' => Some(Self::Zero),
            b'1' => Some(Self::One),
            _ => None,
        }
    }

    const fn as_char(self) -> char {
        match self {
            Self::R => 'r',
            Self::G => 'g',
            Self::B => 'b',
            Self::A => 'a',
            Self::Zero => '0',
            Self::One => '1',
        }
    }
}

/// Four-channel remap over `r`, `g`, `b`, `a`, `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swizzle([Component; 4]);

impl Swizzle {
    pub const RGBA: Swizzle = Swizzle::new("rgba");
    pub const BGRA: Swizzle = Swizzle::new("bgra");
    pub const RGB1: Swizzle = Swizzle::new("rgb1");

    /// Build a swizzle from a four character pattern.
    ///
    /// Panics on a malformed pattern, which fails compilation when used in
    /// a constant. Use [`str::parse`] for patterns that come from outside.
    pub const fn new(pattern: &str) -> Self {
        match Self::try_new(pattern) {
            Some(swizzle) => swizzle,
            None => panic!("swizzle pattern must be four of 'rgba01'"),
        }
    }

    const fn try_new(pattern: &str) -> Option<Self> {
        let bytes = pattern.as_bytes();
        if bytes.len() != 4 {
            return None;
        }
        let mut out = [Component::R; 4];
        let mut i = 0;
        while i < 4 {
            out[i] = match Component::from_char(bytes[i]) {
                Some(c) => c,
                None => return None,
            };
            i += 1;
        }
        Some(Swizzle(out))
    }

    /// 16-bit key, four bits per output channel, first channel lowest.
    pub const fn as_key(&self) -> u16 {
        (self.0[0] as u16)
            | ((self.0[1] as u16) << 4)
            | ((self.0[2] as u16) << 8)
            | ((self.0[3] as u16) << 12)
    }
}

impl Default for Swizzle {
    fn default() -> Self {
        Self::RGBA
    }
}

impl FromStr for Swizzle {
    type Err = CapsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s).ok_or_else(|| CapsError::InvalidSwizzle {
            swizzle: s.to_string(),
        })
    }
}

impl fmt::Display for Swizzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{}", c.as_char())?;
        }
        Ok(())
    }
}
