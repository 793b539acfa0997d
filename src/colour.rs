use serde::{Deserialize, Serialize};

use crate::error::BookletError;

/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "ColourSpec", into = "ColourSpec")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a CSS-style hex colour, `#rrggbb` or `#rgb` (the `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Colour, BookletError> {
        let invalid = || BookletError::InvalidColour {
            value: hex.to_string(),
        };
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Colour::new_rgb_bytes(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Colour::new_rgb_bytes(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }

    /// The colour as 8-bit RGB channels. CMYK and grey colours are converted naively,
    /// which is good enough for the word-processor shading this is used for
    pub fn to_rgb_bytes(&self) -> (u8, u8, u8) {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match *self {
            Colour::RGB { r, g, b } => (byte(r), byte(g), byte(b)),
            Colour::CMYK { c, m, y, k } => (
                byte((1.0 - c) * (1.0 - k)),
                byte((1.0 - m) * (1.0 - k)),
                byte((1.0 - y) * (1.0 - k)),
            ),
            Colour::Grey { g } => (byte(g), byte(g), byte(g)),
        }
    }

    /// `rrggbb`, without a leading `#`
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb_bytes();
        format!("{r:02x}{g:02x}{b:02x}")
    }
}

/// The forms a colour may take in configuration files and block lists
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColourSpec {
    Hex(String),
    Bytes([u8; 3]),
    Cmyk { c: f32, m: f32, y: f32, k: f32 },
    Grey { g: f32 },
}

impl TryFrom<ColourSpec> for Colour {
    type Error = BookletError;

    fn try_from(spec: ColourSpec) -> Result<Self, Self::Error> {
        match spec {
            ColourSpec::Hex(hex) => Colour::from_hex(&hex),
            ColourSpec::Bytes([r, g, b]) => Ok(Colour::new_rgb_bytes(r, g, b)),
            ColourSpec::Cmyk { c, m, y, k } => Ok(Colour::new_cmyk(c, m, y, k)),
            ColourSpec::Grey { g } => Ok(Colour::new_grey(g)),
        }
    }
}

impl From<Colour> for ColourSpec {
    fn from(colour: Colour) -> Self {
        match colour {
            Colour::RGB { .. } => ColourSpec::Hex(format!("#{}", colour.to_hex())),
            Colour::CMYK { c, m, y, k } => ColourSpec::Cmyk { c, m, y, k },
            Colour::Grey { g } => ColourSpec::Grey { g },
        }
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb_bytes(c.0, c.1, c.2)
    }
}

impl From<[u8; 3]> for Colour {
    fn from(c: [u8; 3]) -> Self {
        let [r, g, b] = c;
        Colour::new_rgb_bytes(r, g, b)
    }
}

/// A list of pre-defined colour constants, including the liturgical palette
/// the planner documents are printed in
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const INK: Colour = Colour::new_rgb_bytes(0x22, 0x22, 0x22);
    pub const RULE_GREY: Colour = Colour::new_rgb_bytes(0x99, 0x99, 0x99);
    pub const WATERMARK_GREY: Colour = Colour::new_rgb_bytes(0xe6, 0xe6, 0xe6);

    /// Deep violet used for section bars and the header band
    pub const VIOLET: Colour = Colour::new_rgb_bytes(0x4b, 0x2e, 0x63);
    pub const LAVENDER: Colour = Colour::new_rgb_bytes(0xe4, 0xdb, 0xee);
    pub const PALE_LAVENDER: Colour = Colour::new_rgb_bytes(0xf2, 0xee, 0xf7);
    pub const GOLD: Colour = Colour::new_rgb_bytes(0xb0, 0x8d, 0x3a);
    pub const SLATE: Colour = Colour::new_rgb_bytes(0x3d, 0x55, 0x6b);
    pub const SAGE: Colour = Colour::new_rgb_bytes(0x5b, 0x7a, 0x5e);
}
