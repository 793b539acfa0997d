//! Page geometry: the fixed numeric parameters a layout run works within.
//!
//! All lengths are millimetres measured from the top-left corner of the page, with y
//! growing downwards. Font sizes are points. A geometry can be written by hand, loaded
//! from TOML, or taken from one of the presets:
//!
//! ```
//! use booklet_gen::{PageGeometry, Mm};
//!
//! let geometry = PageGeometry::from_toml_str(r#"
//!     margin_left = 25.0
//!     margin_right = 25.0
//! "#).expect("valid geometry");
//! assert_eq!(geometry.margin_left, Mm(25.0));
//! assert_eq!(geometry.page_height, Mm(297.0));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::block::HeadingLevel;
use crate::colour::{colours, Colour};
use crate::error::{BookletError, Result};
use crate::pagesize::{self, PageSize};
use crate::units::*;

/// Banner text is vertically centred on the bar using this fraction of the font size
/// as the distance from the bar's middle to the baseline
pub(crate) const BASELINE_DROP: f32 = 0.35;

/// How a run of text is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: Pt,
    /// Distance between successive baselines
    pub line_height: Mm,
    pub bold: bool,
    pub colour: Colour,
}

impl TextStyle {
    pub fn new(font_size: Pt, line_height: Mm) -> TextStyle {
        TextStyle {
            font_size,
            line_height,
            bold: false,
            colour: colours::INK,
        }
    }

    pub fn bold(mut self) -> TextStyle {
        self.bold = true;
        self
    }

    pub fn coloured(mut self, colour: Colour) -> TextStyle {
        self.colour = colour;
        self
    }
}

/// A single line of text on a filled bar, used for headings and banners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerStyle {
    /// Height of the filled bar
    pub height: Mm,
    /// Distance from the left margin to the start of the text
    pub inset: Mm,
    /// Space left below the bar before the next block
    pub gap_after: Mm,
    /// Bar colour; banner blocks bring their own and ignore this
    pub fill: Colour,
    pub text: TextStyle,
}

/// Bulleted list items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletStyle {
    /// Distance from the left margin to the item text
    pub indent: Mm,
    /// Glyph drawn at the left margin on the first line of each item
    pub glyph: String,
    pub text: TextStyle,
}

/// Immutable page configuration for one layout run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: Mm,
    pub page_height: Mm,
    pub margin_left: Mm,
    pub margin_right: Mm,
    /// Cursor position at the top of a fresh page, below the repeating header
    pub top_start_y: Mm,
    /// Cursor threshold beyond which a page break is forced
    pub bottom_limit_y: Mm,
    /// Space left after each paragraph and bulleted list
    pub block_gap: Mm,
    pub heading_2: BannerStyle,
    pub heading_3: BannerStyle,
    pub heading_4: BannerStyle,
    pub banner: BannerStyle,
    pub paragraph: TextStyle,
    pub bullet: BulletStyle,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

impl PageGeometry {
    /// A4 portrait with a 22mm header band and a footer rule at 280mm
    pub fn a4() -> PageGeometry {
        let body = TextStyle::new(Pt(11.0), Mm(5.5));
        PageGeometry {
            page_width: pagesize::A4.0,
            page_height: pagesize::A4.1,
            margin_left: Mm(20.0),
            margin_right: Mm(20.0),
            top_start_y: Mm(35.0),
            bottom_limit_y: Mm(270.0),
            block_gap: Mm(3.0),
            heading_2: BannerStyle {
                text: TextStyle::new(Pt(15.0), Mm(7.0))
                    .bold()
                    .coloured(colours::WHITE),
                height: Mm(10.0),
                fill: colours::VIOLET,
                inset: Mm(3.0),
                gap_after: Mm(7.0),
            },
            heading_3: BannerStyle {
                text: TextStyle::new(Pt(13.0), Mm(6.5))
                    .bold()
                    .coloured(colours::VIOLET),
                height: Mm(8.0),
                fill: colours::LAVENDER,
                inset: Mm(3.0),
                gap_after: Mm(6.0),
            },
            heading_4: BannerStyle {
                text: TextStyle::new(Pt(11.5), Mm(6.0)).bold(),
                height: Mm(7.0),
                fill: colours::PALE_LAVENDER,
                inset: Mm(2.0),
                gap_after: Mm(5.5),
            },
            banner: BannerStyle {
                text: TextStyle::new(Pt(12.5), Mm(6.5))
                    .bold()
                    .coloured(colours::WHITE),
                height: Mm(9.0),
                fill: colours::SLATE,
                inset: Mm(3.0),
                gap_after: Mm(6.5),
            },
            paragraph: body.clone(),
            bullet: BulletStyle {
                text: body,
                indent: Mm(6.0),
                glyph: "\u{2022}".to_string(),
            },
        }
    }

    /// The A4 layout adapted to another paper size: margins and styles are kept, the
    /// header space is kept, and the bottom threshold keeps its distance from the edge
    pub fn for_page_size(size: PageSize) -> PageGeometry {
        let a4 = PageGeometry::a4();
        let bottom_clearance = a4.page_height - a4.bottom_limit_y;
        PageGeometry {
            page_width: size.0,
            page_height: size.1,
            bottom_limit_y: size.1 - bottom_clearance,
            ..a4
        }
    }

    pub fn page_size(&self) -> PageSize {
        (self.page_width, self.page_height)
    }

    /// Width between the left and right margins
    pub fn printable_width(&self) -> Mm {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Vertical room a fresh page offers to content
    pub fn printable_height(&self) -> Mm {
        self.bottom_limit_y - self.top_start_y
    }

    pub fn heading(&self, level: HeadingLevel) -> &BannerStyle {
        match level {
            HeadingLevel::H2 => &self.heading_2,
            HeadingLevel::H3 => &self.heading_3,
            HeadingLevel::H4 => &self.heading_4,
        }
    }

    /// Check every invariant the layout engine relies on
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("top_start_y", self.top_start_y),
            ("bottom_limit_y", self.bottom_limit_y),
            ("block_gap", self.block_gap),
            ("bullet.indent", self.bullet.indent),
        ];
        for (name, value) in lengths {
            if !value.is_positive() {
                return Err(BookletError::geometry(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.top_start_y >= self.bottom_limit_y {
            return Err(BookletError::geometry(format!(
                "top_start_y ({}) must be above bottom_limit_y ({})",
                self.top_start_y, self.bottom_limit_y
            )));
        }
        if self.bottom_limit_y >= self.page_height {
            return Err(BookletError::geometry(format!(
                "bottom_limit_y ({}) must be above the page bottom ({})",
                self.bottom_limit_y, self.page_height
            )));
        }
        if !self.printable_width().is_positive() {
            return Err(BookletError::geometry(format!(
                "margins ({} + {}) leave no room on a {} wide page",
                self.margin_left, self.margin_right, self.page_width
            )));
        }
        if self.bullet.indent >= self.printable_width() {
            return Err(BookletError::geometry(
                "bullet indent is wider than the printable width",
            ));
        }

        validate_text("paragraph", &self.paragraph)?;
        validate_text("bullet", &self.bullet.text)?;
        for (name, style) in [
            ("heading_2", &self.heading_2),
            ("heading_3", &self.heading_3),
            ("heading_4", &self.heading_4),
            ("banner", &self.banner),
        ] {
            validate_text(name, &style.text)?;
            if !style.height.is_positive() {
                return Err(BookletError::geometry(format!(
                    "{name}.height must be positive"
                )));
            }
            if style.height > self.printable_height() {
                return Err(BookletError::geometry(format!(
                    "{name}.height ({}) does not fit between top_start_y and bottom_limit_y",
                    style.height
                )));
            }
            let font_height: Mm = style.text.font_size.into();
            if font_height * (2.0 * BASELINE_DROP) > style.height {
                return Err(BookletError::geometry(format!(
                    "{name}.height ({}) is too short for {}pt text",
                    style.height, style.text.font_size
                )));
            }
        }

        Ok(())
    }

    /// Parse a geometry from TOML and validate it
    pub fn from_toml_str(toml: &str) -> Result<PageGeometry> {
        let geometry: PageGeometry = toml::from_str(toml)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Read, parse, and validate a geometry file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<PageGeometry> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded page geometry from {}", path.as_ref().display());
        PageGeometry::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn validate_text(name: &str, style: &TextStyle) -> Result<()> {
    if !style.font_size.is_positive() {
        return Err(BookletError::geometry(format!(
            "{name}.font_size must be positive"
        )));
    }
    if !style.line_height.is_positive() {
        return Err(BookletError::geometry(format!(
            "{name}.line_height must be positive"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(geometry: PageGeometry, needle: &str) {
        match geometry.validate() {
            Err(BookletError::InvalidGeometry { reason }) => {
                assert!(reason.contains(needle), "{reason:?} lacks {needle:?}")
            }
            other => panic!("expected invalid geometry, got {other:?}"),
        }
    }

    #[test]
    fn presets_are_valid() {
        PageGeometry::a4().validate().unwrap();
        PageGeometry::for_page_size(pagesize::A5).validate().unwrap();
        PageGeometry::for_page_size(pagesize::LETTER).validate().unwrap();
    }

    #[test]
    fn a5_keeps_bottom_clearance() {
        let a5 = PageGeometry::for_page_size(pagesize::A5);
        assert_eq!(a5.page_height - a5.bottom_limit_y, Mm(27.0));
        assert_eq!(a5.printable_width(), Mm(108.0));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut g = PageGeometry::a4();
        g.page_width = Mm(0.0);
        assert_invalid(g, "page_width");

        let mut g = PageGeometry::a4();
        g.margin_left = Mm(-5.0);
        assert_invalid(g, "margin_left");

        let mut g = PageGeometry::a4();
        g.paragraph.line_height = Mm(0.0);
        assert_invalid(g, "paragraph.line_height");
    }

    #[test]
    fn rejects_broken_threshold_ordering() {
        let mut g = PageGeometry::a4();
        g.top_start_y = Mm(280.0);
        assert_invalid(g, "top_start_y");

        let mut g = PageGeometry::a4();
        g.bottom_limit_y = Mm(300.0);
        assert_invalid(g, "bottom_limit_y");
    }

    #[test]
    fn rejects_margins_wider_than_page() {
        let mut g = PageGeometry::a4();
        g.margin_left = Mm(110.0);
        g.margin_right = Mm(100.0);
        assert_invalid(g, "margins");
    }

    #[test]
    fn rejects_banner_that_cannot_hold_its_text() {
        let mut g = PageGeometry::a4();
        g.heading_2.height = Mm(3.0);
        assert_invalid(g, "heading_2.height");
    }

    #[test]
    fn rejects_banner_taller_than_printable_area() {
        let mut g = PageGeometry::a4();
        g.banner.height = Mm(250.0);
        assert_invalid(g, "banner.height");
    }

    #[test]
    fn toml_round_trips_and_defaults_missing_fields() {
        let a4 = PageGeometry::a4();
        let text = a4.to_toml_string().unwrap();
        assert_eq!(PageGeometry::from_toml_str(&text).unwrap(), a4);

        let partial = PageGeometry::from_toml_str("block_gap = 4.0").unwrap();
        assert_eq!(partial.block_gap, Mm(4.0));
        assert_eq!(partial.heading_2, a4.heading_2);
    }

    #[test]
    fn toml_is_validated_on_load() {
        let err = PageGeometry::from_toml_str("top_start_y = 290.0").unwrap_err();
        assert!(matches!(err, BookletError::InvalidGeometry { .. }));

        let err = PageGeometry::from_toml_str("page_width = \"wide\"").unwrap_err();
        assert!(matches!(err, BookletError::TomlDe(_)));
    }
}
