//! The drawing surface the layout engine emits into.
//!
//! The engine only ever talks to a [`Canvas`]: it asks for pages, places text, and
//! fills rectangles. [`Document`](crate::Document) records those commands so they can
//! be written out as a PDF later; other sinks can implement the trait to render
//! somewhere else.

use crate::colour::Colour;
use crate::geometry::TextStyle;
use crate::units::*;

/// Identifies a page created by [`Canvas::new_page`]. Handles stay valid for the life
/// of the canvas, so later commands (page-number stamps) can target earlier pages
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageHandle(usize);

impl PageHandle {
    pub fn new(index: usize) -> PageHandle {
        PageHandle(index)
    }

    /// 0-based position of the page in creation order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Horizontal anchoring of a text run relative to its x coordinate
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Centre,
    Right,
}

/// Which pass of the layout a command came from
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Layer {
    /// Repeating decoration: header band, footer, watermark, page numbers
    Chrome,
    /// The laid-out blocks
    #[default]
    Content,
}

/// A single line of text placed on a page. `y` is the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: Mm,
    pub y: Mm,
    pub font_size: Pt,
    pub bold: bool,
    pub colour: Colour,
    pub align: Align,
    /// Counter-clockwise rotation about the anchor point, in degrees
    pub angle: f32,
}

impl TextRun {
    pub fn new<S: Into<String>>(text: S, x: Mm, y: Mm, style: &TextStyle) -> TextRun {
        TextRun {
            text: text.into(),
            x,
            y,
            font_size: style.font_size,
            bold: style.bold,
            colour: style.colour,
            align: Align::Left,
            angle: 0.0,
        }
    }

    pub fn aligned(mut self, align: Align) -> TextRun {
        self.align = align;
        self
    }

    pub fn rotated(mut self, degrees: f32) -> TextRun {
        self.angle = degrees;
        self
    }
}

/// A filled rectangle; `(x, y)` is its top-left corner
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilledRect {
    pub x: Mm,
    pub y: Mm,
    pub width: Mm,
    pub height: Mm,
    pub fill: Colour,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text(TextRun),
    Rect(FilledRect),
}

impl DrawCommand {
    /// The vertical position of the command: a text baseline or a rectangle's top edge
    pub fn y(&self) -> Mm {
        match self {
            DrawCommand::Text(run) => run.y,
            DrawCommand::Rect(rect) => rect.y,
        }
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            DrawCommand::Text(run) => Some(run),
            DrawCommand::Rect(_) => None,
        }
    }
}

/// A rendering target for laid-out pages
pub trait Canvas {
    /// Start a new page after all existing ones
    fn new_page(&mut self) -> PageHandle;

    fn draw_text(&mut self, page: PageHandle, run: TextRun);

    fn draw_rect(&mut self, page: PageHandle, rect: FilledRect);

    /// Commands that follow belong to `layer`
    fn set_layer(&mut self, _layer: Layer) {}

    /// A level-2 heading starts a section at `top` on `page`
    fn mark_section(&mut self, _page: PageHandle, _title: &str, _top: Mm) {}
}
