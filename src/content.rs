//! Page content stream rendering.
//!
//! Draw commands are recorded in top-down millimetres; here they are flipped into PDF
//! user space and written out as raw content stream operators. Text is drawn with the
//! standard Helvetica faces, so strings are encoded as WinAnsi bytes.

use crate::canvas::{Align, DrawCommand, FilledRect, TextRun};
use crate::colour::Colour;
use crate::layout::measure::{StandardFonts, TextMeasure};
use crate::page::Page;
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::*;
use std::io::Write;

/// Resource name of Helvetica
pub(crate) const REGULAR_FONT: &str = "F0";
/// Resource name of Helvetica-Bold
pub(crate) const BOLD_FONT: &str = "F1";

/// Renders a page's draw commands into an (uncompressed) content stream
pub(crate) fn render_page(page: &Page) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    for command in page.commands() {
        match command {
            DrawCommand::Rect(rect) => render_rect(&mut content, rect, page.height())?,
            DrawCommand::Text(run) => render_text(&mut content, run, page.height())?,
        }
    }
    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_rect(content: &mut Vec<u8>, rect: &FilledRect, page_height: Mm) -> Result<(), std::io::Error> {
    let r = Rect::from_top_left(page_height, rect.x, rect.y, rect.width, rect.height);
    write!(content, "q\n")?;
    write_colour(content, rect.fill)?;
    write!(
        content,
        "{:.3} {:.3} {:.3} {:.3} re f\n",
        *r.x1,
        *r.y1,
        *r.width(),
        *r.height()
    )?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_text(content: &mut Vec<u8>, run: &TextRun, page_height: Mm) -> Result<(), std::io::Error> {
    if run.text.is_empty() {
        return Ok(());
    }

    let width: Pt = StandardFonts
        .text_width(&run.text, run.font_size, run.bold)
        .into();
    let shift = match run.align {
        Align::Left => Pt(0.0),
        Align::Centre => Pt(0.0) - width / 2.0,
        Align::Right => Pt(0.0) - width,
    };
    let x: Pt = run.x.into();
    let y: Pt = (page_height - run.y).into();
    let t = Transform::translate(shift, Pt(0.0))
        .then(&Transform::rotate(run.angle))
        .with_translate(x, y);

    let font = if run.bold { BOLD_FONT } else { REGULAR_FONT };

    write!(content, "q\n")?;
    write_colour(content, run.colour)?;
    write!(content, "BT\n")?;
    write!(content, "/{} {} Tf\n", font, *run.font_size)?;
    write!(
        content,
        "{:.4} {:.4} {:.4} {:.4} {:.3} {:.3} Tm\n",
        t.a, t.b, t.c, t.d, t.e, t.f
    )?;
    write_literal(content, &win_ansi(&run.text))?;
    write!(content, " Tj\n")?;
    write!(content, "ET\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

/// Writes a PDF literal string, escaping delimiters and keeping the stream 7-bit
fn write_literal(content: &mut Vec<u8>, bytes: &[u8]) -> Result<(), std::io::Error> {
    content.push(b'(');
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                content.push(b'\\');
                content.push(b);
            }
            0x20..=0x7e => content.push(b),
            _ => write!(content, "\\{b:03o}")?,
        }
    }
    content.push(b')');
    Ok(())
}

/// Encodes text for the WinAnsi standard encoding. Characters outside it become `?`
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{201a}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201e}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02c6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8a,
            '\u{2039}' => 0x8b,
            '\u{0152}' => 0x8c,
            '\u{017d}' => 0x8e,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02dc}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9a,
            '\u{203a}' => 0x9b,
            '\u{0153}' => 0x9c,
            '\u{017e}' => 0x9e,
            '\u{0178}' => 0x9f,
            _ => b'?',
        })
        .collect()
}
