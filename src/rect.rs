use crate::units::*;

/// A rectangle in PDF user space, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// The rectangle covering a whole page of the given size, anchored at the origin
    pub fn page(width: Mm, height: Mm) -> Rect {
        Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: width.into(),
            y2: height.into(),
        }
    }

    /// Convert a box measured from the top-left corner of a page (y growing downwards,
    /// in millimetres) into PDF user space (y growing upwards, in points)
    pub fn from_top_left(page_height: Mm, x: Mm, y: Mm, width: Mm, height: Mm) -> Rect {
        let bottom: Pt = (page_height - y - height).into();
        let left: Pt = x.into();
        Rect {
            x1: left,
            y1: bottom,
            x2: left + width.into(),
            y2: bottom + height.into(),
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
