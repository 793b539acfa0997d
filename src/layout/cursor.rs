use crate::canvas::PageHandle;
use crate::units::*;

/// The engine's vertical draw position. Owned by exactly one layout run and thrown
/// away when the run finishes
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCursor {
    y: Mm,
    top: Mm,
    page: PageHandle,
    page_number: usize,
}

impl LayoutCursor {
    /// A cursor at the top of the first page
    pub fn new(page: PageHandle, top: Mm) -> LayoutCursor {
        LayoutCursor {
            y: top,
            top,
            page,
            page_number: 1,
        }
    }

    pub fn y(&self) -> Mm {
        self.y
    }

    pub fn page(&self) -> PageHandle {
        self.page
    }

    /// 1-based number of the current page
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn advance(&mut self, dy: Mm) {
        self.y += dy;
    }

    /// Whether the cursor has already passed `limit`
    pub fn is_past(&self, limit: Mm) -> bool {
        self.y > limit
    }

    /// Whether something `extent` tall can start here without passing `limit`
    pub fn fits(&self, extent: Mm, limit: Mm) -> bool {
        self.y + extent <= limit
    }

    /// Nothing has been drawn on the current page yet
    pub fn at_page_top(&self) -> bool {
        self.y <= self.top
    }

    /// Move to the top of a freshly created page
    pub fn next_page(&mut self, page: PageHandle) {
        self.page = page;
        self.page_number += 1;
        self.y = self.top;
    }
}
