//! Page flow: turning an ordered list of content blocks into paginated pages.
//!
//! [`PageFlowEngine`] walks the blocks in order with a [`LayoutCursor`], word-wraps
//! paragraphs and list items to the printable width, and starts a new page whenever
//! the cursor passes the bottom threshold of the [`PageGeometry`](crate::PageGeometry).
//! Each new page is handed to a [`Decoration`] for its header, footer and watermark,
//! and pages are numbered once the total is known.
//!
//! # Example
//!
//! ```
//! use booklet_gen::{ContentBlock, HeadingLevel, PageGeometry, colours};
//! use booklet_gen::layout::{layout, StandardChrome};
//!
//! let geometry = PageGeometry::a4();
//! let blocks = vec![
//!     ContentBlock::heading(HeadingLevel::H2, "Hymns"),
//!     ContentBlock::bullets(["Amazing Grace", "Be Not Afraid"]),
//!     ContentBlock::banner("Important Notes", colours::SLATE),
//!     ContentBlock::paragraph("Keep this plan with your important papers."),
//! ];
//!
//! let chrome = StandardChrome::new(&geometry, "Funeral Plan");
//! let document = layout(&blocks, &geometry, &chrome).expect("can lay out");
//! assert_eq!(document.page_count(), 1);
//! ```

mod cursor;
mod decoration;
mod engine;
pub mod measure;
mod wrap;

pub use cursor::*;
pub use decoration::*;
pub use engine::*;
pub use measure::{StandardFonts, TextMeasure};
pub use wrap::*;
