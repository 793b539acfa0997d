//! Paginated layout for funeral service documents.
//!
//! An ordered list of [`ContentBlock`]s (headings, paragraphs, bulleted lists and
//! coloured banners) is flowed onto fixed-size pages by the
//! [`PageFlowEngine`](layout::PageFlowEngine), which breaks pages whenever the content
//! reaches the bottom of the printable area and repaints the header, footer and
//! watermark on every page. The resulting [`Document`] can be written out as a PDF;
//! the same blocks can also be written as DOCX with [`docx::write_docx`].

mod block;
pub use block::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

pub(crate) mod content;

mod document;
pub use document::*;

pub mod docx;

mod error;
pub use error::*;

mod geometry;
pub use geometry::*;

mod info;
pub use info::*;

pub mod layout;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

pub mod pagesize;

mod plan;
pub use plan::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
