use pdf_writer::{Finish, Pdf, TextStr};

use crate::refs::{ObjectReferences, RefType};
use crate::units::*;

/// The bookmarks of a document, one per section, in document order
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// 0-based index of the page the section starts on
    pub page_index: usize,
    pub title: String,
    /// Distance of the section's top from the top of the page
    pub top: Mm,
}

impl Outline {
    pub fn add_bookmark(&mut self, page_index: usize, title: String, top: Mm) {
        self.entries.push(OutlineEntry {
            page_index,
            title,
            top,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the outline tree. Page references must already be allocated, and bookmarks
    /// that point past the last page are dropped
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_height: Mm,
        writer: &mut Pdf,
    ) -> Option<pdf_writer::Ref> {
        let entries: Vec<(&OutlineEntry, pdf_writer::Ref)> = self
            .entries
            .iter()
            .filter_map(|entry| refs.get(RefType::Page(entry.page_index)).map(|r| (entry, r)))
            .collect();
        if entries.is_empty() {
            return None;
        }

        // generate IDs for everything
        let outlines_id = refs.gen(RefType::Outlines);
        let ids: Vec<pdf_writer::Ref> = (0..entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        let mut outline = writer.outline(outlines_id);
        outline.first(ids[0]);
        outline.last(ids[ids.len() - 1]);
        outline.count(entries.len() as i32);
        outline.finish();

        for (i, (entry, page_ref)) in entries.iter().enumerate() {
            let mut item = writer.outline_item(ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(ids[i - 1]);
            }
            if i + 1 < ids.len() {
                item.next(ids[i + 1]);
            }
            let top: Pt = (page_height - entry.top).into();
            item.dest().page(*page_ref).xyz(0.0, *top, None);
        }

        Some(outlines_id)
    }
}
