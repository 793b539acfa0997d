use crate::{
    canvas::{Canvas, DrawCommand, FilledRect, Layer, PageHandle, TextRun},
    content::{self, BOLD_FONT, REGULAR_FONT},
    error::Result,
    info::Info,
    outline::Outline,
    page::Page,
    pagesize::{self, PageSize},
    refs::{ObjectReferences, RefType},
    units::Mm,
};
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::io::Write;

/// zlib level used for page content streams
const COMPRESSION_LEVEL: u8 = 6;

/// A laid-out document: the main object that stores every page's draw commands,
/// then renders them out as a PDF with a call to [Document::write]
///
/// `Document` is also the recording [`Canvas`] the layout engine draws into.
#[derive(Debug, Clone)]
pub struct Document {
    pub info: Option<Info>,
    pages: Vec<Page>,
    pub outline: Outline,
    page_size: PageSize,
    layer: Layer,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(pagesize::A4)
    }
}

impl Document {
    /// An empty document whose pages will all be `page_size`
    pub fn new(page_size: PageSize) -> Document {
        Document {
            info: None,
            pages: Vec::new(),
            outline: Outline::default(),
            page_size,
            layer: Layer::default(),
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The pages in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, handle: PageHandle) -> Option<&Page> {
        self.pages.get(handle.index())
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    fn record(&mut self, handle: PageHandle, command: DrawCommand) {
        let layer = self.layer;
        match self.pages.get_mut(handle.index()) {
            Some(page) => page.push(layer, command),
            None => log::warn!(
                "dropping a draw command for page {} of a {} page document",
                handle.index() + 1,
                self.pages.len()
            ),
        }
    }

    /// Write the entire document to the writer. The whole PDF is rendered in memory
    /// first, so very long documents allocate accordingly.
    pub fn write<W: Write>(&self, mut w: W) -> Result<()> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<_> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        let fonts = [(REGULAR_FONT, &b"Helvetica"[..]), (BOLD_FONT, &b"Helvetica-Bold"[..])];
        for (i, (_, base_font)) in fonts.iter().enumerate() {
            let font_id = refs.gen(RefType::Font(i));
            writer
                .type1_font(font_id)
                .base_font(Name(*base_font))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for (index, page) in self.pages.iter().enumerate() {
            let id = refs.gen(RefType::Page(index));
            let content_id = refs.gen(RefType::ContentForPage(index));

            let mut pdf_page = writer.page(id);
            pdf_page.media_box(page.media_box().into());
            pdf_page.parent(page_tree_id);
            let mut resources = pdf_page.resources();
            let mut resource_fonts = resources.fonts();
            for (i, (name, _)) in fonts.iter().enumerate() {
                resource_fonts.pair(Name(name.as_bytes()), refs.gen(RefType::Font(i)));
            }
            resource_fonts.finish();
            resources.finish();
            pdf_page.contents(content_id);
            pdf_page.finish();

            let rendered = content::render_page(page)?;
            let compressed = compress_to_vec_zlib(&rendered, COMPRESSION_LEVEL);
            writer
                .stream(content_id, &compressed)
                .filter(Filter::FlateDecode);
        }

        let outline_id = self
            .outline
            .write(&mut refs, self.page_size.1, &mut writer);

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outline_id) = outline_id {
            catalog.outlines(outline_id);
        }
        catalog.finish();

        w.write_all(writer.finish().as_slice())?;
        w.flush()?;
        Ok(())
    }
}

impl Canvas for Document {
    fn new_page(&mut self) -> PageHandle {
        let handle = PageHandle::new(self.pages.len());
        self.pages
            .push(Page::new(handle.index() + 1, self.page_size));
        handle
    }

    fn draw_text(&mut self, page: PageHandle, run: TextRun) {
        self.record(page, DrawCommand::Text(run));
    }

    fn draw_rect(&mut self, page: PageHandle, rect: FilledRect) {
        self.record(page, DrawCommand::Rect(rect));
    }

    fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    fn mark_section(&mut self, page: PageHandle, title: &str, top: Mm) {
        self.outline
            .add_bookmark(page.index(), title.to_string(), top);
    }
}
