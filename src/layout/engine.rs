use crate::block::{ContentBlock, HeadingLevel};
use crate::canvas::{Canvas, FilledRect, Layer, PageHandle, TextRun};
use crate::colour::Colour;
use crate::document::Document;
use crate::error::{BookletError, Result};
use crate::geometry::{BannerStyle, PageGeometry, TextStyle, BASELINE_DROP};
use crate::layout::cursor::LayoutCursor;
use crate::layout::decoration::Decoration;
use crate::layout::measure::{StandardFonts, TextMeasure};
use crate::layout::wrap::wrap_text;
use crate::units::*;

/// Documents longer than this are almost certainly runaway content; a warning is
/// logged once the limit is passed, but layout carries on
pub const PAGE_COUNT_WARNING: usize = 500;

/// Flows content blocks onto fixed-size pages.
///
/// The engine is immutable once built, so one engine can lay out any number of
/// documents, including from several threads at once; every run gets its own cursor
/// and its own canvas.
///
/// ```
/// use booklet_gen::{ContentBlock, PageGeometry};
/// use booklet_gen::layout::{NoChrome, PageFlowEngine};
///
/// let engine = PageFlowEngine::new(PageGeometry::a4()).expect("valid geometry");
/// let document = engine
///     .layout(&[ContentBlock::paragraph("Hello")], &NoChrome)
///     .expect("can lay out");
/// assert_eq!(document.page_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PageFlowEngine<M = StandardFonts> {
    geometry: PageGeometry,
    measure: M,
    page_limit: Option<usize>,
}

impl PageFlowEngine<StandardFonts> {
    /// An engine measuring with the standard Helvetica metrics. Fails with
    /// [`BookletError::InvalidGeometry`] before anything is drawn if the geometry is
    /// inconsistent
    pub fn new(geometry: PageGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(PageFlowEngine {
            geometry,
            measure: StandardFonts,
            page_limit: None,
        })
    }
}

impl<M: TextMeasure> PageFlowEngine<M> {
    /// Measure text with other metrics, e.g. those of the font a custom canvas draws with
    pub fn with_measure<N: TextMeasure>(self, measure: N) -> PageFlowEngine<N> {
        PageFlowEngine {
            geometry: self.geometry,
            measure,
            page_limit: self.page_limit,
        }
    }

    /// Fail with [`BookletError::PageLimitExceeded`] rather than create more than
    /// `limit` pages. There is no limit unless one is set. The first page is always
    /// created, so a limit of 0 behaves as 1
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit.max(1));
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// How far `text` would run past the right margin if drawn on a bar of `style`.
    /// Bar text is a single line and is never wrapped
    pub(crate) fn bar_overflow(&self, text: &str, style: &BannerStyle) -> Option<Mm> {
        let available = self.geometry.printable_width() - style.inset;
        let width = self
            .measure
            .text_width(text, style.text.font_size, style.text.bold);
        (width > available).then(|| width - available)
    }

    /// Lay `blocks` out into a new [`Document`]
    pub fn layout(&self, blocks: &[ContentBlock], decoration: &dyn Decoration) -> Result<Document> {
        let mut document = Document::new(self.geometry.page_size());
        self.layout_into(blocks, decoration, &mut document)?;
        Ok(document)
    }

    /// Lay `blocks` out onto any canvas, returning the number of pages created.
    ///
    /// The first page is created up front, so even an empty block list yields one
    /// decorated page. Once every block is placed, each page is stamped with its number
    /// and the final page count.
    pub fn layout_into<C: Canvas>(
        &self,
        blocks: &[ContentBlock],
        decoration: &dyn Decoration,
        canvas: &mut C,
    ) -> Result<usize> {
        let mut run = Run::start(self, decoration, canvas);
        for (i, block) in blocks.iter().enumerate() {
            log::trace!(
                "block {i} ({}) at y={} on page {}",
                block.kind(),
                run.cursor.y(),
                run.cursor.page_number()
            );
            run.block(block)?;
        }
        Ok(run.finish())
    }
}

/// Lay `blocks` out on `geometry` with the standard metrics
pub fn layout(
    blocks: &[ContentBlock],
    geometry: &PageGeometry,
    decoration: &dyn Decoration,
) -> Result<Document> {
    PageFlowEngine::new(geometry.clone())?.layout(blocks, decoration)
}

/// State of one layout run
struct Run<'a, M, C> {
    engine: &'a PageFlowEngine<M>,
    decoration: &'a dyn Decoration,
    canvas: &'a mut C,
    cursor: LayoutCursor,
    pages: Vec<PageHandle>,
}

impl<'a, M: TextMeasure, C: Canvas> Run<'a, M, C> {
    fn start(
        engine: &'a PageFlowEngine<M>,
        decoration: &'a dyn Decoration,
        canvas: &'a mut C,
    ) -> Self {
        let first = canvas.new_page();
        let mut run = Run {
            engine,
            decoration,
            canvas,
            cursor: LayoutCursor::new(first, engine.geometry.top_start_y),
            pages: vec![first],
        };
        run.decorate(first, 1);
        run
    }

    fn geometry(&self) -> &'a PageGeometry {
        &self.engine.geometry
    }

    fn decorate(&mut self, page: PageHandle, number: usize) {
        self.canvas.set_layer(Layer::Chrome);
        self.decoration.decorate(page, number, &mut *self.canvas);
        self.canvas.set_layer(Layer::Content);
    }

    fn break_page(&mut self) -> Result<()> {
        if let Some(limit) = self.engine.page_limit {
            if self.pages.len() >= limit {
                return Err(BookletError::PageLimitExceeded { limit });
            }
        }

        log::debug!(
            "page {} full at y={}, starting page {}",
            self.cursor.page_number(),
            self.cursor.y(),
            self.cursor.page_number() + 1
        );
        let page = self.canvas.new_page();
        self.pages.push(page);
        if self.pages.len() == PAGE_COUNT_WARNING + 1 {
            log::warn!(
                "document has grown past {PAGE_COUNT_WARNING} pages; is the content runaway?"
            );
        }
        self.cursor.next_page(page);
        self.decorate(page, self.cursor.page_number());
        Ok(())
    }

    fn block(&mut self, block: &ContentBlock) -> Result<()> {
        let geometry = self.geometry();
        match block {
            ContentBlock::Heading { level, text } => {
                let style = geometry.heading(*level);
                if *level == HeadingLevel::H2 {
                    self.ensure_room_for(style)?;
                    self.canvas
                        .mark_section(self.cursor.page(), text, self.cursor.y());
                }
                self.bar(text, style, style.fill)
            }
            ContentBlock::Banner { text, fill } => self.bar(text, &geometry.banner, *fill),
            ContentBlock::Paragraph { text } => {
                let lines = self.wrap(text, geometry.printable_width(), &geometry.paragraph);
                for line in &lines {
                    self.line(line, geometry.margin_left, &geometry.paragraph)?;
                }
                if !lines.is_empty() {
                    self.cursor.advance(geometry.block_gap);
                }
                Ok(())
            }
            ContentBlock::BulletList { items } => {
                let bullet = &geometry.bullet;
                let text_x = geometry.margin_left + bullet.indent;
                let width = geometry.printable_width() - bullet.indent;
                let mut drawn = false;
                for item in items {
                    for (i, line) in self.wrap(item, width, &bullet.text).iter().enumerate() {
                        self.ensure_line_room()?;
                        if i == 0 {
                            self.canvas.draw_text(
                                self.cursor.page(),
                                TextRun::new(
                                    bullet.glyph.as_str(),
                                    geometry.margin_left,
                                    self.cursor.y(),
                                    &bullet.text,
                                ),
                            );
                        }
                        self.line(line, text_x, &bullet.text)?;
                        drawn = true;
                    }
                }
                if drawn {
                    self.cursor.advance(geometry.block_gap);
                }
                Ok(())
            }
        }
    }

    fn wrap(&self, text: &str, width: Mm, style: &TextStyle) -> Vec<String> {
        wrap_text(
            &self.engine.measure,
            text,
            width,
            style.font_size,
            style.bold,
        )
    }

    /// Start a new page if the cursor has passed the bottom threshold
    fn ensure_line_room(&mut self) -> Result<()> {
        if self.cursor.is_past(self.geometry().bottom_limit_y) {
            self.break_page()?;
        }
        Ok(())
    }

    /// Start a new page unless a bar of `style` fits below the cursor. A bar at the top
    /// of a page is drawn there regardless, so breaking can never loop
    fn ensure_room_for(&mut self, style: &BannerStyle) -> Result<()> {
        let limit = self.geometry().bottom_limit_y;
        if !self.cursor.fits(style.height, limit) && !self.cursor.at_page_top() {
            self.break_page()?;
        }
        Ok(())
    }

    /// One line of wrapped text with its baseline at the cursor. Empty lines only take
    /// up space
    fn line(&mut self, text: &str, x: Mm, style: &TextStyle) -> Result<()> {
        self.ensure_line_room()?;
        if !text.is_empty() {
            self.canvas.draw_text(
                self.cursor.page(),
                TextRun::new(text, x, self.cursor.y(), style),
            );
        }
        self.cursor.advance(style.line_height);
        Ok(())
    }

    /// A filled bar across the printable width with a single line of text on it
    fn bar(&mut self, text: &str, style: &BannerStyle, fill: Colour) -> Result<()> {
        if let Some(overflow) = self.engine.bar_overflow(text, style) {
            log::warn!(
                "{text:?} runs {:.1}mm past the right margin on page {}",
                overflow.0,
                self.cursor.page_number()
            );
        }
        self.ensure_room_for(style)?;
        let geometry = self.geometry();
        let top = self.cursor.y();
        let page = self.cursor.page();

        self.canvas.draw_rect(
            page,
            FilledRect {
                x: geometry.margin_left,
                y: top,
                width: geometry.printable_width(),
                height: style.height,
                fill,
            },
        );
        let font_height: Mm = style.text.font_size.into();
        self.canvas.draw_text(
            page,
            TextRun::new(
                text,
                geometry.margin_left + style.inset,
                top + style.height / 2.0 + font_height * BASELINE_DROP,
                &style.text,
            ),
        );
        self.cursor.advance(style.height + style.gap_after);
        Ok(())
    }

    /// Stamp every page with its number now that the total is known
    fn finish(self) -> usize {
        let Run {
            decoration,
            canvas,
            pages,
            ..
        } = self;
        let total = pages.len();
        canvas.set_layer(Layer::Chrome);
        for (i, page) in pages.into_iter().enumerate() {
            decoration.stamp_page_number(page, i + 1, total, &mut *canvas);
        }
        canvas.set_layer(Layer::Content);
        log::debug!("laid out {total} page(s)");
        total
    }
}
