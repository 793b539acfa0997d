use crate::canvas::{Align, Canvas, FilledRect, PageHandle, TextRun};
use crate::colour::{colours, Colour};
use crate::geometry::{PageGeometry, TextStyle, BASELINE_DROP};
use crate::units::*;

/// Repeating page decoration: header band, footer, watermark and page numbers.
///
/// [`decorate`](Decoration::decorate) runs once for every page as soon as it is
/// created, before any content lands on it. The total page count is not known at that
/// point, so numbering happens in a second pass: once layout is finished,
/// [`stamp_page_number`](Decoration::stamp_page_number) is called for every page with
/// the final total.
pub trait Decoration {
    /// Draw the chrome of a freshly created page. `number` is 1-based
    fn decorate(&self, page: PageHandle, number: usize, canvas: &mut dyn Canvas);

    /// Draw the page-number label once the total is known
    fn stamp_page_number(
        &self,
        _page: PageHandle,
        _number: usize,
        _total: usize,
        _canvas: &mut dyn Canvas,
    ) {
    }
}

/// Plain callbacks can decorate pages; they never number them
impl<F> Decoration for F
where
    F: Fn(PageHandle, usize, &mut dyn Canvas),
{
    fn decorate(&self, page: PageHandle, number: usize, canvas: &mut dyn Canvas) {
        self(page, number, canvas)
    }
}

/// No decoration at all
#[derive(Debug, Default, Copy, Clone)]
pub struct NoChrome;

impl Decoration for NoChrome {
    fn decorate(&self, _page: PageHandle, _number: usize, _canvas: &mut dyn Canvas) {}
}

pub const DEFAULT_PAGE_LABEL: &str = "Page {page} of {total}";

/// Space between the bottom of the header band and the first baseline
const HEADER_GAP: Mm = Mm(13.0);
/// Space between the bottom threshold and the footer rule
const FOOTER_RULE_GAP: Mm = Mm(10.0);
/// Space between the footer rule and the footer baseline
const FOOTER_TEXT_GAP: Mm = Mm(5.0);

/// `preferred`, or `share` of `room` when that is smaller
fn fit(preferred: Mm, room: Mm, share: f32) -> Mm {
    Mm(preferred.0.min(room.0 * share))
}

/// The booklet look: a coloured header band carrying the document title, a footer rule
/// with optional footer text and a "Page i of N" label, and an optional diagonal
/// watermark behind the content
#[derive(Debug, Clone)]
pub struct StandardChrome {
    title: String,
    page_width: Mm,
    page_height: Mm,
    margin_left: Mm,
    margin_right: Mm,
    header_height: Mm,
    header_fill: Colour,
    title_style: TextStyle,
    footer_rule_y: Mm,
    footer_baseline: Mm,
    footer_style: TextStyle,
    footer_text: Option<String>,
    watermark: Option<String>,
    watermark_style: TextStyle,
    page_label: String,
}

impl StandardChrome {
    /// Chrome sized for `geometry`. The header band ends 13mm above `top_start_y` and
    /// the footer rule sits 10mm below `bottom_limit_y`, with the footer text 5mm under
    /// it; both gaps shrink when the margins are too tight for them
    pub fn new<S: Into<String>>(geometry: &PageGeometry, title: S) -> StandardChrome {
        let header_height = geometry.top_start_y - fit(HEADER_GAP, geometry.top_start_y, 0.5);
        let footer_room = geometry.page_height - geometry.bottom_limit_y;
        let footer_rule_y = geometry.bottom_limit_y + fit(FOOTER_RULE_GAP, footer_room, 0.4);
        let footer_baseline = footer_rule_y + fit(FOOTER_TEXT_GAP, footer_room, 0.2);
        StandardChrome {
            title: title.into(),
            page_width: geometry.page_width,
            page_height: geometry.page_height,
            margin_left: geometry.margin_left,
            margin_right: geometry.margin_right,
            header_height,
            header_fill: colours::VIOLET,
            title_style: TextStyle::new(Pt(16.0), Mm(8.0))
                .bold()
                .coloured(colours::WHITE),
            footer_rule_y,
            footer_baseline,
            footer_style: TextStyle::new(Pt(9.0), Mm(4.5)).coloured(colours::RULE_GREY),
            footer_text: None,
            watermark: None,
            watermark_style: TextStyle::new(Pt(60.0), Mm(25.0))
                .bold()
                .coloured(colours::WATERMARK_GREY),
            page_label: DEFAULT_PAGE_LABEL.to_string(),
        }
    }

    /// Text drawn at the left end of the footer, e.g. the church name
    pub fn with_footer<S: Into<String>>(mut self, text: S) -> StandardChrome {
        self.footer_text = Some(text.into());
        self
    }

    pub fn with_watermark<S: Into<String>>(mut self, text: S) -> StandardChrome {
        self.watermark = Some(text.into());
        self
    }

    pub fn with_header_fill(mut self, fill: Colour) -> StandardChrome {
        self.header_fill = fill;
        self
    }

    /// Template for the page-number label; `{page}` and `{total}` are substituted
    pub fn with_page_label<S: Into<String>>(mut self, template: S) -> StandardChrome {
        self.page_label = template.into();
        self
    }

    pub fn page_label(&self, number: usize, total: usize) -> String {
        self.page_label
            .replace("{page}", &number.to_string())
            .replace("{total}", &total.to_string())
    }
}

impl Decoration for StandardChrome {
    fn decorate(&self, page: PageHandle, _number: usize, canvas: &mut dyn Canvas) {
        if let Some(watermark) = &self.watermark {
            canvas.draw_text(
                page,
                TextRun::new(
                    watermark.as_str(),
                    self.page_width / 2.0,
                    self.page_height / 2.0,
                    &self.watermark_style,
                )
                .aligned(Align::Centre)
                .rotated(45.0),
            );
        }

        canvas.draw_rect(
            page,
            FilledRect {
                x: Mm(0.0),
                y: Mm(0.0),
                width: self.page_width,
                height: self.header_height,
                fill: self.header_fill,
            },
        );
        let title_size: Mm = self.title_style.font_size.into();
        canvas.draw_text(
            page,
            TextRun::new(
                self.title.as_str(),
                self.page_width / 2.0,
                self.header_height / 2.0 + title_size * BASELINE_DROP,
                &self.title_style,
            )
            .aligned(Align::Centre),
        );

        canvas.draw_rect(
            page,
            FilledRect {
                x: self.margin_left,
                y: self.footer_rule_y,
                width: self.page_width - self.margin_left - self.margin_right,
                height: Mm(0.3),
                fill: colours::RULE_GREY,
            },
        );
        if let Some(footer) = &self.footer_text {
            canvas.draw_text(
                page,
                TextRun::new(
                    footer.as_str(),
                    self.margin_left,
                    self.footer_baseline,
                    &self.footer_style,
                ),
            );
        }
    }

    fn stamp_page_number(
        &self,
        page: PageHandle,
        number: usize,
        total: usize,
        canvas: &mut dyn Canvas,
    ) {
        canvas.draw_text(
            page,
            TextRun::new(
                self.page_label(number, total),
                self.page_width - self.margin_right,
                self.footer_baseline,
                &self.footer_style,
            )
            .aligned(Align::Right),
        );
    }
}
