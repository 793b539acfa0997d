use crate::canvas::{DrawCommand, Layer, TextRun};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::*;

/// A single laid-out page: its draw commands, split into the repeating chrome and the
/// content that flowed onto it
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based position of the page in the document
    pub number: usize,
    pub size: PageSize,
    /// Header band, footer, watermark and page-number label
    pub chrome: Vec<DrawCommand>,
    /// The laid-out blocks, in the order they were drawn
    pub content: Vec<DrawCommand>,
}

impl Page {
    pub fn new(number: usize, size: PageSize) -> Page {
        Page {
            number,
            size,
            chrome: Vec::new(),
            content: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, layer: Layer, command: DrawCommand) {
        match layer {
            Layer::Chrome => self.chrome.push(command),
            Layer::Content => self.content.push(command),
        }
    }

    /// Every command on the page in paint order: chrome first so that it sits behind
    /// the content
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.chrome.iter().chain(self.content.iter())
    }

    /// The text runs of the laid-out content, skipping chrome
    pub fn content_text(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(DrawCommand::as_text)
    }

    /// The text runs of the repeating chrome
    pub fn chrome_text(&self) -> impl Iterator<Item = &TextRun> {
        self.chrome.iter().filter_map(DrawCommand::as_text)
    }

    pub fn width(&self) -> Mm {
        self.size.0
    }

    pub fn height(&self) -> Mm {
        self.size.1
    }

    pub(crate) fn media_box(&self) -> Rect {
        Rect::page(self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::FilledRect;
    use crate::colour::colours;
    use crate::geometry::TextStyle;
    use crate::pagesize::A4;

    #[test]
    fn chrome_is_painted_first() {
        let mut page = Page::new(1, A4);
        let style = TextStyle::new(Pt(11.0), Mm(5.5));
        page.push(
            Layer::Content,
            DrawCommand::Text(TextRun::new("body", Mm(20.0), Mm(35.0), &style)),
        );
        page.push(
            Layer::Chrome,
            DrawCommand::Rect(FilledRect {
                x: Mm(0.0),
                y: Mm(0.0),
                width: Mm(210.0),
                height: Mm(22.0),
                fill: colours::VIOLET,
            }),
        );

        let commands: Vec<_> = page.commands().collect();
        assert!(matches!(commands[0], DrawCommand::Rect(_)));
        assert!(matches!(commands[1], DrawCommand::Text(_)));
        assert_eq!(page.content_text().count(), 1);
        assert_eq!(page.chrome_text().count(), 0);
    }
}
