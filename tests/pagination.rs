use booklet_gen::layout::{layout, NoChrome, PageFlowEngine, StandardChrome};
use booklet_gen::*;

fn geometry() -> PageGeometry {
    PageGeometry::a4()
}

fn chrome() -> StandardChrome {
    StandardChrome::new(&geometry(), "Catholic Funeral Plan")
        .with_footer("St. Patrick's Parish")
        .with_watermark("In Loving Memory")
}

/// A mix of every block kind, long enough to run over several pages
fn long_plan() -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    for i in 0..6 {
        blocks.push(ContentBlock::heading(HeadingLevel::H2, format!("Section {i}")));
        blocks.push(ContentBlock::paragraph(lipsum::lipsum(150)));
        blocks.push(ContentBlock::heading(HeadingLevel::H3, "Readings"));
        blocks.push(ContentBlock::bullets(
            (0..8).map(|n| format!("Item {n}: {}", lipsum::lipsum(12))),
        ));
        blocks.push(ContentBlock::banner("Important Notes", colours::SLATE));
        blocks.push(ContentBlock::heading(HeadingLevel::H4, "Pastoral Notes"));
        blocks.push(ContentBlock::paragraph(lipsum::lipsum(40)));
    }
    blocks
}

#[test]
fn layout_is_deterministic() {
    let blocks = long_plan();
    let first = layout(&blocks, &geometry(), &chrome()).unwrap();
    let second = layout(&blocks, &geometry(), &chrome()).unwrap();
    assert!(first.page_count() > 2);
    assert_eq!(first.pages(), second.pages());

    let mut a = Vec::new();
    let mut b = Vec::new();
    let date = chrono::DateTime::parse_from_rfc3339("2024-11-02T10:00:00+01:00").unwrap();
    for (doc, out) in [(first, &mut a), (second, &mut b)] {
        let mut doc = doc;
        let mut info = Info::new();
        info.title("Catholic Funeral Plan").created(date);
        doc.set_info(info);
        doc.write(out).unwrap();
    }
    assert_eq!(a, b);
}

#[test]
fn content_never_passes_the_bottom_threshold() {
    let geometry = geometry();
    let doc = layout(&long_plan(), &geometry, &chrome()).unwrap();
    for page in doc.pages() {
        for command in &page.content {
            let y = command.y();
            assert!(
                y >= geometry.top_start_y && y <= geometry.bottom_limit_y,
                "page {} has content at y={y}",
                page.number
            );
        }
    }
}

#[test]
fn cursor_only_moves_down_within_a_page() {
    let doc = layout(&long_plan(), &geometry(), &NoChrome).unwrap();
    for page in doc.pages() {
        let ys: Vec<Mm> = page.content.iter().map(DrawCommand::y).collect();
        for pair in ys.windows(2) {
            assert!(pair[0] <= pair[1], "page {} moves up: {pair:?}", page.number);
        }
    }
}

#[test]
fn every_footer_reports_the_real_page_count() {
    let doc = layout(&long_plan(), &geometry(), &chrome()).unwrap();
    let total = doc.page_count();
    for (i, page) in doc.pages().iter().enumerate() {
        assert_eq!(page.number, i + 1);
        let labels: Vec<&str> = page
            .chrome_text()
            .map(|run| run.text.as_str())
            .filter(|text| text.starts_with("Page "))
            .collect();
        assert_eq!(labels, vec![format!("Page {} of {total}", i + 1)]);
    }
}

#[test]
fn chrome_is_repeated_identically_on_every_page() {
    let doc = layout(&long_plan(), &geometry(), &chrome()).unwrap();
    let first = &doc.pages()[0];
    let undecorated = |page: &Page| -> Vec<DrawCommand> {
        page.chrome
            .iter()
            .filter(|command| {
                command
                    .as_text()
                    .map_or(true, |run| !run.text.starts_with("Page "))
            })
            .cloned()
            .collect()
    };
    for page in &doc.pages()[1..] {
        assert_eq!(undecorated(page), undecorated(first));
    }
}

#[test]
fn empty_input_gives_one_decorated_page() {
    let doc = layout(&[], &geometry(), &chrome()).unwrap();
    assert_eq!(doc.page_count(), 1);
    let page = &doc.pages()[0];
    assert!(page.content.is_empty());
    assert!(page.chrome_text().any(|run| run.text == "Page 1 of 1"));
}

#[test]
fn a_short_paragraph_is_one_text_command() {
    let doc = layout(&[ContentBlock::paragraph("Hello")], &geometry(), &NoChrome).unwrap();
    assert_eq!(doc.page_count(), 1);
    let page = &doc.pages()[0];
    assert_eq!(page.commands().count(), 1);
    let runs: Vec<&TextRun> = page.content_text().collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "Hello");
    assert_eq!(runs[0].y, geometry().top_start_y);
}

#[test]
fn a_long_list_breaks_onto_a_new_page() {
    let geometry = geometry();
    let needed = (geometry.printable_height().0 / geometry.bullet.text.line_height.0) as usize;
    let items: Vec<String> = (0..needed + 10).map(|i| format!("Intention {i}")).collect();
    let last = items.last().cloned().unwrap();

    let doc = layout(&[ContentBlock::bullets(items)], &geometry, &NoChrome).unwrap();
    assert!(doc.page_count() >= 2);
    let final_page = doc.pages().last().unwrap();
    assert!(final_page.content_text().any(|run| run.text == last));
    assert!(doc.pages()[0].content_text().all(|run| run.text != last));
}

#[test]
fn a_wrapped_bullet_item_continues_on_the_next_page() {
    let geometry = geometry();
    let line = geometry.paragraph.line_height.0;
    // leave the cursor between half a line and a line and a half above the threshold
    let lines = ((geometry.printable_height().0 - geometry.block_gap.0) / line - 0.5) as usize;
    let filler = vec!["Eternal rest grant unto them, O Lord."; lines].join("\n");
    let item = lipsum::lipsum(150);
    let blocks = [
        ContentBlock::paragraph(filler),
        ContentBlock::bullets([item.as_str()]),
    ];

    let doc = layout(&blocks, &geometry, &NoChrome).unwrap();
    assert_eq!(doc.page_count(), 2);

    let glyph = geometry.bullet.glyph.as_str();
    let glyphs: Vec<usize> = doc
        .pages()
        .iter()
        .map(|page| page.content_text().filter(|run| run.text == glyph).count())
        .collect();
    assert_eq!(glyphs, vec![1, 0]);

    let item_x = geometry.margin_left + geometry.bullet.indent;
    let first_page_item_lines = doc.pages()[0]
        .content_text()
        .filter(|run| run.x == item_x)
        .count();
    assert!(first_page_item_lines >= 1);

    let continued: Vec<&TextRun> = doc.pages()[1].content_text().collect();
    assert!(continued.len() > 1);
    assert_eq!(continued[0].y, geometry.top_start_y);
    assert!(continued.iter().all(|run| run.x == item_x));
}

#[test]
fn a_heading_near_the_bottom_moves_to_the_next_page() {
    let geometry = geometry();
    // fill the first page until the cursor is within one line of the threshold
    let lines = ((geometry.printable_height().0 - geometry.paragraph.line_height.0)
        / geometry.paragraph.line_height.0) as usize;
    let filler = vec!["Eternal rest grant unto them, O Lord."; lines].join("\n");
    let blocks = [
        ContentBlock::paragraph(filler),
        ContentBlock::heading(HeadingLevel::H2, "Readings"),
        ContentBlock::paragraph("The souls of the just are in the hand of God."),
    ];

    let doc = layout(&blocks, &geometry, &NoChrome).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert!(doc.pages()[0].content_text().all(|run| run.text != "Readings"));

    let second = &doc.pages()[1];
    match &second.content[0] {
        DrawCommand::Rect(rect) => {
            assert_eq!(rect.y, geometry.top_start_y);
            assert!(rect.y + rect.height <= geometry.bottom_limit_y);
        }
        other => panic!("expected the heading bar first, got {other:?}"),
    }
    assert_eq!(doc.outline.entries[0].page_index, 1);
}

#[test]
fn invalid_geometry_fails_before_drawing() {
    let mut bad = geometry();
    bad.bottom_limit_y = Mm(300.0);
    match layout(&[ContentBlock::paragraph("Hello")], &bad, &NoChrome) {
        Err(BookletError::InvalidGeometry { reason }) => assert!(reason.contains("bottom_limit_y")),
        other => panic!("expected invalid geometry, got {other:?}"),
    }
}

#[test]
fn unknown_block_kinds_are_reported() {
    let json = r#"[
        { "kind": "paragraph", "text": "Hello" },
        { "kind": "image", "src": "photo.jpg" }
    ]"#;
    match blocks_from_json(json) {
        Err(BookletError::UnsupportedBlockKind { kind }) => assert_eq!(kind, "image"),
        other => panic!("expected an unsupported block, got {other:?}"),
    }
}

#[test]
fn engines_can_run_side_by_side() {
    let engine = PageFlowEngine::new(geometry()).unwrap();
    let blocks = long_plan();
    let expected = engine.layout(&blocks, &NoChrome).unwrap().page_count();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.layout(&blocks, &NoChrome).unwrap().page_count()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn plans_render_as_every_document_kind() {
    let plan = FuneralPlan::from_json(include_str!("../demos/plan.json")).unwrap();
    for kind in [DocumentKind::Flyer, DocumentKind::Checklist, DocumentKind::Booklet] {
        let chrome = StandardChrome::new(&geometry(), plan.document_title(kind));
        let doc = layout(&plan.blocks(kind), &geometry(), &chrome).unwrap();
        assert!(doc.page_count() >= 1);
        if kind == DocumentKind::Booklet {
            assert!(doc.page_count() > 1);
            assert!(doc.outline.entries.len() >= 5);
        }
    }
}
