use std::fs::File;
use std::io::{self, BufWriter, Cursor, Read, Seek, SeekFrom, Write};

use booklet_gen::layout::{layout, StandardChrome};
use booklet_gen::*;

fn booklet() -> (FuneralPlan, Vec<ContentBlock>, String) {
    let plan = FuneralPlan::from_json(include_str!("../demos/plan.json")).unwrap();
    let blocks = plan.blocks(DocumentKind::Booklet);
    let title = plan.document_title(DocumentKind::Booklet);
    (plan, blocks, title)
}

#[test]
fn pdf_has_one_page_object_per_page_and_an_outline() {
    let (plan, blocks, title) = booklet();
    let geometry = PageGeometry::a4();
    let chrome = StandardChrome::new(&geometry, title.as_str())
        .with_footer(plan.church.clone().unwrap_or_default());
    let mut doc = layout(&blocks, &geometry, &chrome).unwrap();
    let mut info = Info::new();
    info.title(&title).author("St. Patrick's Parish");
    doc.set_info(info);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booklet.pdf");
    doc.write(BufWriter::new(File::create(&path).unwrap())).unwrap();

    let mut bytes = Vec::new();
    File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    // dictionaries are not compressed, so the structure can be read back as text
    let text = String::from_utf8_lossy(&bytes);
    assert_eq!(text.matches("/Type /Page\n").count() + text.matches("/Type /Page ").count(),
        doc.page_count());
    assert!(text.contains(&format!("/Count {}", doc.page_count())));
    assert!(text.contains("/Type /Outlines"));
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("/WinAnsiEncoding"));
    assert!(text.contains("(In Loving Memory of Mary Margaret O'Brien)"));
}

#[test]
fn pdf_without_sections_has_no_outline() {
    let geometry = PageGeometry::a4();
    let blocks = [ContentBlock::paragraph("Eternal rest grant unto them, O Lord.")];
    let doc = layout(&blocks, &geometry, &StandardChrome::new(&geometry, "Prayer")).unwrap();
    let mut out = Vec::new();
    doc.write(&mut out).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(!text.contains("/Outlines"));
}

#[test]
fn docx_round_trips_through_zip() {
    let (_, blocks, title) = booklet();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booklet.docx");
    let file = File::create(&path).unwrap();
    docx::write_docx(&blocks, &title, &PageGeometry::a4(), file).unwrap();

    let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut document)
        .unwrap();

    assert!(document.contains("In Loving Memory of Mary Margaret O&apos;Brien")
        || document.contains("In Loving Memory of Mary Margaret O'Brien"));
    assert!(document.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(document.contains("Wisdom 3:1-9"));
    assert!(document.contains("\u{2022}\tGathering Music"));

    let mut styles = String::new();
    archive
        .by_name("word/styles.xml")
        .unwrap()
        .read_to_string(&mut styles)
        .unwrap();
    for style in ["Title", "Heading1", "Heading2", "Heading3", "ListBullet", "Banner"] {
        assert!(styles.contains(&format!(r#"w:styleId="{style}""#)), "{style} missing");
    }
}

#[test]
fn geometry_files_drive_the_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a5.toml");
    let a5 = PageGeometry::for_page_size(pagesize::A5);
    std::fs::write(&path, a5.to_toml_string().unwrap()).unwrap();

    let loaded = PageGeometry::from_toml_file(&path).unwrap();
    assert_eq!(loaded, a5);

    let (_, blocks, title) = booklet();
    let chrome = StandardChrome::new(&loaded, title.as_str());
    let small = layout(&blocks, &loaded, &chrome).unwrap();
    let large = layout(&blocks, &PageGeometry::a4(), &chrome).unwrap();
    assert!(small.page_count() > large.page_count());
    assert_eq!(small.pages()[0].size, pagesize::A5);
}

/// A sink that accepts nothing, like a file on a full disk
struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }
}

impl Seek for FullDisk {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}

#[test]
fn buffered_pdf_write_failures_are_reported() {
    let geometry = PageGeometry::a4();
    let chrome = StandardChrome::new(&geometry, "Prayer");
    let doc = layout(&[ContentBlock::paragraph("Hello")], &geometry, &chrome).unwrap();
    // far smaller than the buffer, so only the flush reaches the sink
    match doc.write(BufWriter::new(FullDisk)) {
        Err(BookletError::Io(e)) => assert_eq!(e.to_string(), "no space left on device"),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn buffered_docx_write_failures_are_reported() {
    let blocks = [ContentBlock::paragraph("Hello")];
    let geometry = PageGeometry::a4();
    let result = docx::write_docx(&blocks, "Prayer", &geometry, BufWriter::new(FullDisk));
    assert!(result.is_err());

    // the same package written to memory succeeds and is flushed through
    let written = docx::write_docx(&blocks, "Prayer", &geometry, Cursor::new(Vec::new())).unwrap();
    assert!(!written.into_inner().is_empty());
}
