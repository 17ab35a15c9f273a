//! Small PDFs built on the fly for tests.
//!
//! Every page is 200×100 points with a blue 50×50 square whose lower-left
//! corner sits at (10 + 20·i, 10) in PDF space, i being the page index.

use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

pub const PAGE_WIDTH: i64 = 200;
pub const PAGE_HEIGHT: i64 = 100;

pub fn build(pages: usize, title: Option<&str>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for i in 0..pages {
        let ops = format!("0 0 1 rg {} 10 50 50 re f", 10 + 20 * i);
        let content_id = doc.add_object(Stream::new(dictionary! {}, ops.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }
    doc
}

pub fn pdf_bytes(pages: usize, title: Option<&str>) -> Vec<u8> {
    let mut buf = Vec::new();
    build(pages, title).save_to(&mut buf).unwrap();
    buf
}

pub fn write_pdf(dir: &Path, name: &str, pages: usize, title: Option<&str>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(pages, title)).unwrap();
    path
}
