//! End-to-end unpacking tests.
//!
//! Each test builds a Google Docs style export zip in a temp directory and
//! runs the public API against it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use gdoc_pages::{DocArchive, Error, UnpackConfig, Unpacker, unpack};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRfake image bytes";

/// Markup shaped like a real "Download as web page" export.
const EXPORT_HTML: &str = concat!(
    r#"<html><head><meta content="text/html; charset=UTF-8" http-equiv="content-type">"#,
    r#"<style type="text/css">@import url('https://themes.googleusercontent.com/fonts/css?kit=abc');"#,
    r#"ol{margin:0;padding:0}.c1{color:#000000;font-weight:400}.c2{font-weight:700}"#,
    r#".c3{padding-top:0pt;height:11pt}.title{font-size:26pt}</style></head>"#,
    r#"<body class="c4 doc-content">"#,
    r#"<p class="title"><span class="c1">Guide</span></p>"#,
    r#"<h6 class="c3"><span class="c2">Herp</span></h6>"#,
    r#"<h6 class="c3"><span class="c2">Derp</span></h6>"#,
    r#"<p class="c3"><span class="c1"><img alt="" src="images/image1.png"></span></p>"#,
    r#"<hr style="page-break-before:always;display:none;">"#,
    r#"<h1 class="c3"><span>Second</span></h1>"#,
    r#"</body></html>"#,
);

fn write_zip(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let file = fs::File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (entry, data) in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
    path
}

fn export_zip(dir: &Path) -> PathBuf {
    write_zip(
        dir,
        "Guide.zip",
        &[
            ("Guide.html", EXPORT_HTML.as_bytes()),
            ("images/image1.png", PNG),
        ],
    )
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_unpack_layout() {
    let temp = TempDir::new().unwrap();
    let input = export_zip(temp.path());
    let out = temp.path().join("site");

    let run = unpack(&input, &out).unwrap().unwrap();

    let dir = out.join("Guide");
    assert_eq!(run.output_dir, dir);
    assert_eq!(run.pages, vec![dir.join("page_0.html"), dir.join("page_1.html")]);
    assert_eq!(run.images, vec![dir.join("images/image1.png")]);
    assert!(!dir.join("Guide.html").exists());
}

#[test]
fn test_images_byte_identical() {
    let temp = TempDir::new().unwrap();
    let input = write_zip(
        temp.path(),
        "doc.zip",
        &[("doc.html", b"<p>x</p>"), ("images/fig1.png", PNG)],
    );

    unpack(&input, temp.path().join("out")).unwrap().unwrap();

    assert_eq!(fs::read(temp.path().join("out/doc/images/fig1.png")).unwrap(), PNG);
}

#[test]
fn test_non_image_entries_ignored() {
    let temp = TempDir::new().unwrap();
    let input = write_zip(
        temp.path(),
        "doc.zip",
        &[("doc.html", b"<p>x</p>"), ("images/a.gif", b"GIF"), ("notes.txt", b"n")],
    );

    let run = unpack(&input, temp.path()).unwrap().unwrap();

    assert!(run.images.is_empty());
    assert!(!temp.path().join("doc/images").exists());
}

// ============================================================================
// Page content
// ============================================================================

#[test]
fn test_first_page_normalized() {
    let temp = TempDir::new().unwrap();
    let input = export_zip(temp.path());

    let run = unpack(&input, temp.path()).unwrap().unwrap();
    let page0 = fs::read_to_string(&run.pages[0]).unwrap();

    let expected = concat!(
        "<body class=\"c4 doc-content\">\n",
        " <p>\n",
        "  <span style=\"color:#000000;font-weight:400\">\n",
        "   Guide\n",
        "  </span>\n",
        " </p>\n",
        " <h6>\n",
        "  <span style=\"font-weight:700\">\n",
        "   Herp\n",
        "  </span>\n",
        "  <br/>\n",
        "  <span style=\"font-weight:700\">\n",
        "   Derp\n",
        "  </span>\n",
        " </h6>\n",
        " <p>\n",
        "  <span style=\"color:#000000;font-weight:400\">\n",
        "   <img alt=\"\" src=\"images/image1.png\"/>\n",
        "  </span>\n",
        " </p>\n",
        "</body>\n",
    );
    assert_eq!(page0, expected);
}

#[test]
fn test_second_page_after_rule() {
    let temp = TempDir::new().unwrap();
    let input = export_zip(temp.path());

    let run = unpack(&input, temp.path()).unwrap().unwrap();
    let page1 = fs::read_to_string(&run.pages[1]).unwrap();

    assert_eq!(
        page1,
        "<body class=\"c4 doc-content\">\n <h1>\n  <span>\n   Second\n  </span>\n </h1>\n</body>\n"
    );
    assert!(!page1.contains("<hr"));
}

#[test]
fn test_rule_count_gives_page_count() {
    let temp = TempDir::new().unwrap();
    let input = write_zip(
        temp.path(),
        "many.zip",
        &[("many.html", b"<p>a</p><hr><p>b</p><hr><hr><p>c</p>")],
    );

    let run = unpack(&input, temp.path()).unwrap().unwrap();

    assert_eq!(run.pages.len(), 4);
    let page2 = fs::read_to_string(&run.pages[2]).unwrap();
    assert_eq!(page2, "<body>\n</body>\n");
}

#[test]
fn test_standalone_pages() {
    let temp = TempDir::new().unwrap();
    let input = export_zip(temp.path());
    let config = UnpackConfig::default()
        .with_standalone(true)
        .with_stylesheet_href("../site.css");

    let run = Unpacker::new()
        .with_config(config)
        .unpack(&input, temp.path())
        .unwrap()
        .unwrap();

    let page1 = fs::read_to_string(&run.pages[1]).unwrap();
    assert!(page1.starts_with("<!DOCTYPE html>\n<html>\n <head>\n  <meta charset=\"utf-8\"/>\n"));
    assert!(page1.contains("   Guide - page 1\n"));
    assert!(page1.contains("<link rel=\"stylesheet\" href=\"../site.css\"/>"));
    assert!(page1.ends_with(" </body>\n</html>\n"));
}

#[test]
fn test_clear_attrs_and_extra_merge_tag() {
    let temp = TempDir::new().unwrap();
    let input = write_zip(
        temp.path(),
        "t.zip",
        &[(
            "t.html",
            br#"<h5>one</h5><h5>two</h5><table class="x" border="1"><tr><td>c</td></tr></table>"#,
        )],
    );
    let config = UnpackConfig::default()
        .with_merge_tags(["h5", "h6"])
        .with_clear_attrs(["table"]);

    let run = Unpacker::new()
        .with_config(config)
        .unpack(&input, temp.path())
        .unwrap()
        .unwrap();

    let page0 = fs::read_to_string(&run.pages[0]).unwrap();
    assert!(page0.contains(" <h5>\n  one\n  <br/>\n  two\n </h5>\n"));
    assert!(page0.contains(" <table>\n"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_html_returns_none() {
    let temp = TempDir::new().unwrap();
    let input = write_zip(temp.path(), "pics.zip", &[("images/a.png", PNG)]);
    let out = temp.path().join("out");

    assert!(unpack(&input, &out).unwrap().is_none());
    assert!(!out.join("pics").exists());
}

#[test]
fn test_rerun_refuses_existing_output() {
    let temp = TempDir::new().unwrap();
    let input = export_zip(temp.path());

    unpack(&input, temp.path()).unwrap().unwrap();

    match unpack(&input, temp.path()) {
        Err(Error::OutputExists(dir)) => assert_eq!(dir, temp.path().join("Guide")),
        other => panic!("expected OutputExists, got {other:?}"),
    }
}

#[test]
fn test_unknown_class_is_fatal() {
    let temp = TempDir::new().unwrap();
    let input = write_zip(
        temp.path(),
        "bad.zip",
        &[("bad.html", br#"<style>.c1{color:red}</style><p><span class="c9">x</span></p>"#)],
    );

    match unpack(&input, temp.path()) {
        Err(Error::StyleLookup(selector)) => assert_eq!(selector, ".c9"),
        other => panic!("expected StyleLookup, got {other:?}"),
    }
    assert!(!temp.path().join("bad").exists());
}

#[test]
fn test_malformed_css_is_fatal() {
    let temp = TempDir::new().unwrap();
    let input = write_zip(
        temp.path(),
        "css.zip",
        &[("css.html", b"<style>.c1{color:red}\n.c2 </style><p>x</p>")],
    );

    assert!(matches!(unpack(&input, temp.path()), Err(Error::Css { .. })));
}

#[test]
fn test_not_a_zip() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("fake.zip");
    fs::write(&input, "plain text").unwrap();

    assert!(matches!(unpack(&input, temp.path()), Err(Error::Zip(_))));
}

#[test]
fn test_missing_input_file() {
    let temp = TempDir::new().unwrap();
    let result = unpack(temp.path().join("absent.zip"), temp.path());
    assert!(matches!(result, Err(Error::Io(_))));
}

// ============================================================================
// Archive API
// ============================================================================

#[test]
fn test_archive_open_from_path() {
    let temp = TempDir::new().unwrap();
    let input = export_zip(temp.path());

    let mut archive = DocArchive::open(&input).unwrap();

    assert_eq!(archive.entry_names(), ["Guide.html", "images/image1.png"]);
    assert_eq!(archive.html_entry(), Some("Guide.html"));
    let html = archive.extract_html().unwrap().unwrap();
    assert_eq!(html, EXPORT_HTML.as_bytes());
}
