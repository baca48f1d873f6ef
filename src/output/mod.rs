//! Page output.
//!
//! Each page root is pretty-printed to `page_<i>.html` inside a freshly
//! created output directory. The directory must not exist beforehand, so
//! a rerun never silently mixes old and new pages.

mod serialize;

pub use serialize::{escape_attr, escape_text, prettify, to_html};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::dom::{ArenaDom, NodeId};
use crate::error::{Error, Result};

/// How pages are rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageFormat<'a> {
    /// Wrap each page in a full document with `<head>`.
    pub standalone: bool,
    /// Document title prefix for standalone pages.
    pub title: &'a str,
    /// Stylesheet linked from standalone pages.
    pub stylesheet_href: Option<&'a str>,
}

/// File name of the page at `index`.
pub fn page_file_name(index: usize) -> String {
    format!("page_{index}.html")
}

/// Create the output directory, failing if it already exists.
///
/// Missing parent directories are created.
pub fn create_output_dir(dir: &Path) -> Result<()> {
    if let Some(parent) = dir.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(Error::OutputExists(dir.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Render one page root to HTML text.
pub fn render_page(dom: &ArenaDom, root: NodeId, index: usize, format: &PageFormat) -> String {
    if !format.standalone {
        return prettify(dom, root);
    }

    let mut doc = String::new();
    doc.push_str("<!DOCTYPE html>\n<html>\n <head>\n  <meta charset=\"utf-8\"/>\n  <title>\n   ");
    doc.push_str(&escape_text(&format!("{} - page {index}", format.title)));
    doc.push_str("\n  </title>\n");
    if let Some(href) = format.stylesheet_href {
        doc.push_str("  <link rel=\"stylesheet\" href=\"");
        doc.push_str(&escape_attr(href));
        doc.push_str("\"/>\n");
    }
    doc.push_str(" </head>\n");
    doc.push_str(&serialize::prettify_at(dom, root, 1));
    doc.push_str("</html>\n");
    doc
}

/// Write every page into `dir` as `page_<i>.html`, in order.
///
/// `dir` must already exist (see [`create_output_dir`]).
pub fn write_pages(
    dom: &ArenaDom,
    pages: &[NodeId],
    dir: &Path,
    format: &PageFormat,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(pages.len());

    for (index, &root) in pages.iter().enumerate() {
        let path = dir.join(page_file_name(index));
        fs::write(&path, render_page(dom, root, index, format))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
