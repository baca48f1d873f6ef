//! Google Docs export archive access.
//!
//! "Download as web page" produces a zip holding one HTML file and an
//! `images/` folder. Entries are matched by case-insensitive suffix only;
//! nothing else about the layout is assumed.

use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::Result;

/// Image extensions extracted by default.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png"];

/// An opened export archive.
pub struct DocArchive<R> {
    archive: ZipArchive<R>,
    /// Entry names in central-directory order.
    names: Vec<String>,
    /// Upper-cased suffixes including the dot, e.g. `.PNG`.
    image_suffixes: Vec<String>,
}

impl DocArchive<File> {
    /// Open an archive from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> DocArchive<R> {
    /// Open an archive from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            names.push(file.name().to_string());
        }

        let mut doc = Self {
            archive,
            names,
            image_suffixes: Vec::new(),
        };
        doc.set_image_extensions(DEFAULT_IMAGE_EXTENSIONS);
        Ok(doc)
    }

    /// Choose which extensions count as images (`"png"` or `".png"`).
    pub fn with_image_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.set_image_extensions(extensions);
        self
    }

    /// In-place form of [`with_image_extensions`](Self::with_image_extensions).
    pub fn set_image_extensions<S: AsRef<str>>(&mut self, extensions: &[S]) {
        self.image_suffixes = extensions
            .iter()
            .map(|ext| format!(".{}", ext.as_ref().trim_start_matches('.').to_ascii_uppercase()))
            .collect();
    }

    /// Entry names as stored, in archive order.
    pub fn entry_names(&self) -> &[String] {
        &self.names
    }

    /// Read the bytes of one entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(name)?;
        let mut contents = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Name of the HTML document entry, if any.
    pub fn html_entry(&self) -> Option<&str> {
        let mut matches = self.names.iter().filter(|n| has_suffix(n, ".HTML"));
        let first = matches.next()?;
        let ignored: Vec<_> = matches.map(String::as_str).collect();
        if !ignored.is_empty() {
            log::warn!("archive has several HTML entries, using {first}, ignoring {ignored:?}");
        }
        Some(first.as_str())
    }

    /// Read the HTML document.
    ///
    /// Returns `Ok(None)` when no entry ends in `.html` (any case), so a
    /// caller can tell an export without a document from a broken archive.
    pub fn extract_html(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(name) = self.html_entry().map(str::to_string) else {
            return Ok(None);
        };
        self.read_entry(&name).map(Some)
    }

    /// Names of the image entries, in archive order.
    pub fn image_entries(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|n| self.image_suffixes.iter().any(|s| has_suffix(n, s)))
            .map(String::as_str)
            .collect()
    }

    /// Copy every image entry to `output_dir`, keeping its archive path.
    ///
    /// Parent directories are created as needed. Entries whose names would
    /// land outside `output_dir` are skipped. Returns the written paths.
    pub fn extract_images(&mut self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let names: Vec<String> = self.image_entries().into_iter().map(str::to_string).collect();
        let mut written = Vec::with_capacity(names.len());

        for name in names {
            let mut file = self.archive.by_name(&name)?;
            let Some(relative) = file.enclosed_name() else {
                log::warn!("skipping image with unsafe path: {name}");
                continue;
            };

            let dest = output_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&dest)?;
            io::copy(&mut file, &mut out)?;

            log::debug!("extracted {name}");
            written.push(dest);
        }

        Ok(written)
    }
}

fn has_suffix(name: &str, upper_suffix: &str) -> bool {
    name.to_ascii_uppercase().ends_with(upper_suffix)
}
