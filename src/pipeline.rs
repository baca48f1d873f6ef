//! End-to-end unpacking of an exported document.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::archive::{DEFAULT_IMAGE_EXTENSIONS, DocArchive};
use crate::css::Stylesheet;
use crate::dom::parse_html;
use crate::error::{Error, Result};
use crate::normalize::{self, BASIC_TAGS, DEFAULT_MERGE_TAG};
use crate::output::{self, PageFormat};

/// Configuration for [`Unpacker`].
#[derive(Debug, Clone)]
pub struct UnpackConfig {
    /// Tags whose `class` attribute is dropped.
    pub basic_tags: Vec<String>,
    /// Tags whose classes are flattened into inline `style`.
    pub inline_tags: Vec<String>,
    /// Tags whose adjacent runs are merged, in order.
    pub merge_tags: Vec<String>,
    /// Tags stripped of every attribute.
    pub clear_attrs: Vec<String>,
    /// File extensions treated as images (default `png`).
    pub image_extensions: Vec<String>,
    /// Write full documents instead of bare `<body>` fragments.
    pub standalone: bool,
    /// Stylesheet linked from standalone pages.
    pub stylesheet_href: Option<String>,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self {
            basic_tags: BASIC_TAGS.iter().map(|t| t.to_string()).collect(),
            inline_tags: vec!["span".to_string()],
            merge_tags: vec![DEFAULT_MERGE_TAG.to_string()],
            clear_attrs: Vec::new(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            standalone: false,
            stylesheet_href: None,
        }
    }
}

impl UnpackConfig {
    pub fn with_basic_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.basic_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inline_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inline_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_merge_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merge_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_clear_attrs<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear_attrs = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_stylesheet_href(mut self, href: impl Into<String>) -> Self {
        self.stylesheet_href = Some(href.into());
        self
    }
}

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Unpacked {
    /// The newly created output directory.
    pub output_dir: PathBuf,
    /// Written page files, page 0 first.
    pub pages: Vec<PathBuf>,
    /// Extracted image files, in archive order.
    pub images: Vec<PathBuf>,
}

/// Turns an export archive into a directory of page files.
///
/// # Example
///
/// ```no_run
/// use gdoc_pages::{UnpackConfig, Unpacker};
///
/// let config = UnpackConfig::default().with_standalone(true);
/// match Unpacker::new().with_config(config).unpack("Guide.zip", "out")? {
///     Some(run) => println!("{} pages", run.pages.len()),
///     None => eprintln!("no HTML in archive"),
/// }
/// # Ok::<(), gdoc_pages::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unpacker {
    config: UnpackConfig,
}

impl Unpacker {
    /// Create an unpacker with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the unpacker with custom settings.
    pub fn with_config(mut self, config: UnpackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &UnpackConfig {
        &self.config
    }

    /// Unpack the archive at `input` into `output_root/<input stem>`.
    ///
    /// Returns `Ok(None)` when the archive holds no HTML document; nothing
    /// is created in that case.
    pub fn unpack(
        &self,
        input: impl AsRef<Path>,
        output_root: impl AsRef<Path>,
    ) -> Result<Option<Unpacked>> {
        let input = input.as_ref();
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidInput(format!("no file name in {}", input.display())))?;

        let mut archive = DocArchive::<File>::open(input)?;
        self.unpack_archive(&mut archive, stem, output_root.as_ref())
    }

    /// Unpack an already opened archive into `output_root/<stem>`.
    pub fn unpack_archive<R: Read + Seek>(
        &self,
        archive: &mut DocArchive<R>,
        stem: &str,
        output_root: &Path,
    ) -> Result<Option<Unpacked>> {
        let Some(html) = archive.extract_html()? else {
            log::warn!("no HTML document in archive for {stem}");
            return Ok(None);
        };

        let mut dom = parse_html(&html);
        let body = dom.find_by_tag("body").ok_or(Error::MissingBody)?;
        let sheet = Stylesheet::from_document(&dom)?;
        log::debug!("parsed {} nodes, {} CSS rules", dom.len(), sheet.rules.len());

        // All fallible passes run before anything touches the filesystem.
        let pages = normalize::normalize(&mut dom, body, &sheet, &self.config)?;

        let output_dir = output_root.join(stem);
        output::create_output_dir(&output_dir)?;

        let format = PageFormat {
            standalone: self.config.standalone,
            title: stem,
            stylesheet_href: self.config.stylesheet_href.as_deref(),
        };
        let pages = output::write_pages(&dom, &pages, &output_dir, &format)?;

        archive.set_image_extensions(&self.config.image_extensions);
        let images = archive.extract_images(&output_dir)?;

        log::info!(
            "unpacked {stem}: {} pages, {} images into {}",
            pages.len(),
            images.len(),
            output_dir.display()
        );

        Ok(Some(Unpacked {
            output_dir,
            pages,
            images,
        }))
    }
}

/// Unpack `input` into `output_root` with the default configuration.
pub fn unpack(input: impl AsRef<Path>, output_root: impl AsRef<Path>) -> Result<Option<Unpacked>> {
    Unpacker::new().unpack(input, output_root)
}
