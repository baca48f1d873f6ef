//! # gdoc-pages
//!
//! Turns a Google Docs "web page" export (a zip holding one HTML file and
//! its images) into a directory of clean, paginated HTML pages.
//!
//! ## What it does
//!
//! - Drops the export's generated classes from structural tags
//! - Flattens class-based span styling into inline `style` attributes
//! - Rejoins headings that the export split at manual line breaks
//! - Cuts the document into one file per page at `<hr>` page breaks
//! - Copies the images alongside, keeping their archive paths
//!
//! ## Quick Start
//!
//! ```no_run
//! // Writes out/Guide/page_0.html, page_1.html, ... and out/Guide/images/
//! match gdoc_pages::unpack("Guide.zip", "out")? {
//!     Some(run) => println!("{} pages in {}", run.pages.len(), run.output_dir.display()),
//!     None => eprintln!("archive has no HTML document"),
//! }
//! # Ok::<(), gdoc_pages::Error>(())
//! ```
//!
//! ## Working with the tree
//!
//! The passes are usable on their own against the arena DOM:
//!
//! ```
//! use gdoc_pages::dom::parse_html;
//! use gdoc_pages::normalize::merge_adjacent;
//! use gdoc_pages::output::to_html;
//!
//! let mut dom = parse_html(b"<h6>Herp</h6><h6>Derp</h6>");
//! let body = dom.find_by_tag("body").unwrap();
//! merge_adjacent(&mut dom, body, "h6");
//!
//! assert_eq!(to_html(&dom, body), "<body><h6>Herp<br/>Derp</h6></body>");
//! ```

pub mod archive;
pub mod css;
pub mod dom;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;

pub use archive::DocArchive;
pub use css::Stylesheet;
pub use error::{Error, Result};
pub use pipeline::{UnpackConfig, Unpacked, Unpacker, unpack};
