//! gdoc-pages - Split Google Docs web page exports into pages

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gdoc_pages::{UnpackConfig, Unpacked, Unpacker};

#[derive(Parser)]
#[command(name = "gdoc-pages")]
#[command(version, about = "Split Google Docs web page exports into pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    gdoc-pages Guide.zip                 Write ./Guide/page_0.html, ...
    gdoc-pages -o site a.zip b.zip       Unpack two exports under site/
    gdoc-pages --merge h5 --merge h6 Guide.zip
                                         Rejoin split h5 and h6 headings")]
struct Cli {
    /// Exported archives (.zip)
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Directory that receives one folder per input
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Tag whose adjacent runs are merged (repeatable)
    #[arg(long = "merge", value_name = "TAG", default_value = "h6")]
    merge: Vec<String>,

    /// Tag whose classes are inlined as styles (repeatable)
    #[arg(long = "inline", value_name = "TAG", default_value = "span")]
    inline: Vec<String>,

    /// Tag stripped of all attributes (repeatable)
    #[arg(long = "clear-attrs", value_name = "TAG")]
    clear_attrs: Vec<String>,

    /// File extension extracted as an image (repeatable)
    #[arg(long = "image-ext", value_name = "EXT", default_value = "png")]
    image_ext: Vec<String>,

    /// Write complete HTML documents instead of body fragments
    #[arg(long)]
    standalone: bool,

    /// Stylesheet linked from standalone pages
    #[arg(long, value_name = "HREF", requires = "standalone")]
    stylesheet: Option<String>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> UnpackConfig {
        let mut config = UnpackConfig::default()
            .with_merge_tags(self.merge.iter().cloned())
            .with_inline_tags(self.inline.iter().cloned())
            .with_clear_attrs(self.clear_attrs.iter().cloned())
            .with_image_extensions(self.image_ext.iter().cloned())
            .with_standalone(self.standalone);
        if let Some(href) = &self.stylesheet {
            config = config.with_stylesheet_href(href.clone());
        }
        config
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let unpacker = Unpacker::new().with_config(cli.config());

    let mut runs: Vec<Unpacked> = Vec::with_capacity(cli.inputs.len());
    let mut missing_html = false;

    for input in &cli.inputs {
        match unpacker.unpack(input, &cli.output) {
            Ok(Some(run)) => {
                if !cli.quiet && !cli.json {
                    println!(
                        "{} -> {} ({} pages, {} images)",
                        input.display(),
                        run.output_dir.display(),
                        run.pages.len(),
                        run.images.len()
                    );
                }
                runs.push(run);
            }
            Ok(None) => {
                eprintln!("error: no HTML document in {}", input.display());
                missing_html = true;
            }
            Err(e) => {
                eprintln!("error: {}: {e}", input.display());
                return ExitCode::FAILURE;
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&runs) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if missing_html {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
