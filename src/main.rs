//! # Easel CLI
//!
//! Command-line interface for rendering canvas documents.
//!
//! ## Usage
//!
//! ```bash
//! # List the supported shape tags
//! easel shapes
//!
//! # Render a document to PNG
//! easel render title.json --png title.png
//!
//! # Override the document size and bind extra variables
//! easel render title.json --png title.png --width 800 --height 600 --var revision=1.2
//!
//! # Resolve image names against a directory, with logging
//! RUST_LOG=easel=debug easel render title.json --png title.png --images assets/
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use easel::{
    Canvas, CanvasError,
    config::Document,
    resources::DirectoryImages,
    shape::SHAPES,
    variables::Variant,
};

/// Easel - declarative shape canvas renderer
#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a JSON canvas document to a PNG file
    Render {
        /// Canvas document to render
        document: PathBuf,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,

        /// Canvas width in pixels (overrides the document)
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels (overrides the document)
        #[arg(long)]
        height: Option<u32>,

        /// Directory image names are resolved against (defaults to the document's directory)
        #[arg(long, value_name = "DIR")]
        images: Option<PathBuf>,

        /// Bind a formula variable, e.g. --var revision=1.2
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
        vars: Vec<(String, Variant)>,
    },

    /// List the supported shape tags
    Shapes,
}

/// Parse `NAME=VALUE`; integer values bind as integers, anything else as text.
fn parse_var(s: &str) -> Result<(String, Variant), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable '{}': expected NAME=VALUE", s))?;
    if name.is_empty() {
        return Err(format!("invalid variable '{}': empty name", s));
    }
    let value = match value.parse::<i32>() {
        Ok(n) => Variant::Int(n),
        Err(_) => Variant::from(value),
    };
    Ok((name.to_string(), value))
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CanvasError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Shapes => {
            println!("Available shapes:");
            for name in SHAPES {
                println!("  {}", name);
            }
        }
        Commands::Render {
            document,
            png,
            width,
            height,
            images,
            vars,
        } => {
            let doc = Document::load(&document)?;

            let root = images.unwrap_or_else(|| {
                document
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            });

            let mut canvas = Canvas::with_loader(DirectoryImages::new(root));
            canvas.set_width(width.unwrap_or(doc.width));
            canvas.set_height(height.unwrap_or(doc.height));
            for (name, value) in doc.variants() {
                canvas.set_variable(name, value);
            }
            for (name, value) in vars {
                canvas.set_variable(name, value);
            }

            println!(
                "Rendering {} ({}x{}, {} shapes)...",
                document.display(),
                canvas.width(),
                canvas.height(),
                doc.shapes.len()
            );

            canvas.draw_config(&doc.shapes)?;
            save_png(&png, canvas.surface())?;
            println!("Saved to {}", png.display());
        }
    }

    Ok(())
}

/// Write the drawn surface as a PNG file
fn save_png(path: &Path, surface: &easel::Surface) -> Result<(), CanvasError> {
    let bytes = surface.to_png()?;
    std::fs::write(path, bytes)?;
    Ok(())
}
