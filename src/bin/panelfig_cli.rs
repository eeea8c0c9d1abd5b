//! CLI tool for panelfig - renders a JSON figure description
//!
//! Usage:
//!   panelfig_cli <figure.json>              # Write figure.zip next to the input
//!   panelfig_cli <figure.json> -o out.zip   # Write the page bundle to out.zip
//!   panelfig_cli <figure.json> --layout     # Print the computed layout as JSON

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use panelfig::export::write_bundle;
use panelfig::render::SvgDocument;
use panelfig::FigureDescription;

fn usage() -> ! {
    eprintln!("Usage: panelfig_cli <figure.json> [-o output.zip] [--layout]");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let input_path = PathBuf::from(&args[1]);
    let mut output_path = None;
    let mut print_layout = false;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-o" => match rest.next() {
                Some(path) => output_path = Some(PathBuf::from(path)),
                None => usage(),
            },
            "--layout" => print_layout = true,
            _ => usage(),
        }
    }

    // Read the description
    let json = match fs::read_to_string(&input_path) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path.display(), e);
            std::process::exit(1);
        }
    };
    let description = match FigureDescription::from_json(&json) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing figure description: {}", e);
            std::process::exit(1);
        }
    };

    let base_dir = input_path.parent().unwrap_or_else(|| Path::new("."));
    let figure = match description.into_figure(base_dir) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error building figure: {}", e);
            std::process::exit(1);
        }
    };

    let mut surface = SvgDocument::new();

    if print_layout {
        let layout = figure
            .layout(&surface)
            .and_then(|layout| layout.to_json());
        match layout {
            Ok(j) => {
                io::stdout().write_all(j.as_bytes()).unwrap();
                println!();
            }
            Err(e) => {
                eprintln!("Error computing layout: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let bundle = match figure
        .export(&mut surface)
        .and_then(|doc| write_bundle(&doc))
    {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error rendering figure: {}", e);
            std::process::exit(1);
        }
    };

    let path = output_path.unwrap_or_else(|| input_path.with_extension("zip"));
    if let Err(e) = fs::write(&path, &bundle) {
        eprintln!("Error writing {}: {}", path.display(), e);
        std::process::exit(1);
    }
    eprintln!("Written: {}", path.display());
}
