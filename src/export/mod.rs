//! Bundle export.
//!
//! Packs the pages of a [`VectorDocument`] into one ZIP archive, one SVG
//! entry per page, plus a small JSON manifest.

use serde::Serialize;
use std::io::{Cursor, Read, Write};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{FigureError, Result};
use crate::render::VectorDocument;

/// Name of the archive entry describing the bundle.
pub const MANIFEST_NAME: &str = "manifest.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    page_width: f64,
    page_height: f64,
    pages: &'a [String],
}

/// Archive entry name of page `index` (0-based): `page-001.svg`, ...
pub fn page_entry_name(index: usize) -> String {
    format!("page-{:03}.svg", index + 1)
}

/// Write every page of `doc` into a ZIP archive.
///
/// Returns the archive as `Vec<u8>`.
pub fn write_bundle(doc: &VectorDocument) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let names: Vec<String> = (0..doc.page_count()).map(page_entry_name).collect();
    for (name, svg) in names.iter().zip(&doc.pages) {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(svg.as_bytes())?;
    }

    let manifest = serde_json::to_vec_pretty(&Manifest {
        page_width: doc.width,
        page_height: doc.height,
        pages: &names,
    })?;
    writer.start_file(MANIFEST_NAME, options)?;
    writer.write_all(&manifest)?;

    let cursor = writer.finish()?;
    tracing::debug!(pages = names.len(), "wrote bundle");
    Ok(cursor.into_inner())
}

/// Read the page SVGs back out of a bundle, in page order.
pub fn read_bundle_pages(bundle: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bundle))?;
    let mut pages = Vec::new();
    for index in 0.. {
        let name = page_entry_name(index);
        let mut entry = match archive.by_name(&name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => break,
            Err(e) => return Err(FigureError::from(e)),
        };
        let mut svg = String::new();
        entry.read_to_string(&mut svg)?;
        pages.push(svg);
    }
    Ok(pages)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_page_entry_names() {
        assert_eq!(page_entry_name(0), "page-001.svg");
        assert_eq!(page_entry_name(11), "page-012.svg");
    }

    #[test]
    fn test_bundle_contains_pages_and_manifest() {
        let doc = VectorDocument {
            width: 210.0,
            height: 297.0,
            pages: vec!["<svg>1</svg>".to_string(), "<svg>2</svg>".to_string()],
        };
        let bytes = write_bundle(&doc).unwrap();
        assert_eq!(read_bundle_pages(&bytes).unwrap(), doc.pages);

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut manifest = String::new();
        archive
            .by_name(MANIFEST_NAME)
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(json["pages"][1], "page-002.svg");
    }
}
