//! Coordinate-discovery helper for authoring new profiles.
//!
//! Prints page dimensions and extracted text (whole page or cropped
//! region), then a line-numbered listing for regex building. The workflow
//! for a new issuer: run without --cropbox to find the identifier string,
//! then narrow a --cropbox until only the transaction table remains.

use std::path::Path;

use anyhow::{Result, bail};
use khata_core::CropBox;
use khata_pdf::Renderer;

pub fn run(
    renderer: &Renderer,
    path: &Path,
    password: Option<&str>,
    cropbox: Option<CropBox>,
    page: usize,
) -> Result<()> {
    let document = renderer.open(path, password)?;
    let count = document.page_count();
    if page == 0 || page > count {
        bail!("page {page} out of range (document has {count} pages)");
    }
    let index = page - 1;

    let (width, height) = document.page_size(index)?;
    println!("Page {page} of {count}: {width:.0} x {height:.0} points");

    let text = match cropbox {
        Some(crop) => {
            println!(
                "Crop box: {},{},{},{} (x from left, y from top)",
                crop.x0, crop.y0, crop.x1, crop.y1
            );
            document.region_text(index, crop)?
        }
        None => document.page_text(index)?,
    };

    println!("{}", "-".repeat(60));
    println!("{text}");
    println!("{}", "-".repeat(60));

    println!("\nLine by line (for regex building):");
    for (i, line) in text.lines().enumerate() {
        if !line.trim().is_empty() {
            println!("Line {:2}: {}", i + 1, line);
        }
    }

    Ok(())
}
