//! Per-document pipeline: resolve the profile, crop each page, run the
//! matcher, collect records and skips in page order.

use std::path::Path;

use anyhow::{Context, Result};
use khata_core::{CropBox, ProfileSet, RecordError, TransactionRecord, extract_all, resolve};
use khata_pdf::Renderer;

/// Everything one statement produced.
pub struct Outcome {
    pub profile_name: String,
    /// strftime template the sink should use for dates.
    pub date_output_format: String,
    pub records: Vec<TransactionRecord>,
    pub errors: Vec<RecordError>,
}

pub struct Options<'a> {
    pub password: Option<&'a str>,
    /// Explicit profile key; skips auto-detection.
    pub profile_key: Option<&'a str>,
    /// Crop box override for statements whose layout drifted from the
    /// profile's recorded region.
    pub crop_override: Option<CropBox>,
}

pub fn run(
    renderer: &Renderer,
    path: &Path,
    profiles: &ProfileSet,
    opts: &Options<'_>,
) -> Result<Outcome> {
    let document = renderer
        .open(path, opts.password)
        .with_context(|| format!("opening {}", path.display()))?;

    let profile = match opts.profile_key {
        Some(key) => profiles.by_key(key)?,
        None => {
            let first_page = document.page_text(0).context("reading first page")?;
            resolve(&first_page, profiles).context("pass --profile <key> to force one")?
        }
    };

    let crop = opts.crop_override.unwrap_or(profile.crop_box);

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for page in 0..document.page_count() {
        let text = document.region_text(page, crop)?;
        // Trailing pages (terms and conditions etc.) legitimately match
        // nothing; that is not an error.
        let (mut page_records, mut page_errors) = extract_all(&text, &profile.pattern);
        records.append(&mut page_records);
        errors.append(&mut page_errors);
    }

    Ok(Outcome {
        profile_name: profile.name.clone(),
        date_output_format: profile.pattern.date_output_format.clone(),
        records,
        errors,
    })
}
