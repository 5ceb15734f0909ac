//! Per-issuer extraction profiles.
//!
//! A profile carries everything issuer-specific: the identifier string used
//! for auto-detection, the page region holding the transaction table, and
//! the field-extraction pattern. The matcher itself is issuer-agnostic, so
//! supporting a new bank means authoring a profile, not writing code.

use chrono::format::{Item, StrftimeItems};
use regex::Regex;
use serde::Deserialize;

use crate::error::ProfileError;

/// Rectangular page region, in page points. `x` is measured from the left
/// edge and `y` from the top edge, so `(x0, y0)` is the upper-left corner
/// and `(x1, y1)` the lower-right.
///
/// Coordinates are layout-dependent and discovered empirically per issuer
/// (and sometimes per statement template version) with `khata inspect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl CropBox {
    /// Build a crop box, rejecting empty or inverted rectangles.
    pub fn checked(x0: f32, y0: f32, x1: f32, y1: f32) -> Result<Self, ProfileError> {
        if x0 < 0.0 || y0 < 0.0 || x0 >= x1 || y0 >= y1 {
            return Err(ProfileError::BadCropBox { x0, y0, x1, y1 });
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Field-extraction rule for one profile.
///
/// `regex` runs over the cropped region text with standard leftmost-first,
/// non-overlapping semantics; the group indices are 1-based positions of the
/// capture groups holding each field. Write `(?m)` into the pattern when it
/// anchors on line ends.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    /// strftime template for parsing the date group.
    pub date_format: String,
    pub date_group: usize,
    pub desc_group: usize,
    pub amount_group: usize,
    /// Group holding an explicit credit/debit marker. When absent, direction
    /// comes from `credit_suffix`, or defaults to debit.
    pub type_group: Option<usize>,
    pub credit_identifier: String,
    pub debit_identifier: String,
    /// Literal suffix on the raw amount text (e.g. "Cr") marking a credit.
    pub credit_suffix: Option<String>,
    /// strftime template used when rendering dates for output.
    pub date_output_format: String,
}

/// One issuer/layout.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Human-readable label.
    pub name: String,
    /// Literal substring expected in the first page's full text. Must be
    /// unique across the catalog; resolution picks the first match.
    pub identifier: String,
    /// Region containing the transaction table.
    pub crop_box: CropBox,
    pub pattern: Pattern,
}

/// Raw catalog shape of a profile, before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileSpec {
    name: String,
    identifier: String,
    crop_box: [f32; 4],
    pattern: PatternSpec,
}

#[derive(Debug, Deserialize)]
struct PatternSpec {
    regex: String,
    date_format: String,
    #[serde(default = "default_date_group")]
    date_group: usize,
    #[serde(default = "default_desc_group")]
    desc_group: usize,
    #[serde(default = "default_amount_group")]
    amount_group: usize,
    #[serde(default)]
    type_group: Option<usize>,
    #[serde(default = "default_credit_identifier")]
    credit_identifier: String,
    #[serde(default = "default_debit_identifier")]
    debit_identifier: String,
    #[serde(default)]
    credit_suffix: Option<String>,
    #[serde(default = "default_date_output_format")]
    date_output_format: String,
}

fn default_date_group() -> usize {
    1
}

fn default_desc_group() -> usize {
    2
}

fn default_amount_group() -> usize {
    3
}

fn default_credit_identifier() -> String {
    "C".to_string()
}

fn default_debit_identifier() -> String {
    "D".to_string()
}

fn default_date_output_format() -> String {
    "%Y-%m-%d".to_string()
}

impl TryFrom<ProfileSpec> for Profile {
    type Error = ProfileError;

    fn try_from(spec: ProfileSpec) -> Result<Self, Self::Error> {
        let [x0, y0, x1, y1] = spec.crop_box;
        Ok(Profile {
            name: spec.name,
            identifier: spec.identifier,
            crop_box: CropBox::checked(x0, y0, x1, y1)?,
            pattern: Pattern::try_from(spec.pattern)?,
        })
    }
}

impl TryFrom<PatternSpec> for Pattern {
    type Error = ProfileError;

    fn try_from(spec: PatternSpec) -> Result<Self, Self::Error> {
        let regex = Regex::new(&spec.regex)?;

        // captures_len() counts the implicit group 0, which the 1-based
        // field indices cannot address.
        let available = regex.captures_len() - 1;
        let check = |field: &'static str, index: usize| {
            if index == 0 || index > available {
                return Err(ProfileError::BadGroupIndex {
                    field,
                    index,
                    available,
                });
            }
            Ok(())
        };
        check("date_group", spec.date_group)?;
        check("desc_group", spec.desc_group)?;
        check("amount_group", spec.amount_group)?;
        if let Some(index) = spec.type_group {
            check("type_group", index)?;
        }

        validate_strftime(&spec.date_format)?;
        validate_strftime(&spec.date_output_format)?;

        Ok(Pattern {
            regex,
            date_format: spec.date_format,
            date_group: spec.date_group,
            desc_group: spec.desc_group,
            amount_group: spec.amount_group,
            type_group: spec.type_group,
            credit_identifier: spec.credit_identifier,
            debit_identifier: spec.debit_identifier,
            credit_suffix: spec.credit_suffix,
            date_output_format: spec.date_output_format,
        })
    }
}

fn validate_strftime(format: &str) -> Result<(), ProfileError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ProfileError::BadDateFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}
