//! Pattern matching and normalization of cropped-region text.
//!
//! Expected input is the text of the transaction-table region after PDF
//! extraction, e.g. for the SBI profile:
//!
//!   05 Jan 24 AMAZON PAY INDIA 1,234.56 D
//!   07 Jan 24 NEFT RECEIVED 5,000.00 C
//!
//! The profile's regex finds transaction lines; each match is normalized
//! into a [`TransactionRecord`]. A line that matches but fails to normalize
//! (bad date, bad amount, unknown type marker) is reported and skipped, so
//! one malformed line never aborts extraction of the rest of the region.

use chrono::NaiveDate;
use regex::{CaptureMatches, Captures};

use crate::error::{RecordError, RecordErrorKind};
use crate::profile::Pattern;
use crate::record::{Direction, TransactionRecord};

/// Lazy iterator over the matches of a pattern in region text.
///
/// Records come out in match order, top to bottom. Re-running [`extract`]
/// on the same input restarts the sequence.
pub struct Matches<'a> {
    pattern: &'a Pattern,
    inner: CaptureMatches<'a, 'a>,
}

/// Apply a profile's pattern to region text.
pub fn extract<'a>(region_text: &'a str, pattern: &'a Pattern) -> Matches<'a> {
    Matches {
        pattern,
        inner: pattern.regex.captures_iter(region_text),
    }
}

/// Eager variant used by the extraction driver: successes and per-record
/// errors, both in match order.
pub fn extract_all(
    region_text: &str,
    pattern: &Pattern,
) -> (Vec<TransactionRecord>, Vec<RecordError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for item in extract(region_text, pattern) {
        match item {
            Ok(record) => records.push(record),
            Err(error) => errors.push(error),
        }
    }
    (records, errors)
}

impl Iterator for Matches<'_> {
    type Item = Result<TransactionRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.inner.next()?;
        Some(normalize(&caps, self.pattern))
    }
}

fn normalize(caps: &Captures<'_>, pattern: &Pattern) -> Result<TransactionRecord, RecordError> {
    let line = caps[0].trim().to_string();
    let fail = |kind: RecordErrorKind| RecordError {
        line: line.clone(),
        kind,
    };

    let date_raw = group(caps, pattern.date_group);
    let date = NaiveDate::parse_from_str(date_raw.trim(), &pattern.date_format).map_err(|_| {
        fail(RecordErrorKind::DateParse {
            value: date_raw.to_string(),
            format: pattern.date_format.clone(),
        })
    })?;

    let amount_raw = group(caps, pattern.amount_group);
    let amount = normalize_amount(amount_raw, pattern.credit_suffix.as_deref()).ok_or_else(|| {
        fail(RecordErrorKind::AmountParse {
            value: amount_raw.to_string(),
        })
    })?;

    let direction = direction_of(caps, pattern, amount_raw).map_err(|kind| fail(kind))?;

    Ok(TransactionRecord {
        date,
        description: collapse_whitespace(group(caps, pattern.desc_group)),
        amount,
        direction,
    })
}

/// Look up a 1-based capture group; a group that did not participate in the
/// match reads as empty and fails the downstream parse.
fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}

/// Strip grouping commas and an optional trailing credit suffix, then parse
/// the rest as a non-negative magnitude. Idempotent on already-clean input.
pub fn normalize_amount(raw: &str, credit_suffix: Option<&str>) -> Option<f64> {
    let mut text = raw.trim();
    if let Some(suffix) = credit_suffix {
        if let Some(stripped) = text.strip_suffix(suffix) {
            text = stripped.trim_end();
        }
    }
    let value: f64 = text.replace(',', "").parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Direction, in order of precedence: explicit type marker, then credit
/// suffix on the raw amount text, then debit (expense-only statements carry
/// no credit marker at all).
fn direction_of(
    caps: &Captures<'_>,
    pattern: &Pattern,
    amount_raw: &str,
) -> Result<Direction, RecordErrorKind> {
    if let Some(index) = pattern.type_group {
        let marker = group(caps, index).trim();
        return if marker == pattern.credit_identifier {
            Ok(Direction::Credit)
        } else if marker == pattern.debit_identifier {
            Ok(Direction::Debit)
        } else {
            Err(RecordErrorKind::DirectionAmbiguous {
                marker: marker.to_string(),
            })
        };
    }

    if let Some(suffix) = &pattern.credit_suffix {
        // Checked on the raw amount text, before the suffix is stripped.
        if amount_raw.trim_end().ends_with(suffix.as_str()) {
            return Ok(Direction::Credit);
        }
    }

    Ok(Direction::Debit)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn sbi_pattern() -> Pattern {
        Pattern {
            regex: Regex::new(r"(\d{2} \w{3} \d{2}) (.*?) (\d{1,3}(?:,\d{3})*\.?\d{0,2}) ([CD])")
                .unwrap(),
            date_format: "%d %b %y".to_string(),
            date_group: 1,
            desc_group: 2,
            amount_group: 3,
            type_group: Some(4),
            credit_identifier: "C".to_string(),
            debit_identifier: "D".to_string(),
            credit_suffix: None,
            date_output_format: "%Y-%m-%d".to_string(),
        }
    }

    fn hdfc_pattern() -> Pattern {
        Pattern {
            regex: Regex::new(
                r"(?m)(\d{2}/\d{2}/\d{4})\s+(.*?)\s+((?:\d{1,3}(?:,\d{3})*\.?\d{0,2})(?:\s*Cr)?)\s*$",
            )
            .unwrap(),
            date_format: "%d/%m/%Y".to_string(),
            date_group: 1,
            desc_group: 2,
            amount_group: 3,
            type_group: None,
            credit_identifier: "C".to_string(),
            debit_identifier: "D".to_string(),
            credit_suffix: Some("Cr".to_string()),
            date_output_format: "%Y-%m-%d".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sbi_line() {
        let (records, errors) =
            extract_all("05 Jan 24 AMAZON PAY INDIA 1,234.56 D", &sbi_pattern());
        assert!(errors.is_empty());
        assert_eq!(
            records,
            vec![TransactionRecord {
                date: date(2024, 1, 5),
                description: "AMAZON PAY INDIA".to_string(),
                amount: 1234.56,
                direction: Direction::Debit,
            }]
        );
    }

    #[test]
    fn test_hdfc_credit_via_suffix() {
        let (records, errors) = extract_all("05/01/2024 AMAZON PAY 1,234.56 Cr", &hdfc_pattern());
        assert!(errors.is_empty());
        assert_eq!(
            records,
            vec![TransactionRecord {
                date: date(2024, 1, 5),
                description: "AMAZON PAY".to_string(),
                amount: 1234.56,
                direction: Direction::Credit,
            }]
        );
    }

    #[test]
    fn test_hdfc_debit_without_suffix() {
        let (records, errors) = extract_all("12/02/2024 SWIGGY BANGALORE 450.00", &hdfc_pattern());
        assert!(errors.is_empty());
        assert_eq!(records[0].direction, Direction::Debit);
        assert_eq!(records[0].amount, 450.00);
    }

    #[test]
    fn test_type_marker_credit() {
        let (records, _) = extract_all("07 Jan 24 NEFT RECEIVED 5,000.00 C", &sbi_pattern());
        assert_eq!(records[0].direction, Direction::Credit);
        assert_eq!(records[0].amount, 5000.00);
    }

    #[test]
    fn test_unknown_type_marker_is_skipped() {
        let pattern = Pattern {
            regex: Regex::new(r"(\d{2} \w{3} \d{2}) (.*?) ([\d,.]+) ([A-Z])").unwrap(),
            ..sbi_pattern()
        };
        let (records, errors) = extract_all("05 Jan 24 AMAZON PAY 1,234.56 X", &pattern);
        assert!(records.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind,
            RecordErrorKind::DirectionAmbiguous {
                marker: "X".to_string()
            }
        );
    }

    #[test]
    fn test_amount_normalization() {
        assert_eq!(normalize_amount("1234.50", None), Some(1234.50));
        assert_eq!(normalize_amount("1,234.50", None), Some(1234.50));
        assert_eq!(normalize_amount("12,34,567.00", None), Some(1234567.00));
        assert_eq!(normalize_amount("500.00 Cr", Some("Cr")), Some(500.00));
        assert_eq!(normalize_amount("500.00", Some("Cr")), Some(500.00));
        assert_eq!(normalize_amount("abc", None), None);
        assert_eq!(normalize_amount("-5.00", None), None);
    }

    #[test]
    fn test_order_preserved() {
        let text = "05 Jan 24 FIRST 100.00 D\n06 Jan 24 SECOND 200.00 C\n07 Jan 24 THIRD 300.00 D";
        let (records, errors) = extract_all(text, &sbi_pattern());
        assert!(errors.is_empty());
        let descriptions: Vec<_> = records.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_malformed_date_skips_only_that_line() {
        let text = "05 Jan 24 GOOD ONE 100.00 D\n31 Feb 24 BAD DATE 200.00 D\n07 Jan 24 GOOD TWO 300.00 D";
        let (records, errors) = extract_all(text, &sbi_pattern());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "GOOD ONE");
        assert_eq!(records[1].description, "GOOD TWO");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind,
            RecordErrorKind::DateParse { .. }
        ));
        assert!(errors[0].line.contains("BAD DATE"));
    }

    #[test]
    fn test_empty_region_yields_nothing() {
        let (records, errors) = extract_all("", &sbi_pattern());
        assert!(records.is_empty());
        assert!(errors.is_empty());

        let (records, errors) = extract_all("Terms and conditions apply.", &sbi_pattern());
        assert!(records.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_description_whitespace_collapsed() {
        let (records, _) = extract_all("05 Jan 24 AMAZON   PAY\u{a0} INDIA 1,234.56 D", &sbi_pattern());
        assert_eq!(records[0].description, "AMAZON PAY INDIA");
    }

    #[test]
    fn test_extract_is_restartable() {
        let text = "05 Jan 24 ONLY 100.00 D";
        let pattern = sbi_pattern();
        let first: Vec<_> = extract(text, &pattern).collect();
        let second: Vec<_> = extract(text, &pattern).collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_lazy_iterator_reports_errors_in_place() {
        let text = "31 Feb 24 BAD 100.00 D\n05 Jan 24 GOOD 200.00 C";
        let pattern = sbi_pattern();
        let mut matches = extract(text, &pattern);
        assert!(matches.next().unwrap().is_err());
        let record = matches.next().unwrap().unwrap();
        assert_eq!(record.description, "GOOD");
        assert!(matches.next().is_none());
    }
}
