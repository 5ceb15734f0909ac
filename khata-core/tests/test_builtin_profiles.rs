//! End-to-end runs of the built-in profiles over realistic region text.

use chrono::NaiveDate;
use khata_core::{Direction, ProfileSet, RecordErrorKind, extract_all, resolve};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_sbi_statement_region() {
    let set = ProfileSet::builtin().unwrap();
    let first_page = "SBI Cards and Payment Services Ltd\nGSTIN of SBI Card: 27AAACS5981K1Z1";
    let profile = resolve(first_page, &set).unwrap();
    assert_eq!(profile.name, "SBI Card");

    let region = "\
05 Jan 24 AMAZON PAY INDIA 1,234.56 D
09 Jan 24 PAYMENT RECEIVED 10,000.00 C
?? Jan 24 SMUDGED LINE 99.00 D
15 Jan 24 IRCTC  NEW DELHI 842.10 D
";
    let (records, errors) = extract_all(region, &profile.pattern);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date, date(2024, 1, 5));
    assert_eq!(records[0].description, "AMAZON PAY INDIA");
    assert_eq!(records[0].amount, 1234.56);
    assert_eq!(records[0].direction, Direction::Debit);

    assert_eq!(records[1].direction, Direction::Credit);
    assert_eq!(records[1].amount, 10000.00);

    assert_eq!(records[2].description, "IRCTC NEW DELHI");

    // The smudged date never matches the pattern at all, so it is simply
    // not a match rather than a per-record error.
    assert!(errors.is_empty());
}

#[test]
fn test_hdfc_statement_region() {
    let set = ProfileSet::builtin().unwrap();
    let first_page = "HDFC Bank Credit Cards GSTIN: 33AAACH2702H1Z6";
    let profile = resolve(first_page, &set).unwrap();
    assert_eq!(profile.name, "HDFC Bank");

    let region = "\
05/01/2024 AMAZON PAY 1,234.56 Cr
11/01/2024 SWIGGY BANGALORE 450.00
18/01/2024 UBER INDIA SYSTEMS 312.75
";
    let (records, errors) = extract_all(region, &profile.pattern);

    assert!(errors.is_empty());
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date, date(2024, 1, 5));
    assert_eq!(records[0].description, "AMAZON PAY");
    assert_eq!(records[0].amount, 1234.56);
    assert_eq!(records[0].direction, Direction::Credit);
    assert_eq!(records[1].direction, Direction::Debit);
    assert_eq!(records[2].amount, 312.75);
}

#[test]
fn test_trailing_terms_page_yields_nothing() {
    let set = ProfileSet::builtin().unwrap();
    let profile = set.by_key("sbi").unwrap();
    let region = "Terms and Conditions\n1. Interest is charged monthly.\n2. See website for details.";
    let (records, errors) = extract_all(region, &profile.pattern);
    assert!(records.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn test_malformed_date_reported_not_fatal() {
    let set = ProfileSet::builtin().unwrap();
    let profile = set.by_key("hdfc").unwrap();
    let region = "\
05/01/2024 GOOD ONE 100.00
31/02/2024 IMPOSSIBLE DATE 200.00
07/01/2024 GOOD TWO 300.00 Cr
";
    let (records, errors) = extract_all(region, &profile.pattern);
    assert_eq!(records.len(), 2);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, RecordErrorKind::DateParse { .. }));
    assert_eq!(records[1].description, "GOOD TWO");
    assert_eq!(records[1].direction, Direction::Credit);
}
