//! Merger precondition and append tests.

use seqsheet_model::{Sample, SampleSheet, SheetError, Table};
use seqsheet_transform::merge;

fn sample(id: &str, project: &str) -> Sample {
    [
        ("Sample_ID", id),
        ("Sample_Project", project),
        ("Lane", "1"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect()
}

fn run_sheet(date: &str) -> SampleSheet {
    let mut sheet = SampleSheet::new();
    for (key, value) in [
        ("SheetType", "standard_metag"),
        ("SheetVersion", "100"),
        ("Assay", "Metagenomic"),
        ("Date", date),
    ] {
        sheet.header.set(key, value);
    }
    sheet.reads = vec![151, 151];
    sheet.settings.set("ReverseComplement", "0");
    sheet.data.columns = vec![
        "Sample_ID".to_string(),
        "Sample_Project".to_string(),
        "Lane".to_string(),
    ];
    sheet
}

fn contact_table(rows: &[(&str, &str)]) -> Table {
    let mut table = Table::new(vec!["Sample_Project".to_string(), "Email".to_string()]);
    for (project, email) in rows {
        table.push_row(vec![(*project).to_string(), (*email).to_string()]);
    }
    table
}

#[test]
fn merge_appends_samples_and_keeps_the_base_date() {
    let mut base = run_sheet("2023-01-01");
    base.push_sample(sample("s1", "Feist_11661")).unwrap();

    let mut other = run_sheet("2023-02-02");
    other.push_sample(sample("s2", "Gerwick_6123")).unwrap();
    other.push_sample(sample("s3", "Gerwick_6123")).unwrap();

    merge(&mut base, &[other]).expect("merge");
    assert_eq!(base.data.len(), 3);
    assert_eq!(base.data.rows[1]["Sample_ID"], "s2");
    assert_eq!(base.header.get("Date"), Some("2023-01-01"));
}

#[test]
fn merge_rejects_differing_settings() {
    let mut base = run_sheet("2023-01-01");
    let matching = run_sheet("2023-01-01");
    let mut different = run_sheet("2023-01-01");
    different.settings.set("ReverseComplement", "1");

    let err = merge(&mut base, &[matching, different]).unwrap_err();
    match err {
        SheetError::SectionMismatch { section, index } => {
            assert_eq!(section, "Settings");
            assert_eq!(index, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Precondition failure leaves the base untouched.
    assert_eq!(base.data.len(), 0);
}

#[test]
fn merge_rejects_differing_header_beyond_date() {
    let mut base = run_sheet("2023-01-01");
    let mut other = run_sheet("2023-02-02");
    other.header.set("Assay", "Metatranscriptomic");

    let err = merge(&mut base, &[other]).unwrap_err();
    assert!(matches!(
        err,
        SheetError::SectionMismatch { ref section, index: 1 } if section == "Header"
    ));
}

#[test]
fn merge_deduplicates_project_tables() {
    let mut base = run_sheet("2023-01-01");
    base.contact = Some(contact_table(&[("Feist_11661", "foo@bar.org")]));

    let mut other = run_sheet("2023-01-01");
    other.contact = Some(contact_table(&[
        ("Feist_11661", "foo@bar.org"),
        ("Gerwick_6123", "baz@qux.org"),
    ]));

    merge(&mut base, &[other]).expect("merge");
    let contact = base.contact.as_ref().unwrap();
    assert_eq!(contact.rows.len(), 2);
    assert_eq!(contact.value(0, "Sample_Project"), Some("Feist_11661"));
    assert_eq!(contact.value(1, "Sample_Project"), Some("Gerwick_6123"));
}

#[test]
fn merge_copies_a_table_only_the_input_has() {
    let mut base = run_sheet("2023-01-01");
    let mut other = run_sheet("2023-01-01");
    other.contact = Some(contact_table(&[("Feist_11661", "foo@bar.org")]));

    merge(&mut base, &[other]).expect("merge");
    assert!(base.contact.is_some());
    assert_eq!(base.contact.as_ref().unwrap().rows.len(), 1);
}
