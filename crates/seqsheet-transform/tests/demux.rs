//! Replicate demultiplexer tests.

use seqsheet_model::{Sample, SampleSheet, SheetError, Table};
use seqsheet_transform::{demux_sheet, sheet_needs_demuxing};

const REPLICATE_COLUMNS: &[&str] = &[
    "Sample_ID",
    "Sample_Name",
    "orig_name",
    "well_id_384",
    "destination_well_384",
    "I7_Index_ID",
    "index",
    "I5_Index_ID",
    "index2",
    "Sample_Project",
    "Well_description",
    "Lane",
];

fn replicate_sample(id: &str, orig: &str, well: &str, destination: &str, project: &str) -> Sample {
    let suffixed = format!("{orig}_{destination}");
    REPLICATE_COLUMNS
        .iter()
        .map(|column| {
            let value = match *column {
                "Sample_ID" => id,
                "Sample_Name" => suffixed.as_str(),
                "orig_name" => orig,
                "well_id_384" => well,
                "destination_well_384" => destination,
                "Sample_Project" => project,
                "Lane" => "1",
                _ => "x",
            };
            ((*column).to_string(), value.to_string())
        })
        .collect()
}

fn bioinformatics(rows: &[(&str, &str)]) -> Table {
    let mut table = Table::new(vec![
        "Sample_Project".to_string(),
        "QiitaID".to_string(),
        "contains_replicates".to_string(),
    ]);
    for (project, contains) in rows {
        table.push_row(vec![
            (*project).to_string(),
            "11661".to_string(),
            (*contains).to_string(),
        ]);
    }
    table
}

/// Six samples replicated across quadrants 1, 2 and 4, two samples each.
fn replicate_sheet() -> SampleSheet {
    let mut sheet = SampleSheet::new();
    for (key, value) in [
        ("SheetType", "standard_metag"),
        ("SheetVersion", "100"),
        ("Assay", "Metagenomic"),
    ] {
        sheet.header.set(key, value);
    }
    sheet.reads = vec![151, 151];
    sheet.settings.set("ReverseComplement", "0");
    sheet.data.columns = REPLICATE_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    for (id, orig, well, destination, project) in [
        ("s1.A1", "s1", "A1", "A1", "Feist_11661"),
        ("s2.A3", "s2", "A3", "A3", "Feist_11661"),
        ("s1.A2", "s1", "A1", "A2", "Feist_11661"),
        ("s2.A4", "s2", "A3", "A4", "Feist_11661"),
        ("s1.B2", "s1", "A1", "B2", "Gerwick_6123"),
        ("s2.B4", "s2", "A3", "B4", "Gerwick_6123"),
    ] {
        sheet
            .push_sample(replicate_sample(id, orig, well, destination, project))
            .unwrap();
    }
    sheet.bioinformatics = Some(bioinformatics(&[
        ("Feist_11661", "True"),
        ("Gerwick_6123", "True"),
    ]));
    let mut contact = Table::new(vec!["Sample_Project".to_string(), "Email".to_string()]);
    contact.push_row(vec!["Feist_11661".to_string(), "foo@bar.org".to_string()]);
    contact.push_row(vec!["Gerwick_6123".to_string(), "baz@qux.org".to_string()]);
    sheet.contact = Some(contact);
    sheet
}

#[test]
fn needs_demuxing_reads_the_uniform_flag() {
    assert!(sheet_needs_demuxing(&replicate_sheet()).unwrap());

    let mut no_replicates = replicate_sheet();
    no_replicates.bioinformatics = Some(bioinformatics(&[
        ("Feist_11661", "False"),
        ("Gerwick_6123", "False"),
    ]));
    assert!(!sheet_needs_demuxing(&no_replicates).unwrap());

    let mut legacy = replicate_sheet();
    legacy.bioinformatics = None;
    assert!(!sheet_needs_demuxing(&legacy).unwrap());
}

#[test]
fn mixed_replicate_flags_are_fatal() {
    let mut sheet = replicate_sheet();
    sheet.bioinformatics = Some(bioinformatics(&[
        ("Feist_11661", "True"),
        ("Gerwick_6123", "False"),
    ]));

    assert!(matches!(
        sheet_needs_demuxing(&sheet),
        Err(SheetError::Argument(_))
    ));
    assert!(matches!(demux_sheet(&sheet), Err(SheetError::Argument(_))));
}

#[test]
fn demuxing_a_sheet_without_replicates_is_fatal() {
    let mut sheet = replicate_sheet();
    sheet.bioinformatics = Some(bioinformatics(&[
        ("Feist_11661", "False"),
        ("Gerwick_6123", "False"),
    ]));

    let err = demux_sheet(&sheet).unwrap_err();
    match err {
        SheetError::Argument(message) => assert!(message.contains("do not contain replicates")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn demux_partitions_samples_by_quadrant() {
    let sheet = replicate_sheet();
    let children = demux_sheet(&sheet).expect("demux");
    assert_eq!(children.len(), 3);

    for child in &children {
        assert_eq!(child.data.len(), 2);
        assert_eq!(child.header.as_map(), sheet.header.as_map());
        assert_eq!(child.reads, sheet.reads);
        let bioinformatics = child.bioinformatics.as_ref().unwrap();
        assert!(!bioinformatics.has_column("contains_replicates"));
    }

    // Quadrants ascend: 1 (A1/A3), 2 (A2/A4), 4 (B2/B4).
    let wells = |child: &SampleSheet| -> Vec<String> {
        child
            .data
            .rows
            .iter()
            .map(|row| row["destination_well_384"].clone())
            .collect()
    };
    assert_eq!(wells(&children[0]), vec!["A1", "A3"]);
    assert_eq!(wells(&children[1]), vec!["A2", "A4"]);
    assert_eq!(wells(&children[2]), vec!["B2", "B4"]);

    // Every input sample lands in exactly one output.
    let total: usize = children.iter().map(|child| child.data.len()).sum();
    assert_eq!(total, sheet.data.len());
}

#[test]
fn demux_restores_canonical_names_per_quadrant() {
    let children = demux_sheet(&replicate_sheet()).expect("demux");

    let first = &children[0];
    assert!(first.data.columns.contains(&"Sample_ID".to_string()));
    assert!(first.data.columns.contains(&"Sample_Name".to_string()));
    assert!(!first.data.columns.contains(&"orig_name".to_string()));
    assert!(!first.data.columns.contains(&"sample_name".to_string()));
    // The replicate suffix is gone from the restored name.
    assert_eq!(first.data.rows[0]["Sample_Name"], "s1");
    assert_eq!(first.data.rows[0]["Sample_ID"], "s1.A1");

    // Project tables are filtered to the quadrant's projects.
    let last = &children[2];
    let bioinformatics = last.bioinformatics.as_ref().unwrap();
    assert_eq!(bioinformatics.rows.len(), 1);
    assert_eq!(
        bioinformatics.value(0, "Sample_Project"),
        Some("Gerwick_6123")
    );
    let contact = last.contact.as_ref().unwrap();
    assert_eq!(contact.rows.len(), 1);
    assert_eq!(contact.value(0, "Email"), Some("baz@qux.org"));
}
