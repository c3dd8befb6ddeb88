use std::collections::BTreeMap;

use seqsheet_common::well_to_quadrant;
use seqsheet_model::{Result, Sample, SampleSheet, SheetError, Table};

/// Whether a sheet carries plate replicates and should be demultiplexed.
///
/// Sheets without a Bioinformatics section or without the
/// `contains_replicates` column predate replication and never need it. Mixed
/// values across projects are fatal; replication happens at the plate level,
/// so the flag must be uniform.
pub fn sheet_needs_demuxing(sheet: &SampleSheet) -> Result<bool> {
    let Some(bioinformatics) = sheet.bioinformatics.as_ref() else {
        return Ok(false);
    };
    if !bioinformatics.has_column("contains_replicates") {
        return Ok(false);
    }

    let values = bioinformatics.distinct("contains_replicates");
    if values.len() > 1 {
        return Err(mixed_replicates());
    }
    Ok(values
        .first()
        .is_some_and(|value| value.eq_ignore_ascii_case("true")))
}

/// Split a replicate sheet into one sheet per plate quadrant.
///
/// Every sample's `destination_well_384` coordinate determines its quadrant;
/// quadrants are emitted in ascending order. Each output clones the run-wide
/// sections and filters Bioinformatics (minus `contains_replicates`) and
/// Contact down to the projects present in its quadrant. Calling this on a
/// sheet without replicates is caller misuse and fatal.
pub fn demux_sheet(sheet: &SampleSheet) -> Result<Vec<SampleSheet>> {
    let bioinformatics = sheet
        .bioinformatics
        .as_ref()
        .filter(|table| table.has_column("contains_replicates"))
        .ok_or_else(|| {
            SheetError::Argument("sample sheet does not contain replicates".to_string())
        })?;
    let values = bioinformatics.distinct("contains_replicates");
    if values.len() > 1 {
        return Err(mixed_replicates());
    }
    if !values
        .first()
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    {
        return Err(SheetError::Argument(
            "all projects in the Bioinformatics section do not contain replicates".to_string(),
        ));
    }

    let working = flatten(sheet)?;
    let quad_idx = working
        .column_index("quad")
        .unwrap_or_default();

    let mut quadrants: BTreeMap<u8, Vec<&Vec<String>>> = BTreeMap::new();
    for row in &working.rows {
        let quad: u8 = row[quad_idx].parse().unwrap_or_default();
        quadrants.entry(quad).or_default().push(row);
    }

    // Canonical names restored for the columns the downstream Data section
    // requires; everything else keeps its flattened name.
    let renames: &[(&str, &str)] = &[
        ("sample_id", "Sample_ID"),
        ("orig_name", "Sample_Name"),
        ("i7_index_id", "I7_Index_ID"),
        ("i5_index_id", "I5_Index_ID"),
        ("sample_project", "Sample_Project"),
    ];
    let mut columns = Vec::new();
    let mut kept: Vec<usize> = Vec::new();
    for (idx, column) in working.columns.iter().enumerate() {
        // The suffixed replicate name is replaced by orig_name.
        if column == "sample_name" || column == "quad" {
            continue;
        }
        let name = renames
            .iter()
            .find(|(from, _)| from == column)
            .map_or(column.as_str(), |(_, to)| to);
        columns.push(name.to_string());
        kept.push(idx);
    }

    let project_idx = working
        .column_index("sample_project")
        .ok_or_else(|| SheetError::MissingColumn("Sample_Project".to_string()))?;

    let mut sheets = Vec::with_capacity(quadrants.len());
    for rows in quadrants.values() {
        let mut child = SampleSheet::new();
        child.header = sheet.header.clone();
        child.reads = sheet.reads.clone();
        child.settings = sheet.settings.clone();
        child.data.columns = columns.clone();

        let projects: std::collections::BTreeSet<String> =
            rows.iter().map(|row| row[project_idx].clone()).collect();

        let mut child_bioinformatics = bioinformatics.clone();
        child_bioinformatics.retain_rows_where("Sample_Project", &projects);
        child_bioinformatics.drop_column("contains_replicates");
        child.bioinformatics = Some(child_bioinformatics);

        if let Some(contact) = sheet.contact.as_ref() {
            let mut child_contact = contact.clone();
            child_contact.retain_rows_where("Sample_Project", &projects);
            child.contact = Some(child_contact);
        }

        for row in rows {
            let sample: Sample = columns
                .iter()
                .cloned()
                .zip(kept.iter().map(|idx| row[*idx].clone()))
                .collect();
            child.push_sample(sample)?;
        }

        sheets.push(child);
    }

    Ok(sheets)
}

/// Flatten the Data section to a plain table with lowercased column names,
/// ordered by well, with each row's quadrant appended.
fn flatten(sheet: &SampleSheet) -> Result<Table> {
    let mut working = Table::new(
        sheet
            .data
            .columns
            .iter()
            .map(|column| column.to_lowercase())
            .collect(),
    );
    for sample in &sheet.data.rows {
        working.push_row(
            sheet
                .data
                .columns
                .iter()
                .map(|column| sample.get(column).cloned().unwrap_or_default())
                .collect(),
        );
    }

    // Per-project free text is not meaningful per-replicate.
    working.drop_column("library_construction_protocol");
    working.drop_column("experiment_design_description");

    let sort_idx = working
        .column_index("sample_well")
        .or_else(|| working.column_index("well_id_384"))
        .ok_or_else(|| {
            SheetError::Argument(
                "'Sample_Well' and 'well_id_384' columns are not present".to_string(),
            )
        })?;
    working.rows.sort_by(|a, b| a[sort_idx].cmp(&b[sort_idx]));

    let destination_idx = working
        .column_index("destination_well_384")
        .ok_or_else(|| SheetError::MissingColumn("destination_well_384".to_string()))?;
    working.columns.push("quad".to_string());
    for row in &mut working.rows {
        let (quadrant, _) = well_to_quadrant(&row[destination_idx])
            .map_err(|e| SheetError::Argument(e.to_string()))?;
        row.push(quadrant.to_string());
    }

    Ok(working)
}

fn mixed_replicates() -> SheetError {
    SheetError::Argument(
        "all projects in the Bioinformatics section must either contain replicates or not"
            .to_string(),
    )
}
