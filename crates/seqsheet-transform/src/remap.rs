use seqsheet_common::{i5_index_for, is_revcomp_sequencer};
use seqsheet_model::{Diagnostic, Result, Sample, SampleSheet, SheetError, Table};
use seqsheet_profiles::{AMPLICON, COLUMN_ALTS, ColumnSource, Profile};

/// Rename the columns of a wide external table into their canonical Data
/// names.
///
/// Strict mode keeps exactly the columns named by the profile's remapper;
/// anything not declared there is dropped, and a declared column that is
/// missing from the input is fatal. Lenient mode first drops a literal
/// `index` column (a stray numeric index, not a barcode sequence), renames
/// through the file-level aliases merged with the profile remapper, and then
/// keeps only the columns the profile recognizes, without requiring all of
/// them to be present.
pub fn remap_table(table: &Table, profile: &Profile, strict: bool) -> Result<Table> {
    if strict {
        let mut result = Table::new(
            profile
                .remapper
                .iter()
                .map(|(_, to)| (*to).to_string())
                .collect(),
        );
        let mut indices = Vec::with_capacity(profile.remapper.len());
        for (from, _) in profile.remapper {
            let idx = table
                .column_index(from)
                .ok_or_else(|| SheetError::MissingColumn((*from).to_string()))?;
            indices.push(idx);
        }
        for row in &table.rows {
            result.push_row(indices.iter().map(|idx| row[*idx].clone()).collect());
        }
        return Ok(result);
    }

    let mut renamed = table.clone();
    renamed.drop_column("index");
    for column in &mut renamed.columns {
        // The profile remapper wins over the file-level aliases.
        let target = profile
            .remapper
            .iter()
            .chain(COLUMN_ALTS)
            .find(|&&(from, _)| from == *column);
        if let Some(&(_, to)) = target {
            *column = to.to_string();
        }
    }

    let expected = profile.expected_columns(Some(ColumnSource::Candidate(&renamed)));
    let mut result = Table::new(
        expected
            .iter()
            .filter(|column| renamed.has_column(column))
            .cloned()
            .collect(),
    );
    let indices: Vec<usize> = result
        .columns
        .iter()
        .map(|column| renamed.column_index(column).unwrap_or_default())
        .collect();
    for row in &renamed.rows {
        result.push_row(indices.iter().map(|idx| row[*idx].clone()).collect());
    }
    Ok(result)
}

/// Remap an external table into a sheet's Data section, one sample per
/// (lane, row) combination.
///
/// `Well_description` is recomputed from the `Project Plate`, `Sample` and
/// `Well` input columns before remapping; all three must be present. Expected
/// columns absent after remapping are created empty, each with a warning.
/// For non-amplicon assays the `index2` barcode is reoriented for the named
/// sequencer and the Bioinformatics `BarcodesAreRC` flag records whether a
/// reorientation took place.
pub fn add_data_to_sheet(
    sheet: &mut SampleSheet,
    table: &Table,
    sequencer: &str,
    lanes: &[u32],
    profile: &Profile,
    strict: bool,
) -> Result<Vec<Diagnostic>> {
    if !profile.has_remapper() {
        return Err(SheetError::Argument(
            "this sheet variant does not define a column remapper".to_string(),
        ));
    }

    let mut well_descriptions = Vec::with_capacity(table.rows.len());
    for source in ["Project Plate", "Sample", "Well"] {
        if !table.has_column(source) {
            return Err(SheetError::MissingColumn(source.to_string()));
        }
    }
    for row in 0..table.rows.len() {
        let plate = table.value(row, "Project Plate").unwrap_or_default();
        let sample = table.value(row, "Sample").unwrap_or_default();
        let well = table.value(row, "Well").unwrap_or_default();
        well_descriptions.push(format!("{plate}.{sample}.{well}"));
    }

    let mut remapped = remap_table(table, profile, strict)?;
    if !remapped.has_column("Well_description") {
        remapped.columns.push("Well_description".to_string());
        for row in &mut remapped.rows {
            row.push(String::new());
        }
    }
    let idx = remapped
        .column_index("Well_description")
        .unwrap_or_default();
    for (row, description) in remapped.rows.iter_mut().zip(well_descriptions) {
        row[idx] = description;
    }

    let mut warnings = Vec::new();
    for column in profile.expected_columns(None) {
        if !remapped.has_column(&column) {
            tracing::warn!(column, "expected column is empty");
            warnings.push(Diagnostic::warning(format!(
                "The column {column} in the sample sheet is empty"
            )));
            remapped.set_column(&column, "");
        }
    }

    if profile.assay != AMPLICON {
        if let Some(idx) = remapped.column_index("index2") {
            for row in &mut remapped.rows {
                row[idx] = i5_index_for(sequencer, &row[idx]);
            }
        }
        if let Some(bioinformatics) = sheet.bioinformatics.as_mut() {
            let flag = if is_revcomp_sequencer(sequencer) {
                "True"
            } else {
                "False"
            };
            bioinformatics.set_column("BarcodesAreRC", flag);
        }
    }

    let mut columns = remapped.columns.clone();
    if !columns.iter().any(|c| c == "Lane") {
        columns.push("Lane".to_string());
    }
    sheet.data.columns = columns.clone();

    for lane in lanes {
        for row in &remapped.rows {
            let mut sample: Sample = remapped
                .columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect();
            sample.insert("Lane".to_string(), lane.to_string());
            sheet.push_sample(sample)?;
        }
    }

    Ok(warnings)
}
