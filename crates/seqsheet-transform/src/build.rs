use seqsheet_model::{Result, SampleSheet, SheetError, Table, has_errors};
use seqsheet_profiles::profile_for_header;
use seqsheet_validate::quiet_validate;

use crate::metadata::{SheetMetadata, apply_metadata, validate_metadata};
use crate::remap::add_data_to_sheet;

/// Build a complete, validated sheet from run metadata and a wide plate
/// table.
///
/// The profile is selected from the `SheetType`/`SheetVersion`/`Assay`
/// metadata values. Metadata problems abort before anything is built; once
/// the sheet is assembled it goes through full validation, and any
/// Error-class diagnostic is fatal with the collected messages joined into
/// the error. Warnings are echoed and the sheet is returned.
pub fn make_sheet(
    metadata: &SheetMetadata,
    table: &Table,
    sequencer: &str,
    lanes: &[u32],
    strict: bool,
) -> Result<SampleSheet> {
    let profile = profile_for_header(&metadata.values)?;

    let mut diagnostics = validate_metadata(metadata, profile);
    if diagnostics.is_empty() {
        let mut sheet = SampleSheet::new();
        apply_metadata(&mut sheet, metadata, sequencer, profile)?;
        let mut warnings = add_data_to_sheet(&mut sheet, table, sequencer, lanes, profile, strict)?;

        diagnostics = quiet_validate(&mut sheet, profile);
        if !has_errors(&diagnostics) {
            warnings.extend(diagnostics);
            for warning in &warnings {
                warning.echo();
            }
            return Ok(sheet);
        }
    }

    for diagnostic in &diagnostics {
        diagnostic.echo();
    }
    let joined: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    Err(SheetError::Argument(joined.join("\n")))
}
