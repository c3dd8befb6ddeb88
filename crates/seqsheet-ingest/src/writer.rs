use std::path::Path;

use seqsheet_model::{Result, SampleSheet, SheetError};

/// Fixed section write order.
const SECTION_ORDER: &[&str] = &[
    "Header",
    "Reads",
    "Settings",
    "Data",
    "Bioinformatics",
    "Contact",
];

/// Serialize a sheet with one blank padding row between sections.
pub fn write_sheet(sheet: &SampleSheet) -> Result<String> {
    write_sheet_with(sheet, 1)
}

/// Serialize a sheet.
///
/// Every row across every section is right-padded to a uniform width: the
/// widest of the Data, Bioinformatics and Contact column sets, with a floor
/// of two fields. Each section marker is always written, even when the
/// section is empty, and every section is followed by `blank_lines` fully
/// blank rows.
pub fn write_sheet_with(sheet: &SampleSheet, blank_lines: usize) -> Result<String> {
    if blank_lines == 0 {
        return Err(SheetError::Argument(
            "number of blank lines must be a positive integer".to_string(),
        ));
    }

    let width = sheet
        .data
        .columns
        .len()
        .max(sheet.bioinformatics.as_ref().map_or(0, |t| t.columns.len()))
        .max(sheet.contact.as_ref().map_or(0, |t| t.columns.len()))
        .max(2);

    let pad = |mut row: Vec<String>| -> Vec<String> {
        row.resize(width, String::new());
        row
    };

    let mut out = csv::WriterBuilder::new().from_writer(Vec::new());
    let mut emit = |row: Vec<String>| -> Result<()> {
        out.write_record(&row)
            .map_err(|e| SheetError::Argument(format!("csv write failed: {e}")))
    };

    for section in SECTION_ORDER {
        emit(pad(vec![format!("[{section}]")]))?;

        match *section {
            "Header" => {
                for (key, value) in sheet.header.iter() {
                    emit(pad(vec![key.to_string(), value.to_string()]))?;
                }
            }
            "Reads" => {
                for cycles in &sheet.reads {
                    emit(pad(vec![cycles.to_string()]))?;
                }
            }
            "Settings" => {
                for (key, value) in sheet.settings.iter() {
                    emit(pad(vec![key.to_string(), value.to_string()]))?;
                }
            }
            "Data" => {
                if !sheet.data.columns.is_empty() {
                    emit(pad(sheet.data.columns.clone()))?;
                    for sample in &sheet.data.rows {
                        let row = sheet
                            .data
                            .columns
                            .iter()
                            .map(|column| sample.get(column).cloned().unwrap_or_default())
                            .collect();
                        emit(pad(row))?;
                    }
                }
            }
            "Bioinformatics" | "Contact" => {
                let table = if *section == "Bioinformatics" {
                    sheet.bioinformatics.as_ref()
                } else {
                    sheet.contact.as_ref()
                };
                if let Some(table) = table {
                    emit(pad(table.columns.clone()))?;
                    for row in &table.rows {
                        emit(pad(row.clone()))?;
                    }
                }
            }
            _ => unreachable!("unknown section in write order"),
        }

        for _ in 0..blank_lines {
            emit(pad(Vec::new()))?;
        }
    }

    let bytes = out
        .into_inner()
        .map_err(|e| SheetError::Argument(format!("csv write failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| SheetError::Argument(format!("invalid utf-8: {e}")))
}

/// Serialize a sheet straight to a file.
pub fn write_sheet_to(sheet: &SampleSheet, path: &Path) -> Result<()> {
    let text = write_sheet(sheet)?;
    std::fs::write(path, text)?;
    Ok(())
}
