use seqsheet_model::{KeyValues, Result, SampleSheet, SheetError};

/// Merge the samples of several sheets into `base`.
///
/// The sheets must describe the same run: Header (ignoring `Date`), Settings
/// and Reads are compared order-insensitively against each input, and any
/// mismatch names the section and the 1-based index of the offending sheet.
/// Samples are appended in input order. Bioinformatics and Contact rows are
/// appended and de-duplicated, keeping the first occurrence; when only the
/// input carries one of the tables it is copied over.
pub fn merge(base: &mut SampleSheet, sheets: &[SampleSheet]) -> Result<()> {
    for (number, sheet) in sheets.iter().enumerate() {
        let index = number + 1;
        if without_date(&base.header) != without_date(&sheet.header) {
            return Err(SheetError::SectionMismatch {
                section: "Header".to_string(),
                index,
            });
        }
        if base.settings.as_map() != sheet.settings.as_map() {
            return Err(SheetError::SectionMismatch {
                section: "Settings".to_string(),
                index,
            });
        }
        if base.reads != sheet.reads {
            return Err(SheetError::SectionMismatch {
                section: "Reads".to_string(),
                index,
            });
        }
    }

    for sheet in sheets {
        if base.data.columns.is_empty() {
            base.data.columns = sheet.data.columns.clone();
        }
        for sample in &sheet.data.rows {
            base.push_sample(sample.clone())?;
        }

        merge_table(&mut base.bioinformatics, &sheet.bioinformatics);
        merge_table(&mut base.contact, &sheet.contact);
    }

    Ok(())
}

fn without_date<'a>(header: &'a KeyValues) -> std::collections::BTreeMap<&'a str, &'a str> {
    let mut map = header.as_map();
    map.remove("Date");
    map
}

fn merge_table(
    base: &mut Option<seqsheet_model::Table>,
    other: &Option<seqsheet_model::Table>,
) {
    match (base.as_mut(), other) {
        (Some(this), Some(that)) => {
            for row in &that.rows {
                this.push_row(row.clone());
            }
            this.dedup_rows();
        }
        (None, Some(that)) => *base = Some(that.clone()),
        _ => {}
    }
}
