use std::collections::BTreeMap;

use chrono::Local;

use seqsheet_model::{Diagnostic, KeyValues, Result, SampleSheet, SheetError, Table};
use seqsheet_profiles::{ASSAYS, Profile};

/// Read-length metadata keys, in read order.
const READ_KEYS: &[&str] = &["Read1", "Read2"];

/// Sequencer families, most specific last: `iseq` is a substring of the
/// others, so it must be tried after them.
const SEQUENCER_FAMILIES: &[&str] = &["novaseq", "hiseq", "miseq", "miniseq", "iseq"];

/// Run-wide metadata used to populate a new sheet.
///
/// `values` holds scalar Header/Settings/Reads overrides keyed by their sheet
/// names; anything omitted falls back to the profile defaults. The two table
/// fields carry one entry per downstream project.
#[derive(Debug, Clone, Default)]
pub struct SheetMetadata {
    pub values: KeyValues,
    pub bioinformatics: Vec<BTreeMap<String, String>>,
    pub contact: Vec<BTreeMap<String, String>>,
}

impl SheetMetadata {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Check metadata before it is applied to a sheet.
///
/// Returns error diagnostics only; an empty list means the metadata is usable.
pub fn validate_metadata(metadata: &SheetMetadata, profile: &Profile) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if metadata.bioinformatics.is_empty() {
        diagnostics.push(Diagnostic::error("Bioinformatics is a required attribute"));
    }
    if metadata.contact.is_empty() {
        diagnostics.push(Diagnostic::error("Contact is a required attribute"));
    }

    if !metadata.bioinformatics.is_empty() && !metadata.contact.is_empty() {
        for (section, rows, columns) in [
            (
                "Bioinformatics",
                &metadata.bioinformatics,
                profile.bioinformatics_columns,
            ),
            ("Contact", &metadata.contact, profile.contact_columns),
        ] {
            for (index, project) in rows.iter().enumerate() {
                let expected: Vec<&str> = {
                    let mut sorted: Vec<&str> = columns.to_vec();
                    sorted.sort_unstable();
                    sorted
                };
                let found: Vec<&str> = project.keys().map(String::as_str).collect();
                if found != expected {
                    diagnostics.push(Diagnostic::error(format!(
                        "In the {section} section Project #{} does not have \
                         exactly these keys {}",
                        index + 1,
                        expected.join(", ")
                    )));
                }
                if section == "Bioinformatics" {
                    for required in [
                        "library_construction_protocol",
                        "experiment_design_description",
                    ] {
                        if project.get(required).is_none_or(|v| v.is_empty()) {
                            diagnostics.push(Diagnostic::error(format!(
                                "In the {section} section Project #{} does \
                                 not have {required} specified",
                                index + 1
                            )));
                        }
                    }
                }
            }
        }
    }

    if let Some(assay) = metadata.values.get("Assay")
        && !ASSAYS.contains(&assay)
    {
        diagnostics.push(Diagnostic::error(format!(
            "{assay} is not a supported Assay"
        )));
    }

    let unsupported: Vec<&str> = metadata
        .values
        .keys()
        .filter(|key| {
            !profile.header_defaults.iter().any(|(k, _)| k == key)
                && !profile.settings_defaults.iter().any(|(k, _)| k == key)
                && !READ_KEYS.contains(key)
        })
        .collect();
    if !unsupported.is_empty() {
        let mut unsupported = unsupported;
        unsupported.sort_unstable();
        diagnostics.push(Diagnostic::error(format!(
            "These metadata keys are not supported: {}",
            unsupported.join(", ")
        )));
    }

    diagnostics
}

/// Populate a sheet's Header, Reads, Settings and project tables from
/// metadata, falling back to the profile defaults.
///
/// The `Date` header defaults to today so that it reflects when the sheet was
/// written. iSeq-family sequencers drop the `MaskShortReads` and
/// `OverrideCycles` settings, which only confuse that instrument's
/// conversion; a sequencer outside every known family is fatal.
pub fn apply_metadata(
    sheet: &mut SampleSheet,
    metadata: &SheetMetadata,
    sequencer: &str,
    profile: &Profile,
) -> Result<()> {
    sheet.reads = profile.reads_defaults.to_vec();
    for (slot, key) in READ_KEYS.iter().enumerate() {
        if let Some(value) = metadata.values.get(key) {
            let cycles: u32 = value.parse().map_err(|_| {
                SheetError::Argument(format!("'{value}' is not a valid {key} cycle count"))
            })?;
            if slot < sheet.reads.len() {
                sheet.reads[slot] = cycles;
            }
        }
    }

    for (key, default) in profile.settings_defaults {
        let value = metadata.values.get(key).unwrap_or(default);
        sheet.settings.set(*key, value);
    }

    for (key, default) in profile.header_defaults {
        let value = match metadata.values.get(key) {
            Some(value) => value.to_string(),
            None if *key == "Date" => Local::now().format("%Y-%m-%d").to_string(),
            None => (*default).to_string(),
        };
        sheet.header.set(*key, value);
    }

    sheet.bioinformatics = Some(table_from_rows(
        profile.bioinformatics_columns,
        &metadata.bioinformatics,
    ));
    sheet.contact = Some(table_from_rows(profile.contact_columns, &metadata.contact));

    let family = SEQUENCER_FAMILIES
        .iter()
        .find(|family| sequencer.to_lowercase().contains(*family))
        .ok_or_else(|| SheetError::Argument(format!("{sequencer} isn't a known sequencer")))?;
    if *family == "iseq" {
        sheet.settings.remove("MaskShortReads");
        sheet.settings.remove("OverrideCycles");
    }

    Ok(())
}

fn table_from_rows(columns: &[&str], rows: &[BTreeMap<String, String>]) -> Table {
    let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
    for row in rows {
        table.push_row(
            columns
                .iter()
                .map(|column| row.get(*column).cloned().unwrap_or_default())
                .collect(),
        );
    }
    table
}
