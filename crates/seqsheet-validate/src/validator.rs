use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use seqsheet_common::scrub_name;
use seqsheet_model::{Diagnostic, SampleSheet, has_errors};
use seqsheet_profiles::{ColumnSource, Profile};

/// Project names must end in an underscore-separated study identifier,
/// e.g. `CaporasoIllumina_550`.
static PROJECT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+_\d+$").expect("valid project pattern"));

/// Validate a sheet and scrub sample/project identifiers in place.
///
/// Returns every diagnostic found. Structural problems short-circuit: if the
/// schema itself is wrong, the later phases would produce noise, so only the
/// structural findings are returned.
pub fn quiet_validate(sheet: &mut SampleSheet, profile: &Profile) -> Vec<Diagnostic> {
    let mut diagnostics = structural_phase(sheet, profile);
    if !diagnostics.is_empty() {
        return diagnostics;
    }

    diagnostics.extend(scrub_phase(sheet));
    diagnostics.extend(cross_section_phase(sheet));
    diagnostics.extend(boolean_phase(sheet, profile));
    diagnostics
}

/// Like [`quiet_validate`], but echoes every diagnostic through the logging
/// layer. Returns true when no Error-class diagnostic was found; warnings
/// alone still count as success.
pub fn validate(sheet: &mut SampleSheet, profile: &Profile) -> bool {
    let diagnostics = quiet_validate(sheet, profile);
    for diagnostic in &diagnostics {
        diagnostic.echo();
    }
    !has_errors(&diagnostics)
}

fn structural_phase(sheet: &SampleSheet, profile: &Profile) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for column in profile.expected_columns(Some(ColumnSource::Samples(&sheet.data))) {
        if !sheet.data.columns.contains(&column) {
            diagnostics.push(Diagnostic::error(format!(
                "The {column} column in the Data section is missing"
            )));
        }
    }

    if sheet.bioinformatics.is_none() {
        diagnostics.push(Diagnostic::error(
            "The Bioinformatics section cannot be empty",
        ));
    }
    if sheet.contact.is_none() {
        diagnostics.push(Diagnostic::error("The Contact section cannot be empty"));
    }

    for (key, _) in profile.header_defaults {
        if !sheet.header.contains_key(key) {
            diagnostics.push(Diagnostic::error(format!(
                "'{key}' is not declared in the Header section"
            )));
        }
    }

    if let Some(assay) = sheet.header.get("Assay")
        && assay != profile.assay
    {
        diagnostics.push(Diagnostic::error(format!(
            "'Assay' value is not '{}'",
            profile.assay
        )));
    }

    if let Some(sheet_type) = sheet.header.get("SheetType")
        && sheet_type != profile.sheet_type
    {
        diagnostics.push(Diagnostic::error(format!(
            "'SheetType' value is not '{}'",
            profile.sheet_type
        )));
    }

    if let Some(raw_version) = sheet.header.get("SheetVersion") {
        // Legacy sheets sometimes wrap the version in stray quotes.
        let cleaned: String = raw_version
            .chars()
            .filter(|c| *c != '\'' && *c != '"')
            .collect();
        let expected: i64 = profile.sheet_version.parse().unwrap_or_default();
        match cleaned.parse::<i64>() {
            Ok(version) if version == expected => {}
            Ok(_) => diagnostics.push(Diagnostic::error(format!(
                "'SheetVersion' value is not '{expected}'"
            ))),
            Err(_) => diagnostics.push(Diagnostic::error(format!(
                "'{raw_version}' does not look like a valid SheetVersion"
            ))),
        }
    }

    diagnostics
}

fn scrub_phase(sheet: &mut SampleSheet) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut scrubbed_samples: Vec<String> = Vec::new();
    let mut renamed_projects: BTreeMap<String, String> = BTreeMap::new();

    for sample in &mut sheet.data.rows {
        if let Some(sample_id) = sample.get("Sample_ID") {
            let scrubbed = scrub_name(sample_id);
            if scrubbed != *sample_id {
                scrubbed_samples.push(sample_id.clone());
                sample.insert("Sample_ID".to_string(), scrubbed);
            }
        }
        if let Some(project) = sample.get("Sample_Project") {
            let scrubbed = scrub_name(project);
            if scrubbed != *project {
                renamed_projects.insert(project.clone(), scrubbed.clone());
                sample.insert("Sample_Project".to_string(), scrubbed);
            }
        }
    }

    if !scrubbed_samples.is_empty() {
        diagnostics.push(Diagnostic::warning(format!(
            "The following sample names were scrubbed for demultiplexer \
             compatibility:\n{}",
            scrubbed_samples.join(", ")
        )));
    }
    if !renamed_projects.is_empty() {
        diagnostics.push(Diagnostic::warning(format!(
            "The following project names were scrubbed for demultiplexer \
             compatibility. If the same invalid characters are also found in \
             the Bioinformatics and Contact sections those will be \
             automatically scrubbed too:\n{}",
            renamed_projects
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        )));

        // Propagate the renames so the sections keep matching.
        for (from, to) in &renamed_projects {
            if let Some(bioinformatics) = sheet.bioinformatics.as_mut() {
                bioinformatics.replace_in_column("Sample_Project", from, to);
            }
            if let Some(contact) = sheet.contact.as_mut() {
                contact.replace_in_column("Sample_Project", from, to);
            }
        }
    }

    diagnostics
}

fn cross_section_phase(sheet: &SampleSheet) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let pairs: BTreeSet<(String, String)> = sheet
        .data
        .rows
        .iter()
        .map(|sample| {
            (
                sample.get("Lane").cloned().unwrap_or_default(),
                sample.get("Sample_Project").cloned().unwrap_or_default(),
            )
        })
        .collect();
    let laneless: BTreeSet<&str> = pairs
        .iter()
        .filter(|(lane, _)| lane.trim().is_empty())
        .map(|(_, project)| project.as_str())
        .collect();
    if !laneless.is_empty() {
        diagnostics.push(Diagnostic::error(format!(
            "The following projects are missing a Lane value: {}",
            laneless.into_iter().collect::<Vec<_>>().join(", ")
        )));
    }

    let projects = sheet.projects();
    let bad_projects: Vec<&str> = projects
        .iter()
        .filter(|project| !PROJECT_ID_RE.is_match(project))
        .map(String::as_str)
        .collect();
    if !bad_projects.is_empty() {
        diagnostics.push(Diagnostic::error(format!(
            "The following project names in the Sample_Project column are \
             missing a study identifier: {}",
            bad_projects.join(", ")
        )));
    }

    let bioinformatics_projects = sheet
        .bioinformatics
        .as_ref()
        .map(|t| t.distinct("Sample_Project"))
        .unwrap_or_default();
    let contact_projects = sheet
        .contact
        .as_ref()
        .map(|t| t.distinct("Sample_Project"))
        .unwrap_or_default();

    let not_shared: BTreeSet<&String> = projects
        .symmetric_difference(&bioinformatics_projects)
        .collect();
    if !not_shared.is_empty() {
        diagnostics.push(Diagnostic::error(format!(
            "The following projects need to be in the Data and Bioinformatics \
             sections: {}",
            not_shared
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        )));
    } else if !contact_projects.is_subset(&projects) {
        let contact_only: Vec<String> =
            contact_projects.difference(&projects).cloned().collect();
        diagnostics.push(Diagnostic::warning(format!(
            "The following projects were only found in the Contact section: \
             {}. Projects need to be listed in the Data and Bioinformatics \
             sections in order to be included in the Contact section.",
            contact_only.join(", ")
        )));
    }

    diagnostics
}

fn boolean_phase(sheet: &mut SampleSheet, profile: &Profile) -> Vec<Diagnostic> {
    let Some(bioinformatics) = sheet.bioinformatics.as_mut() else {
        return Vec::new();
    };
    bioinformatics
        .normalize_boolean_columns(profile.bioinformatics_booleans)
        .into_iter()
        .map(Diagnostic::warning)
        .collect()
}
