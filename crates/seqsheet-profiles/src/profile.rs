use seqsheet_model::{DataSection, Table};

pub const AMPLICON: &str = "TruSeq HT";
pub const METAGENOMIC: &str = "Metagenomic";
pub const METATRANSCRIPTOMIC: &str = "Metatranscriptomic";

pub const ASSAYS: &[&str] = &[AMPLICON, METAGENOMIC, METATRANSCRIPTOMIC];

pub const STANDARD_METAG_SHEET_TYPE: &str = "standard_metag";
pub const STANDARD_METAT_SHEET_TYPE: &str = "standard_metat";
pub const ABSQUANT_SHEET_TYPE: &str = "abs_quant_metag";
pub const TELLSEQ_SHEET_TYPE: &str = "tellseq_metag";
pub const DUMMY_SHEET_TYPE: &str = "dummy_amp";

/// Sample names carrying this prefix (any case) are control samples; their
/// presence switches the extra control-metadata columns from optional to
/// required.
pub const CONTROL_PREFIX: &str = "katharo";

/// Schema descriptor for one sample sheet variant.
///
/// Profiles are process-wide constant data selected by the
/// `(sheet_type, sheet_version, assay)` triple from the Header section. All
/// variant-specific behavior lives here as data; there is one code path for
/// every variant.
#[derive(Debug)]
pub struct Profile {
    pub name: &'static str,
    pub sheet_type: &'static str,
    pub sheet_version: &'static str,
    /// Additional versions that select this profile on lookup.
    pub version_aliases: &'static [&'static str],
    pub assay: &'static str,
    /// Canonical Data-section columns.
    pub data_columns: &'static [&'static str],
    /// Extra Data columns required only when control samples are present.
    pub optional_columns: &'static [&'static str],
    pub bioinformatics_columns: &'static [&'static str],
    pub bioinformatics_booleans: &'static [&'static str],
    pub contact_columns: &'static [&'static str],
    /// Default Header keys and values, in write order.
    pub header_defaults: &'static [(&'static str, &'static str)],
    pub settings_defaults: &'static [(&'static str, &'static str)],
    pub reads_defaults: &'static [u32],
    /// External name -> canonical Data column alias map used by the remapper.
    pub remapper: &'static [(&'static str, &'static str)],
}

/// Where to look for control samples when computing the expected column set.
#[derive(Debug, Clone, Copy)]
pub enum ColumnSource<'a> {
    /// Samples already inserted into a sheet.
    Samples(&'a DataSection),
    /// A candidate wide table about to be remapped into a sheet.
    Candidate(&'a Table),
}

impl Profile {
    /// The full set of Data columns this profile requires, given what is (or
    /// is about to be) in the sheet.
    ///
    /// The optional columns are appended whenever any `Sample_Name` value in
    /// the source starts with [`CONTROL_PREFIX`]; both sources are evaluated
    /// by the same predicate.
    pub fn expected_columns(&self, source: Option<ColumnSource<'_>>) -> Vec<String> {
        let mut columns: Vec<String> = self.data_columns.iter().map(|c| (*c).to_string()).collect();
        if self.optional_columns.is_empty() {
            return columns;
        }

        let has_controls = match source {
            Some(ColumnSource::Samples(data)) => data.rows.iter().any(|sample| {
                sample
                    .get("Sample_Name")
                    .is_some_and(|name| is_control_name(name))
            }),
            Some(ColumnSource::Candidate(table)) => table
                .column_values("Sample_Name")
                .iter()
                .any(|name| is_control_name(name)),
            None => false,
        };

        if has_controls {
            columns.extend(self.optional_columns.iter().map(|c| (*c).to_string()));
        }
        columns
    }

    pub fn has_remapper(&self) -> bool {
        !self.remapper.is_empty()
    }
}

fn is_control_name(name: &str) -> bool {
    // `get` rather than a byte slice: the prefix length may land inside a
    // multi-byte character in names that reached us without passing through
    // the ASCII-only parser.
    name.get(..CONTROL_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CONTROL_PREFIX))
}
