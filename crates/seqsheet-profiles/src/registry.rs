use seqsheet_model::{KeyValues, Result, SheetError};

use crate::profile::{
    ABSQUANT_SHEET_TYPE, AMPLICON, DUMMY_SHEET_TYPE, METAGENOMIC, METATRANSCRIPTOMIC, Profile,
    STANDARD_METAG_SHEET_TYPE, STANDARD_METAT_SHEET_TYPE, TELLSEQ_SHEET_TYPE,
};

/// File-level aliases applied to Data header fields while parsing, before
/// they become canonical column names. Shared with the lenient remap mode.
pub const COLUMN_ALTS: &[(&str, &str)] = &[
    ("well_description", "Well_description"),
    ("description", "Well_description"),
    ("Description", "Well_description"),
    ("sample_plate", "Sample_Plate"),
];

const CONTACT_COLUMNS: &[&str] = &["Sample_Project", "Email"];

const BASE_BIOINFORMATICS: &[&str] = &[
    "Sample_Project",
    "QiitaID",
    "BarcodesAreRC",
    "ForwardAdapter",
    "ReverseAdapter",
    "HumanFiltering",
    "library_construction_protocol",
    "experiment_design_description",
];

const REPLICATE_BIOINFORMATICS: &[&str] = &[
    "Sample_Project",
    "QiitaID",
    "BarcodesAreRC",
    "ForwardAdapter",
    "ReverseAdapter",
    "HumanFiltering",
    "contains_replicates",
    "library_construction_protocol",
    "experiment_design_description",
];

const BASE_BOOLEANS: &[&str] = &["BarcodesAreRC", "HumanFiltering"];
const REPLICATE_BOOLEANS: &[&str] = &["BarcodesAreRC", "HumanFiltering", "contains_replicates"];

const STANDARD_SETTINGS: &[(&str, &str)] = &[
    ("ReverseComplement", "0"),
    ("MaskShortReads", "1"),
    ("OverrideCycles", "Y151;I8N2;I8N2;Y151"),
];

// MaskShortReads and OverrideCycles only matter for metagenomic conversion.
const AMPLICON_SETTINGS: &[(&str, &str)] = &[("ReverseComplement", "0")];

const STANDARD_READS: &[u32] = &[151, 151];

const LEGACY_DATA_COLUMNS: &[&str] = &[
    "Sample_ID",
    "Sample_Name",
    "Sample_Plate",
    "Sample_Well",
    "I7_Index_ID",
    "index",
    "I5_Index_ID",
    "index2",
    "Sample_Project",
    "Well_description",
];

const METAG_DATA_COLUMNS: &[&str] = &[
    "Sample_ID",
    "Sample_Name",
    "Sample_Plate",
    "well_id_384",
    "I7_Index_ID",
    "index",
    "I5_Index_ID",
    "index2",
    "Sample_Project",
    "Well_description",
];

const ABSQUANT_DATA_COLUMNS: &[&str] = &[
    "Sample_ID",
    "Sample_Name",
    "Sample_Plate",
    "well_id_384",
    "I7_Index_ID",
    "index",
    "I5_Index_ID",
    "index2",
    "Sample_Project",
    "mass_syndna_input_ng",
    "extracted_gdna_concentration_ng_ul",
    "vol_extracted_elution_ul",
    "syndna_pool_number",
    "Well_description",
];

const METAT_V10_DATA_COLUMNS: &[&str] = &[
    "Sample_ID",
    "Sample_Name",
    "Sample_Plate",
    "well_id_384",
    "I7_Index_ID",
    "index",
    "I5_Index_ID",
    "index2",
    "Sample_Project",
    "total_rna_concentration_ng_ul",
    "vol_extracted_elution_ul",
    "Well_description",
];

const TELLSEQ_DATA_COLUMNS: &[&str] = &[
    "Sample_ID",
    "Sample_Name",
    "Sample_Plate",
    "Sample_Well",
    "barcode_id",
    "Sample_Project",
    "Well_description",
];

const KATHAROSEQ_COLUMNS: &[&str] = &[
    "Kathseq_RackID",
    "TubeCode",
    "katharo_description",
    "number_of_cells",
    "platemap_generation_date",
    "project_abbreviation",
    "vol_extracted_elution_ul",
    "well_id_96",
];

const METAG_REMAPPER: &[(&str, &str)] = &[
    ("sample sheet Sample_ID", "Sample_ID"),
    ("Sample", "Sample_Name"),
    ("Project Plate", "Sample_Plate"),
    ("Well", "well_id_384"),
    ("i7 name", "I7_Index_ID"),
    ("i7 sequence", "index"),
    ("i5 name", "I5_Index_ID"),
    ("i5 sequence", "index2"),
    ("Project Name", "Sample_Project"),
];

static AMPLICON_PROFILE: Profile = Profile {
    name: "amplicon",
    sheet_type: DUMMY_SHEET_TYPE,
    sheet_version: "0",
    version_aliases: &[],
    assay: AMPLICON,
    data_columns: LEGACY_DATA_COLUMNS,
    optional_columns: &[],
    bioinformatics_columns: BASE_BIOINFORMATICS,
    bioinformatics_booleans: BASE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    // Investigator Name and Experiment Name are not carried on amplicon runs.
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", DUMMY_SHEET_TYPE),
        ("SheetVersion", "0"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", AMPLICON),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: AMPLICON_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: &[
        ("sample sheet Sample_ID", "Sample_ID"),
        ("Sample", "Sample_Name"),
        ("Project Plate", "Sample_Plate"),
        ("Well", "Sample_Well"),
        ("Name", "I7_Index_ID"),
        ("Golay Barcode", "index"),
        ("Project Name", "Sample_Project"),
    ],
};

static METAGENOMIC_V90: Profile = Profile {
    name: "metagenomic_v90",
    sheet_type: STANDARD_METAG_SHEET_TYPE,
    sheet_version: "90",
    version_aliases: &[],
    assay: METAGENOMIC,
    data_columns: LEGACY_DATA_COLUMNS,
    optional_columns: &[],
    bioinformatics_columns: BASE_BIOINFORMATICS,
    bioinformatics_booleans: BASE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", STANDARD_METAG_SHEET_TYPE),
        ("SheetVersion", "90"),
        ("Investigator Name", "Knight"),
        ("Experiment Name", "RKL_experiment"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", METAGENOMIC),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: STANDARD_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: &[
        ("sample sheet Sample_ID", "Sample_ID"),
        ("Sample", "Sample_Name"),
        ("Project Plate", "Sample_Plate"),
        ("Well", "Sample_Well"),
        ("i7 name", "I7_Index_ID"),
        ("i7 sequence", "index"),
        ("i5 name", "I5_Index_ID"),
        ("i5 sequence", "index2"),
        ("Project Name", "Sample_Project"),
    ],
};

static METAGENOMIC_V100: Profile = Profile {
    name: "metagenomic_v100",
    sheet_type: STANDARD_METAG_SHEET_TYPE,
    sheet_version: "100",
    // 95 and 99 are functionally the same variant.
    version_aliases: &["95", "99"],
    assay: METAGENOMIC,
    data_columns: METAG_DATA_COLUMNS,
    optional_columns: &[],
    bioinformatics_columns: REPLICATE_BIOINFORMATICS,
    bioinformatics_booleans: REPLICATE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", STANDARD_METAG_SHEET_TYPE),
        ("SheetVersion", "100"),
        ("Investigator Name", "Knight"),
        ("Experiment Name", "RKL_experiment"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", METAGENOMIC),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: STANDARD_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: METAG_REMAPPER,
};

static METAGENOMIC_V101: Profile = Profile {
    name: "metagenomic_v101",
    sheet_type: STANDARD_METAG_SHEET_TYPE,
    sheet_version: "101",
    version_aliases: &[],
    assay: METAGENOMIC,
    data_columns: METAG_DATA_COLUMNS,
    optional_columns: KATHAROSEQ_COLUMNS,
    bioinformatics_columns: REPLICATE_BIOINFORMATICS,
    bioinformatics_booleans: REPLICATE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", STANDARD_METAG_SHEET_TYPE),
        ("SheetVersion", "101"),
        ("Investigator Name", "Knight"),
        ("Experiment Name", "RKL_experiment"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", METAGENOMIC),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: STANDARD_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: &[
        ("sample sheet Sample_ID", "Sample_ID"),
        ("Sample", "Sample_Name"),
        ("Project Plate", "Sample_Plate"),
        ("Well", "well_id_384"),
        ("i7 name", "I7_Index_ID"),
        ("i7 sequence", "index"),
        ("i5 name", "I5_Index_ID"),
        ("i5 sequence", "index2"),
        ("Project Name", "Sample_Project"),
        ("Kathseq_RackID", "Kathseq_RackID"),
    ],
};

static ABSQUANT_V10: Profile = Profile {
    name: "abs_quant_v10",
    sheet_type: ABSQUANT_SHEET_TYPE,
    sheet_version: "10",
    version_aliases: &[],
    assay: METAGENOMIC,
    data_columns: ABSQUANT_DATA_COLUMNS,
    optional_columns: &[],
    bioinformatics_columns: REPLICATE_BIOINFORMATICS,
    bioinformatics_booleans: REPLICATE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", ABSQUANT_SHEET_TYPE),
        ("SheetVersion", "10"),
        ("Investigator Name", "Knight"),
        ("Experiment Name", "RKL_experiment"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", METAGENOMIC),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: STANDARD_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: &[
        ("sample sheet Sample_ID", "Sample_ID"),
        ("Sample", "Sample_Name"),
        ("Project Plate", "Sample_Plate"),
        ("Well", "well_id_384"),
        ("i7 name", "I7_Index_ID"),
        ("i7 sequence", "index"),
        ("i5 name", "I5_Index_ID"),
        ("i5 sequence", "index2"),
        ("Project Name", "Sample_Project"),
        ("syndna_pool_number", "syndna_pool_number"),
        ("mass_syndna_input_ng", "mass_syndna_input_ng"),
        (
            "extracted_gdna_concentration_ng_ul",
            "extracted_gdna_concentration_ng_ul",
        ),
        ("vol_extracted_elution_ul", "vol_extracted_elution_ul"),
    ],
};

static METATRANSCRIPTOMIC_V0: Profile = Profile {
    name: "metatranscriptomic_v0",
    sheet_type: STANDARD_METAG_SHEET_TYPE,
    sheet_version: "0",
    version_aliases: &[],
    assay: METATRANSCRIPTOMIC,
    data_columns: METAG_DATA_COLUMNS,
    optional_columns: &[],
    bioinformatics_columns: REPLICATE_BIOINFORMATICS,
    bioinformatics_booleans: REPLICATE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", STANDARD_METAG_SHEET_TYPE),
        ("SheetVersion", "0"),
        ("Investigator Name", "Knight"),
        ("Experiment Name", "RKL_experiment"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", METATRANSCRIPTOMIC),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: STANDARD_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: METAG_REMAPPER,
};

static METATRANSCRIPTOMIC_V10: Profile = Profile {
    name: "metatranscriptomic_v10",
    sheet_type: STANDARD_METAT_SHEET_TYPE,
    sheet_version: "10",
    version_aliases: &[],
    assay: METATRANSCRIPTOMIC,
    data_columns: METAT_V10_DATA_COLUMNS,
    optional_columns: &[],
    bioinformatics_columns: REPLICATE_BIOINFORMATICS,
    bioinformatics_booleans: REPLICATE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", STANDARD_METAT_SHEET_TYPE),
        ("SheetVersion", "10"),
        ("Investigator Name", "Knight"),
        ("Experiment Name", "RKL_experiment"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", METATRANSCRIPTOMIC),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: STANDARD_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: &[
        ("sample sheet Sample_ID", "Sample_ID"),
        ("Sample", "Sample_Name"),
        ("Project Plate", "Sample_Plate"),
        ("Well", "well_id_384"),
        ("i7 name", "I7_Index_ID"),
        ("i7 sequence", "index"),
        ("i5 name", "I5_Index_ID"),
        ("i5 sequence", "index2"),
        ("Project Name", "Sample_Project"),
        (
            "Sample RNA Concentration",
            "total_rna_concentration_ng_ul",
        ),
        ("vol_extracted_elution_ul", "vol_extracted_elution_ul"),
    ],
};

static TELLSEQ_V10: Profile = Profile {
    name: "tellseq_v10",
    sheet_type: TELLSEQ_SHEET_TYPE,
    sheet_version: "10",
    version_aliases: &[],
    assay: METAGENOMIC,
    data_columns: TELLSEQ_DATA_COLUMNS,
    optional_columns: &[],
    bioinformatics_columns: REPLICATE_BIOINFORMATICS,
    bioinformatics_booleans: REPLICATE_BOOLEANS,
    contact_columns: CONTACT_COLUMNS,
    header_defaults: &[
        ("IEMFileVersion", "4"),
        ("SheetType", TELLSEQ_SHEET_TYPE),
        ("SheetVersion", "10"),
        ("Investigator Name", "Knight"),
        ("Experiment Name", "RKL_experiment"),
        ("Date", ""),
        ("Workflow", "GenerateFASTQ"),
        ("Application", "FASTQ Only"),
        ("Assay", METAGENOMIC),
        ("Description", ""),
        ("Chemistry", "Default"),
    ],
    settings_defaults: STANDARD_SETTINGS,
    reads_defaults: STANDARD_READS,
    remapper: METAG_REMAPPER,
};

/// Every known profile, in lookup order.
pub static PROFILES: &[&Profile] = &[
    &AMPLICON_PROFILE,
    &METAGENOMIC_V101,
    &METAGENOMIC_V100,
    &METAGENOMIC_V90,
    &ABSQUANT_V10,
    &METATRANSCRIPTOMIC_V0,
    &METATRANSCRIPTOMIC_V10,
    &TELLSEQ_V10,
];

/// Select a profile by the exact `(sheet_type, sheet_version, assay)` triple.
pub fn find_profile(
    sheet_type: &str,
    sheet_version: &str,
    assay: &str,
) -> Result<&'static Profile> {
    PROFILES
        .iter()
        .copied()
        .find(|profile| {
            profile.sheet_type == sheet_type
                && profile.assay == assay
                && (profile.sheet_version == sheet_version
                    || profile.version_aliases.contains(&sheet_version))
        })
        .ok_or_else(|| {
            SheetError::UnrecognizedSheet(format!(
                "{sheet_type} v{sheet_version} ({assay})"
            ))
        })
}

/// Select a profile from a parsed Header section.
///
/// `Assay`, `SheetType` and `SheetVersion` must all be present; stray quote
/// characters around the version are ignored.
pub fn profile_for_header(header: &KeyValues) -> Result<&'static Profile> {
    let mut missing = Vec::new();
    for key in ["Assay", "SheetType", "SheetVersion"] {
        if !header.contains_key(key) {
            missing.push(format!("'{key}'"));
        }
    }
    if !missing.is_empty() {
        return Err(SheetError::MissingHeaderFields(missing.join(", ")));
    }

    let sheet_type = header.get("SheetType").unwrap_or_default();
    let assay = header.get("Assay").unwrap_or_default();
    let version: String = header
        .get("SheetVersion")
        .unwrap_or_default()
        .chars()
        .filter(|c| *c != '\'' && *c != '"')
        .collect();

    find_profile(sheet_type, &version, assay)
}
