pub mod profile;
pub mod registry;

pub use profile::{
    ABSQUANT_SHEET_TYPE, AMPLICON, ASSAYS, CONTROL_PREFIX, ColumnSource, DUMMY_SHEET_TYPE,
    METAGENOMIC, METATRANSCRIPTOMIC, Profile, STANDARD_METAG_SHEET_TYPE, STANDARD_METAT_SHEET_TYPE,
    TELLSEQ_SHEET_TYPE,
};
pub use registry::{COLUMN_ALTS, PROFILES, find_profile, profile_for_header};
