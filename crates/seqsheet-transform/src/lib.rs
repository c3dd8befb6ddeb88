pub mod build;
pub mod demux;
pub mod merge;
pub mod metadata;
pub mod remap;

pub use build::make_sheet;
pub use demux::{demux_sheet, sheet_needs_demuxing};
pub use merge::merge;
pub use metadata::{SheetMetadata, apply_metadata, validate_metadata};
pub use remap::{add_data_to_sheet, remap_table};
