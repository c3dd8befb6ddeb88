pub mod diagnostic;
pub mod document;
pub mod error;
pub mod table;

pub use diagnostic::{Diagnostic, Severity, has_errors};
pub use document::{DataSection, KeyValues, Sample, SampleSheet};
pub use error::{Result, SheetError};
pub use table::Table;
