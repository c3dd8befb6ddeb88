pub mod parser;
pub mod writer;

pub use parser::{load_sheet, load_sheet_from_str, parse_sheet, sniff_header};
pub use writer::{write_sheet, write_sheet_to, write_sheet_with};
