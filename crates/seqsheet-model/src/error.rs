use thiserror::Error;

/// Fatal, structural failures. Data-quality findings are reported as
/// [`crate::Diagnostic`] values instead and are never raised through here.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sample sheet contains invalid characters on line {line}: {content}")]
    InvalidCharacters { line: usize, content: String },
    #[error("header for [Data] section is not allowed to have empty fields: {fields}")]
    EmptyDataHeader { fields: String },
    #[error("line {line} in the [Reads] section is not a cycle count: '{value}'")]
    InvalidReadCount { line: usize, value: String },
    #[error("sample keys [{found}] do not match the sheet columns [{expected}]")]
    SampleColumnMismatch { expected: String, found: String },
    #[error("the {section} section is different for sample sheet {index}")]
    SectionMismatch { section: String, index: usize },
    #[error("'{0}' does not appear to be a valid sample sheet")]
    UnrecognizedSheet(String),
    #[error("the first section must be [Header], found '{0}'")]
    MisplacedHeader(String),
    #[error("the following fields must be defined in [Header]: {0}")]
    MissingHeaderFields(String),
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("{0}")]
    Argument(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
