use thiserror::Error;

pub(crate) const NO_ROOT_ELEMENT: &str = "document has no root element";
pub(crate) const UNCLOSED_ELEMENT: &str = "unexpected end of document inside element";
pub(crate) const TRAILING_ELEMENT: &str = "content after the root element";

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("{element} is missing required attribute {attribute}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("lane {0} has neither a fixed account nor a conditional performer")]
    MissingPerformer(String),

    #[error("invalid version: {0}")]
    InvalidVersion(String),

    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("invalid data store field: {0}")]
    InvalidDataStoreField(String),

    #[error("timer event {0} declares neither a fixed nor a conditional value")]
    IncompleteTimer(String),

    #[error("timer event {0} declares both a fixed and a conditional value")]
    AmbiguousTimer(String),

    #[error("timer event {0} declares an eventType its timer value contradicts")]
    EventTypeMismatch(String),

    #[error("process {process} declares id {id} more than once")]
    DuplicateId { process: String, id: String },

    #[error("process {process} references unknown {kind} {id}")]
    DanglingReference {
        process: String,
        kind: &'static str,
        id: String,
    },

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("parse task failed: {0}")]
    Task(String),

    #[error("no document has been parsed")]
    NotParsed,
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error::MalformedDocument(value.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedDocument(value.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for Error {
    fn from(value: quick_xml::encoding::EncodingError) -> Self {
        Error::MalformedDocument(value.to_string())
    }
}

impl Error {
    /// True for errors raised by the document itself.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Error::NotParsed | Error::Task(_))
    }
}
