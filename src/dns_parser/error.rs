use thiserror::Error;

/// Error parsing DNS packet
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("packet is smaller than header size")]
    HeaderTooShort,
    #[error("packet has incomplete data")]
    UnexpectedEOF,
    #[error("wrong (too short or too long) size of RDATA")]
    WrongRdataLength,
    #[error("label in domain name has unknown label format")]
    UnknownLabelFormat,
    #[error("domain name {0:?} has an empty label")]
    EmptyLabel(String),
    #[error("label {0:?} is longer than 63 bytes")]
    LabelTooLong(String),
    #[error("compression pointer to offset {0} is outside of the packet")]
    PointerOutOfBounds(usize),
    #[error("too many compression pointers in domain name")]
    TooManyPointers,
    #[error("query type {0:?} is not supported")]
    UnsupportedQueryType(String),
    #[error("query type {0} is invalid")]
    InvalidQueryType(u16),
    #[error("query class {0} is invalid")]
    InvalidQueryClass(u16),
}
