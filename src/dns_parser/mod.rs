//! Parser and builder for the DNS wire format of RFC 1035
//!
//! Parsing borrows from the received buffer: names are kept as slices into
//! the whole message so that compression pointers, which are absolute
//! offsets, can be followed at any time.

mod builder;
mod enums;
mod error;
mod header;
mod name;
mod parser;
mod rrdata;
mod structs;

pub use self::builder::{encode_query, encode_query_with_id};
pub use self::builder::{Additional, Answers, Builder, Nameservers, Questions};
pub use self::enums::{Class, Opcode, QueryClass, QueryType, ResponseCode, Type};
pub use self::error::Error;
pub use self::header::Header;
pub use self::name::{Labels, Name};
pub use self::rrdata::RRData;
pub use self::structs::{Packet, Question, ResourceRecord};
