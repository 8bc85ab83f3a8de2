use std::fmt;
use std::str::FromStr;

use super::Error;

/// The type of a resource record as found in a packet
///
/// Only the types the resolver acts on are named, everything else is kept
/// as its numeric code.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Type {
    /// a host address
    A,
    /// an authoritative name server
    NS,
    Unknown(u16),
}

impl Type {
    pub fn code(self) -> u16 {
        match self {
            Type::A => 1,
            Type::NS => 2,
            Type::Unknown(code) => code,
        }
    }
}

impl From<u16> for Type {
    fn from(code: u16) -> Type {
        match code {
            1 => Type::A,
            2 => Type::NS,
            code => Type::Unknown(code),
        }
    }
}

impl From<QueryType> for Type {
    fn from(qtype: QueryType) -> Type {
        match qtype {
            QueryType::A => Type::A,
            QueryType::NS => Type::NS,
        }
    }
}

/// The QTYPE of a question we are able to send
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u16)]
pub enum QueryType {
    /// a host address
    A = 1,
    /// an authoritative name server
    NS = 2,
}

impl QueryType {
    pub fn parse(code: u16) -> Result<QueryType, Error> {
        match code {
            1 => Ok(QueryType::A),
            2 => Ok(QueryType::NS),
            x => Err(Error::InvalidQueryType(x)),
        }
    }
}

impl FromStr for QueryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<QueryType, Error> {
        if s.eq_ignore_ascii_case("A") {
            Ok(QueryType::A)
        } else if s.eq_ignore_ascii_case("NS") {
            Ok(QueryType::NS)
        } else {
            Err(Error::UnsupportedQueryType(s.to_owned()))
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            QueryType::A => fmt.write_str("A"),
            QueryType::NS => fmt.write_str("NS"),
        }
    }
}

/// The CLASS value of a resource record
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Class {
    /// the Internet
    IN,
    Unknown(u16),
}

impl Class {
    pub fn code(self) -> u16 {
        match self {
            Class::IN => 1,
            Class::Unknown(code) => code,
        }
    }
}

impl From<u16> for Class {
    fn from(code: u16) -> Class {
        match code {
            1 => Class::IN,
            code => Class::Unknown(code),
        }
    }
}

/// The QCLASS value of a question
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u16)]
pub enum QueryClass {
    /// the Internet
    IN = 1,
}

impl QueryClass {
    pub fn parse(code: u16) -> Result<QueryClass, Error> {
        match code {
            1 => Ok(QueryClass::IN),
            x => Err(Error::InvalidQueryClass(x)),
        }
    }
}

/// The OPCODE value according to RFC 1035
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Opcode {
    StandardQuery,
    InverseQuery,
    ServerStatusRequest,
    Reserved(u8),
}

impl From<u8> for Opcode {
    fn from(code: u8) -> Opcode {
        match code {
            0 => Opcode::StandardQuery,
            1 => Opcode::InverseQuery,
            2 => Opcode::ServerStatusRequest,
            x => Opcode::Reserved(x),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        match opcode {
            Opcode::StandardQuery => 0,
            Opcode::InverseQuery => 1,
            Opcode::ServerStatusRequest => 2,
            Opcode::Reserved(x) => x,
        }
    }
}

/// The RCODE value according to RFC 1035
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(u8),
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> ResponseCode {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            x => ResponseCode::Reserved(x),
        }
    }
}

impl From<ResponseCode> for u8 {
    fn from(rcode: ResponseCode) -> u8 {
        match rcode {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Reserved(x) => x,
        }
    }
}
