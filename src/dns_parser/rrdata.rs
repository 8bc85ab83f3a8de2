use std::fmt;
use std::net::Ipv4Addr;

use byteorder::{BigEndian, ByteOrder};

use super::{Error, Name, Type};

/// The enumeration that represents known types of DNS resource records data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRData<'a> {
    NS(Name<'a>),
    A(Ipv4Addr),
    // Anything that isn't interpreted, kept as `RDLENGTH` raw bytes
    Unknown { typ: Type, data: &'a [u8] },
}

impl<'a> RRData<'a> {
    pub fn typ(&self) -> Type {
        match *self {
            RRData::NS(..) => Type::NS,
            RRData::A(..) => Type::A,
            RRData::Unknown { typ, .. } => typ,
        }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        match *self {
            RRData::NS(ref name) => name.write_to(buf),
            RRData::A(ip) => buf.extend_from_slice(&ip.octets()),
            RRData::Unknown { data, .. } => buf.extend_from_slice(data),
        }
    }

    /// `rdata` is exactly the `RDLENGTH` bytes of the record, `original` the
    /// whole message so that compressed names can be followed
    pub fn parse(typ: Type, rdata: &'a [u8], original: &'a [u8]) -> Result<RRData<'a>, Error> {
        match typ {
            Type::A => {
                if rdata.len() != 4 {
                    return Err(Error::WrongRdataLength);
                }
                Ok(RRData::A(Ipv4Addr::from(BigEndian::read_u32(rdata))))
            }
            Type::NS => Ok(RRData::NS(Name::scan(rdata, original)?.0)),
            typ => Ok(RRData::Unknown { typ, data: rdata }),
        }
    }
}

impl<'a> fmt::Display for RRData<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RRData::NS(ref name) => fmt::Display::fmt(name, fmt),
            RRData::A(ip) => fmt::Display::fmt(&ip, fmt),
            // RFC 3597 generic encoding
            RRData::Unknown { data, .. } => {
                write!(fmt, "\\# {}", data.len())?;
                if !data.is_empty() {
                    fmt.write_str(" ")?;
                    for byte in data {
                        write!(fmt, "{:02x}", byte)?;
                    }
                }
                Ok(())
            }
        }
    }
}
