use byteorder::{BigEndian, ByteOrder};

use super::{Error, Opcode, ResponseCode};

mod flag {
    pub const QUERY: u8 = 0b1000_0000;
    pub const OPCODE_MASK: u8 = 0b0111_1000;
    pub const AUTHORITATIVE: u8 = 0b0000_0100;
    pub const TRUNCATED: u8 = 0b0000_0010;
    pub const RECURSION_DESIRED: u8 = 0b0000_0001;
    pub const RECURSION_AVAILABLE: u8 = 0b1000_0000;
    pub const RESPONSE_CODE_MASK: u8 = 0b0000_1111;
}

/// Represents parsed header of the packet
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    pub id: u16,
    pub query: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

impl Header {
    pub const SIZE: usize = 12;

    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < Header::SIZE {
            return Err(Error::HeaderTooShort);
        }
        Ok(Header {
            id: BigEndian::read_u16(&data[..2]),
            query: data[2] & flag::QUERY == 0,
            opcode: ((data[2] & flag::OPCODE_MASK) >> flag::OPCODE_MASK.trailing_zeros()).into(),
            authoritative: data[2] & flag::AUTHORITATIVE != 0,
            truncated: data[2] & flag::TRUNCATED != 0,
            recursion_desired: data[2] & flag::RECURSION_DESIRED != 0,
            recursion_available: data[3] & flag::RECURSION_AVAILABLE != 0,
            response_code: (data[3] & flag::RESPONSE_CODE_MASK).into(),
            questions: BigEndian::read_u16(&data[4..6]),
            answers: BigEndian::read_u16(&data[6..8]),
            nameservers: BigEndian::read_u16(&data[8..10]),
            additional: BigEndian::read_u16(&data[10..12]),
        })
    }

    /// The 16-bit flags word as it appears on the wire
    pub fn flags(&self) -> u16 {
        let mut high = u8::from(self.opcode) << flag::OPCODE_MASK.trailing_zeros();
        if !self.query {
            high |= flag::QUERY;
        }
        if self.authoritative {
            high |= flag::AUTHORITATIVE;
        }
        if self.truncated {
            high |= flag::TRUNCATED;
        }
        if self.recursion_desired {
            high |= flag::RECURSION_DESIRED;
        }
        let mut low = u8::from(self.response_code) & flag::RESPONSE_CODE_MASK;
        if self.recursion_available {
            low |= flag::RECURSION_AVAILABLE;
        }
        u16::from_be_bytes([high, low])
    }

    /// Write a header to a buffer slice
    ///
    /// # Panics
    ///
    /// When buffer size is not exactly 12 bytes
    pub fn write(&self, data: &mut [u8]) {
        assert_eq!(data.len(), Header::SIZE);
        BigEndian::write_u16(&mut data[..2], self.id);
        BigEndian::write_u16(&mut data[2..4], self.flags());
        BigEndian::write_u16(&mut data[4..6], self.questions);
        BigEndian::write_u16(&mut data[6..8], self.answers);
        BigEndian::write_u16(&mut data[8..10], self.nameservers);
        BigEndian::write_u16(&mut data[10..12], self.additional);
    }

    fn inc_count(data: &mut [u8], offset: usize) -> Option<u16> {
        let count = BigEndian::read_u16(&data[offset..offset + 2]).checked_add(1)?;
        BigEndian::write_u16(&mut data[offset..offset + 2], count);
        Some(count)
    }

    pub fn inc_questions(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 4)
    }

    pub fn inc_answers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 6)
    }

    pub fn inc_nameservers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 8)
    }

    pub fn inc_additional(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 10)
    }
}
