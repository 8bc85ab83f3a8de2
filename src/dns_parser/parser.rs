use byteorder::{BigEndian, ByteOrder};

use super::{Class, Error, Header, Name, QueryClass, QueryType, RRData, Type};
use super::{Packet, Question, ResourceRecord};

impl<'a> Packet<'a> {
    /// Parse a full DNS Packet and return a structure that has all the
    /// data borrowed from the passed buffer.
    ///
    /// Sections are read strictly in order and exactly as many entries as
    /// the header counts announce. Bytes after the last counted record are
    /// ignored.
    pub fn parse(data: &'a [u8]) -> Result<Packet<'a>, Error> {
        let header = Header::parse(data)?;
        let mut offset = Header::SIZE;

        let mut questions = Vec::with_capacity(header.questions as usize);
        for _ in 0..header.questions {
            let (qname, name_size) = Name::scan(&data[offset..], data)?;
            offset += name_size;
            if offset + 4 > data.len() {
                return Err(Error::UnexpectedEOF);
            }
            let qtype = QueryType::parse(BigEndian::read_u16(&data[offset..offset + 2]))?;
            offset += 2;
            let qclass = QueryClass::parse(BigEndian::read_u16(&data[offset..offset + 2]))?;
            offset += 2;
            questions.push(Question {
                qname,
                qtype,
                qclass,
            });
        }

        let mut answers = Vec::with_capacity(header.answers as usize);
        for _ in 0..header.answers {
            answers.push(parse_record(data, &mut offset)?);
        }
        let mut nameservers = Vec::with_capacity(header.nameservers as usize);
        for _ in 0..header.nameservers {
            nameservers.push(parse_record(data, &mut offset)?);
        }
        let mut additional = Vec::with_capacity(header.additional as usize);
        for _ in 0..header.additional {
            additional.push(parse_record(data, &mut offset)?);
        }

        Ok(Packet {
            header,
            questions,
            answers,
            nameservers,
            additional,
        })
    }
}

// Generic function to parse answer, nameservers, and additional records.
fn parse_record<'a>(data: &'a [u8], offset: &mut usize) -> Result<ResourceRecord<'a>, Error> {
    let (name, name_size) = Name::scan(&data[*offset..], data)?;
    *offset += name_size;
    if *offset + 10 > data.len() {
        return Err(Error::UnexpectedEOF);
    }
    let typ = Type::from(BigEndian::read_u16(&data[*offset..*offset + 2]));
    *offset += 2;
    let cls = Class::from(BigEndian::read_u16(&data[*offset..*offset + 2]));
    *offset += 2;
    let ttl = BigEndian::read_i32(&data[*offset..*offset + 4]);
    *offset += 4;
    let rdlen = BigEndian::read_u16(&data[*offset..*offset + 2]) as usize;
    *offset += 2;
    if *offset + rdlen > data.len() {
        return Err(Error::UnexpectedEOF);
    }
    let rdata = RRData::parse(typ, &data[*offset..*offset + rdlen], data)?;
    *offset += rdlen;
    Ok(ResourceRecord {
        name,
        cls,
        ttl,
        data: rdata,
    })
}

#[cfg(test)]
mod test {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::dns_parser::{Opcode, ResponseCode};

    #[test]
    fn parse_example_query() {
        let query = b"\x06%\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                      \x07example\x03com\x00\x00\x01\x00\x01";
        let packet = Packet::parse(query).unwrap();
        assert_eq!(packet.header.id, 1573);
        assert!(packet.header.query);
        assert_eq!(packet.header.opcode, Opcode::StandardQuery);
        assert!(packet.header.recursion_desired);
        assert_eq!(packet.questions.len(), 1);
        assert_eq!(packet.questions[0].qtype, QueryType::A);
        assert_eq!(packet.questions[0].qclass, QueryClass::IN);
        assert_eq!(packet.questions[0].qname.to_string(), "example.com");
        assert_eq!(packet.answers.len(), 0);
    }

    #[test]
    fn parse_compressed_answer() {
        let response = b"\x06%\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\
                         ]\xb8\xd8\"";
        let packet = Packet::parse(response).unwrap();
        assert_eq!(packet.header.response_code, ResponseCode::NoError);
        assert_eq!(packet.questions.len(), 1);
        assert_eq!(packet.answers.len(), 1);
        let answer = &packet.answers[0];
        assert_eq!(answer.name, packet.questions[0].qname);
        assert_eq!(answer.name.to_string(), "example.com");
        assert_eq!(answer.cls, Class::IN);
        assert_eq!(answer.ttl, 3600);
        assert_eq!(answer.data, RRData::A(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(answer.data.to_string(), "93.184.216.34");
    }

    #[test]
    fn parse_referral() {
        // com. NS a.gtld-servers.net. with glue, names compressed
        let response = b"\x00\x2a\x80\x00\x00\x01\x00\x00\x00\x01\x00\x01\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x14\x00\x02\x00\x01\x00\x02\xa3\x00\x00\x14\
                         \x01a\x0cgtld-servers\x03net\x00\
                         \xc0\x29\x00\x01\x00\x01\x00\x02\xa3\x00\x00\x04\
                         \xc0\x05\x06\x1e";
        let packet = Packet::parse(response).unwrap();
        assert_eq!(packet.answers.len(), 0);
        assert_eq!(packet.nameservers.len(), 1);
        assert_eq!(packet.additional.len(), 1);

        let authority = &packet.nameservers[0];
        assert_eq!(authority.name.to_string(), "com");
        assert_eq!(authority.data.typ(), Type::NS);
        assert_eq!(authority.data.to_string(), "a.gtld-servers.net");

        let glue = &packet.additional[0];
        assert_eq!(glue.name.to_string(), "a.gtld-servers.net");
        assert_eq!(glue.data, RRData::A(Ipv4Addr::new(192, 5, 6, 30)));
    }

    #[test]
    fn unknown_records_are_skipped_by_rdlength() {
        // TXT answer followed by an A answer
        let response = b"\x00\x01\x80\x00\x00\x00\x00\x02\x00\x00\x00\x00\
                         \x00\x00\x10\x00\x01\x00\x00\x00\x3c\x00\x03\x02hi\
                         \x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x7f\x00\x00\x01";
        let packet = Packet::parse(response).unwrap();
        assert_eq!(packet.answers.len(), 2);
        assert_eq!(packet.answers[0].data.typ(), Type::Unknown(16));
        assert_eq!(
            packet.answers[1].data,
            RRData::A(Ipv4Addr::new(127, 0, 0, 1))
        );
    }

    #[test]
    fn binary_owner_name_does_not_hide_answer() {
        // A answer, then a TXT record in the additional section owned by "\xff"
        let response = b"\x00\x01\x80\x00\x00\x00\x00\x01\x00\x00\x00\x01\
                         \x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x7f\x00\x00\x01\
                         \x01\xff\x00\x00\x10\x00\x01\x00\x00\x00\x3c\x00\x03\x02hi";
        let packet = Packet::parse(response).unwrap();
        assert_eq!(
            packet.answers[0].data,
            RRData::A(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(packet.additional.len(), 1);
        assert_eq!(packet.additional[0].name.labels().next(), Some(&b"\xff"[..]));
    }

    #[test]
    fn ns_name_past_rdlength() {
        let response = b"\x00\x01\x80\x00\x00\x00\x00\x01\x00\x00\x00\x00\
                         \x00\x00\x02\x00\x01\x00\x00\x00\x3c\x00\x02\x01a\x00";
        assert_eq!(Packet::parse(response).unwrap_err(), Error::UnexpectedEOF);
    }

    #[test]
    fn negative_ttl_is_kept() {
        let response = b"\x00\x01\x80\x00\x00\x00\x00\x01\x00\x00\x00\x00\
                         \x00\x00\x01\x00\x01\xff\xff\xff\xff\x00\x04\x7f\x00\x00\x01";
        let packet = Packet::parse(response).unwrap();
        assert_eq!(packet.answers[0].ttl, -1);
    }

    #[test]
    fn counts_larger_than_packet() {
        let response = b"\x00\x01\x80\x00\x00\x00\x00\x02\x00\x00\x00\x00\
                         \x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x7f\x00\x00\x01";
        assert_eq!(Packet::parse(response).unwrap_err(), Error::UnexpectedEOF);
    }

    #[test]
    fn rdlength_past_end() {
        let response = b"\x00\x01\x80\x00\x00\x00\x00\x01\x00\x00\x00\x00\
                         \x00\x00\x10\x00\x01\x00\x00\x00\x3c\x00\x20hi";
        assert_eq!(Packet::parse(response).unwrap_err(), Error::UnexpectedEOF);
    }

    #[test]
    fn truncated_question() {
        let response = b"\x00\x01\x80\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                         \x03com\x00\x00\x01";
        assert_eq!(Packet::parse(response).unwrap_err(), Error::UnexpectedEOF);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let response = b"\x00\x01\x80\x00\x00\x00\x00\x00\x00\x00\x00\x00\xde\xad";
        let packet = Packet::parse(response).unwrap();
        assert!(packet.answers.is_empty());
        assert!(packet.nameservers.is_empty());
        assert!(packet.additional.is_empty());
    }
}
