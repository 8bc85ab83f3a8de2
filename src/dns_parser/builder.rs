use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use rand::{thread_rng, Rng};

use super::{Error, Header, Name, Opcode, QueryClass, QueryType, RRData, ResponseCode};

pub enum Questions {}
pub enum Answers {}
pub enum Nameservers {}
pub enum Additional {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}

impl MoveTo<Answers> for Questions {}

impl MoveTo<Nameservers> for Questions {}
impl MoveTo<Nameservers> for Answers {}

impl MoveTo<Additional> for Questions {}
impl MoveTo<Additional> for Answers {}
impl MoveTo<Additional> for Nameservers {}

/// Allows to build a DNS packet
///
/// Sections have to be filled in wire order, which the type parameter
/// enforces. Names are always written uncompressed.
pub struct Builder<S> {
    buf: Vec<u8>,
    _state: PhantomData<S>,
}

/// Encodes a query for `name` with a random id
///
/// The query carries a single question of class IN and no flags at all, in
/// particular recursion is not desired.
pub fn encode_query(name: &str, qtype: QueryType) -> Result<Vec<u8>, Error> {
    encode_query_with_id(thread_rng().gen(), name, qtype)
}

pub fn encode_query_with_id(id: u16, name: &str, qtype: QueryType) -> Result<Vec<u8>, Error> {
    let qname = Name::from_str(name.to_owned())?;
    Ok(Builder::new_query(id, false)
        .add_question(&qname, qtype, QueryClass::IN)
        .build())
}

impl Builder<Questions> {
    /// Creates a new query
    ///
    /// Initially all sections are empty. You're expected to fill
    /// the questions section with `add_question`
    pub fn new_query(id: u16, recursion: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id,
            query: true,
            opcode: Opcode::StandardQuery,
            authoritative: false,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: false,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    pub fn new_response(id: u16, recursion: bool, authoritative: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id,
            query: false,
            opcode: Opcode::StandardQuery,
            authoritative,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: false,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    fn with_header(head: Header) -> Builder<Questions> {
        let mut buf = Vec::with_capacity(512);
        buf.extend([0u8; Header::SIZE].iter());
        head.write(&mut buf[..Header::SIZE]);
        Builder {
            buf,
            _state: PhantomData,
        }
    }
}

impl<T> Builder<T> {
    fn write_rr(&mut self, name: &Name, ttl: i32, data: &RRData) {
        name.write_to(&mut self.buf);
        self.buf.write_u16::<BigEndian>(data.typ().code()).unwrap();
        self.buf.write_u16::<BigEndian>(QueryClass::IN as u16).unwrap();
        self.buf.write_i32::<BigEndian>(ttl).unwrap();

        let size_offset = self.buf.len();
        self.buf.write_u16::<BigEndian>(0).unwrap();

        let data_offset = self.buf.len();
        data.write_to(&mut self.buf);
        let data_size = self.buf.len() - data_offset;

        BigEndian::write_u16(
            &mut self.buf[size_offset..size_offset + 2],
            data_size as u16,
        );
    }

    /// Returns the final packet
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            _state: PhantomData,
        }
    }

    pub fn set_response_code(&mut self, code: ResponseCode) {
        self.buf[3] = (self.buf[3] & 0b1111_0000) | (u8::from(code) & 0b0000_1111);
    }
}

impl<T: MoveTo<Questions>> Builder<T> {
    /// Adds a question to the packet
    ///
    /// # Panics
    ///
    /// * There are already 65535 questions in the buffer.
    pub fn add_question(
        self,
        qname: &Name,
        qtype: QueryType,
        qclass: QueryClass,
    ) -> Builder<Questions> {
        let mut builder = self.move_to::<Questions>();

        qname.write_to(&mut builder.buf);
        builder.buf.write_u16::<BigEndian>(qtype as u16).unwrap();
        builder.buf.write_u16::<BigEndian>(qclass as u16).unwrap();
        Header::inc_questions(&mut builder.buf).expect("Too many questions");
        builder
    }
}

impl<T: MoveTo<Answers>> Builder<T> {
    pub fn add_answer(self, name: &Name, ttl: i32, data: &RRData) -> Builder<Answers> {
        let mut builder = self.move_to::<Answers>();

        builder.write_rr(name, ttl, data);
        Header::inc_answers(&mut builder.buf).expect("Too many answers");

        builder
    }
}

impl<T: MoveTo<Nameservers>> Builder<T> {
    pub fn add_nameserver(self, name: &Name, ttl: i32, data: &RRData) -> Builder<Nameservers> {
        let mut builder = self.move_to::<Nameservers>();

        builder.write_rr(name, ttl, data);
        Header::inc_nameservers(&mut builder.buf).expect("Too many nameservers");

        builder
    }
}

impl<T: MoveTo<Additional>> Builder<T> {
    pub fn add_additional(self, name: &Name, ttl: i32, data: &RRData) -> Builder<Additional> {
        let mut builder = self.move_to::<Additional>();

        builder.write_rr(name, ttl, data);
        Header::inc_additional(&mut builder.buf).expect("Too many additional answers");

        builder
    }
}
