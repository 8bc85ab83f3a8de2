use std::borrow::Cow;
use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use super::Error;

const POINTER_MASK: u8 = 0b1100_0000;
const MAX_LABEL_LENGTH: usize = 63;

/// The DNS name as stored in the original packet
///
/// This is contains just a reference to a slice that contains the data.
/// You may turn this into a string using `.to_string()`
#[derive(Debug, Clone)]
pub enum Name<'a> {
    FromPacket {
        labels: &'a [u8],
        /// This is the original buffer size. The compressed names in original
        /// are calculated in this buffer
        original: &'a [u8],
    },

    /// Dotted name without the trailing root dot, `""` is the root
    FromStr(Cow<'a, str>),
}

/// Where the literal labels of a name stop
enum LabelsEnd {
    Terminator,
    Pointer(usize),
}

impl<'a> Name<'a> {
    /// Validates the name starting at `data[0]` and returns it together with
    /// the number of bytes it occupies at that position.
    ///
    /// Compression pointers are offsets into `original`, the whole message.
    /// A chain of pointers may not be longer than `original.len() / 2`, every
    /// pointer takes two bytes so a longer chain has to revisit one of them.
    pub fn scan(data: &'a [u8], original: &'a [u8]) -> Result<(Name<'a>, usize), Error> {
        let (length, end) = Name::scan_labels(data)?;
        if let LabelsEnd::Pointer(mut off) = end {
            let mut redirects = 0;
            loop {
                redirects += 1;
                if redirects > original.len() / 2 {
                    return Err(Error::TooManyPointers);
                }
                if off >= original.len() {
                    return Err(Error::PointerOutOfBounds(off));
                }
                match Name::scan_labels(&original[off..])?.1 {
                    LabelsEnd::Terminator => break,
                    LabelsEnd::Pointer(next) => off = next,
                }
            }
        }
        Ok((
            Name::FromPacket {
                labels: &data[..length],
                original,
            },
            length,
        ))
    }

    /// Walks literal labels up to the terminator or the first pointer
    fn scan_labels(data: &[u8]) -> Result<(usize, LabelsEnd), Error> {
        let mut pos = 0;
        loop {
            let byte = *data.get(pos).ok_or(Error::UnexpectedEOF)?;
            if byte == 0 {
                return Ok((pos + 1, LabelsEnd::Terminator));
            } else if byte & POINTER_MASK == POINTER_MASK {
                if data.len() < pos + 2 {
                    return Err(Error::UnexpectedEOF);
                }
                let off =
                    (BigEndian::read_u16(&data[pos..pos + 2]) & !0b1100_0000_0000_0000) as usize;
                return Ok((pos + 2, LabelsEnd::Pointer(off)));
            } else if byte & POINTER_MASK == 0 {
                let end = pos + byte as usize + 1;
                // at least the next length byte has to follow
                if end >= data.len() {
                    return Err(Error::UnexpectedEOF);
                }
                pos = end;
            } else {
                return Err(Error::UnknownLabelFormat);
            }
        }
    }

    /// Parses a dotted name for use in a query
    ///
    /// A single trailing dot is accepted, `""` and `"."` are the root.
    pub fn from_str<T: Into<Cow<'static, str>>>(name: T) -> Result<Name<'a>, Error> {
        let name: Cow<'static, str> = match name.into() {
            Cow::Borrowed(s) => Cow::Borrowed(s.strip_suffix('.').unwrap_or(s)),
            Cow::Owned(mut s) => {
                if s.ends_with('.') {
                    s.pop();
                }
                Cow::Owned(s)
            }
        };
        if !name.is_empty() {
            for label in name.split('.') {
                if label.is_empty() {
                    return Err(Error::EmptyLabel(name.to_string()));
                }
                if label.len() > MAX_LABEL_LENGTH {
                    return Err(Error::LabelTooLong(label.to_owned()));
                }
            }
        }
        Ok(Name::FromStr(name))
    }

    /// Iterates over the raw labels of the name, following compression pointers
    ///
    /// Label bytes are passed through as they are on the wire, they need not
    /// be ASCII.
    pub fn labels(&self) -> Labels<'_> {
        match *self {
            Name::FromPacket { labels, original } => Labels::Packet {
                data: labels,
                pos: 0,
                original,
                redirects_left: original.len() / 2,
            },
            Name::FromStr(ref name) => Labels::Str {
                rest: if name.is_empty() { None } else { Some(&**name) },
            },
        }
    }

    /// Appends the uncompressed wire form of the name
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        for label in self.labels() {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label);
        }
        buf.push(0);
    }
}

/// Iterator returned by [`Name::labels`]
pub enum Labels<'a> {
    Packet {
        data: &'a [u8],
        pos: usize,
        original: &'a [u8],
        redirects_left: usize,
    },
    Str {
        rest: Option<&'a str>,
    },
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        match self {
            Labels::Packet {
                data,
                pos,
                original,
                redirects_left,
            } => loop {
                // names are validated by `scan`, anything odd just ends the name
                let byte = *data.get(*pos)?;
                if byte == 0 {
                    return None;
                } else if byte & POINTER_MASK == POINTER_MASK {
                    let pointer = data.get(*pos..*pos + 2)?;
                    let off = (BigEndian::read_u16(pointer) & !0b1100_0000_0000_0000) as usize;
                    *redirects_left = redirects_left.checked_sub(1)?;
                    *data = original.get(off..)?;
                    *pos = 0;
                } else {
                    let end = *pos + byte as usize + 1;
                    let label = data.get(*pos + 1..end)?;
                    *pos = end;
                    return Some(label);
                }
            },
            Labels::Str { rest } => {
                let name = (*rest)?;
                match name.find('.') {
                    Some(dot) => {
                        *rest = Some(&name[dot + 1..]);
                        Some(name[..dot].as_bytes())
                    }
                    None => {
                        *rest = None;
                        Some(name.as_bytes())
                    }
                }
            }
        }
    }
}

impl<'a> fmt::Display for Name<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, label) in self.labels().enumerate() {
            if i != 0 {
                fmt.write_str(".")?;
            }
            fmt.write_str(&String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

impl<'a> PartialEq for Name<'a> {
    fn eq(&self, other: &Name) -> bool {
        let mut ours = self.labels();
        let mut theirs = other.labels();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => continue,
                _ => return false,
            }
        }
    }
}

impl<'a> Eq for Name<'a> {}

#[cfg(test)]
mod test {
    use super::*;

    const HEADER: &[u8] = b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";

    fn packet(body: &[u8]) -> Vec<u8> {
        let mut data = HEADER.to_vec();
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn scan_plain_name() {
        let data = packet(b"\x07example\x03com\x00\x00\x01");
        let (name, length) = Name::scan(&data[12..], &data).unwrap();
        assert_eq!(length, 13);
        assert_eq!(name.to_string(), "example.com");
    }

    #[test]
    fn scan_root_name() {
        let data = packet(b"\x00");
        let (name, length) = Name::scan(&data[12..], &data).unwrap();
        assert_eq!(length, 1);
        assert_eq!(name.to_string(), "");
        assert_eq!(name, Name::from_str(".").unwrap());
    }

    #[test]
    fn pointer_to_question_name() {
        let data = packet(b"\x07example\x03com\x00\xc0\x0c");
        let (question, _) = Name::scan(&data[12..], &data).unwrap();
        let (answer, length) = Name::scan(&data[25..], &data).unwrap();
        assert_eq!(length, 2);
        assert_eq!(answer, question);
        assert_eq!(answer.to_string(), "example.com");
    }

    #[test]
    fn labels_followed_by_pointer() {
        let data = packet(b"\x07example\x03com\x00\x03www\xc0\x0c");
        let (name, length) = Name::scan(&data[25..], &data).unwrap();
        assert_eq!(length, 6);
        assert_eq!(name.to_string(), "www.example.com");
    }

    #[test]
    fn transitive_pointers() {
        // "example" + pointer to "com" at 12, "com" at 22, "ns1" + pointer at 27
        let data = packet(b"\x07example\xc0\x16\x03com\x00\x03ns1\xc0\x0c");
        let (name, length) = Name::scan(&data[27..], &data).unwrap();
        assert_eq!(length, 6);
        assert_eq!(name.to_string(), "ns1.example.com");
    }

    #[test]
    fn pointer_cycle() {
        let data = packet(b"\xc0\x0c");
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::TooManyPointers
        );

        let data = packet(b"\x01a\xc0\x10\x01b\xc0\x0c");
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::TooManyPointers
        );
    }

    #[test]
    fn pointer_out_of_bounds() {
        let data = packet(b"\xc0\x40");
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::PointerOutOfBounds(0x40)
        );
    }

    #[test]
    fn pointer_just_past_the_end() {
        let data = packet(b"\xc0\x0e");
        assert_eq!(data.len(), 14);
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::PointerOutOfBounds(14)
        );
    }

    #[test]
    fn binary_labels_are_kept() {
        let data = packet(b"\x02\xff\x01\x03com\x00");
        let (name, length) = Name::scan(&data[12..], &data).unwrap();
        assert_eq!(length, 8);
        let labels: Vec<&[u8]> = name.labels().collect();
        assert_eq!(labels, vec![&b"\xff\x01"[..], &b"com"[..]]);
        assert_eq!(name.to_string(), "\u{fffd}\u{1}.com");

        let mut buf = Vec::new();
        name.write_to(&mut buf);
        assert_eq!(&buf[..], &data[12..]);
    }

    #[test]
    fn truncated_names() {
        let data = packet(b"\x07exam");
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::UnexpectedEOF
        );

        let data = packet(b"\x03com");
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::UnexpectedEOF
        );

        let data = packet(b"\xc0");
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::UnexpectedEOF
        );
    }

    #[test]
    fn reserved_label_format() {
        let data = packet(b"\x41abc\x00");
        assert_eq!(
            Name::scan(&data[12..], &data).unwrap_err(),
            Error::UnknownLabelFormat
        );
    }

    #[test]
    fn from_str_encoding() {
        let mut buf = Vec::new();
        Name::from_str("www.example.com.")
            .unwrap()
            .write_to(&mut buf);
        assert_eq!(&buf[..], b"\x03www\x07example\x03com\x00");

        let mut buf = Vec::new();
        Name::from_str("").unwrap().write_to(&mut buf);
        assert_eq!(&buf[..], b"\x00");
    }

    #[test]
    fn from_str_rejects_bad_labels() {
        assert_eq!(
            Name::from_str("a..b").unwrap_err(),
            Error::EmptyLabel("a..b".to_owned())
        );
        let long = "x".repeat(64);
        assert_eq!(
            Name::from_str(format!("{}.com", long)).unwrap_err(),
            Error::LabelTooLong(long)
        );
        assert!(Name::from_str("x".repeat(63)).is_ok());
    }

    #[test]
    fn compressed_name_written_uncompressed() {
        let data = packet(b"\x07example\x03com\x00\x03www\xc0\x0c");
        let (name, _) = Name::scan(&data[25..], &data).unwrap();
        let mut buf = Vec::new();
        name.write_to(&mut buf);
        assert_eq!(&buf[..], b"\x03www\x07example\x03com\x00");
    }

    #[test]
    fn equality_ignores_case() {
        assert_eq!(
            Name::from_str("Example.COM").unwrap(),
            Name::from_str("example.com").unwrap()
        );
        assert_ne!(
            Name::from_str("example.com").unwrap(),
            Name::from_str("www.example.com").unwrap()
        );
    }
}
