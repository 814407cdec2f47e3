//! Résumé serialization formats used by the file backend.
//!
//! Serializers work on plain byte streams; the caller owns opening, buffering
//! and closing the underlying file.

use std::io::{self, Read, Write};

use crate::models::{ContactType, Resume};

pub trait Serializer: Send + Sync {
    fn write(&self, resume: &Resume, out: &mut dyn Write) -> io::Result<()>;

    fn read(&self, input: &mut dyn Read) -> io::Result<Resume>;
}

/// JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn write(&self, resume: &Resume, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(out, resume)?;
        Ok(())
    }

    fn read(&self, input: &mut dyn Read) -> io::Result<Resume> {
        Ok(serde_json::from_reader(input)?)
    }
}

/// Compact big-endian binary layout:
///
/// ```text
/// id         : u16 length + UTF-8 bytes
/// full_name  : u16 length + UTF-8 bytes
/// contacts   : u32 count, then per contact
///              type name (u16 length + bytes), value (u16 length + bytes)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DataStreamSerializer;

impl Serializer for DataStreamSerializer {
    fn write(&self, resume: &Resume, out: &mut dyn Write) -> io::Result<()> {
        write_str(out, resume.id())?;
        write_str(out, resume.full_name())?;

        let count = u32::try_from(resume.contacts().len())
            .map_err(|_| invalid_input("too many contacts"))?;
        out.write_all(&count.to_be_bytes())?;
        for (contact_type, value) in resume.contacts() {
            write_str(out, contact_type.name())?;
            write_str(out, value)?;
        }
        Ok(())
    }

    fn read(&self, input: &mut dyn Read) -> io::Result<Resume> {
        let id = read_str(input)?;
        let full_name = read_str(input)?;
        let mut resume = Resume::with_id(id, full_name);

        let mut count = [0u8; 4];
        input.read_exact(&mut count)?;
        for _ in 0..u32::from_be_bytes(count) {
            let contact_type: ContactType = read_str(input)?
                .parse()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let value = read_str(input)?;
            resume.set_contact(contact_type, value);
        }
        Ok(resume)
    }
}

fn write_str(out: &mut dyn Write, s: &str) -> io::Result<()> {
    let len = u16::try_from(s.len()).map_err(|_| invalid_input("string longer than 65535 bytes"))?;
    out.write_all(&len.to_be_bytes())?;
    out.write_all(s.as_bytes())
}

fn read_str(input: &mut dyn Read) -> io::Result<String> {
    let mut len = [0u8; 2];
    input.read_exact(&mut len)?;
    let mut buf = vec![0u8; u16::from_be_bytes(len) as usize];
    input.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn invalid_input(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg.to_string())
}
