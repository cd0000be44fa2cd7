//! Microsoft Access OLE object fields.
//!
//! An OLE object column stores a small container: a header carrying a
//! friendly name and a class name, a run of embedded objects each tagged with
//! a type name, and a 4-byte footer.
//!
//! ```text
//! +-------------------+----------+----------+-----+--------+
//! | header            | object 0 | object 1 | ... | footer |
//! | (header_size)     |          |          |     | 4      |
//! +-------------------+----------+----------+-----+--------+
//!
//! object := ole_version:u32 ole_format:u32 type_len:i32
//!           type_name[type_len] reserved[8] data_len:i32 data[data_len]
//! ```
//!
//! An object with `ole_format == 0` is an 8-byte placeholder with nothing
//! after the format code.

use super::consts::*;
use crate::common::binary::{parse_windows1252_string, trim_nul};
use crate::common::error::{Error, Result};
use crate::fieldspec::{Field, Severity, decode};
use std::iter::FusedIterator;
use tracing::{debug, trace};

const HEADER_CONTEXT: &str = "OLE field header";
const OBJECT_CONTEXT: &str = "OLE object header";
const DATA_CONTEXT: &str = "OLE object data";
const FOOTER_CONTEXT: &str = "OLE field footer";

const FIELD_HEADER: [Field<'static>; 7] = [
    Field::i16("signature").expect(FIELD_SIGNATURE, Severity::Fatal),
    Field::i16("header_size"),
    Field::i32("object_type"),
    Field::i16("friendly_len"),
    Field::i16("class_len"),
    Field::i16("friendly_off"),
    Field::i16("class_off"),
];

const FIELD_TRAILER: [Field<'static>; 2] = [
    Field::bytes("unknown", 1),
    Field::bytes("footer", 3).expect_bytes(FIELD_FOOTER, Severity::Fatal),
];

const OBJECT_HEADER: [Field<'static>; 3] = [
    Field::u32("ole_version").expect(OLE_VERSION, Severity::Unsupported),
    Field::u32("ole_format"),
    Field::i32("object_type_len"),
];

const DATA_BLOCK_HEADER: [Field<'static>; 1] = [Field::i32("data_block_len")];

/// Fixed part of the OLE field header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OleFieldHeader {
    pub signature: i16,
    /// Size of the whole header, names included
    pub header_size: usize,
    pub object_type: i32,
}

/// A parsed OLE field header and the bytes that follow it
#[derive(Debug, Clone)]
pub struct OleField<'a> {
    data: &'a [u8],
    header: OleFieldHeader,
    friendly_name: &'a [u8],
    class_name: &'a [u8],
}

impl<'a> OleField<'a> {
    /// Parse the header of the OLE field in `data`
    ///
    /// # Errors
    /// * [`Error::Truncated`] if `data` ends inside the header
    /// * [`Error::BadData`] on a wrong signature or on name fields pointing
    ///   outside the header
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let record = decode(data, &FIELD_HEADER, HEADER_CONTEXT)?;
        let header_size = usize::try_from(record.int("header_size")?)
            .map_err(|_| Error::bad_data(HEADER_CONTEXT, "negative header size"))?;

        let friendly = name_span(
            record.int("friendly_off")?,
            record.int("friendly_len")?,
            header_size,
            "friendly",
        )?;
        let class = name_span(
            record.int("class_off")?,
            record.int("class_len")?,
            header_size,
            "class",
        )?;

        if header_size < record.consumed() {
            return Err(Error::bad_data(
                HEADER_CONTEXT,
                format!(
                    "header size {} is smaller than the fixed header ({} bytes)",
                    header_size,
                    record.consumed()
                ),
            ));
        }
        if header_size > data.len() {
            return Err(Error::truncated(HEADER_CONTEXT, header_size, data.len()));
        }

        let header = OleFieldHeader {
            signature: record.int("signature")? as i16,
            header_size,
            object_type: record.int("object_type")? as i32,
        };
        let friendly_name = trim_nul(&data[friendly.0..friendly.1]);
        let class_name = trim_nul(&data[class.0..class.1]);
        debug!(
            header_size,
            object_type = header.object_type,
            friendly_name = %parse_windows1252_string(friendly_name),
            class_name = %parse_windows1252_string(class_name),
            "Decoded OLE field header"
        );

        Ok(Self {
            data,
            header,
            friendly_name,
            class_name,
        })
    }

    pub fn header(&self) -> &OleFieldHeader {
        &self.header
    }

    /// Friendly name (e.g. `Paintbrush Picture`) without NUL padding
    pub fn friendly_name(&self) -> &'a [u8] {
        self.friendly_name
    }

    /// Class name without NUL padding
    pub fn class_name(&self) -> &'a [u8] {
        self.class_name
    }

    /// Iterate over the embedded objects following the header
    pub fn objects(&self) -> Objects<'a> {
        Objects {
            data: self.data,
            offset: self.header.header_size,
            state: State::Objects,
        }
    }
}

/// Validate a name sub-field and return its byte span
fn name_span(offset: i64, len: i64, header_size: usize, what: &str) -> Result<(usize, usize)> {
    let (Ok(offset), Ok(len)) = (usize::try_from(offset), usize::try_from(len)) else {
        return Err(Error::bad_data(
            HEADER_CONTEXT,
            format!("negative {} name offset or length", what),
        ));
    };
    let end = offset + len;
    if end > header_size {
        return Err(Error::bad_data(
            HEADER_CONTEXT,
            format!(
                "{} name [{}, {}) exceeds header size {}",
                what, offset, end, header_size
            ),
        ));
    }
    Ok((offset, end))
}

/// Kind of an embedded object, by type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// `METAFILEPICT`: a Windows Metafile, see [`crate::images::wmf`]
    Metafile,
    /// `PBrush`: a complete BMP file
    PaintBrush,
    /// Anything else
    Other,
}

impl ObjectKind {
    pub fn from_type_name(type_name: &[u8]) -> Self {
        match type_name {
            TYPE_METAFILEPICT => ObjectKind::Metafile,
            TYPE_PBRUSH => ObjectKind::PaintBrush,
            _ => ObjectKind::Other,
        }
    }
}

/// An object embedded in an OLE field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedObject<'a> {
    pub ole_version: u32,
    pub ole_format: u32,
    /// Type name without NUL padding
    pub type_name: &'a [u8],
    /// Opaque bytes between the type name and the data block
    pub reserved: &'a [u8],
    pub payload: &'a [u8],
}

impl EmbeddedObject<'_> {
    pub fn kind(&self) -> ObjectKind {
        ObjectKind::from_type_name(self.type_name)
    }

    /// Type name decoded as Windows-1252
    pub fn type_name_str(&self) -> String {
        parse_windows1252_string(self.type_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Objects,
    Done,
}

/// Iterator over the objects of an OLE field
///
/// Yields each object in order and stops after the footer. The first error
/// is yielded once and ends the iteration.
#[derive(Debug, Clone)]
pub struct Objects<'a> {
    data: &'a [u8],
    offset: usize,
    state: State,
}

/// Iterate over the embedded objects of the OLE field in `data`
///
/// The header is parsed on the first call to `next`, so header errors are
/// yielded by the iterator like any other.
///
/// # Examples
/// ```no_run
/// let field = std::fs::read("picture.bin")?;
/// for object in olefield::objects(&field) {
///     let object = object?;
///     println!("{} ({} bytes)", object.type_name_str(), object.payload.len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn objects(data: &[u8]) -> Objects<'_> {
    Objects {
        data,
        offset: 0,
        state: State::Header,
    }
}

impl<'a> Objects<'a> {
    fn advance(&mut self) -> Result<Option<EmbeddedObject<'a>>> {
        let data = self.data;
        if self.state == State::Header {
            let field = OleField::parse(data)?;
            self.offset = field.header.header_size;
            self.state = State::Objects;
        }

        loop {
            let rest = &data[self.offset..];
            if rest.len() <= FOOTER_SIZE {
                decode(rest, &FIELD_TRAILER, FOOTER_CONTEXT)?;
                trace!(offset = self.offset, "Reached OLE field footer");
                return Ok(None);
            }

            let header = decode(rest, &OBJECT_HEADER, OBJECT_CONTEXT)?;
            let ole_format = header.int("ole_format")? as u32;
            if ole_format == 0 {
                debug!(offset = self.offset, "Skipping empty OLE object");
                self.offset += EMPTY_OBJECT_SIZE;
                continue;
            }
            let ole_version = header.int("ole_version")? as u32;
            let type_len = usize::try_from(header.int("object_type_len")?)
                .map_err(|_| Error::bad_data(OBJECT_CONTEXT, "negative type name length"))?;
            self.offset += header.consumed();

            let name_spec = [
                Field::bytes("object_type", type_len),
                Field::bytes("unknown", TYPE_NAME_TRAILER_SIZE),
            ];
            let names = decode(&data[self.offset..], &name_spec, OBJECT_CONTEXT)?;
            self.offset += names.consumed();

            let block = decode(&data[self.offset..], &DATA_BLOCK_HEADER, DATA_CONTEXT)?;
            self.offset += block.consumed();
            let data_len = usize::try_from(block.int("data_block_len")?)
                .map_err(|_| Error::bad_data(DATA_CONTEXT, "negative data block length"))?;

            let rest = &data[self.offset..];
            let payload = rest
                .get(..data_len)
                .ok_or_else(|| Error::truncated(DATA_CONTEXT, data_len, rest.len()))?;
            self.offset += data_len;

            let object = EmbeddedObject {
                ole_version,
                ole_format,
                type_name: trim_nul(names.bytes("object_type")?),
                reserved: names.bytes("unknown")?,
                payload,
            };
            debug!(
                type_name = %object.type_name_str(),
                ole_format,
                size = data_len,
                "Found embedded OLE object"
            );
            return Ok(Some(object));
        }
    }
}

impl<'a> Iterator for Objects<'a> {
    type Item = Result<EmbeddedObject<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }
        match self.advance() {
            Ok(Some(object)) => Some(Ok(object)),
            Ok(None) => {
                self.state = State::Done;
                None
            },
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            },
        }
    }
}

impl FusedIterator for Objects<'_> {}
