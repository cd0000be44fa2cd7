// WMF record walker
//
// The METAFILEPICT payload of an OLE object is a memory metafile preceded by
// 8 bytes of unknown meaning. Records are walked by their declared size; none
// is interpreted here.

use super::constants::{header, record, record_name};
use crate::common::error::{Error, Result};
use crate::fieldspec::{Field, Severity, decode};
use std::iter::FusedIterator;
use tracing::{debug, trace};

const HEADER_CONTEXT: &str = "metafile header";
const RECORD_CONTEXT: &str = "metafile record";

const METAFILE_HEADER: [Field<'static>; 8] = [
    Field::bytes("unknown", 8),
    Field::u16("type").expect(header::MEMORY_METAFILE, Severity::Unsupported),
    Field::u16("header_size"),
    Field::u16("version").expect(header::METAVERSION300, Severity::Unsupported),
    Field::u32("metafile_size"),
    // Object records (pens, brushes, palettes) are not modelled
    Field::u16("num_of_objects").expect(0, Severity::Unsupported),
    Field::u32("max_record_len"),
    Field::u16("unused"),
];

const RECORD_HEADER: [Field<'static>; 2] = [Field::u32("record_size"), Field::u16("function")];

/// Size of the size and function fields that start every record
pub const RECORD_HEADER_SIZE: usize = 6;

/// WMF header of a METAFILEPICT payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetafileHeader<'a> {
    /// The 8 bytes preceding the WMF header
    pub reserved: &'a [u8],
    /// File type (1 = memory, 2 = disk)
    pub file_type: u16,
    /// Header size in words
    pub header_size: u16,
    /// Windows version
    pub version: u16,
    /// Size of file in words
    pub file_size: u32,
    /// Number of objects
    pub num_objects: u16,
    /// Size of largest record in words
    pub max_record: u32,
    /// Not used (always 0)
    pub num_params: u16,
}

impl<'a> MetafileHeader<'a> {
    /// Parse the header, returning it with the number of bytes it occupies
    ///
    /// # Errors
    /// * [`Error::Truncated`] if `data` is shorter than the header
    /// * [`Error::Unsupported`] for disk metafiles, versions other than 0x0300
    ///   and metafiles declaring objects
    pub fn parse(data: &'a [u8]) -> Result<(Self, usize)> {
        let record = decode(data, &METAFILE_HEADER, HEADER_CONTEXT)?;
        let header = Self {
            reserved: record.bytes("unknown")?,
            file_type: record.int("type")? as u16,
            header_size: record.int("header_size")? as u16,
            version: record.int("version")? as u16,
            file_size: record.int("metafile_size")? as u32,
            num_objects: record.int("num_of_objects")? as u16,
            max_record: record.int("max_record_len")? as u32,
            num_params: record.int("unused")? as u16,
        };
        debug!(
            file_size = header.file_size,
            max_record = header.max_record,
            "Decoded metafile header"
        );
        Ok((header, record.consumed()))
    }
}

/// WMF record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmfRecord<'a> {
    /// Offset of the record in the metafile payload
    pub offset: usize,
    /// Record size in words (including size and function)
    pub size: u32,
    /// Record function
    pub function: u16,
    /// The whole record, size and function included
    pub data: &'a [u8],
}

impl<'a> WmfRecord<'a> {
    /// Record parameters
    pub fn params(&self) -> &'a [u8] {
        &self.data[RECORD_HEADER_SIZE..]
    }

    /// Check if this is an EOF record
    pub const fn is_eof(&self) -> bool {
        self.function == record::EOF
    }

    pub fn name(&self) -> &'static str {
        record_name(self.function)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Records,
    Done,
}

/// Iterator over the records of a METAFILEPICT payload
///
/// Ends when the payload is exhausted. META_EOF must be the last record.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    data: &'a [u8],
    offset: usize,
    header: Option<MetafileHeader<'a>>,
    state: State,
}

/// Walk the records of the METAFILEPICT payload in `data`
///
/// The header is parsed on the first call to `next`.
pub fn records(data: &[u8]) -> Records<'_> {
    Records {
        data,
        offset: 0,
        header: None,
        state: State::Header,
    }
}

impl<'a> Records<'a> {
    /// The metafile header, once the first record has been requested
    pub fn header(&self) -> Option<&MetafileHeader<'a>> {
        self.header.as_ref()
    }

    fn advance(&mut self) -> Result<Option<WmfRecord<'a>>> {
        let data = self.data;
        if self.state == State::Header {
            let (header, consumed) = MetafileHeader::parse(data)?;
            self.header = Some(header);
            self.offset = consumed;
            self.state = State::Records;
        }

        let rest = &data[self.offset..];
        if rest.is_empty() {
            return Ok(None);
        }

        let fields = decode(rest, &RECORD_HEADER, RECORD_CONTEXT)?;
        let size = fields.int("record_size")? as u32;
        let function = fields.int("function")? as u16;
        let size_bytes = (size as usize).saturating_mul(2);
        if size_bytes < RECORD_HEADER_SIZE {
            return Err(Error::bad_data(
                RECORD_CONTEXT,
                format!(
                    "{} record at offset {} declares {} words, below the 3-word minimum",
                    record_name(function),
                    self.offset,
                    size
                ),
            ));
        }
        let bytes = rest
            .get(..size_bytes)
            .ok_or_else(|| Error::truncated(RECORD_CONTEXT, size_bytes, rest.len()))?;

        let record = WmfRecord {
            offset: self.offset,
            size,
            function,
            data: bytes,
        };
        trace!(
            offset = record.offset,
            function = format_args!("{:#06x}", function),
            name = record.name(),
            size,
            "Metafile record"
        );
        self.offset += size_bytes;

        if record.is_eof() && self.offset < data.len() {
            return Err(Error::bad_data(
                RECORD_CONTEXT,
                format!(
                    "{} bytes of trailing data after META_EOF",
                    data.len() - self.offset
                ),
            ));
        }
        Ok(Some(record))
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<WmfRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }
        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
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

impl FusedIterator for Records<'_> {}
