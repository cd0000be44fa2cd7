// Windows Metafile (WMF) bitmap extraction
//
// Access stores pictures pasted from the clipboard as METAFILEPICT objects: a
// memory metafile that draws a single device-independent bitmap with a
// META_DIBSTRETCHBLT record. The DIB embedded in such a record only needs a
// BITMAPFILEHEADER to become a .bmp file.
//
// References:
// - [MS-WMF]: Windows Metafile Format Specification
// - https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-wmf/

pub mod constants;
pub mod parser;

pub use parser::{MetafileHeader, RECORD_HEADER_SIZE, Records, WmfRecord, records};

use self::constants::{dib, record};
use super::bmp::wrap_dib;
use crate::common::error::{Error, Result};
use crate::fieldspec::{Field, Severity, decode};
use std::iter::FusedIterator;
use tracing::debug;

const BLT_CONTEXT: &str = "META_DIBSTRETCHBLT record";
const DIB_CONTEXT: &str = "DIB header";

const DIB_STRETCH_BLT_PARAMS: [Field<'static>; 9] = [
    Field::u32("raster_operation"),
    Field::i16("src_height"),
    Field::i16("src_width"),
    Field::i16("y_src"),
    Field::i16("x_src"),
    Field::i16("dest_height"),
    Field::i16("dest_width"),
    Field::i16("y_dest"),
    Field::i16("x_dest"),
];

/// BITMAPINFOHEADER, restricted to uncompressed 24-bit bitmaps without palette
const BITMAP_INFO_HEADER: [Field<'static>; 11] = [
    Field::u32("header_size").expect(dib::BITMAPINFOHEADER_SIZE, Severity::Unsupported),
    Field::i32("width"),
    Field::i32("height"),
    Field::u16("planes"),
    Field::u16("bit_count").expect(dib::BI_BITCOUNT_24, Severity::Unsupported),
    Field::u32("compression"),
    Field::u32("image_size"),
    Field::i32("horizontal_resolution"),
    Field::i32("vertical_resolution"),
    Field::u32("ncolors").expect(0, Severity::Unsupported),
    Field::u32("nimpcolors"),
];

/// Convert the DIB carried by a META_DIBSTRETCHBLT record into a BMP file
///
/// # Errors
/// * [`Error::BadData`] if the record is the bitmap-less variant
/// * [`Error::Truncated`] if the record is too short for its parameters or
///   the DIB header
/// * [`Error::Unsupported`] unless the DIB is a 40-byte BITMAPINFOHEADER with
///   24 bits per pixel and no color table
pub fn dib_stretch_blt_bitmap(record: &WmfRecord<'_>) -> Result<Vec<u8>> {
    let params = decode(record.params(), &DIB_STRETCH_BLT_PARAMS, BLT_CONTEXT)?;
    // Without a bitmap the record holds exactly its function's parameter words
    if record.size == u32::from(record.function >> 8) + 3 {
        return Err(Error::bad_data(
            BLT_CONTEXT,
            format!("record at offset {} carries no bitmap", record.offset),
        ));
    }

    let start = RECORD_HEADER_SIZE + params.consumed();
    let dib = record.data.get(start..).ok_or_else(|| {
        Error::bad_data(
            BLT_CONTEXT,
            format!("DIB starts at {start} past the record end {}", record.data.len()),
        )
    })?;
    let info = decode(dib, &BITMAP_INFO_HEADER, DIB_CONTEXT)?;
    debug!(
        offset = record.offset,
        width = info.int("width")?,
        height = info.int("height")?,
        compression = info.int("compression")?,
        image_size = info.int("image_size")?,
        "Found DIB in META_DIBSTRETCHBLT"
    );
    wrap_dib(dib, info.int("header_size")? as usize)
}

/// Iterator over the bitmaps drawn by a METAFILEPICT payload
///
/// Records other than META_DIBSTRETCHBLT are skipped. The first error is
/// yielded once and ends the iteration.
#[derive(Debug, Clone)]
pub struct MetafileBitmaps<'a> {
    records: Records<'a>,
    done: bool,
}

/// Extract the bitmaps of the METAFILEPICT payload in `data` as BMP files
///
/// # Examples
/// ```no_run
/// let payload = std::fs::read("picture.wmf")?;
/// for (n, bmp) in olefield::metafile_bitmaps(&payload).enumerate() {
///     std::fs::write(format!("picture-{n}.bmp"), bmp?)?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn metafile_bitmaps(data: &[u8]) -> MetafileBitmaps<'_> {
    MetafileBitmaps {
        records: records(data),
        done: false,
    }
}

impl<'a> MetafileBitmaps<'a> {
    /// The metafile header, once the first bitmap has been requested
    pub fn header(&self) -> Option<&MetafileHeader<'a>> {
        self.records.header()
    }
}

impl Iterator for MetafileBitmaps<'_> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let result = match self.records.next()? {
                Ok(rec) if rec.function == record::DIB_STRETCH_BLT => {
                    dib_stretch_blt_bitmap(&rec)
                },
                Ok(_) => continue,
                Err(e) => Err(e),
            };
            if result.is_err() {
                self.done = true;
            }
            return Some(result);
        }
    }
}

impl FusedIterator for MetafileBitmaps<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{
        dib_stretch_blt, dib_with, dib24, eof_record, metafile, wmf_record,
    };

    fn unsupported_field(result: Option<Result<Vec<u8>>>) -> String {
        match result {
            Some(Err(Error::Unsupported { field, .. })) => field,
            other => panic!("expected unsupported error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_known_dib() {
        let dib = dib24(2, 2);
        assert_eq!(dib.len(), 56);
        let data = metafile(&[
            wmf_record(record::SET_MAP_MODE, &[8, 0]),
            dib_stretch_blt(&dib),
            eof_record(),
        ]);

        let bitmaps: Vec<_> = metafile_bitmaps(&data).collect::<Result<_>>().unwrap();
        assert_eq!(bitmaps.len(), 1);
        let bmp = &bitmaps[0];
        assert_eq!(&bmp[..2], b"BM");
        assert_eq!(bmp.len(), 70);
        assert_eq!(&bmp[2..6], &70u32.to_le_bytes());
        assert_eq!(&bmp[6..10], &[0, 0, 0, 0]);
        assert_eq!(&bmp[10..14], &54u32.to_le_bytes());
        assert_eq!(&bmp[14..], dib.as_slice());
        assert_eq!(&bmp[54..], &dib[40..]);
    }

    #[test]
    fn test_multiple_bitmaps_in_order() {
        let first = dib24(1, 1);
        let second = dib24(3, 2);
        let data = metafile(&[
            dib_stretch_blt(&first),
            wmf_record(record::SAVE_DC, &[]),
            dib_stretch_blt(&second),
            eof_record(),
        ]);
        let bitmaps: Vec<_> = metafile_bitmaps(&data).collect::<Result<_>>().unwrap();
        assert_eq!(bitmaps.len(), 2);
        assert_eq!(&bitmaps[0][14..], first.as_slice());
        assert_eq!(&bitmaps[1][14..], second.as_slice());
    }

    #[test]
    fn test_metafile_without_bitmaps() {
        let data = metafile(&[wmf_record(record::SET_MAP_MODE, &[8, 0]), eof_record()]);
        let mut iter = metafile_bitmaps(&data);
        assert!(iter.next().is_none());
        assert_eq!(iter.header().map(|h| h.version), Some(0x0300));
    }

    #[test]
    fn test_bitmapless_record() {
        let data = metafile(&[dib_stretch_blt(&[0, 0]), eof_record()]);
        let mut iter = metafile_bitmaps(&data);
        assert!(matches!(iter.next(), Some(Err(Error::BadData { .. }))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_unsupported_dibs() {
        let pixels = [0u8; 16];
        for (dib, field) in [
            (dib_with(40, 2, 2, 8, 0, &pixels), "bit_count"),
            (dib_with(40, 2, 2, 24, 4, &pixels), "ncolors"),
            (dib_with(12, 2, 2, 24, 0, &pixels), "header_size"),
        ] {
            let data = metafile(&[dib_stretch_blt(&dib), eof_record()]);
            let mut iter = metafile_bitmaps(&data);
            assert_eq!(unsupported_field(iter.next()), field);
            assert!(iter.next().is_none());
        }
    }

    #[test]
    fn test_bitmap_before_error_is_kept() {
        let good = dib24(1, 1);
        let bad = dib_with(40, 1, 1, 8, 0, &[0; 4]);
        let data = metafile(&[dib_stretch_blt(&good), dib_stretch_blt(&bad), eof_record()]);
        let results: Vec<_> = metafile_bitmaps(&data).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_unsupported());
    }

    #[test]
    fn test_truncated_dib_header() {
        let data = metafile(&[dib_stretch_blt(&[0; 10]), eof_record()]);
        assert!(matches!(
            metafile_bitmaps(&data).next(),
            Some(Err(Error::Truncated {
                expected: 40,
                available: 10,
                ..
            }))
        ));
    }

    #[test]
    fn test_short_blt_params() {
        let data = metafile(&[wmf_record(record::DIB_STRETCH_BLT, &[0; 4]), eof_record()]);
        assert!(matches!(
            metafile_bitmaps(&data).next(),
            Some(Err(Error::Truncated { expected: 20, .. }))
        ));
    }

    #[test]
    fn test_trailing_data_after_eof() {
        let data = metafile(&[eof_record(), dib_stretch_blt(&dib24(1, 1))]);
        let results: Vec<_> = metafile_bitmaps(&data).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(Error::BadData { .. })));
    }

    #[test]
    fn test_unsupported_metafile_header() {
        let data = crate::common::fixtures::metafile_with(1, 0x0300, 1, &[eof_record()]);
        assert_eq!(unsupported_field(metafile_bitmaps(&data).next()), "num_of_objects");
    }
}
