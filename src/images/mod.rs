// Bitmap extraction from OLE fields
//
// Two kinds of embedded object carry pictures:
//
// - `PBrush`: the payload is already a complete BMP file and is returned as is
// - `METAFILEPICT`: a Windows Metafile whose META_DIBSTRETCHBLT records each
//   carry a DIB, returned as a synthesized BMP file (see [`wmf`])
//
// Every other object type is skipped.
//
// # Quick Start
//
// ```no_run
// let field = std::fs::read("photo.bin")?;
// for (n, bmp) in olefield::bitmaps(&field).enumerate() {
//     std::fs::write(format!("photo-{n}.bmp"), bmp?)?;
// }
// # Ok::<(), Box<dyn std::error::Error>>(())
// ```

pub mod bmp;
pub mod wmf;

pub use bmp::{BitmapFileHeader, wrap_dib};
pub use wmf::{MetafileBitmaps, metafile_bitmaps};

use crate::common::error::Result;
use crate::ole::{ObjectKind, Objects, objects};
use std::borrow::Cow;
use std::iter::FusedIterator;
use tracing::{debug, warn};

/// Iterator over the bitmaps of an OLE field, as BMP files
///
/// `PBrush` payloads are borrowed from the input, bitmaps extracted from
/// metafiles are owned. The first error is yielded once and ends the
/// iteration; bitmaps yielded before it remain valid.
#[derive(Debug, Clone)]
pub struct Bitmaps<'a> {
    objects: Objects<'a>,
    metafile: Option<MetafileBitmaps<'a>>,
    done: bool,
}

/// Extract every bitmap of the OLE field in `data`
pub fn bitmaps(data: &[u8]) -> Bitmaps<'_> {
    Bitmaps {
        objects: objects(data),
        metafile: None,
        done: false,
    }
}

impl<'a> Bitmaps<'a> {
    fn advance(&mut self) -> Result<Option<Cow<'a, [u8]>>> {
        loop {
            if let Some(metafile) = &mut self.metafile {
                match metafile.next().transpose()? {
                    Some(bmp) => return Ok(Some(Cow::Owned(bmp))),
                    None => self.metafile = None,
                }
            }

            let Some(object) = self.objects.next().transpose()? else {
                return Ok(None);
            };
            match object.kind() {
                ObjectKind::Metafile => {
                    debug!(size = object.payload.len(), "Walking METAFILEPICT object");
                    self.metafile = Some(metafile_bitmaps(object.payload));
                },
                ObjectKind::PaintBrush => {
                    if BitmapFileHeader::parse(object.payload).is_none() {
                        warn!(
                            size = object.payload.len(),
                            "PBrush object does not start with a BMP file header"
                        );
                    }
                    return Ok(Some(Cow::Borrowed(object.payload)));
                },
                ObjectKind::Other => {
                    debug!(
                        type_name = %object.type_name_str(),
                        size = object.payload.len(),
                        "Skipping object without bitmap"
                    );
                },
            }
        }
    }
}

impl<'a> Iterator for Bitmaps<'a> {
    type Item = Result<Cow<'a, [u8]>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(bmp)) => Some(Ok(bmp)),
            Ok(None) => {
                self.done = true;
                None
            },
            Err(e) => {
                self.done = true;
                Some(Err(e))
            },
        }
    }
}

impl FusedIterator for Bitmaps<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Error;
    use crate::common::fixtures::{
        OleFieldBuilder, dib_stretch_blt, dib_with, dib24, eof_record, metafile,
    };

    fn pbrush_bmp() -> Vec<u8> {
        wrap_dib(&dib24(2, 1), 40).unwrap()
    }

    #[test]
    fn test_pbrush_payload_is_borrowed() {
        let bmp = pbrush_bmp();
        let data = OleFieldBuilder::new().object(b"PBrush", &bmp).build();
        let found: Vec<_> = bitmaps(&data).collect::<Result<_>>().unwrap();
        assert_eq!(found.len(), 1);
        assert!(matches!(found[0], Cow::Borrowed(_)));
        assert_eq!(&*found[0], bmp.as_slice());
    }

    #[test]
    fn test_pbrush_payload_without_bmp_header_is_returned() {
        let data = OleFieldBuilder::new().object(b"PBrush", b"not a bitmap").build();
        let found: Vec<_> = bitmaps(&data).collect::<Result<_>>().unwrap();
        assert_eq!(found, [Cow::Borrowed(&b"not a bitmap"[..])]);
    }

    #[test]
    fn test_metafilepict_end_to_end() {
        let dib = dib24(4, 4);
        let payload = metafile(&[dib_stretch_blt(&dib), eof_record()]);
        let data = OleFieldBuilder::new()
            .names(b"Picture\0", b"StaticMetafile\0")
            .object(b"METAFILEPICT", &payload)
            .build();
        let found: Vec<_> = bitmaps(&data).collect::<Result<_>>().unwrap();
        assert_eq!(found.len(), 1);
        assert!(matches!(found[0], Cow::Owned(_)));
        assert_eq!(&found[0][..2], b"BM");
        assert_eq!(&found[0][14..], dib.as_slice());
    }

    #[test]
    fn test_mixed_objects_in_field_order() {
        let bmp = pbrush_bmp();
        let dib = dib24(1, 1);
        let payload = metafile(&[dib_stretch_blt(&dib), dib_stretch_blt(&dib), eof_record()]);
        let data = OleFieldBuilder::new()
            .object(b"Package", b"ignored")
            .object(b"METAFILEPICT", &payload)
            .empty_object()
            .object(b"PBrush", &bmp)
            .build();
        let found: Vec<_> = bitmaps(&data).collect::<Result<_>>().unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(&found[0][14..], dib.as_slice());
        assert_eq!(&found[1][14..], dib.as_slice());
        assert_eq!(&*found[2], bmp.as_slice());
    }

    #[test]
    fn test_no_image_objects() {
        let data = OleFieldBuilder::new().object(b"Word.Document.8", b"doc").build();
        assert_eq!(bitmaps(&data).count(), 0);
    }

    #[test]
    fn test_error_after_bitmaps() {
        let bmp = pbrush_bmp();
        let bad = metafile(&[dib_stretch_blt(&dib_with(40, 1, 1, 8, 0, &[0; 4])), eof_record()]);
        let data = OleFieldBuilder::new()
            .object(b"PBrush", &bmp)
            .object(b"METAFILEPICT", &bad)
            .object(b"PBrush", &bmp)
            .build();
        let mut iter = bitmaps(&data);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().unwrap_err().is_unsupported());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_field_errors_are_yielded() {
        let data = OleFieldBuilder::new()
            .object(b"PBrush", &pbrush_bmp())
            .footer(&[0, 0, 0, 0])
            .build();
        let results: Vec<_> = bitmaps(&data).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::BadData { .. })));
    }
}
