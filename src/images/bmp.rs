// BMP file synthesis
//
// A DIB lacks only the 14-byte BITMAPFILEHEADER to be a standalone .bmp file.

use crate::common::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, LE, U16, U32};

/// `BM`
pub const BMP_MAGIC: [u8; 2] = *b"BM";

/// Size of [`BitmapFileHeader`]
pub const BITMAP_FILE_HEADER_SIZE: usize = size_of::<BitmapFileHeader>();

/// BITMAPFILEHEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct BitmapFileHeader {
    pub magic: [u8; 2],
    /// Size of the whole file
    pub file_size: U32<LE>,
    pub reserved1: U16<LE>,
    pub reserved2: U16<LE>,
    /// Offset of the pixel data from the start of the file
    pub pixel_offset: U32<LE>,
}

impl BitmapFileHeader {
    /// Header for a DIB of `dib_len` bytes whose pixels start right after its
    /// `dib_header_size`-byte info header
    pub fn for_dib(dib_len: usize, dib_header_size: usize) -> Result<Self> {
        let too_large = || Error::bad_data("BMP file header", "DIB too large for a BMP file");
        let file_size = u32::try_from(BITMAP_FILE_HEADER_SIZE + dib_len).map_err(|_| too_large())?;
        let pixel_offset =
            u32::try_from(BITMAP_FILE_HEADER_SIZE + dib_header_size).map_err(|_| too_large())?;
        Ok(Self {
            magic: BMP_MAGIC,
            file_size: U32::new(file_size),
            reserved1: U16::new(0),
            reserved2: U16::new(0),
            pixel_offset: U32::new(pixel_offset),
        })
    }

    /// Read the header at the start of a BMP file
    pub fn parse(data: &[u8]) -> Option<Self> {
        let (header, _) = Self::read_from_prefix(data).ok()?;
        (header.magic == BMP_MAGIC).then_some(header)
    }
}

/// Prepend a synthesized BITMAPFILEHEADER to `dib`
pub fn wrap_dib(dib: &[u8], dib_header_size: usize) -> Result<Vec<u8>> {
    let header = BitmapFileHeader::for_dib(dib.len(), dib_header_size)?;
    let mut bmp = Vec::with_capacity(BITMAP_FILE_HEADER_SIZE + dib.len());
    bmp.extend_from_slice(header.as_bytes());
    bmp.extend_from_slice(dib);
    Ok(bmp)
}
