//! Byte-level builders for test inputs.

use crate::images::wmf::constants::record;

/// Builds an OLE object field
pub(crate) struct OleFieldBuilder {
    friendly: Vec<u8>,
    class: Vec<u8>,
    body: Vec<u8>,
    footer: Vec<u8>,
}

impl OleFieldBuilder {
    pub(crate) fn new() -> Self {
        Self {
            friendly: b"Paintbrush Picture\0".to_vec(),
            class: b"Paint.Picture\0\0".to_vec(),
            body: Vec::new(),
            footer: vec![0x00, 0xAD, 0x05, 0xFE],
        }
    }

    pub(crate) fn names(mut self, friendly: &[u8], class: &[u8]) -> Self {
        self.friendly = friendly.to_vec();
        self.class = class.to_vec();
        self
    }

    /// Append an object whose type name is NUL-terminated
    pub(crate) fn object(self, type_name: &[u8], payload: &[u8]) -> Self {
        let mut name = type_name.to_vec();
        name.push(0);
        self.object_with(0x0501, 2, &name, payload)
    }

    pub(crate) fn object_with(
        mut self,
        ole_version: u32,
        ole_format: u32,
        type_name: &[u8],
        payload: &[u8],
    ) -> Self {
        self.body.extend_from_slice(&ole_version.to_le_bytes());
        self.body.extend_from_slice(&ole_format.to_le_bytes());
        self.body
            .extend_from_slice(&(type_name.len() as i32).to_le_bytes());
        self.body.extend_from_slice(type_name);
        self.body.extend_from_slice(&[0u8; 8]);
        self.body
            .extend_from_slice(&(payload.len() as i32).to_le_bytes());
        self.body.extend_from_slice(payload);
        self
    }

    /// Append an 8-byte object with OLE format 0
    pub(crate) fn empty_object(mut self) -> Self {
        self.body.extend_from_slice(&0x0501u32.to_le_bytes());
        self.body.extend_from_slice(&0u32.to_le_bytes());
        self
    }

    pub(crate) fn raw(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub(crate) fn footer(mut self, footer: &[u8]) -> Self {
        self.footer = footer.to_vec();
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let fixed = 16usize;
        let header_size = fixed + self.friendly.len() + self.class.len();
        let mut out = Vec::new();
        out.extend_from_slice(&0x1C15i16.to_le_bytes());
        out.extend_from_slice(&(header_size as i16).to_le_bytes());
        out.extend_from_slice(&2i32.to_le_bytes());
        out.extend_from_slice(&(self.friendly.len() as i16).to_le_bytes());
        out.extend_from_slice(&(self.class.len() as i16).to_le_bytes());
        out.extend_from_slice(&(fixed as i16).to_le_bytes());
        out.extend_from_slice(&((fixed + self.friendly.len()) as i16).to_le_bytes());
        out.extend_from_slice(&self.friendly);
        out.extend_from_slice(&self.class);
        out.extend_from_slice(&self.body);
        out.extend_from_slice(&self.footer);
        out
    }
}

/// A BITMAPINFOHEADER followed by a gradient of 24-bit pixels
pub(crate) fn dib24(width: i32, height: i32) -> Vec<u8> {
    let stride = (width as usize * 3).div_ceil(4) * 4;
    let pixels: Vec<u8> = (0..stride * height as usize)
        .map(|i| (i % 251) as u8)
        .collect();
    dib_with(40, width, height, 24, 0, &pixels)
}

pub(crate) fn dib_with(
    header_size: u32,
    width: i32,
    height: i32,
    bit_count: u16,
    ncolors: u32,
    pixels: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&header_size.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bit_count.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&ncolors.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(pixels);
    out
}

/// A metafile record; `params` must have an even length
pub(crate) fn wmf_record(function: u16, params: &[u8]) -> Vec<u8> {
    let words = (6 + params.len()) / 2;
    let mut out = Vec::new();
    out.extend_from_slice(&(words as u32).to_le_bytes());
    out.extend_from_slice(&function.to_le_bytes());
    out.extend_from_slice(params);
    out
}

/// META_DIBSTRETCHBLT carrying `dib`
pub(crate) fn dib_stretch_blt(dib: &[u8]) -> Vec<u8> {
    let mut params = Vec::new();
    params.extend_from_slice(&0x00CC_0020u32.to_le_bytes());
    for coord in [16i16, 16, 0, 0, 16, 16, 0, 0] {
        params.extend_from_slice(&coord.to_le_bytes());
    }
    params.extend_from_slice(dib);
    wmf_record(record::DIB_STRETCH_BLT, &params)
}

pub(crate) fn eof_record() -> Vec<u8> {
    wmf_record(record::EOF, &[])
}

/// METAFILEPICT payload: 8 opaque bytes, WMF header, records
pub(crate) fn metafile(records: &[Vec<u8>]) -> Vec<u8> {
    metafile_with(1, 0x0300, 0, records)
}

pub(crate) fn metafile_with(kind: u16, version: u16, objects: u16, records: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = records.concat();
    let max_record = records.iter().map(|r| r.len() / 2).max().unwrap_or(0);
    let mut out = vec![0x08, 0x00, 0xE8, 0x03, 0xE8, 0x03, 0x00, 0x00];
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&9u16.to_le_bytes());
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&((18 + body.len()) as u32 / 2).to_le_bytes());
    out.extend_from_slice(&objects.to_le_bytes());
    out.extend_from_slice(&(max_record as u32).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&body);
    out
}
