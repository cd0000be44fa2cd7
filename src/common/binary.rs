//! Binary data reading utilities.
//!
//! Little-endian scalar readers shared by the field-spec decoder, plus helpers
//! for the NUL-padded ANSI strings found in OLE headers.

use zerocopy::{FromBytes, I16, I32, LE, U16, U32};

/// Binary reading error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

#[inline]
fn window(data: &[u8], offset: usize, size: usize) -> BinaryResult<&[u8]> {
    offset
        .checked_add(size)
        .and_then(|end| data.get(offset..end))
        .ok_or(BinaryError::InsufficientData {
            expected: offset.saturating_add(size),
            available: data.len(),
        })
}

/// Read a little-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use olefield::common::binary::read_u16_le;
/// let data = [0x34, 0x12, 0x78, 0x56];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0x5678);
/// ```
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> BinaryResult<u16> {
    U16::<LE>::read_from_bytes(window(data, offset, 2)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u16".to_string()))
}

/// Read a little-endian i16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use olefield::common::binary::read_i16_le;
/// let data = [0xFF, 0xFF];
/// assert_eq!(read_i16_le(&data, 0).unwrap(), -1i16);
/// ```
#[inline]
pub fn read_i16_le(data: &[u8], offset: usize) -> BinaryResult<i16> {
    I16::<LE>::read_from_bytes(window(data, offset, 2)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read i16".to_string()))
}

/// Read a little-endian u32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use olefield::common::binary::read_u32_le;
/// let data = [0x78, 0x56, 0x34, 0x12];
/// assert_eq!(read_u32_le(&data, 0).unwrap(), 0x12345678);
/// ```
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> BinaryResult<u32> {
    U32::<LE>::read_from_bytes(window(data, offset, 4)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u32".to_string()))
}

/// Read a little-endian i32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use olefield::common::binary::read_i32_le;
/// let data = [0xFF, 0xFF, 0xFF, 0xFF];
/// assert_eq!(read_i32_le(&data, 0).unwrap(), -1i32);
/// ```
#[inline]
pub fn read_i32_le(data: &[u8], offset: usize) -> BinaryResult<i32> {
    I32::<LE>::read_from_bytes(window(data, offset, 4)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read i32".to_string()))
}

/// Strip trailing NUL padding from a fixed-width string field.
#[inline]
pub fn trim_nul(data: &[u8]) -> &[u8] {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &data[..end]
}

/// Parse a Windows-1252 string, stopping at the first NUL.
///
/// # Examples
///
/// ```
/// use olefield::common::binary::parse_windows1252_string;
/// let data = b"Paintbrush Picture\0\0";
/// assert_eq!(parse_windows1252_string(data), "Paintbrush Picture");
/// ```
pub fn parse_windows1252_string(data: &[u8]) -> String {
    data.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| windows_1252_to_char(b))
        .collect()
}

/// Convert a Windows-1252 byte to a Unicode character.
///
/// Windows-1252 is mostly compatible with ISO-8859-1, but has additional
/// printable characters in the 0x80-0x9F range.
#[inline]
fn windows_1252_to_char(byte: u8) -> char {
    match byte {
        0x80 => '€',
        0x82 => '‚',
        0x83 => 'ƒ',
        0x84 => '„',
        0x85 => '…',
        0x86 => '†',
        0x87 => '‡',
        0x88 => 'ˆ',
        0x89 => '‰',
        0x8A => 'Š',
        0x8B => '‹',
        0x8C => 'Œ',
        0x8E => 'Ž',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '•',
        0x96 => '–',
        0x97 => '—',
        0x98 => '˜',
        0x99 => '™',
        0x9A => 'š',
        0x9B => '›',
        0x9C => 'œ',
        0x9E => 'ž',
        0x9F => 'Ÿ',
        _ => byte as char,
    }
}
