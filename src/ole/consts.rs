/// Signature at the start of every OLE object field header
pub const FIELD_SIGNATURE: i64 = 0x1C15;

/// OLE version carried by every embedded object header
pub const OLE_VERSION: i64 = 0x0501;

/// Marker in the last three bytes of an OLE object field
pub const FIELD_FOOTER: &[u8; 3] = b"\xAD\x05\xFE";

/// Size of the trailer holding [`FIELD_FOOTER`]
pub const FOOTER_SIZE: usize = 4;

/// Size of an embedded object whose OLE format is 0
pub const EMPTY_OBJECT_SIZE: usize = 8;

/// Opaque bytes that follow the type name of an embedded object
pub const TYPE_NAME_TRAILER_SIZE: usize = 8;

// Embedded object type names
/// Windows Metafile picture
pub const TYPE_METAFILEPICT: &[u8] = b"METAFILEPICT";
/// Paintbrush picture, stored as a complete BMP file
pub const TYPE_PBRUSH: &[u8] = b"PBrush";
