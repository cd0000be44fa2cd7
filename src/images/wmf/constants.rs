//! WMF constants
//!
//! Record function codes, header values and the BITMAPINFOHEADER values the
//! bitmap extractor accepts.

/// WMF record function codes
pub mod record {
    // State records
    pub const SAVE_DC: u16 = 0x001E;
    pub const RESTORE_DC: u16 = 0x0127;
    pub const SET_BK_COLOR: u16 = 0x0201;
    pub const SET_BK_MODE: u16 = 0x0102;
    pub const SET_MAP_MODE: u16 = 0x0103;
    pub const SET_ROP2: u16 = 0x0104;
    pub const SET_REL_ABS: u16 = 0x0105;
    pub const SET_POLY_FILL_MODE: u16 = 0x0106;
    pub const SET_STRETCH_BLT_MODE: u16 = 0x0107;
    pub const SET_TEXT_CHAR_EXTRA: u16 = 0x0108;
    pub const SET_TEXT_COLOR: u16 = 0x0209;
    pub const SET_TEXT_JUSTIFICATION: u16 = 0x020A;
    pub const SET_WINDOW_ORG: u16 = 0x020B;
    pub const SET_WINDOW_EXT: u16 = 0x020C;
    pub const SET_VIEWPORT_ORG: u16 = 0x020D;
    pub const SET_VIEWPORT_EXT: u16 = 0x020E;
    pub const OFFSET_WINDOW_ORG: u16 = 0x020F;
    pub const SCALE_WINDOW_EXT: u16 = 0x0410;
    pub const OFFSET_VIEWPORT_ORG: u16 = 0x0211;
    pub const SCALE_VIEWPORT_EXT: u16 = 0x0412;
    pub const SET_TEXT_ALIGN: u16 = 0x012E;

    // Drawing records
    pub const LINE_TO: u16 = 0x0213;
    pub const MOVE_TO: u16 = 0x0214;
    pub const SET_PIXEL: u16 = 0x041F;
    pub const POLYGON: u16 = 0x0324;
    pub const POLYLINE: u16 = 0x0325;
    pub const RECTANGLE: u16 = 0x041B;
    pub const ROUND_RECT: u16 = 0x061C;
    pub const ELLIPSE: u16 = 0x0418;
    pub const ARC: u16 = 0x0817;
    pub const PIE: u16 = 0x081A;
    pub const CHORD: u16 = 0x0830;
    pub const POLYPOLYGON: u16 = 0x0538;

    // Text records
    pub const TEXT_OUT: u16 = 0x0521;
    pub const EXT_TEXT_OUT: u16 = 0x0A32;

    // Object records
    pub const CREATE_PEN_INDIRECT: u16 = 0x02FA;
    pub const CREATE_BRUSH_INDIRECT: u16 = 0x02FC;
    pub const CREATE_FONT_INDIRECT: u16 = 0x02FB;
    pub const CREATE_PALETTE: u16 = 0x00F7;
    pub const CREATE_REGION: u16 = 0x06FF;
    pub const CREATE_PATTERN_BRUSH: u16 = 0x01F9;
    pub const DIB_CREATE_PATTERN_BRUSH: u16 = 0x0142;
    pub const SELECT_OBJECT: u16 = 0x012D;
    pub const DELETE_OBJECT: u16 = 0x01F0;
    pub const SELECT_PALETTE: u16 = 0x0234;
    pub const REALIZE_PALETTE: u16 = 0x0035;

    // Bitmap records
    pub const BIT_BLT: u16 = 0x0922;
    pub const STRETCH_BLT: u16 = 0x0B23;
    pub const DIB_BIT_BLT: u16 = 0x0940;
    pub const DIB_STRETCH_BLT: u16 = 0x0B41;
    pub const SET_DIB_TO_DEV: u16 = 0x0D33;
    pub const STRETCH_DIB: u16 = 0x0F43;

    // Clipping records
    pub const EXCLUDE_CLIP_RECT: u16 = 0x0415;
    pub const INTERSECT_CLIP_RECT: u16 = 0x0416;
    pub const SELECT_CLIP_REGION: u16 = 0x012C;
    pub const OFFSET_CLIP_RGN: u16 = 0x0220;

    // Fill records
    pub const FLOOD_FILL: u16 = 0x0419;
    pub const EXT_FLOOD_FILL: u16 = 0x0548;
    pub const FILL_REGION: u16 = 0x0228;
    pub const FRAME_REGION: u16 = 0x0429;
    pub const INVERT_REGION: u16 = 0x012A;
    pub const PAINT_REGION: u16 = 0x012B;

    // Control records
    pub const EOF: u16 = 0x0000;
    pub const SET_MAPPER_FLAGS: u16 = 0x0231;
    pub const ESCAPE: u16 = 0x0626;
}

/// WMF header values
pub mod header {
    /// Metafile stored in memory
    pub const MEMORY_METAFILE: i64 = 0x0001;
    /// Windows 3.0 metafile with DIB support
    pub const METAVERSION300: i64 = 0x0300;
}

/// BITMAPINFOHEADER values
pub mod dib {
    /// Size of BITMAPINFOHEADER
    pub const BITMAPINFOHEADER_SIZE: i64 = 40;
    /// 24 bits per pixel, no color table
    pub const BI_BITCOUNT_24: i64 = 0x0018;
}

/// Symbolic name of a record function, for diagnostics
pub fn record_name(function: u16) -> &'static str {
    use record::*;
    match function {
        SAVE_DC => "META_SAVEDC",
        RESTORE_DC => "META_RESTOREDC",
        SET_BK_COLOR => "META_SETBKCOLOR",
        SET_BK_MODE => "META_SETBKMODE",
        SET_MAP_MODE => "META_SETMAPMODE",
        SET_ROP2 => "META_SETROP2",
        SET_REL_ABS => "META_SETRELABS",
        SET_POLY_FILL_MODE => "META_SETPOLYFILLMODE",
        SET_STRETCH_BLT_MODE => "META_SETSTRETCHBLTMODE",
        SET_TEXT_CHAR_EXTRA => "META_SETTEXTCHAREXTRA",
        SET_TEXT_COLOR => "META_SETTEXTCOLOR",
        SET_TEXT_JUSTIFICATION => "META_SETTEXTJUSTIFICATION",
        SET_WINDOW_ORG => "META_SETWINDOWORG",
        SET_WINDOW_EXT => "META_SETWINDOWEXT",
        SET_VIEWPORT_ORG => "META_SETVIEWPORTORG",
        SET_VIEWPORT_EXT => "META_SETVIEWPORTEXT",
        OFFSET_WINDOW_ORG => "META_OFFSETWINDOWORG",
        SCALE_WINDOW_EXT => "META_SCALEWINDOWEXT",
        OFFSET_VIEWPORT_ORG => "META_OFFSETVIEWPORTORG",
        SCALE_VIEWPORT_EXT => "META_SCALEVIEWPORTEXT",
        SET_TEXT_ALIGN => "META_SETTEXTALIGN",
        LINE_TO => "META_LINETO",
        MOVE_TO => "META_MOVETO",
        SET_PIXEL => "META_SETPIXEL",
        POLYGON => "META_POLYGON",
        POLYLINE => "META_POLYLINE",
        RECTANGLE => "META_RECTANGLE",
        ROUND_RECT => "META_ROUNDRECT",
        ELLIPSE => "META_ELLIPSE",
        ARC => "META_ARC",
        PIE => "META_PIE",
        CHORD => "META_CHORD",
        POLYPOLYGON => "META_POLYPOLYGON",
        TEXT_OUT => "META_TEXTOUT",
        EXT_TEXT_OUT => "META_EXTTEXTOUT",
        CREATE_PEN_INDIRECT => "META_CREATEPENINDIRECT",
        CREATE_BRUSH_INDIRECT => "META_CREATEBRUSHINDIRECT",
        CREATE_FONT_INDIRECT => "META_CREATEFONTINDIRECT",
        CREATE_PALETTE => "META_CREATEPALETTE",
        CREATE_REGION => "META_CREATEREGION",
        CREATE_PATTERN_BRUSH => "META_CREATEPATTERNBRUSH",
        DIB_CREATE_PATTERN_BRUSH => "META_DIBCREATEPATTERNBRUSH",
        SELECT_OBJECT => "META_SELECTOBJECT",
        DELETE_OBJECT => "META_DELETEOBJECT",
        SELECT_PALETTE => "META_SELECTPALETTE",
        REALIZE_PALETTE => "META_REALIZEPALETTE",
        BIT_BLT => "META_BITBLT",
        STRETCH_BLT => "META_STRETCHBLT",
        DIB_BIT_BLT => "META_DIBBITBLT",
        DIB_STRETCH_BLT => "META_DIBSTRETCHBLT",
        SET_DIB_TO_DEV => "META_SETDIBTODEV",
        STRETCH_DIB => "META_STRETCHDIB",
        EXCLUDE_CLIP_RECT => "META_EXCLUDECLIPRECT",
        INTERSECT_CLIP_RECT => "META_INTERSECTCLIPRECT",
        SELECT_CLIP_REGION => "META_SELECTCLIPREGION",
        OFFSET_CLIP_RGN => "META_OFFSETCLIPRGN",
        FLOOD_FILL => "META_FLOODFILL",
        EXT_FLOOD_FILL => "META_EXTFLOODFILL",
        FILL_REGION => "META_FILLREGION",
        FRAME_REGION => "META_FRAMEREGION",
        INVERT_REGION => "META_INVERTREGION",
        PAINT_REGION => "META_PAINTREGION",
        EOF => "META_EOF",
        SET_MAPPER_FLAGS => "META_SETMAPPERFLAGS",
        ESCAPE => "META_ESCAPE",
        _ => "unknown",
    }
}
