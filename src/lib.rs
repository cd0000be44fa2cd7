//! Olefield - Extract bitmaps from Microsoft Access OLE object fields
//!
//! Access stores pictures in "OLE Object" columns wrapped in a small
//! container: a header with the friendly and class names of the server
//! application, one or more embedded objects, and a fixed footer. This crate
//! walks that container and recovers the pictures as standalone BMP files.
//!
//! # Features
//!
//! - **Object iteration**: List the embedded objects of a field with their
//!   type names and raw payloads
//! - **Bitmap extraction**: `PBrush` payloads are returned as stored,
//!   `METAFILEPICT` payloads have the DIBs of their META_DIBSTRETCHBLT records
//!   converted to BMP files
//! - **Declarative layouts**: Every fixed-size record is described by a
//!   [`fieldspec`] so format assumptions sit next to the fields they check
//! - **Zero-copy parsing**: Objects and `PBrush` bitmaps borrow from the input
//!
//! All iterators are lazy: nothing is parsed before the first call to
//! `next`, and the first error is yielded once and ends the iteration.
//!
//! # Example - Extracting bitmaps
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let field = std::fs::read("photo.bin")?;
//! for (n, bmp) in olefield::bitmaps(&field).enumerate() {
//!     std::fs::write(format!("photo-{n}.bmp"), bmp?)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Listing objects
//!
//! ```no_run
//! use olefield::{Error, ObjectKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let field = std::fs::read("photo.bin")?;
//! for object in olefield::objects(&field) {
//!     match object {
//!         Ok(object) if object.kind() == ObjectKind::Other => {
//!             println!("skipping {}", object.type_name_str());
//!         },
//!         Ok(object) => println!("{:?}: {} bytes", object.kind(), object.payload.len()),
//!         Err(e @ Error::Unsupported { .. }) => eprintln!("cannot handle: {e}"),
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod fieldspec;
pub mod images;
pub mod ole;

pub use common::error::{Error, Result, SpecError};
pub use images::{Bitmaps, MetafileBitmaps, bitmaps, metafile_bitmaps};
pub use ole::{EmbeddedObject, ObjectKind, Objects, OleField, objects};
