//! A library for reading and writing ASF/WMA metadata attributes.
//!
//! # Examples
//!
//! ## Encoding and decoding a record
//! ```
//! use asfmeta::{Attribute, AttributeKind};
//!
//! let attr = Attribute::from("Lucy in the Sky");
//! let data = attr.render("WM/AlbumTitle", AttributeKind::ContentDescriptor);
//!
//! let (name, parsed) =
//!     Attribute::parse(&mut &data[..], AttributeKind::ContentDescriptor).unwrap();
//! assert_eq!(name, "WM/AlbumTitle");
//! assert_eq!(parsed.string(), "Lucy in the Sky");
//! ```
//!
//! ## Matching on the decoded value
//! ```
//! use asfmeta::{Attribute, AttributeKind, Value};
//!
//! let data = Attribute::from(42u32).render("WM/TrackNumber", AttributeKind::Metadata);
//!
//! let (_, attr) = Attribute::parse(&mut &data[..], AttributeKind::Metadata).unwrap();
//! match attr.value() {
//!     Value::DWord(n) => assert_eq!(*n, 42),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ## Embedding a picture
//! ```
//! use asfmeta::{Attribute, AttributeKind, Picture, PictureType, WM_PICTURE};
//!
//! let picture = Picture::new(PictureType::FrontCover, "image/png", "cover", vec![1, 2, 3]);
//! let data = Attribute::from(picture).render(WM_PICTURE, AttributeKind::MetadataLibrary);
//!
//! let (name, attr) =
//!     Attribute::parse(&mut &data[..], AttributeKind::MetadataLibrary).unwrap();
//! assert_eq!(name, WM_PICTURE);
//! assert_eq!(attr.picture().unwrap().mime_type, "image/png");
//! ```
#![warn(missing_docs)]

pub use crate::attribute::{Attribute, AttributeKind, Value, WM_PICTURE};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::picture::{Picture, PictureType};

mod attribute;
mod error;
mod picture;
mod util;
