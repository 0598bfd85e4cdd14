//! Codec for `.sspre` replay files.
//!
//! A replay is a fixed binary header, three newline-terminated text lines
//! (the third being a `;`-delimited metadata string), a run of
//! little-endian settings fields and an opaque tail that is carried
//! through edits untouched.

pub mod error;
pub mod layout;
pub mod metadata;
pub mod reader;
pub mod replay;
pub mod speed;
pub mod types;
pub mod well_known_mods;
pub mod writer;

pub use error::{ErrorCode, ReplayCodecError};
pub use layout::{ByteRange, FieldId, FieldLayout, FileLayout};
pub use metadata::{MetadataString, Token};
pub use replay::{
    DEFAULT_HIT_WINDOW, DEFAULT_HITBOX, FILE_EXTENSION, FILE_SIGNATURE, RESERVED_LEN,
    ReplayDocument, decode, decode_path, decode_reader, encode, encode_to_path,
};
pub use speed::SpeedCode;
pub use types::ReplaySnapshot;
