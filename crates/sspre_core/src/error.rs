use std::io;

use thiserror::Error;

use crate::layout::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidSignature,
    MalformedField,
    Io,
    Layout,
}

/// Failures surfaced by decoding or encoding a replay.
///
/// Decoding stops at the first failing field; no partially decoded
/// document is ever handed back.
#[derive(Debug, Error)]
pub enum ReplayCodecError {
    #[error("invalid file signature: expected 53 73 2A 52, found {found:02X?}")]
    InvalidSignature { found: Vec<u8> },
    #[error("malformed {field}: {detail}")]
    MalformedField { field: FieldId, detail: String },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid file layout: {0}")]
    Layout(String),
}

impl ReplayCodecError {
    pub(crate) fn malformed(field: FieldId, detail: impl Into<String>) -> Self {
        Self::MalformedField {
            field,
            detail: detail.into(),
        }
    }

    /// Maps a reader failure onto the field being read. Running out of
    /// input is a malformed field; anything else is a storage error.
    pub(crate) fn from_read(field: FieldId, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => {
                Self::malformed(field, err.to_string())
            }
            _ => Self::Io(err),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidSignature { .. } => ErrorCode::InvalidSignature,
            Self::MalformedField { .. } => ErrorCode::MalformedField,
            Self::Io(_) => ErrorCode::Io,
            Self::Layout(_) => ErrorCode::Layout,
        }
    }

    /// The field decoding stopped at, when the failure is tied to one.
    pub fn field(&self) -> Option<FieldId> {
        match self {
            Self::InvalidSignature { .. } => Some(FieldId::Signature),
            Self::MalformedField { field, .. } => Some(*field),
            Self::Io(_) | Self::Layout(_) => None,
        }
    }
}
