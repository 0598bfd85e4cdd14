use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ReplayCodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Every region of a replay file, in on-disk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Signature,
    FormatVersion,
    Reserved,
    UniqueId,
    ReplayId,
    Metadata,
    ApproachRate,
    SpawnDistance,
    FadeLength,
    Parallax,
    UiParallax,
    GridParallax,
    Fov,
    CameraUnlock,
    EdgeDrift,
    Tail,
}

impl FieldId {
    pub const ALL: [FieldId; 16] = [
        Self::Signature,
        Self::FormatVersion,
        Self::Reserved,
        Self::UniqueId,
        Self::ReplayId,
        Self::Metadata,
        Self::ApproachRate,
        Self::SpawnDistance,
        Self::FadeLength,
        Self::Parallax,
        Self::UiParallax,
        Self::GridParallax,
        Self::Fov,
        Self::CameraUnlock,
        Self::EdgeDrift,
        Self::Tail,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Signature => "signature",
            Self::FormatVersion => "format_version",
            Self::Reserved => "reserved",
            Self::UniqueId => "unique_id",
            Self::ReplayId => "replay_id",
            Self::Metadata => "metadata",
            Self::ApproachRate => "approach_rate",
            Self::SpawnDistance => "spawn_distance",
            Self::FadeLength => "fade_length",
            Self::Parallax => "parallax",
            Self::UiParallax => "ui_parallax",
            Self::GridParallax => "grid_parallax",
            Self::Fov => "fov",
            Self::CameraUnlock => "camera_unlock",
            Self::EdgeDrift => "edge_drift",
            Self::Tail => "tail",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub id: FieldId,
    pub range: ByteRange,
}

/// Byte ranges of each field as found in the decoded input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLayout {
    pub file_len: usize,
    pub fields: Vec<FieldLayout>,
}

impl FileLayout {
    pub fn field(&self, id: FieldId) -> Option<&FieldLayout> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn validate(&self) -> Result<(), ReplayCodecError> {
        let Some(first) = self.fields.first() else {
            return Err(ReplayCodecError::Layout(
                "file layout must contain at least one field".to_string(),
            ));
        };

        if first.range.start != 0 {
            return Err(ReplayCodecError::Layout(
                "layout does not start at byte 0".to_string(),
            ));
        }

        let mut expected = 0usize;
        for field in &self.fields {
            if field.range.start != expected {
                return Err(ReplayCodecError::Layout(format!(
                    "layout gap/overlap around {}: expected start {}, got {}",
                    field.id, expected, field.range.start
                )));
            }
            if field.range.end < field.range.start {
                return Err(ReplayCodecError::Layout(format!(
                    "invalid range for {}: {}..{}",
                    field.id, field.range.start, field.range.end
                )));
            }
            expected = field.range.end;
        }

        if expected != self.file_len {
            return Err(ReplayCodecError::Layout(format!(
                "layout does not cover file: ended at {}, file length {}",
                expected, self.file_len
            )));
        }

        Ok(())
    }
}
