mod document;

use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Seek};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::ReplayCodecError;
use crate::layout::{ByteRange, FieldId, FieldLayout, FileLayout};
use crate::metadata::MetadataString;
use crate::reader::LittleEndianReader;
use crate::speed::SpeedCode;
use crate::writer::LittleEndianWriter;

pub use document::{DEFAULT_HIT_WINDOW, DEFAULT_HITBOX, ReplayDocument};
use document::{mods_from_metadata, speed_from_metadata};

pub const FILE_SIGNATURE: [u8; 4] = [0x53, 0x73, 0x2A, 0x52];
pub const RESERVED_LEN: usize = 8;
pub const FILE_EXTENSION: &str = "sspre";

const LINE_BREAKING: &[char] = &[';', '\n', '\r'];

struct Capture {
    fields: Vec<FieldLayout>,
}

impl Capture {
    fn new() -> Self {
        Self {
            fields: Vec::with_capacity(FieldId::ALL.len()),
        }
    }

    fn record(&mut self, id: FieldId, start: usize, end: usize) {
        trace!(field = %id, start, end, "read field");
        self.fields.push(FieldLayout {
            id,
            range: ByteRange { start, end },
        });
    }
}

fn read_field<R: Read + Seek, T>(
    r: &mut LittleEndianReader<R>,
    capture: &mut Capture,
    id: FieldId,
    read: impl FnOnce(&mut LittleEndianReader<R>) -> io::Result<T>,
) -> Result<T, ReplayCodecError> {
    let start = r.position()? as usize;
    let value = read(r).map_err(|e| ReplayCodecError::from_read(id, e))?;
    let end = r.position()? as usize;
    capture.record(id, start, end);
    Ok(value)
}

/// Decode a complete replay held in memory.
pub fn decode(bytes: &[u8]) -> Result<ReplayDocument, ReplayCodecError> {
    debug!(len = bytes.len(), "decoding replay");
    let mut capture = Capture::new();
    let mut r = LittleEndianReader::new(Cursor::new(bytes));

    let signature = read_field(&mut r, &mut capture, FieldId::Signature, |r| {
        r.read_up_to(FILE_SIGNATURE.len())
    })?;
    if signature != FILE_SIGNATURE {
        return Err(ReplayCodecError::InvalidSignature { found: signature });
    }

    let format_version = read_field(&mut r, &mut capture, FieldId::FormatVersion, |r| {
        r.read_u16()
    })?;
    let original_reserved = read_field(&mut r, &mut capture, FieldId::Reserved, |r| {
        r.read_array::<RESERVED_LEN>()
    })?;

    let unique_id = read_field(&mut r, &mut capture, FieldId::UniqueId, |r| {
        r.read_trimmed_line()
    })?;
    let replay_id = read_field(&mut r, &mut capture, FieldId::ReplayId, |r| {
        r.read_trimmed_line()
    })?;
    let raw_metadata = read_field(&mut r, &mut capture, FieldId::Metadata, |r| {
        r.read_trimmed_line()
    })?;
    let metadata = MetadataString::parse(&raw_metadata);

    let approach_rate = read_field(&mut r, &mut capture, FieldId::ApproachRate, |r| {
        r.read_f32()
    })?;
    let spawn_distance = read_field(&mut r, &mut capture, FieldId::SpawnDistance, |r| {
        r.read_f32()
    })?;
    let fade_length = read_field(&mut r, &mut capture, FieldId::FadeLength, |r| r.read_f32())?;
    let parallax = read_field(&mut r, &mut capture, FieldId::Parallax, |r| r.read_f32())?;
    let ui_parallax = read_field(&mut r, &mut capture, FieldId::UiParallax, |r| r.read_f32())?;
    let grid_parallax = read_field(&mut r, &mut capture, FieldId::GridParallax, |r| {
        r.read_f32()
    })?;
    let fov = read_field(&mut r, &mut capture, FieldId::Fov, |r| r.read_f32())?;
    let camera_unlock = read_field(&mut r, &mut capture, FieldId::CameraUnlock, |r| {
        r.read_u8()
    })? != 0;
    let edge_drift = read_field(&mut r, &mut capture, FieldId::EdgeDrift, |r| r.read_f32())?;
    let tail = read_field(&mut r, &mut capture, FieldId::Tail, |r| r.read_to_end())?;

    let layout = FileLayout {
        file_len: bytes.len(),
        fields: capture.fields,
    };
    layout.validate()?;

    let mods = mods_from_metadata(&metadata);
    let speed = speed_from_metadata(&metadata);

    let document = ReplayDocument {
        format_version,
        original_reserved,
        unique_id,
        replay_id,
        metadata,
        approach_rate,
        spawn_distance,
        fade_length,
        parallax,
        ui_parallax,
        grid_parallax,
        fov,
        camera_unlock,
        edge_drift,
        tail,
        mods,
        speed,
        layout,
    };

    debug!(
        format_version,
        unique_id = %document.unique_id,
        replay_id = %document.replay_id,
        metadata = %document.metadata,
        approach_rate,
        spawn_distance,
        fade_length,
        parallax,
        hitbox = document.hitbox(),
        hit_window = document.hit_window(),
        ui_parallax,
        grid_parallax,
        fov,
        camera_unlock,
        edge_drift,
        tail_len = document.tail.len(),
        "decoded replay"
    );

    Ok(document)
}

pub fn decode_reader<R: Read>(mut reader: R) -> Result<ReplayDocument, ReplayCodecError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

pub fn decode_path(path: impl AsRef<Path>) -> Result<ReplayDocument, ReplayCodecError> {
    let file = File::open(path.as_ref())?;
    decode_reader(BufReader::new(file))
}

/// Encode a document. The reserved header bytes are always written as
/// zeros and the metadata line is normalized (see
/// [`ReplayDocument::normalized_metadata`]).
pub fn encode(document: &ReplayDocument) -> Result<Vec<u8>, ReplayCodecError> {
    check_token_text(document)?;
    let metadata = document.normalized_metadata().serialize();
    debug!(
        format_version = document.format_version,
        metadata = %metadata,
        tail_len = document.tail.len(),
        "encoding replay"
    );

    let mut w = LittleEndianWriter::new(Vec::with_capacity(
        document.layout.file_len + metadata.len(),
    ));
    w.write_bytes(&FILE_SIGNATURE)?;
    w.write_u16(document.format_version)?;
    w.write_zeros(RESERVED_LEN)?;
    w.write_line(&document.unique_id)?;
    w.write_line(&document.replay_id)?;
    w.write_line(&metadata)?;
    w.write_f32(document.approach_rate)?;
    w.write_f32(document.spawn_distance)?;
    w.write_f32(document.fade_length)?;
    w.write_f32(document.parallax)?;
    w.write_f32(document.ui_parallax)?;
    w.write_f32(document.grid_parallax)?;
    w.write_f32(document.fov)?;
    w.write_u8(u8::from(document.camera_unlock))?;
    w.write_f32(document.edge_drift)?;
    w.write_bytes(&document.tail)?;
    Ok(w.into_inner())
}

pub fn encode_to_path(
    document: &ReplayDocument,
    path: impl AsRef<Path>,
) -> Result<(), ReplayCodecError> {
    let bytes = encode(document)?;
    fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Mod names and the speed code become metadata tokens verbatim, so they
/// must be non-empty and free of the token separator and line breaks.
/// The metadata line is trimmed on decode, so the token that ends it
/// must not end in whitespace either.
fn check_token_text(document: &ReplayDocument) -> Result<(), ReplayCodecError> {
    for name in document.mods() {
        if name.is_empty() {
            return Err(ReplayCodecError::malformed(FieldId::Metadata, "mod name is empty"));
        }
        if name.contains(LINE_BREAKING) {
            return Err(ReplayCodecError::malformed(
                FieldId::Metadata,
                format!("mod name {name:?} contains a separator or line break"),
            ));
        }
    }

    let speed_code = document.speed().map(SpeedCode::as_code);
    if let Some(code) = speed_code {
        if code.is_empty() {
            return Err(ReplayCodecError::malformed(FieldId::Metadata, "speed code is empty"));
        }
        if code.contains(LINE_BREAKING) {
            return Err(ReplayCodecError::malformed(
                FieldId::Metadata,
                format!("speed code {code:?} contains a separator or line break"),
            ));
        }
    }

    let line_end = speed_code.or_else(|| document.mods().last());
    if let Some(text) = line_end.filter(|text| text.ends_with(|c: char| c.is_ascii_whitespace()))
    {
        return Err(ReplayCodecError::malformed(
            FieldId::Metadata,
            format!("{text:?} ends the metadata line with whitespace"),
        ));
    }
    Ok(())
}
