use indexmap::IndexSet;
use tracing::debug;

use crate::error::ReplayCodecError;
use crate::layout::FileLayout;
use crate::metadata::{MetadataString, Token};
use crate::speed::{self, SpeedCode};
use crate::types::ReplaySnapshot;
use crate::well_known_mods::{MOD_TOKEN_PREFIX, token_text};

use super::RESERVED_LEN;

pub(super) const SPEED_KEY: &str = "s";
const HITBOX_KEY: &str = "hbox";
const HIT_WINDOW_KEY: &str = "hitw";
pub const DEFAULT_HITBOX: f64 = 1.0;
pub const DEFAULT_HIT_WINDOW: f64 = 58.0;

/// A decoded replay.
///
/// Only [`decode`](super::decode) builds one, so anything that reaches
/// [`encode`](super::encode) has every field populated.
#[derive(Debug, Clone)]
pub struct ReplayDocument {
    pub(super) format_version: u16,
    pub(super) original_reserved: [u8; RESERVED_LEN],
    pub(super) unique_id: String,
    pub(super) replay_id: String,
    pub(super) metadata: MetadataString,
    pub(super) approach_rate: f32,
    pub(super) spawn_distance: f32,
    pub(super) fade_length: f32,
    pub(super) parallax: f32,
    pub(super) ui_parallax: f32,
    pub(super) grid_parallax: f32,
    pub(super) fov: f32,
    pub(super) camera_unlock: bool,
    pub(super) edge_drift: f32,
    pub(super) tail: Vec<u8>,
    pub(super) mods: IndexSet<String>,
    pub(super) speed: Option<SpeedCode>,
    pub(super) layout: FileLayout,
}

/// Mod names found in `metadata`, prefix stripped, first occurrence wins.
pub(super) fn mods_from_metadata(metadata: &MetadataString) -> IndexSet<String> {
    metadata
        .iter()
        .filter(|token| token.starts_with(MOD_TOKEN_PREFIX))
        .map(|token| token.to_string()[MOD_TOKEN_PREFIX.len()..].to_string())
        .collect()
}

pub(super) fn speed_from_metadata(metadata: &MetadataString) -> Option<SpeedCode> {
    metadata
        .get(SPEED_KEY)
        .filter(|code| !code.is_empty())
        .map(SpeedCode::from_code)
}

impl ReplayDocument {
    pub fn format_version(&self) -> u16 {
        self.format_version
    }

    /// The reserved header bytes as they were in the decoded input. These
    /// are informational only: encoding always writes zeros.
    pub fn original_reserved(&self) -> [u8; RESERVED_LEN] {
        self.original_reserved
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn replay_id(&self) -> &str {
        &self.replay_id
    }

    /// The metadata line as decoded. Mod and speed edits are not folded
    /// in until encode; see [`Self::normalized_metadata`].
    pub fn metadata(&self) -> &MetadataString {
        &self.metadata
    }

    pub fn approach_rate(&self) -> f32 {
        self.approach_rate
    }

    pub fn spawn_distance(&self) -> f32 {
        self.spawn_distance
    }

    pub fn fade_length(&self) -> f32 {
        self.fade_length
    }

    pub fn parallax(&self) -> f32 {
        self.parallax
    }

    pub fn ui_parallax(&self) -> f32 {
        self.ui_parallax
    }

    pub fn grid_parallax(&self) -> f32 {
        self.grid_parallax
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn camera_unlock(&self) -> bool {
        self.camera_unlock
    }

    pub fn edge_drift(&self) -> f32 {
        self.edge_drift
    }

    pub fn hitbox(&self) -> f64 {
        self.metadata.get_float(HITBOX_KEY, DEFAULT_HITBOX)
    }

    pub fn hit_window(&self) -> f64 {
        self.metadata.get_float(HIT_WINDOW_KEY, DEFAULT_HIT_WINDOW)
    }

    pub fn tail(&self) -> &[u8] {
        &self.tail
    }

    /// Byte ranges of each field in the input this document was decoded
    /// from.
    pub fn layout(&self) -> &FileLayout {
        &self.layout
    }

    pub fn mods(&self) -> impl Iterator<Item = &str> {
        self.mods.iter().map(String::as_str)
    }

    pub fn mod_count(&self) -> usize {
        self.mods.len()
    }

    pub fn has_mod(&self, name: &str) -> bool {
        self.mods.contains(name)
    }

    pub fn speed(&self) -> Option<&SpeedCode> {
        self.speed.as_ref()
    }

    pub fn speed_label(&self) -> &'static str {
        match &self.speed {
            Some(code) => code.label(),
            None => speed::NORMAL_LABEL,
        }
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed.as_ref().map_or(1.0, SpeedCode::multiplier)
    }

    pub fn set_approach_rate(&mut self, value: f32) {
        self.approach_rate = value;
    }

    pub fn set_spawn_distance(&mut self, value: f32) {
        self.spawn_distance = value;
    }

    pub fn set_fade_length(&mut self, value: f32) {
        self.fade_length = value;
    }

    pub fn set_parallax(&mut self, value: f32) {
        self.parallax = value;
    }

    pub fn set_ui_parallax(&mut self, value: f32) {
        self.ui_parallax = value;
    }

    pub fn set_grid_parallax(&mut self, value: f32) {
        self.grid_parallax = value;
    }

    pub fn set_fov(&mut self, value: f32) {
        self.fov = value;
    }

    pub fn set_camera_unlock(&mut self, value: bool) {
        self.camera_unlock = value;
    }

    pub fn set_edge_drift(&mut self, value: f32) {
        self.edge_drift = value;
    }

    /// Selects a speed by its display label. A label missing from the
    /// speed table clears the speed.
    pub fn set_speed(&mut self, label: &str) {
        let code = SpeedCode::from_label(label);
        debug!(label, code = ?code, "set speed");
        self.speed = code;
    }

    pub fn set_speed_code(&mut self, code: Option<SpeedCode>) {
        debug!(code = ?code, "set speed code");
        self.speed = code;
    }

    /// Returns `false` when the mod was already present.
    pub fn add_mod(&mut self, name: &str) -> bool {
        let inserted = self.mods.insert(name.to_string());
        if inserted {
            debug!(name, "added mod");
        }
        inserted
    }

    /// Returns `false` when the mod was not present.
    pub fn remove_mod(&mut self, name: &str) -> bool {
        let removed = self.mods.shift_remove(name);
        if removed {
            debug!(name, "removed mod");
        }
        removed
    }

    /// The metadata line as encode writes it: every `m_*` and `s:*` token
    /// is dropped from its place, then the current mods and speed are
    /// appended in that order.
    pub fn normalized_metadata(&self) -> MetadataString {
        let mut metadata = self.metadata.clone();
        metadata.remove_prefixed(MOD_TOKEN_PREFIX);
        metadata.remove_key(SPEED_KEY);
        for name in &self.mods {
            metadata.append(Token::parse(&token_text(name)));
        }
        if let Some(code) = &self.speed {
            metadata.append(Token::key_value(SPEED_KEY, code.as_code()));
        }
        metadata
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayCodecError> {
        super::encode(self)
    }

    pub fn snapshot(&self) -> ReplaySnapshot {
        ReplaySnapshot {
            format_version: self.format_version,
            unique_id: self.unique_id.clone(),
            replay_id: self.replay_id.clone(),
            metadata: self.metadata.serialize(),
            normalized_metadata: self.normalized_metadata().serialize(),
            approach_rate: self.approach_rate,
            spawn_distance: self.spawn_distance,
            fade_length: self.fade_length,
            parallax: self.parallax,
            hitbox: self.hitbox(),
            hit_window: self.hit_window(),
            ui_parallax: self.ui_parallax,
            grid_parallax: self.grid_parallax,
            fov: self.fov,
            camera_unlock: self.camera_unlock,
            edge_drift: self.edge_drift,
            mods: self.mods.iter().cloned().collect(),
            speed: self.speed.as_ref().map(|code| code.as_code().to_string()),
            speed_label: self.speed_label().to_string(),
            speed_multiplier: self.speed_multiplier(),
            tail_len: self.tail.len(),
        }
    }
}
