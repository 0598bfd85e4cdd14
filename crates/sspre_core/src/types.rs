use serde::{Deserialize, Serialize};

/// Plain copy of a decoded replay, including the derived views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySnapshot {
    pub format_version: u16,
    pub unique_id: String,
    pub replay_id: String,
    pub metadata: String,
    /// The metadata line as the next encode will write it.
    pub normalized_metadata: String,
    pub approach_rate: f32,
    pub spawn_distance: f32,
    pub fade_length: f32,
    pub parallax: f32,
    pub hitbox: f64,
    pub hit_window: f64,
    pub ui_parallax: f32,
    pub grid_parallax: f32,
    pub fov: f32,
    pub camera_unlock: bool,
    pub edge_drift: f32,
    pub mods: Vec<String>,
    pub speed: Option<String>,
    pub speed_label: String,
    pub speed_multiplier: f64,
    pub tail_len: usize,
}
