#![allow(dead_code)]

use std::path::PathBuf;

pub const SIGNATURE: [u8; 4] = [0x53, 0x73, 0x2A, 0x52];

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

pub fn sample_fixture_path() -> PathBuf {
    workspace_root().join("tests/fixtures/sample.sspre")
}

/// Field values for building replay bytes by hand.
#[derive(Debug, Clone)]
pub struct ReplayFixture {
    pub format_version: u16,
    pub reserved: [u8; 8],
    pub unique_id: String,
    pub replay_id: String,
    pub metadata: String,
    pub approach_rate: f32,
    pub spawn_distance: f32,
    pub fade_length: f32,
    pub parallax: f32,
    pub ui_parallax: f32,
    pub grid_parallax: f32,
    pub fov: f32,
    pub camera_unlock: u8,
    pub edge_drift: f32,
    pub tail: Vec<u8>,
}

impl Default for ReplayFixture {
    fn default() -> Self {
        Self {
            format_version: 4,
            reserved: [0; 8],
            unique_id: "76561198000000001".to_string(),
            replay_id: "ss_archive_test_map".to_string(),
            metadata: "hbox:1.2;hitw:60;m_chaos;s:++".to_string(),
            approach_rate: 50.0,
            spawn_distance: 45.0,
            fade_length: 0.5,
            parallax: 1.0,
            ui_parallax: 0.25,
            grid_parallax: 0.0,
            fov: 70.0,
            camera_unlock: 1,
            edge_drift: 0.125,
            tail: (0..64u32).map(|i| (i * 7 % 256) as u8).collect(),
        }
    }
}

impl ReplayFixture {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&SIGNATURE);
        bytes.extend_from_slice(&self.format_version.to_le_bytes());
        bytes.extend_from_slice(&self.reserved);
        for line in [&self.unique_id, &self.replay_id, &self.metadata] {
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
        }
        for v in [
            self.approach_rate,
            self.spawn_distance,
            self.fade_length,
            self.parallax,
            self.ui_parallax,
            self.grid_parallax,
            self.fov,
        ] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.push(self.camera_unlock);
        bytes.extend_from_slice(&self.edge_drift.to_le_bytes());
        bytes.extend_from_slice(&self.tail);
        bytes
    }

    /// Offset of the first byte after `edge_drift`.
    pub fn tail_offset(&self) -> usize {
        4 + 2
            + 8
            + self.unique_id.len()
            + self.replay_id.len()
            + self.metadata.len()
            + 3
            + 7 * 4
            + 1
            + 4
    }
}
