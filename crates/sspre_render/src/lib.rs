use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use sspre_core::well_known_mods;
use sspre_core::{FileLayout, ReplayDocument, ReplaySnapshot};

const SHEET_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 18;
const LEFT_COL_WIDTH: usize = 30;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub format_version: bool,
    pub unique_id: bool,
    pub replay_id: bool,
    pub metadata: bool,
    pub normalized_metadata: bool,
    pub approach_rate: bool,
    pub spawn_distance: bool,
    pub fade_length: bool,
    pub parallax: bool,
    pub hitbox: bool,
    pub hit_window: bool,
    pub ui_parallax: bool,
    pub grid_parallax: bool,
    pub fov: bool,
    pub camera_unlock: bool,
    pub edge_drift: bool,
    pub mods: bool,
    pub speed: bool,
    pub tail_len: bool,
}

impl FieldSelection {
    /// Flags paired with their output keys, in output order.
    fn keyed(&self) -> [(&'static str, bool); 19] {
        [
            ("format_version", self.format_version),
            ("unique_id", self.unique_id),
            ("replay_id", self.replay_id),
            ("metadata", self.metadata),
            ("normalized_metadata", self.normalized_metadata),
            ("approach_rate", self.approach_rate),
            ("spawn_distance", self.spawn_distance),
            ("fade_length", self.fade_length),
            ("parallax", self.parallax),
            ("hitbox", self.hitbox),
            ("hit_window", self.hit_window),
            ("ui_parallax", self.ui_parallax),
            ("grid_parallax", self.grid_parallax),
            ("fov", self.fov),
            ("camera_unlock", self.camera_unlock),
            ("edge_drift", self.edge_drift),
            ("mods", self.mods),
            ("speed", self.speed),
            ("tail_len", self.tail_len),
        ]
    }

    pub fn all() -> Self {
        Self {
            format_version: true,
            unique_id: true,
            replay_id: true,
            metadata: true,
            normalized_metadata: true,
            approach_rate: true,
            spawn_distance: true,
            fade_length: true,
            parallax: true,
            hitbox: true,
            hit_window: true,
            ui_parallax: true,
            grid_parallax: true,
            fov: true,
            camera_unlock: true,
            edge_drift: true,
            mods: true,
            speed: true,
            tail_len: true,
        }
    }

    pub fn is_any_selected(&self) -> bool {
        self.keyed().iter().any(|&(_, selected)| selected)
    }
}

pub fn render_json_full(document: &ReplayDocument) -> JsonValue {
    render_json_selected(document, &FieldSelection::all())
}

pub fn render_json_selected(document: &ReplayDocument, fields: &FieldSelection) -> JsonValue {
    let snapshot = document.snapshot();
    let mut out = JsonMap::new();
    for (key, selected) in fields.keyed() {
        if selected {
            out.insert(key.to_string(), field_json(&snapshot, key));
        }
    }
    JsonValue::Object(out)
}

/// `key=value` pairs for the selected fields, in output order.
pub fn render_selected_pairs(
    document: &ReplayDocument,
    fields: &FieldSelection,
) -> Vec<(&'static str, String)> {
    let snapshot = document.snapshot();
    fields
        .keyed()
        .into_iter()
        .filter(|&(_, selected)| selected)
        .map(|(key, _)| (key, field_text(&snapshot, key)))
        .collect()
}

pub fn render_layout_json(layout: &FileLayout) -> JsonValue {
    let fields: Vec<JsonValue> = layout
        .fields
        .iter()
        .map(|field| {
            let mut entry = JsonMap::new();
            entry.insert("id".to_string(), JsonValue::from(field.id.as_str()));
            entry.insert("start".to_string(), JsonValue::from(field.range.start));
            entry.insert("end".to_string(), JsonValue::from(field.range.end));
            entry.insert("len".to_string(), JsonValue::from(field.range.len()));
            JsonValue::Object(entry)
        })
        .collect();

    let mut out = JsonMap::new();
    out.insert("file_len".to_string(), JsonValue::from(layout.file_len));
    out.insert(
        "validation_ok".to_string(),
        JsonValue::Bool(layout.validate().is_ok()),
    );
    out.insert("fields".to_string(), JsonValue::Array(fields));
    JsonValue::Object(out)
}

pub fn render_layout_text(layout: &FileLayout) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "{:<16} {:>8} {:>8} {:>8}",
        "field", "start", "end", "len"
    )
    .expect("writing to String cannot fail");
    for field in &layout.fields {
        writeln!(
            &mut out,
            "{:<16} {:>8} {:>8} {:>8}",
            field.id.as_str(),
            field.range.start,
            field.range.end,
            field.range.len()
        )
        .expect("writing to String cannot fail");
    }
    writeln!(&mut out, "file length: {}", layout.file_len).expect("writing to String cannot fail");
    out
}

pub fn render_text_sheet(document: &ReplayDocument) -> String {
    let s = document.snapshot();
    let mut out = String::new();

    writeln!(&mut out, "{}", centered("REPLAY", SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", "=".repeat(SHEET_WIDTH)).expect("writing to String cannot fail");
    write_row(&mut out, "Unique ID", &s.unique_id);
    write_row(&mut out, "Replay ID", &s.replay_id);
    write_row(&mut out, "Format version", &s.format_version.to_string());
    writeln!(&mut out).expect("writing to String cannot fail");

    writeln!(&mut out, " ::: Settings :::").expect("writing to String cannot fail");
    let pairs = [
        ("Approach Rate", format_f32(s.approach_rate), "UI Parallax", format_f32(s.ui_parallax)),
        ("Spawn Distance", format_f32(s.spawn_distance), "Grid Parallax", format_f32(s.grid_parallax)),
        ("Fade Length", format_f32(s.fade_length), "FOV", format_f32(s.fov)),
        ("Parallax", format_f32(s.parallax), "Edge Drift", format_f32(s.edge_drift)),
        ("Hitbox", format_f64(s.hitbox), "Hit Window", format_f64(s.hit_window)),
    ];
    for (left_label, left, right_label, right) in pairs {
        let left_col = format!("  {left_label}: {left}");
        writeln!(
            &mut out,
            "{:<width$}{right_label}: {right}",
            left_col,
            width = LEFT_COL_WIDTH
        )
        .expect("writing to String cannot fail");
    }
    write_row(
        &mut out,
        "Camera Unlock",
        if s.camera_unlock { "yes" } else { "no" },
    );
    write_row(&mut out, "Speed", &speed_text(&s));
    writeln!(&mut out).expect("writing to String cannot fail");

    writeln!(&mut out, " ::: Mods :::").expect("writing to String cannot fail");
    if s.mods.is_empty() {
        writeln!(&mut out, "  (none)").expect("writing to String cannot fail");
    }
    for name in &s.mods {
        let display = well_known_mods::display_name(name).unwrap_or(name.as_str());
        writeln!(&mut out, "  [x] {display}").expect("writing to String cannot fail");
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    write_row(&mut out, "Metadata", &s.metadata);
    if s.normalized_metadata != s.metadata {
        write_row(&mut out, "Written as", &s.normalized_metadata);
    }
    write_row(&mut out, "Tail", &format!("{} bytes", s.tail_len));
    out
}

fn write_row(out: &mut String, label: &str, value: &str) {
    let label = format!("{label}:");
    writeln!(out, "  {label:<LABEL_WIDTH$}{value}").expect("writing to String cannot fail");
}

fn field_json(s: &ReplaySnapshot, key: &str) -> JsonValue {
    match key {
        "format_version" => JsonValue::from(s.format_version),
        "unique_id" => JsonValue::from(s.unique_id.as_str()),
        "replay_id" => JsonValue::from(s.replay_id.as_str()),
        "metadata" => JsonValue::from(s.metadata.as_str()),
        "normalized_metadata" => JsonValue::from(s.normalized_metadata.as_str()),
        "approach_rate" => json_f32(s.approach_rate),
        "spawn_distance" => json_f32(s.spawn_distance),
        "fade_length" => json_f32(s.fade_length),
        "parallax" => json_f32(s.parallax),
        "hitbox" => json_f64(s.hitbox),
        "hit_window" => json_f64(s.hit_window),
        "ui_parallax" => json_f32(s.ui_parallax),
        "grid_parallax" => json_f32(s.grid_parallax),
        "fov" => json_f32(s.fov),
        "camera_unlock" => JsonValue::Bool(s.camera_unlock),
        "edge_drift" => json_f32(s.edge_drift),
        "mods" => JsonValue::Array(s.mods.iter().map(|m| JsonValue::from(m.as_str())).collect()),
        "speed" => {
            let mut speed = JsonMap::new();
            speed.insert(
                "code".to_string(),
                s.speed
                    .as_deref()
                    .map_or(JsonValue::Null, JsonValue::from),
            );
            speed.insert("label".to_string(), JsonValue::from(s.speed_label.as_str()));
            speed.insert("multiplier".to_string(), json_f64(s.speed_multiplier));
            JsonValue::Object(speed)
        }
        "tail_len" => JsonValue::from(s.tail_len),
        _ => JsonValue::Null,
    }
}

fn field_text(s: &ReplaySnapshot, key: &str) -> String {
    match key {
        "format_version" => s.format_version.to_string(),
        "unique_id" => s.unique_id.clone(),
        "replay_id" => s.replay_id.clone(),
        "metadata" => s.metadata.clone(),
        "normalized_metadata" => s.normalized_metadata.clone(),
        "approach_rate" => format_f32(s.approach_rate),
        "spawn_distance" => format_f32(s.spawn_distance),
        "fade_length" => format_f32(s.fade_length),
        "parallax" => format_f32(s.parallax),
        "hitbox" => format_f64(s.hitbox),
        "hit_window" => format_f64(s.hit_window),
        "ui_parallax" => format_f32(s.ui_parallax),
        "grid_parallax" => format_f32(s.grid_parallax),
        "fov" => format_f32(s.fov),
        "camera_unlock" => s.camera_unlock.to_string(),
        "edge_drift" => format_f32(s.edge_drift),
        "mods" => s.mods.join(","),
        "speed" => speed_text(s),
        "tail_len" => s.tail_len.to_string(),
        _ => String::new(),
    }
}

fn speed_text(s: &ReplaySnapshot) -> String {
    match &s.speed {
        Some(code) => format!("{} [{code}]", s.speed_label),
        None => s.speed_label.clone(),
    }
}

/// Shortest decimal form that reads back as the same `f32`, with a
/// trailing `.0` on whole numbers.
fn format_f32(value: f32) -> String {
    format!("{value:?}")
}

fn format_f64(value: f64) -> String {
    format!("{value:?}")
}

fn json_f32(value: f32) -> JsonValue {
    // Widening the f32 directly would print its binary expansion
    // (0.1 -> 0.10000000149011612); go through the short decimal form.
    format!("{value}")
        .parse::<f64>()
        .ok()
        .and_then(JsonNumber::from_f64)
        .map_or(JsonValue::Null, JsonValue::Number)
}

fn json_f64(value: f64) -> JsonValue {
    JsonNumber::from_f64(value).map_or(JsonValue::Null, JsonValue::Number)
}

fn centered(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), value)
}
