use std::path::PathBuf;

use serde_json::Value;
use sspre_core::ReplayDocument;
use sspre_render::{
    FieldSelection, render_json_full, render_json_selected, render_layout_json,
    render_layout_text, render_selected_pairs, render_text_sheet,
};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn sample_document() -> ReplayDocument {
    let path = workspace_root().join("tests/fixtures/sample.sspre");
    let bytes = std::fs::read(path).expect("fixture should be readable");
    sspre_core::decode(&bytes).expect("fixture should decode")
}

#[test]
fn full_json_uses_fixed_key_order() {
    let value = render_json_full(&sample_document());
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(
        keys,
        vec![
            "format_version",
            "unique_id",
            "replay_id",
            "metadata",
            "normalized_metadata",
            "approach_rate",
            "spawn_distance",
            "fade_length",
            "parallax",
            "hitbox",
            "hit_window",
            "ui_parallax",
            "grid_parallax",
            "fov",
            "camera_unlock",
            "edge_drift",
            "mods",
            "speed",
            "tail_len",
        ]
    );
}

#[test]
fn full_json_values_match_fixture() {
    let value = render_json_full(&sample_document());

    assert_eq!(value["format_version"], 4);
    assert_eq!(value["unique_id"], "76561198012345678");
    assert_eq!(value["approach_rate"], 48.0);
    assert_eq!(value["hitbox"], 1.25);
    assert_eq!(value["hit_window"], 62.0);
    assert_eq!(value["camera_unlock"], false);
    assert_eq!(value["mods"], serde_json::json!(["ghost"]));
    assert_eq!(value["speed"]["code"], "+");
    assert_eq!(value["speed"]["label"], "Speed + (1.15)");
    assert_eq!(value["tail_len"], 300);
}

#[test]
fn selected_json_only_contains_requested_fields() {
    let fields = FieldSelection {
        fov: true,
        mods: true,
        ..FieldSelection::default()
    };
    let value = render_json_selected(&sample_document(), &fields);
    let object = value.as_object().expect("json should be an object");

    assert_eq!(object.len(), 2);
    assert_eq!(value["fov"], 70.0);
}

#[test]
fn selected_pairs_follow_output_order() {
    let fields = FieldSelection {
        speed: true,
        unique_id: true,
        hit_window: true,
        ..FieldSelection::default()
    };
    let pairs = render_selected_pairs(&sample_document(), &fields);

    assert_eq!(
        pairs,
        vec![
            ("unique_id", "76561198012345678".to_string()),
            ("hit_window", "62.0".to_string()),
            ("speed", "Speed + (1.15) [+]".to_string()),
        ]
    );
}

#[test]
fn empty_selection_is_not_field_mode() {
    assert!(!FieldSelection::default().is_any_selected());
    assert!(FieldSelection::all().is_any_selected());
}

#[test]
fn pending_edits_show_up_in_rendered_output() {
    let mut document = sample_document();
    document.add_mod("chaos");
    document.set_speed("Speed --- (0.75)");

    let value = render_json_full(&document);
    assert_eq!(value["mods"], serde_json::json!(["ghost", "chaos"]));
    assert_eq!(value["speed"]["code"], "---");
    assert_eq!(value["metadata"], "m_ghost;hbox:1.25;s:+;hitw:62;pause");
    assert_eq!(
        value["normalized_metadata"],
        "hbox:1.25;hitw:62;pause;m_ghost;m_chaos;s:---"
    );
}

#[test]
fn text_sheet_shows_metadata_as_it_will_be_written() {
    let mut document = sample_document();
    document.remove_mod("ghost");
    let sheet = render_text_sheet(&document);

    assert!(sheet.contains("m_ghost;hbox:1.25;s:+;hitw:62;pause"));
    assert!(sheet.lines().any(|line| {
        line.trim_start().starts_with("Written as:")
            && line.ends_with(" hbox:1.25;hitw:62;pause;s:+")
    }));
}

#[test]
fn text_sheet_contains_sections_and_mod_names() {
    let sheet = render_text_sheet(&sample_document());

    assert!(sheet.contains("REPLAY"));
    assert!(sheet.contains("::: Settings :::"));
    assert!(sheet.contains("Approach Rate: 48.0"));
    assert!(sheet.contains("[x] Ghost"));
    assert!(sheet.contains("Speed + (1.15) [+]"));
    assert!(sheet.contains("300 bytes"));
}

#[test]
fn layout_json_reports_fields() {
    let document = sample_document();
    let value: Value = render_layout_json(document.layout());

    assert_eq!(value["validation_ok"], true);
    assert_eq!(value["file_len"], 424);
    let fields = value["fields"].as_array().expect("fields should be an array");
    assert_eq!(fields.len(), 16);
    assert_eq!(fields[0]["id"], "signature");
    assert_eq!(fields[15]["id"], "tail");
    assert_eq!(fields[15]["start"], 124);
}

#[test]
fn layout_text_has_a_row_per_field() {
    let document = sample_document();
    let text = render_layout_text(document.layout());

    assert_eq!(text.lines().count(), 1 + 16 + 1);
    assert!(text.contains("edge_drift"));
    assert!(text.ends_with("file length: 424\n"));
}
