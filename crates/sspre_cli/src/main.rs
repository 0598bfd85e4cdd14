use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use sspre_core::speed::label_to_code;
use sspre_core::{FILE_EXTENSION, ReplayDocument, SpeedCode, well_known_mods};
use sspre_render::{
    FieldSelection, render_json_full, render_json_selected, render_layout_json,
    render_layout_text, render_selected_pairs, render_text_sheet,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const CLEAR_SPEED: &str = "none";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "REPLAY.sspre")]
    path: PathBuf,
    #[arg(long = "format-version")]
    format_version: bool,
    #[arg(long = "unique-id")]
    unique_id: bool,
    #[arg(long = "replay-id")]
    replay_id: bool,
    #[arg(long)]
    metadata: bool,
    /// The metadata line as it will be written, with mod and speed edits applied.
    #[arg(long = "normalized-metadata")]
    normalized_metadata: bool,
    #[arg(long = "approach-rate")]
    approach_rate: bool,
    #[arg(long = "spawn-distance")]
    spawn_distance: bool,
    #[arg(long = "fade-length")]
    fade_length: bool,
    #[arg(long)]
    parallax: bool,
    #[arg(long)]
    hitbox: bool,
    #[arg(long = "hit-window")]
    hit_window: bool,
    #[arg(long = "ui-parallax")]
    ui_parallax: bool,
    #[arg(long = "grid-parallax")]
    grid_parallax: bool,
    #[arg(long)]
    fov: bool,
    #[arg(long = "camera-unlock")]
    camera_unlock: bool,
    #[arg(long = "edge-drift")]
    edge_drift: bool,
    #[arg(long)]
    mods: bool,
    #[arg(long)]
    speed: bool,
    #[arg(long = "tail-len")]
    tail_len: bool,
    #[arg(long)]
    json: bool,
    /// Print the byte range of every field in the input file.
    #[arg(long, conflicts_with = "output")]
    layout: bool,
    /// Log decoded field values and edits to stderr.
    #[arg(long)]
    debug: bool,
    #[arg(long = "set-approach-rate", allow_hyphen_values = true)]
    set_approach_rate: Option<f32>,
    #[arg(long = "set-spawn-distance", allow_hyphen_values = true)]
    set_spawn_distance: Option<f32>,
    #[arg(long = "set-fade-length", allow_hyphen_values = true)]
    set_fade_length: Option<f32>,
    #[arg(long = "set-parallax", allow_hyphen_values = true)]
    set_parallax: Option<f32>,
    #[arg(long = "set-ui-parallax", allow_hyphen_values = true)]
    set_ui_parallax: Option<f32>,
    #[arg(long = "set-grid-parallax", allow_hyphen_values = true)]
    set_grid_parallax: Option<f32>,
    #[arg(long = "set-fov", allow_hyphen_values = true)]
    set_fov: Option<f32>,
    #[arg(long = "set-edge-drift", allow_hyphen_values = true)]
    set_edge_drift: Option<f32>,
    #[arg(long = "set-camera-unlock", value_name = "true|false")]
    set_camera_unlock: Option<bool>,
    /// Speed label (e.g. "Speed ++ (1.25)"), code (e.g. "++") or "none".
    #[arg(long = "set-speed", value_name = "LABEL|CODE|none", allow_hyphen_values = true)]
    set_speed: Option<String>,
    #[arg(long = "add-mod", value_name = "NAME")]
    add_mod: Vec<String>,
    #[arg(long = "remove-mod", value_name = "NAME")]
    remove_mod: Vec<String>,
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn field_selection(&self) -> FieldSelection {
        FieldSelection {
            format_version: self.format_version,
            unique_id: self.unique_id,
            replay_id: self.replay_id,
            metadata: self.metadata,
            normalized_metadata: self.normalized_metadata,
            approach_rate: self.approach_rate,
            spawn_distance: self.spawn_distance,
            fade_length: self.fade_length,
            parallax: self.parallax,
            hitbox: self.hitbox,
            hit_window: self.hit_window,
            ui_parallax: self.ui_parallax,
            grid_parallax: self.grid_parallax,
            fov: self.fov,
            camera_unlock: self.camera_unlock,
            edge_drift: self.edge_drift,
            mods: self.mods,
            speed: self.speed,
            tail_len: self.tail_len,
        }
    }

    fn has_edits(&self) -> bool {
        self.set_approach_rate.is_some()
            || self.set_spawn_distance.is_some()
            || self.set_fade_length.is_some()
            || self.set_parallax.is_some()
            || self.set_ui_parallax.is_some()
            || self.set_grid_parallax.is_some()
            || self.set_fov.is_some()
            || self.set_edge_drift.is_some()
            || self.set_camera_unlock.is_some()
            || self.set_speed.is_some()
            || !self.add_mod.is_empty()
            || !self.remove_mod.is_empty()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let fields = cli.field_selection();
    let has_edits = cli.has_edits();

    if has_edits && cli.output.is_none() {
        eprintln!("--set-*, --add-mod and --remove-mod require --output <PATH>");
        process::exit(2);
    }
    if !has_edits && cli.output.is_some() {
        eprintln!("--output requires at least one edit flag");
        process::exit(2);
    }

    // Resolve before touching the file so a bad value is a usage error.
    let speed_edit = cli.set_speed.as_deref().map(|value| {
        parse_speed_arg(value).unwrap_or_else(|message| {
            eprintln!("{message}");
            process::exit(2);
        })
    });

    warn_on_unexpected_extension(&cli.path);
    let mut document = sspre_core::decode_path(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading replay file: {}", cli.path.display());
        eprintln!("  {e}");
        process::exit(1);
    });

    if cli.layout {
        if cli.json {
            print_json(&render_layout_json(document.layout()));
        } else {
            print!("{}", render_layout_text(document.layout()));
        }
        return;
    }

    if let Some(out_path) = cli.output.as_ref() {
        apply_edits(&cli, speed_edit, &mut document);
        sspre_core::encode_to_path(&document, out_path).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", out_path.display());
            process::exit(1);
        });
    }

    if cli.json {
        let json = if fields.is_any_selected() {
            render_json_selected(&document, &fields)
        } else {
            render_json_full(&document)
        };
        print_json(&json);
        return;
    }

    if fields.is_any_selected() {
        for (key, value) in render_selected_pairs(&document, &fields) {
            println!("{key}={value}");
        }
        return;
    }

    if let Some(out_path) = cli.output.as_ref() {
        println!("Wrote edited replay to {}", out_path.display());
        return;
    }

    print!("{}", render_text_sheet(&document));
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn warn_on_unexpected_extension(path: &Path) {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION));
    if !matches {
        warn!(path = %path.display(), "file does not have a .{FILE_EXTENSION} extension");
    }
}

/// Accepts a table label, a known code, or `none` to clear the speed.
fn parse_speed_arg(value: &str) -> Result<Option<SpeedCode>, String> {
    if value.eq_ignore_ascii_case(CLEAR_SPEED) {
        return Ok(None);
    }
    if let Some(code) = label_to_code(value) {
        return Ok(Some(SpeedCode::from_code(code)));
    }
    let code = SpeedCode::from_code(value);
    if code.is_known() {
        return Ok(Some(code));
    }
    Err(format!(
        "unknown speed {value:?}: expected a label such as \"Speed + (1.15)\", a code (=, ---, --, -, +, ++, +++, ++++) or \"{CLEAR_SPEED}\""
    ))
}

fn apply_edits(cli: &Cli, speed_edit: Option<Option<SpeedCode>>, document: &mut ReplayDocument) {
    if let Some(v) = cli.set_approach_rate {
        document.set_approach_rate(v);
    }
    if let Some(v) = cli.set_spawn_distance {
        document.set_spawn_distance(v);
    }
    if let Some(v) = cli.set_fade_length {
        document.set_fade_length(v);
    }
    if let Some(v) = cli.set_parallax {
        document.set_parallax(v);
    }
    if let Some(v) = cli.set_ui_parallax {
        document.set_ui_parallax(v);
    }
    if let Some(v) = cli.set_grid_parallax {
        document.set_grid_parallax(v);
    }
    if let Some(v) = cli.set_fov {
        document.set_fov(v);
    }
    if let Some(v) = cli.set_edge_drift {
        document.set_edge_drift(v);
    }
    if let Some(v) = cli.set_camera_unlock {
        document.set_camera_unlock(v);
    }
    if let Some(code) = speed_edit {
        document.set_speed_code(code);
    }
    for name in &cli.remove_mod {
        if !document.remove_mod(name) {
            debug!(name = %name, "mod not present, nothing to remove");
        }
    }
    for name in &cli.add_mod {
        if !well_known_mods::is_well_known(name) {
            let known: Vec<&str> = well_known_mods::names().collect();
            warn!(
                name = %name,
                known = %known.join(", "),
                "adding a mod that is not one of the well-known toggles"
            );
        }
        if !document.add_mod(name) {
            debug!(name = %name, "mod already present");
        }
    }
}

fn print_json(value: &serde_json::Value) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}
