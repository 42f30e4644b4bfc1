#![deny(unsafe_code)]
//! CLI binary for the spinning-squares renderer.
//!
//! Subcommands:
//! - `render`: render every frame of a scene into a directory
//! - `frame <index>`: render one frame to a PNG file
//! - `list`: print available animation fields

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use spinning_squares_core::color::to_hex;
use spinning_squares_core::{AnimationField, Scene};
use spinning_squares_render::sequence::{prepare_output_dir, FrameReport, Sequence};
use spinning_squares_render::FieldKind;
use std::path::{Path, PathBuf};
use std::process;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "spinning-squares",
    about = "Render animated grids of rotating squares with exact anti-aliasing"
)]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Scene source: a JSON file, flags, or both (flags win).
#[derive(Args, Debug, Default)]
struct SceneArgs {
    /// Scene description as a JSON file.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Canvas height in pixels.
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Number of frames.
    #[arg(long)]
    frames: Option<usize>,

    /// Frames per second; frame i is rendered at t = i / fps.
    #[arg(long)]
    fps: Option<f64>,

    /// Side length of each square in pixels.
    #[arg(long)]
    size: Option<f64>,

    /// Animation field name (see `list`).
    #[arg(long)]
    field: Option<String>,

    /// Field parameters as a JSON string.
    #[arg(long)]
    params: Option<String>,

    /// Background color as "#rrggbb".
    #[arg(long)]
    background: Option<String>,
}

impl SceneArgs {
    /// Loads the scene file (or defaults) and applies flag overrides.
    fn resolve(self) -> Result<Scene, CliError> {
        let mut scene = match &self.scene {
            Some(path) => load_scene(path)?,
            None => Scene::default(),
        };
        if let Some(width) = self.width {
            scene.width = width;
        }
        if let Some(height) = self.height {
            scene.height = height;
        }
        if let Some(frames) = self.frames {
            scene.frames = frames;
        }
        if let Some(fps) = self.fps {
            scene.fps = fps;
        }
        if let Some(size) = self.size {
            scene.square_size = size;
        }
        if let Some(field) = self.field {
            scene.field = field;
        }
        if let Some(params) = self.params {
            scene.params = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        }
        if let Some(background) = self.background {
            scene.background = background;
        }
        Ok(scene)
    }
}

fn load_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid scene file {}: {e}", path.display())))
}

#[derive(Subcommand)]
enum Command {
    /// Render every frame of a scene as numbered PNGs.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output directory.
        #[arg(short, long, default_value = "out")]
        out: PathBuf,

        /// Delete files already in the output directory first.
        #[arg(long)]
        clear: bool,
    },
    /// Render a single frame to a PNG file.
    Frame {
        /// Frame index (time is index / fps).
        index: usize,

        #[command(flatten)]
        scene: SceneArgs,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// List available animation fields and their parameters.
    List,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `--json` summary of a finished `render`.
fn render_summary(sequence: &Sequence, reports: &[FrameReport], out: &Path) -> serde_json::Value {
    let scene = sequence.scene();
    serde_json::json!({
        "field": sequence.field().name(),
        "params": sequence.field().params(),
        "width": scene.width,
        "height": scene.height,
        "frames": reports.len(),
        "fps": scene.fps,
        "background": to_hex(sequence.mapper().background()),
        "degenerate": reports.iter().map(|r| r.stats.degenerate).sum::<usize>(),
        "out": out.display().to_string(),
    })
}

/// `--json` summary of a finished `frame`.
fn frame_summary(sequence: &Sequence, report: &FrameReport) -> serde_json::Value {
    serde_json::json!({
        "index": report.index,
        "time": report.time,
        "field": sequence.field().name(),
        "background": to_hex(sequence.mapper().background()),
        "squares": report.stats.squares,
        "pixels": report.stats.pixels,
        "degenerate": report.stats.degenerate,
        "output": report.path.display().to_string(),
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let fields = FieldKind::list_fields();
            if cli.json {
                let square_size = Scene::default().square_size;
                let schemas: serde_json::Map<String, serde_json::Value> = fields
                    .iter()
                    .map(|&name| {
                        let field = FieldKind::from_name(name, square_size, &serde_json::json!({}))?;
                        Ok((name.to_string(), field.param_schema()))
                    })
                    .collect::<Result<_, CliError>>()?;
                let info = serde_json::json!({ "fields": schemas });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fields:");
                for name in fields {
                    println!("  {name}");
                }
            }
        }
        Command::Render { scene, out, clear } => {
            let scene = scene.resolve()?;
            let mut sequence = Sequence::new(scene)?;
            prepare_output_dir(&out, clear)?;

            let total = sequence.frame_count();
            let json = cli.json;
            let reports = sequence.render_all(&out, |report| {
                if !json {
                    eprintln!("Frame {}/{}...", report.index + 1, total);
                }
            })?;

            if cli.json {
                let info = render_summary(&sequence, &reports, &out);
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} frames ({}x{}) -> {}",
                    reports.len(),
                    sequence.scene().width,
                    sequence.scene().height,
                    out.display()
                );
            }
        }
        Command::Frame {
            index,
            scene,
            output,
        } => {
            let scene = scene.resolve()?;
            let mut sequence = Sequence::new(scene)?;
            let report = sequence.write_frame_to(index, &output)?;

            if cli.json {
                let info = frame_summary(&sequence, &report);
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered frame {} (t = {:.3}s) -> {}",
                    report.index,
                    report.time,
                    report.path.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
