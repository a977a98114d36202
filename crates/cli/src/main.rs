#![deny(unsafe_code)]
//! CLI binary for chipfield.
//!
//! Subcommands:
//! - `render` writes a chip field to PNG, optionally dumping its cells
//! - `inspect` reports the chip under a canvas point
//! - `transform` shows one color under a light
//! - `list` prints built-in palettes and lights

mod error;

use chipfield_core::contrast::{relative_luminance, text_color_for};
use chipfield_core::light::{self, STANDARD_LIGHTS};
use chipfield_core::{FieldSpec, HexColor, Palette, PhotometricEngine};
use chipfield_render::{CellHitTester, PixelBuffer, RenderContext, RenderPass};
use clap::{Args, Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "chipfield", about = "Seeded chip color-field generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Field selection shared by `render` and `inspect`.
///
/// Flags override values loaded from `--spec`.
#[derive(Args)]
struct FieldArgs {
    /// FieldSpec JSON file to start from.
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Canvas width in pixels [default: 512].
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Canvas height in pixels [default: 512].
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Cell density scale in [0.1, 4.0] [default: 1.0].
    #[arg(long)]
    scale: Option<f64>,

    /// PRNG seed for deterministic output [default: 42].
    #[arg(long)]
    seed: Option<u64>,

    /// Built-in palette name (terrazzo, confetti, speckle, monochrome)
    /// [default: terrazzo].
    #[arg(short, long)]
    palette: Option<String>,

    /// Light source id [default: natural].
    #[arg(short, long)]
    light: Option<String>,
}

impl FieldArgs {
    fn resolve(&self) -> Result<FieldSpec, CliError> {
        let mut spec = match &self.spec {
            Some(path) => load_spec(path)?,
            None => FieldSpec::new(512, 512, 42).with_palette(Palette::terrazzo()),
        };
        if let Some(width) = self.width {
            spec.width = width;
        }
        if let Some(height) = self.height {
            spec.height = height;
        }
        if let Some(scale) = self.scale {
            spec.scale = scale;
        }
        if let Some(seed) = self.seed {
            spec.seed = seed;
        }
        if let Some(name) = &self.palette {
            spec.palette = Palette::from_name(name)?;
        }
        if let Some(id) = &self.light {
            spec.light = id.clone();
        }
        Ok(spec)
    }
}

fn load_spec(path: &Path) -> Result<FieldSpec, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid spec {}: {e}", path.display())))
}

#[derive(Subcommand)]
enum Command {
    /// Render a chip field and write a PNG.
    Render {
        #[command(flatten)]
        field: FieldArgs,

        /// Output file path.
        #[arg(short, long, default_value = "chipfield.png")]
        output: PathBuf,

        /// Also write the rendered cells as JSON.
        #[arg(long)]
        cells: Option<PathBuf>,

        /// Integer upscale factor for the PNG.
        #[arg(long, default_value_t = 1)]
        upscale: u32,
    },
    /// Report the chip under a canvas point.
    Inspect {
        #[command(flatten)]
        field: FieldArgs,

        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,
    },
    /// Show a color as it appears under a light.
    Transform {
        /// Hex color, with or without '#'.
        hex: String,

        /// Light source id.
        #[arg(short, long, default_value = light::NATURAL_ID)]
        light: String,
    },
    /// List built-in palettes and light sources.
    List,
}

fn render_field(spec: &FieldSpec) -> Result<(PixelBuffer, RenderPass), CliError> {
    let mut ctx = RenderContext::new(spec)?;
    let mut buffer = PixelBuffer::new(spec.width, spec.height)?;
    let pass = ctx.render(&mut buffer)?;
    log::info!(
        "rendered {} cells ({}x{}, seed {})",
        pass.cells.len(),
        pass.width,
        pass.height,
        pass.seed
    );
    Ok((buffer, pass))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            if cli.json {
                let lights: Vec<_> = STANDARD_LIGHTS
                    .iter()
                    .map(|l| {
                        serde_json::json!({
                            "id": l.id,
                            "name": l.name,
                            "color_temperature": l.color_temperature,
                            "spectral_profile": l.spectral_profile.as_str(),
                        })
                    })
                    .collect();
                let info = serde_json::json!({
                    "palettes": palettes,
                    "lights": lights,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Lights:");
                for l in STANDARD_LIGHTS.iter() {
                    match l.color_temperature {
                        Some(k) => println!("  {:<14} {} ({k:.0} K)", l.id, l.name),
                        None => println!("  {:<14} {}", l.id, l.name),
                    }
                }
            }
        }
        Command::Transform { hex, light } => {
            let input = HexColor::parse(&hex)?;
            let source = light::resolve(&light)?;
            let out = PhotometricEngine::new().transform(&input, source);
            let luminance = relative_luminance(&out);
            let text = text_color_for(&out);
            if cli.json {
                let info = serde_json::json!({
                    "input": input,
                    "light": source.id,
                    "output": out,
                    "luminance": luminance,
                    "text_color": text,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{input} under {} -> {out}", source.name);
                println!("luminance {luminance:.4}, text {text}");
            }
        }
        Command::Render {
            field,
            output,
            cells,
            upscale,
        } => {
            let spec = field.resolve()?;
            let (buffer, pass) = render_field(&spec)?;

            chipfield_render::snapshot::write_png_scaled(&buffer, &output, upscale)?;
            if let Some(path) = &cells {
                fs::write(path, serde_json::to_string_pretty(&pass)?)?;
            }

            if cli.json {
                let info = serde_json::json!({
                    "spec": spec,
                    "cell_count": pass.cell_count,
                    "cells_drawn": pass.cells.len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} cells ({}x{}, scale {}, seed {}, light {}) -> {}",
                    pass.cells.len(),
                    spec.width,
                    spec.height,
                    spec.scale,
                    spec.seed,
                    spec.light,
                    output.display()
                );
            }
        }
        Command::Inspect { field, x, y } => {
            let spec = field.resolve()?;
            let (_, pass) = render_field(&spec)?;
            let hit = CellHitTester::new(&pass).hit(DVec2::new(x, y));

            match (&hit, cli.json) {
                (Some(h), true) => {
                    let info = serde_json::json!({
                        "hit": h,
                        "palette_hex": spec.palette.colors()[h.palette_index].hex,
                        "text_color": text_color_for(&h.color),
                    });
                    println!("{}", serde_json::to_string_pretty(&info)?);
                }
                (None, true) => println!("{}", serde_json::json!({ "hit": null })),
                (Some(h), false) => println!(
                    "cell {} palette #{} ({}) shown as {}, text {}",
                    h.cell,
                    h.palette_index,
                    spec.palette.colors()[h.palette_index].hex,
                    h.color,
                    text_color_for(&h.color)
                ),
                (None, false) => println!("no cell at ({x}, {y})"),
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
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
