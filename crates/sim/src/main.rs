//! ArmView — dual-view visualizer for a 3-joint robot arm.
//!
//! Headless binary: applies pose updates, then writes the top and side views
//! as SVG files.
//!
//! Usage:
//!   armview                                   # default pose
//!   armview --position 200 50 120 --gripper open
//!   armview --config arm.toml --out-dir frames

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};

use armview_render::{DualViewRenderer, SvgCanvas};
use armview_sim::{CommandConsole, RobotVisualizer, ViewerConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GripperArg {
    Open,
    Closed,
}

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "armview")]
#[command(about = "Render top and side views of a robot arm pose")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = "armview.toml")]
    config: PathBuf,

    /// Directory for top.svg and side.svg
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Cartesian target in mm; repeat to apply several moves in order
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        action = ArgAction::Append
    )]
    position: Vec<f64>,

    /// Gripper state, applied after all moves
    #[arg(long, value_enum)]
    gripper: Option<GripperArg>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    log::debug!("armview v{}", env!("CARGO_PKG_VERSION"));

    let cfg = ViewerConfig::load(&args.config)?;
    let geometry = cfg.geometry().context("invalid arm geometry")?;
    let layout = cfg.layout();
    let renderer = DualViewRenderer::new(layout)
        .context("invalid view layout")?
        .with_palette(cfg.palette);
    let background = renderer.palette().background;

    let mut viz = RobotVisualizer::new(
        geometry,
        cfg.initial_pose(),
        renderer,
        CommandConsole::new(cfg.console.capacity),
    );

    for target in args.position.chunks_exact(3) {
        let (x, y, z) = (target[0], target[1], target[2]);
        viz.set_position(x, y, z);
        viz.log(&format!("Moved to X={:.1} Y={:.1} Z={:.1}", x, y, z));
    }

    if let Some(gripper) = args.gripper {
        let open = matches!(gripper, GripperArg::Open);
        viz.set_gripper(open);
        viz.log(if open { "Gripper opened" } else { "Gripper closed" });
    }

    let (top_w, top_h) = layout.top_size();
    let (side_w, side_h) = layout.side_size();
    let mut top = SvgCanvas::new(top_w, top_h, background);
    let mut side = SvgCanvas::new(side_w, side_h, background);
    viz.paint(&mut top, &mut side);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    write_svg(&args.out_dir.join("top.svg"), top.finish())?;
    write_svg(&args.out_dir.join("side.svg"), side.finish())?;

    let elbow = viz.frame().elbow;
    viz.log(&format!(
        "Rendered R={:.1} mm, elbow ({:.1}, {:.1}) [{:?}]",
        viz.frame().radial_distance,
        elbow.elbow_r(),
        elbow.elbow_z(),
        elbow.branch
    ));

    for line in viz.console().lines() {
        println!("{}", line);
    }
    Ok(())
}

fn write_svg(path: &Path, svg: String) -> Result<()> {
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
