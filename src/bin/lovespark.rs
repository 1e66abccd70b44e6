use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lovespark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence into a directory.
    Frames(SequenceArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(VideoArgs),
    /// Print the effective scene configuration as JSON.
    Config(SceneArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene JSON; defaults are used for anything it omits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical surface width.
    #[arg(long)]
    width: Option<u32>,

    /// Logical surface height.
    #[arg(long)]
    height: Option<u32>,

    /// Device pixel ratio.
    #[arg(long)]
    dpr: Option<f64>,

    /// Seed for digits and glitches.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames; defaults to the scene's `frames`.
    #[arg(long)]
    count: Option<u64>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct VideoArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames; defaults to the scene's `frames`.
    #[arg(long)]
    count: Option<u64>,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<lovespark::SceneConfig> {
    let mut scene = match &args.config {
        Some(path) => lovespark::SceneConfig::from_path(path)
            .with_context(|| format!("load scene '{}'", path.display()))?,
        None => lovespark::SceneConfig::default(),
    };
    if let Some(w) = args.width {
        scene.surface.width = w;
    }
    if let Some(h) = args.height {
        scene.surface.height = h;
    }
    if let Some(dpr) = args.dpr {
        scene.surface.device_pixel_ratio = dpr;
    }
    if let Some(seed) = args.seed {
        scene.spiral.seed = seed;
    }
    scene.validate()?;
    Ok(scene)
}

fn frame_range(count: u64) -> anyhow::Result<lovespark::FrameRange> {
    Ok(lovespark::FrameRange::new(
        lovespark::FrameIndex(0),
        lovespark::FrameIndex(count),
    )?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let mut session = lovespark::RenderSession::new(&scene)?;
    let frame = session.render_frame(lovespark::FrameIndex(args.frame));

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    lovespark::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: SequenceArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let mut session = lovespark::RenderSession::new(&scene)?;
    let mut sink = lovespark::PngSequenceSink::new(&args.out_dir);
    let stats = session.render_range(frame_range(args.count.unwrap_or(scene.frames))?, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_total,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: VideoArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let mut session = lovespark::RenderSession::new(&scene)?;
    anyhow::ensure!(
        lovespark::is_ffmpeg_on_path(),
        "`render` needs ffmpeg on PATH; use `frames` for a PNG sequence instead"
    );
    let mut sink = lovespark::FfmpegSink::new(&args.out);
    session.render_range(frame_range(args.count.unwrap_or(scene.frames))?, &mut sink)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_config(args: SceneArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args)?;
    println!("{}", scene.to_json_pretty()?);
    Ok(())
}
