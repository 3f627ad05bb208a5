use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use blitline::{Animation, FrameIndex, load_sheet, load_timeline};

#[derive(Parser, Debug)]
#[command(name = "blitline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a timeline and print its shape.
    Info(InfoArgs),
    /// Composite a single frame as a PNG.
    Frame(FrameArgs),
    /// Composite the whole cycle as a numbered PNG sequence.
    Render(RenderArgs),
    /// Re-encode the loop as an infinitely repeating GIF.
    Gif(GifArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input timeline (generated .js or bare .json).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Packed sprite sheet; when given, source rects are checked against it.
    #[arg(long)]
    sheet: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input timeline (generated .js or bare .json).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Packed sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input timeline (generated .js or bare .json).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Packed sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Output directory for frame_NNNN.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Input timeline (generated .js or bare .json).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Packed sprite sheet image.
    #[arg(long)]
    sheet: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Gif(args) => cmd_gif(args),
    }
}

fn load_animation(in_path: &Path, sheet_path: &Path) -> anyhow::Result<Animation> {
    let timeline = load_timeline(in_path)
        .with_context(|| format!("load timeline '{}'", in_path.display()))?;
    let sheet = load_sheet(sheet_path)
        .with_context(|| format!("load sheet '{}'", sheet_path.display()))?;
    Ok(Animation::new(timeline, sheet)?)
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path)
        .with_context(|| format!("load timeline '{}'", args.in_path.display()))?;
    timeline.validate()?;

    let surface = timeline.surface_size()?;
    let extent = timeline.sheet_extent()?;

    println!("frames:         {}", timeline.frame_count());
    println!("duration:       {} ms", timeline.total_duration_ms());
    println!("surface:        {}x{}", surface.width, surface.height);
    println!("sheet extent:   {}x{}", extent.width, extent.height);
    println!(
        "loop:           {}",
        if timeline.closes_loop() {
            "closed (last frame repeats first)"
        } else {
            "open"
        }
    );

    if let Some(sheet_path) = &args.sheet {
        let sheet = load_sheet(sheet_path)
            .with_context(|| format!("load sheet '{}'", sheet_path.display()))?;
        timeline.validate_against(sheet.size(), surface)?;
        println!("sheet:          {}x{} (all rects in bounds)", sheet.width, sheet.height);
    }

    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let anim = load_animation(&args.in_path, &args.sheet)?;
    let surface = blitline::render_frame(&anim, FrameIndex(args.index))?;
    blitline::export::write_frame_png(&surface, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let anim = load_animation(&args.in_path, &args.sheet)?;
    let written = blitline::export::export_png_sequence(&anim, &args.out_dir)?;
    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let anim = load_animation(&args.in_path, &args.sheet)?;
    blitline::export::encode_gif(&anim, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
