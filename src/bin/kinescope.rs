use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kinescope", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the whole animation as a PNG sequence.
    Render(RenderArgs),
    /// Print the built-in demo scene as JSON.
    DumpDemo,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene JSON. Defaults to the built-in pendulum demo.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// TTF/OTF font for text. Without it, text is not drawn.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Text size in pixels.
    #[arg(long, default_value_t = 14.0)]
    font_size: f32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Simulation time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render the instant at `--time` only, without motion blur.
    #[arg(long, default_value_t = false)]
    no_blur: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::DumpDemo => cmd_dump_demo(),
    }
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<kinescope::Scene> {
    let def = match &args.scene {
        Some(path) => kinescope::SceneDef::from_path(path)?,
        None => kinescope::SceneDef::pendulum_demo(),
    };
    let mut scene = def.build().context("build scene")?;
    if let Some(font) = &args.font {
        let style = kinescope::TextStyle::from_path(font, args.font_size)?;
        scene.world.set_text_style(Some(style));
    }
    Ok(scene)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut scene = load_scene(&args.scene)?;

    let frame = if args.no_blur {
        scene.world.set_time(args.time)?;
        scene.world.get_frame()?
    } else {
        let blur = scene.blur;
        scene.world.render_blurred_frame(args.time, &blur)?
    };

    ensure_parent(&args.out)?;
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut scene = load_scene(&args.scene)?;
    let mut sink = kinescope::PngSequenceSink::new(&args.out_dir);
    let stats = scene.render(&mut sink)?;
    eprintln!(
        "wrote {} frames ({} samples) to {}",
        stats.frames,
        stats.samples,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_dump_demo() -> anyhow::Result<()> {
    let json = kinescope::SceneDef::pendulum_demo().to_json_pretty()?;
    println!("{json}");
    Ok(())
}
