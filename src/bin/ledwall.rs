use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ledwall", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one image onto the canvas and deliver it once.
    Show(ShowArgs),
    /// Loop a directory of images with transitions between them.
    Play(PlayArgs),
    /// Fade the whole canvas from one color to another.
    Fade(FadeArgs),
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Canvas configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Input image (PNG or JPEG), placed at the top-left corner of the canvas.
    #[arg(long)]
    image: PathBuf,

    /// Output directory; each device writes PNGs under `device-<i>/`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Canvas configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Directory of images, played in file name order.
    #[arg(long)]
    frames: PathBuf,

    /// Output directory; each device writes PNGs under `device-<i>/`.
    #[arg(long)]
    out: PathBuf,

    /// Passes over the images; negative loops until interrupted.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    loops: i32,

    /// Shuffle the images on every pass.
    #[arg(long)]
    random: bool,

    #[arg(long, value_enum, default_value_t = TransitionChoice::Fade)]
    transition: TransitionChoice,

    /// Drawn per transition when omitted.
    #[arg(long, value_enum)]
    direction: Option<DirectionChoice>,

    /// Drawn per transition when omitted.
    #[arg(long, value_enum)]
    blend: Option<BlendChoice>,

    /// Transition length; defaults to the configuration.
    #[arg(long)]
    transition_ms: Option<u64>,

    /// Hold per image; defaults to the configuration.
    #[arg(long)]
    hold_ms: Option<u64>,
}

#[derive(Parser, Debug)]
struct FadeArgs {
    /// Canvas configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Start color, e.g. `#000000`.
    #[arg(long)]
    from: String,

    /// Target color, e.g. `#ff8000`.
    #[arg(long)]
    to: String,

    #[arg(long, default_value_t = 1000)]
    duration_ms: u64,

    /// Output directory; each device writes PNGs under `device-<i>/`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TransitionChoice {
    Straight,
    Fade,
    Wipe,
    CurtainOpen,
    CurtainClose,
    Disc,
    Random,
}

impl From<TransitionChoice> for ledwall::TransitionType {
    fn from(choice: TransitionChoice) -> Self {
        match choice {
            TransitionChoice::Straight => Self::Straight,
            TransitionChoice::Fade => Self::Fade,
            TransitionChoice::Wipe => Self::Wipe,
            TransitionChoice::CurtainOpen => Self::CurtainOpen,
            TransitionChoice::CurtainClose => Self::CurtainClose,
            TransitionChoice::Disc => Self::Disc,
            TransitionChoice::Random => Self::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    LeftRight,
    RightLeft,
    UpDown,
    DownUp,
    DiagonalFromTopLeft,
    DiagonalFromTopRight,
    DiagonalFromBottomLeft,
    DiagonalFromBottomRight,
    Horizontal,
    Vertical,
    InOut,
    OutIn,
}

impl From<DirectionChoice> for ledwall::TransitionDirection {
    fn from(choice: DirectionChoice) -> Self {
        match choice {
            DirectionChoice::LeftRight => Self::LeftRight,
            DirectionChoice::RightLeft => Self::RightLeft,
            DirectionChoice::UpDown => Self::UpDown,
            DirectionChoice::DownUp => Self::DownUp,
            DirectionChoice::DiagonalFromTopLeft => Self::DiagonalFromTopLeft,
            DirectionChoice::DiagonalFromTopRight => Self::DiagonalFromTopRight,
            DirectionChoice::DiagonalFromBottomLeft => Self::DiagonalFromBottomLeft,
            DirectionChoice::DiagonalFromBottomRight => Self::DiagonalFromBottomRight,
            DirectionChoice::Horizontal => Self::Horizontal,
            DirectionChoice::Vertical => Self::Vertical,
            DirectionChoice::InOut => Self::InOut,
            DirectionChoice::OutIn => Self::OutIn,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlendChoice {
    Replace,
    Average,
    Add,
    Subtract,
}

impl From<BlendChoice> for ledwall::BlendMode {
    fn from(choice: BlendChoice) -> Self {
        match choice {
            BlendChoice::Replace => Self::Replace,
            BlendChoice::Average => Self::Average,
            BlendChoice::Add => Self::Add,
            BlendChoice::Subtract => Self::Subtract,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Show(args) => cmd_show(args),
        Command::Play(args) => cmd_play(args),
        Command::Fade(args) => cmd_fade(args),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_config(path: &Path) -> anyhow::Result<ledwall::AppConfig> {
    Ok(ledwall::AppConfig::from_path(path)
        .with_context(|| format!("load configuration '{}'", path.display()))?)
}

/// One `PngSink` per device under `out/device-<i>/`, in device index order.
fn png_array(config: &ledwall::AppConfig, out: &Path) -> anyhow::Result<ledwall::Array> {
    let mut index = 0usize;
    let array = ledwall::Array::new(&config.canvas, |spec| {
        let dir = out.join(format!("device-{index}"));
        index += 1;
        let sink: Box<dyn ledwall::DeviceSink> =
            Box::new(ledwall::PngSink::new(dir, spec.width, spec.height, spec.encoding));
        Ok(sink)
    })?;
    Ok(array)
}

/// Load an image and place it on a black canvas-sized frame; overflow is clipped.
fn canvas_frame(array: &ledwall::Array, path: &Path) -> anyhow::Result<ledwall::Frame> {
    let layout = ledwall::ColorLayout::Rgb;
    let image = ledwall::load_frame(path, layout)?;
    let mut frame = array.blank_frame(layout);
    frame.replace_sub_frame(&image, 0, 0, ledwall::BlendMode::Replace)?;
    Ok(frame)
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let array = png_array(&config, &args.out)?;
    let frame = canvas_frame(&array, &args.image)?;

    array
        .show_realtime_frame(&frame)?
        .into_result()
        .with_context(|| format!("deliver '{}'", args.image.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let array = png_array(&config, &args.out)?;

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&args.frames)
        .with_context(|| format!("read frames dir '{}'", args.frames.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        })
        .collect();
    paths.sort();
    if paths.is_empty() {
        anyhow::bail!("no images found in '{}'", args.frames.display());
    }

    let hold = args
        .hold_ms
        .map_or(config.playback.default_hold(), Duration::from_millis);
    let mut sequence = ledwall::Sequence::new(hold);
    for path in &paths {
        sequence.push(canvas_frame(&array, path)?);
    }

    let mut options = ledwall::PlayOptions::from_defaults(&config.playback);
    options.loops = ledwall::LoopCount::from(args.loops);
    options.random = args.random;
    options.transition = args.transition.into();
    options.direction = args.direction.map(Into::into);
    options.blend = args.blend.map(Into::into);
    if let Some(ms) = args.transition_ms {
        options.transition_duration = Duration::from_millis(ms);
    }

    let player = ledwall::Player::new(sequence, options);
    let report = player.play(&array)?;

    eprintln!(
        "played {} item(s) over {} pass(es) with {} transition(s)",
        report.items_shown, report.passes, report.transitions
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fade(args: FadeArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let array = png_array(&config, &args.out)?;

    let from: ledwall::Color = args
        .from
        .parse()
        .with_context(|| format!("parse --from '{}'", args.from))?;
    let to: ledwall::Color = args
        .to
        .parse()
        .with_context(|| format!("parse --to '{}'", args.to))?;

    let timing = ledwall::FadeTiming::new(Duration::from_millis(args.duration_ms))
        .with_frame_time(config.playback.frame_time());
    ledwall::fade(&from, &to, &array, &timing, None)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
