use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use spritemover::{
    AnimatorState, ExtractOptions, FrameEncoding, FrameExtractor, GridGeometry, PixelFormat,
    ProgressCallback, ProgressInfo, SourceImage, SpriteAnimator, SpriteError, Ticker,
    geometry::{DEFAULT_FRAME_COUNT, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH},
    scheduler::{DEFAULT_FPS, clamp_fps},
};

const CLI_AFTER_HELP: &str = "Examples:\n  spritemover expected --frames 8 --width 64 --height 64\n  spritemover check walk.png --frames 8 --width 64 --height 64 --json\n  spritemover play walk.png --frames 8 --width 64 --height 64 --fps 12 --duration 5\n  spritemover completions zsh > _spritemover";

#[derive(Debug, Parser)]
#[command(
    name = "spritemover",
    version,
    about = "Check sprite sheet dimensions and preview their animation",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Report extraction progress.
    #[arg(long, global = true)]
    progress: bool,

    /// Frame pixel format (rgba8, rgb8, gray8).
    #[arg(long, global = true)]
    pixel_format: Option<String>,

    /// Encoded frame format (png, bmp, tiff).
    #[arg(long, global = true)]
    encoding: Option<String>,

    /// Desired worker thread count for parallel extraction.
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Sprite sheet layout. Values outside the permitted bounds are clamped.
#[derive(Debug, Args, Clone)]
struct GeometryArgs {
    /// Number of frames in the sheet (1-30).
    #[arg(long, default_value_t = DEFAULT_FRAME_COUNT)]
    frames: u32,
    /// Width of one frame in pixels (16-2048).
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
    width: u32,
    /// Height of one frame in pixels (16-2048).
    #[arg(long, default_value_t = DEFAULT_FRAME_HEIGHT)]
    height: u32,
}

impl GeometryArgs {
    fn geometry(&self) -> GridGeometry {
        GridGeometry::clamped(self.frames, self.width, self.height)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the sheet size a geometry expects.
    #[command(
        about = "Print expected sprite sheet dimensions",
        after_help = "Examples:\n  spritemover expected\n  spritemover expected --frames 8 --width 64 --height 64"
    )]
    Expected {
        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Validate a sprite sheet against a geometry and slice it.
    #[command(
        about = "Validate and slice a sprite sheet",
        visible_alias = "validate",
        after_help = "Examples:\n  spritemover check walk.png --frames 8 --width 64 --height 64\n  spritemover check walk.png --json"
    )]
    Check {
        /// Sprite sheet image path.
        input: PathBuf,
        #[command(flatten)]
        geometry: GeometryArgs,
        /// Output the report as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Play a sprite sheet's frames in a loop.
    #[command(
        about = "Preview sprite sheet animation",
        after_help = "Examples:\n  spritemover play walk.png --frames 8 --width 64 --height 64 --fps 12\n  spritemover play walk.png --duration 00:00:10 --tick-ms 33"
    )]
    Play {
        /// Sprite sheet image path.
        input: PathBuf,
        #[command(flatten)]
        geometry: GeometryArgs,
        /// Playback rate in frames per second (1-30).
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: u32,
        /// How long to play, in seconds or [HH:]MM:SS.
        #[arg(long, default_value = "5")]
        duration: String,
        /// Tick period in milliseconds.
        #[arg(long, default_value_t = 16)]
        tick_ms: u64,
        /// Output a summary as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_pixel_format(value: &str) -> Option<PixelFormat> {
    match value.to_ascii_lowercase().as_str() {
        "rgba8" | "rgba" => Some(PixelFormat::Rgba8),
        "rgb8" | "rgb" => Some(PixelFormat::Rgb8),
        "gray8" | "gray" | "greyscale" | "grayscale" => Some(PixelFormat::Gray8),
        _ => None,
    }
}

fn parse_encoding(value: &str) -> Option<FrameEncoding> {
    match value.to_ascii_lowercase().as_str() {
        "png" => Some(FrameEncoding::Png),
        "bmp" => Some(FrameEncoding::Bmp),
        "tiff" | "tif" => Some(FrameEncoding::Tiff),
        _ => None,
    }
}

fn parse_timecode(value: &str) -> Result<Duration, Box<dyn std::error::Error>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("time value cannot be empty".into());
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        return seconds_to_duration(seconds, trimmed);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(format!("invalid time format: {trimmed}").into());
    }

    let (hours, minutes, seconds_str) = if parts.len() == 3 {
        (parts[0].parse::<u64>()?, parts[1].parse::<u64>()?, parts[2])
    } else {
        (0_u64, parts[0].parse::<u64>()?, parts[1])
    };

    let seconds = seconds_str.parse::<f64>()?;
    let total_seconds = (hours as f64 * 3600.0) + (minutes as f64 * 60.0) + seconds;
    seconds_to_duration(total_seconds, trimmed)
}

fn seconds_to_duration(seconds: f64, input: &str) -> Result<Duration, Box<dyn std::error::Error>> {
    if !seconds.is_finite() {
        return Err(format!("time value must be finite: {input}").into());
    }
    Duration::try_from_secs_f64(seconds.max(0.0))
        .map_err(|error| format!("time value out of range: {input} ({error})").into())
}

fn base_extract_options(
    global: &GlobalOptions,
) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new();

    if let Some(pixel_str) = &global.pixel_format {
        let pixel = parse_pixel_format(pixel_str)
            .ok_or(format!("unsupported --pixel-format: {pixel_str}"))?;
        options = options.with_pixel_format(pixel);
    }

    if let Some(encoding_str) = &global.encoding {
        let encoding = parse_encoding(encoding_str)
            .ok_or(format!("unsupported --encoding: {encoding_str}"))?;
        options = options.with_encoding(encoding);
    }

    if global.progress {
        options = options.with_progress(Arc::new(TerminalProgress::new()));
    }

    Ok(options)
}

fn apply_global_options(global: &GlobalOptions) {
    let default_filter = if global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Some(threads) = global.threads {
        if threads > 0 {
            unsafe {
                std::env::set_var("RAYON_NUM_THREADS", threads.to_string());
            }
        }
    }

    #[cfg(not(feature = "rayon"))]
    if global.threads.is_some() {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            "--threads requires building with the `rayon` feature".yellow()
        );
    }
}

#[derive(Default)]
struct TerminalProgress;

impl TerminalProgress {
    fn new() -> Self {
        Self
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        eprintln!(
            "{} {}/{}",
            "progress".cyan().bold(),
            info.current,
            info.total
        );
    }
}

fn mismatch_hint(geometry: &GridGeometry) -> String {
    format!(
        "Arrange {} frames of {}x{}px side by side in a single row",
        geometry.frame_count(),
        geometry.frame_width(),
        geometry.frame_height(),
    )
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    apply_global_options(&cli.global);

    match cli.command {
        Commands::Expected { geometry } => {
            let geometry = geometry.geometry();
            let (width, height) = geometry.expected_dimensions();
            println!("Expected sprite sheet dimensions: {width}x{height}px");
            println!("{geometry}");
            println!(
                "Godot: import as Texture, AnimatedSprite H-frames = {}, V-frames = 1",
                geometry.frame_count()
            );
        }
        Commands::Check {
            input,
            geometry,
            json,
        } => {
            let geometry = geometry.geometry();
            let options = base_extract_options(&cli.global)?;
            let source = SourceImage::open(&input)?;
            let (actual_width, actual_height) = source.dimensions();
            let (expected_width, expected_height) = geometry.expected_dimensions();

            let extractor = FrameExtractor::new(geometry);
            #[cfg(feature = "rayon")]
            let result = extractor.extract_parallel(source.image(), &options);
            #[cfg(not(feature = "rayon"))]
            let result = extractor.extract_with_options(source.image(), &options);

            let frames = match result {
                Ok(frames) => Some(frames),
                Err(SpriteError::GeometryMismatch { .. }) => None,
                Err(error) => return Err(error.into()),
            };

            if json {
                let payload = json!({
                    "file": source.file_name(),
                    "valid": frames.is_some(),
                    "expected": { "width": expected_width, "height": expected_height },
                    "actual": { "width": actual_width, "height": actual_height },
                    "frame_count": geometry.frame_count(),
                    "frame_width": geometry.frame_width(),
                    "frame_height": geometry.frame_height(),
                    "frames": frames.as_ref().map(|frames| frames.iter().map(|frame| json!({
                        "index": frame.index(),
                        "width": frame.width(),
                        "height": frame.height(),
                        "encoding": frame.encoding().mime_type(),
                        "bytes": frame.encoded().len(),
                    })).collect::<Vec<_>>()),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else if let Some(frames) = &frames {
                for frame in frames {
                    println!(
                        "Frame {}: {}x{} [{} bytes {}]",
                        frame.index(),
                        frame.width(),
                        frame.height(),
                        frame.encoded().len(),
                        frame.encoding(),
                    );
                }
                println!(
                    "{} {}",
                    "success:".green().bold(),
                    format!(
                        "{} is {actual_width}x{actual_height}px, sliced into {} frames",
                        input.display(),
                        frames.len()
                    )
                    .green()
                );
            }

            if frames.is_none() {
                if !json {
                    eprintln!("{}", mismatch_hint(&geometry).yellow());
                }
                return Err(SpriteError::GeometryMismatch {
                    expected_width,
                    expected_height,
                    actual_width,
                    actual_height,
                }
                .into());
            }
        }
        Commands::Play {
            input,
            geometry,
            fps,
            duration,
            tick_ms,
            json,
        } => {
            let geometry = geometry.geometry();
            let limit = parse_timecode(&duration)?;
            let options = base_extract_options(&cli.global)?;
            let source = SourceImage::open(&input)?;

            let mut animator = SpriteAnimator::new()
                .with_geometry(geometry)
                .with_options(options)
                .with_fps(clamp_fps(fps));
            if let Err(error) = animator.load(&source) {
                if error.is_geometry_mismatch() {
                    eprintln!("{}", mismatch_hint(&geometry).yellow());
                }
                return Err(error.into());
            }

            let snapshot = animator.snapshot();
            let progress_bar = if json {
                None
            } else {
                let pb = ProgressBar::new(snapshot.frame_count as u64);
                let style = ProgressStyle::with_template(
                    "{spinner:.green} {bar:40.cyan/blue} Frame {pos}/{len} {msg}",
                )?;
                pb.set_style(style.progress_chars("##-"));
                pb.set_message(format!(
                    "{} FPS, {}ms/frame",
                    snapshot.fps, snapshot.frame_interval_ms
                ));
                pb.set_position(1);
                Some(pb)
            };

            let stats = Ticker::new(Duration::from_millis(tick_ms.max(1)))
                .with_limit(limit)
                .run(&mut animator, |animator, advanced| {
                    if let Some(pb) = &progress_bar {
                        if advanced {
                            pb.set_position(animator.current_index() as u64 + 1);
                        }
                        pb.tick();
                    }
                });

            animator.pause();
            let snapshot = animator.snapshot();
            if let Some(pb) = progress_bar {
                pb.finish_with_message("stopped");
            }

            if json {
                let payload = json!({
                    "file": snapshot.file_name,
                    "frame_count": snapshot.frame_count,
                    "current_index": snapshot.current_index,
                    "fps": snapshot.fps,
                    "frame_interval_ms": snapshot.frame_interval_ms,
                    "ticks": stats.ticks,
                    "advances": stats.advances,
                    "paused": snapshot.state == AnimatorState::Paused,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} {}",
                    "done:".green().bold(),
                    format!(
                        "played {} frame changes over {:?}, stopped on frame {}/{}",
                        stats.advances,
                        limit,
                        snapshot.current_index + 1,
                        snapshot.frame_count,
                    )
                    .green()
                );
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "spritemover", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
