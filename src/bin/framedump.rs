use std::{env, path::PathBuf};

use clap::Parser;
use colored::Colorize;
use framedump::{
    DecodeErrorPolicy, FfmpegLogLevel, FrameExtractor, OutputConfig, VideoSource, resolve_input,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framedump cappy.mp4\n  framedump cappy.mp4 --out frames --ext png --progress\n  framedump cappy.mp4 --strict --json\n\nThe input is looked up under data/videos/ first, then as given.";

#[derive(Debug, Parser)]
#[command(
    name = "framedump",
    version,
    about = "Dump every frame of a video to sequentially numbered images",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video file. Resolved against data/videos/ first, then the
    /// current directory.
    input: String,

    /// Output directory for frame images.
    #[arg(long, default_value = "frames")]
    out: PathBuf,

    /// Filename prefix placed before the frame index.
    #[arg(long, default_value = "frame_")]
    prefix: String,

    /// Zero-padded width of the frame index in filenames.
    #[arg(long, default_value_t = 4)]
    index_width: usize,

    /// Output image extension (jpg, png, bmp, tiff).
    #[arg(long, default_value = "jpg")]
    ext: String,

    /// Fail on a mid-stream decode error instead of treating it as
    /// end-of-stream.
    #[arg(long)]
    strict: bool,

    /// Show a progress bar sized by the estimated frame count.
    #[arg(long)]
    progress: bool,

    /// Print the summary as machine-readable JSON.
    #[arg(long)]
    json: bool,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, fatal, error, warning, info, debug).
    #[arg(long)]
    ffmpeg_log_level: Option<String>,
}

fn parse_ffmpeg_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "debug" => Some(FfmpegLogLevel::Debug),
        _ => None,
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Some(level) = &cli.ffmpeg_log_level {
        let parsed = parse_ffmpeg_log_level(level)
            .ok_or_else(|| format!("unsupported --ffmpeg-log-level: {level}"))?;
        framedump::set_ffmpeg_log_level(parsed);
    }

    let root = env::current_dir()?;
    let input = resolve_input(&root, &cli.input);

    let ext_clean = cli.ext.trim_start_matches('.').to_ascii_lowercase();
    let output = OutputConfig::new(cli.out)
        .with_prefix(cli.prefix)
        .with_index_width(cli.index_width)
        .with_extension(ext_clean);

    let policy = if cli.strict {
        DecodeErrorPolicy::Fail
    } else {
        DecodeErrorPolicy::StopQuietly
    };
    let extractor = FrameExtractor::new(output).with_decode_error_policy(policy);

    let progress_bar = if cli.progress {
        // The length is an estimate from container metadata; the bar is
        // resized if decoding runs past it.
        let estimated = VideoSource::open(&input)
            .map(|source| source.info().frame_count)
            .unwrap_or(0);
        let pb = ProgressBar::new(estimated);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        pb.set_style(style.progress_chars("##-"));
        Some(pb)
    } else {
        None
    };

    let summary = extractor.extract_with_progress(&input, |index| {
        if let Some(pb) = &progress_bar {
            if index > pb.length().unwrap_or(0) {
                pb.set_length(index);
            }
            pb.set_position(index);
        }
    })?;

    if let Some(pb) = progress_bar {
        pb.finish_with_message("done");
    }

    if cli.json {
        let payload = json!({
            "input": input.display().to_string(),
            "output_dir": summary.output_dir.display().to_string(),
            "frames": summary.frames_written,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("Extracted {} frames.", summary.frames_written);
        if cli.verbose {
            eprintln!(
                "{} {}",
                "output:".green().bold(),
                summary.output_dir.display()
            );
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
