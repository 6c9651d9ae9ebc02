use anyhow::Context;
use clap::Parser;
use dotmatrix_core::{Emulator, SCREEN_HEIGHT, SCREEN_WIDTH};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Headless driver for the dotmatrix emulation core")]
struct Cli {
    /// Path to the ROM image to load
    #[arg(short = 'f', long = "rom_file_path")]
    rom_file_path: PathBuf,

    /// Number of frames to emulate before exiting
    #[arg(short = 'n', long = "frames")]
    frames: Option<u64>,

    /// Write the final frame as raw 160x144 RGBA to this path
    #[arg(short = 'o', long = "frame_dump_path")]
    frame_dump_path: Option<PathBuf>,

    /// Optional TOML config file supplying defaults for the options above
    #[arg(short = 'c', long = "config_path")]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    frames: Option<u64>,
    frame_dump_path: Option<PathBuf>,
}

impl AppConfig {
    fn load(config_path: Option<&PathBuf>) -> anyhow::Result<Self> {
        let Some(config_path) = config_path else {
            return Ok(Self::default());
        };

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("error reading config file {}", config_path.display()))?;
        toml::from_str(&config_str)
            .with_context(|| format!("error parsing config file {}", config_path.display()))
    }
}

const DEFAULT_FRAMES: u64 = 300;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let config = AppConfig::load(args.config_path.as_ref())?;

    let frames = args.frames.or(config.frames).unwrap_or(DEFAULT_FRAMES);
    let frame_dump_path = args.frame_dump_path.or(config.frame_dump_path);

    let rom = fs::read(&args.rom_file_path)
        .with_context(|| format!("error reading ROM file {}", args.rom_file_path.display()))?;

    let mut emulator = Emulator::new(rom).context("error loading cartridge")?;

    log::info!(
        "running {} for {frames} frames",
        args.rom_file_path.display()
    );

    for frame in 0..frames {
        emulator
            .run_frame()
            .with_context(|| format!("emulation fault during frame {frame}"))?;

        if (frame + 1) % 60 == 0 {
            log::debug!("completed {} frames", frame + 1);
        }
    }

    if let Some(frame_dump_path) = frame_dump_path {
        fs::write(&frame_dump_path, emulator.frame_buffer().as_slice())
            .with_context(|| format!("error writing frame to {}", frame_dump_path.display()))?;
        log::info!(
            "wrote {SCREEN_WIDTH}x{SCREEN_HEIGHT} RGBA frame to {}",
            frame_dump_path.display()
        );
    }

    Ok(())
}
