// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Host CLI over the A/V settings blob (show, edit, verify)
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests driving `execute` against MemStore

#![forbid(unsafe_code)]

pub mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use eeprom::{
    AspectRatio, AudioMode, FlagEngine, NvStore, Resolution, SaveError, SettingsRecord, Unavailable,
    RECORD_SIZE,
};
use log::info;
use thiserror::Error;

pub use config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "avcfg", version, about = "Inspect and edit the A/V settings blob")]
pub struct Cli {
    /// Config file (TOML).
    #[arg(long, env = config::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Directory of the non-volatile store.
    #[arg(long, env = config::STORE_DIR_ENV)]
    pub store_dir: Option<PathBuf>,

    /// More log output (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print resolution, aspect ratio and audio state.
    Show,
    /// Print every bit of the audio word.
    AudioBits,
    /// Enable (or disable with --off) a resolution.
    Resolution {
        resolution: Resolution,
        #[arg(long)]
        off: bool,
        #[arg(long)]
        dry_run: bool,
    },
    /// Select the aspect ratio.
    Aspect {
        aspect: AspectRatio,
        #[arg(long)]
        dry_run: bool,
    },
    /// Enable (or disable with --off) an audio mode.
    Audio {
        mode: AudioMode,
        #[arg(long)]
        off: bool,
        #[arg(long)]
        dry_run: bool,
    },
    /// Flip one item the way the settings menu does.
    Toggle {
        item: SettingItem,
        #[arg(long)]
        dry_run: bool,
    },
    /// Check both stored checksums.
    Verify,
    /// Write a blank record with valid checksums.
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Hex dump of the raw record.
    Dump,
}

/// Any single selectable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingItem {
    Resolution(Resolution),
    Aspect(AspectRatio),
    Audio(AudioMode),
}

impl FromStr for SettingItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(res) = s.parse() {
            return Ok(SettingItem::Resolution(res));
        }
        if let Ok(aspect) = s.parse() {
            return Ok(SettingItem::Aspect(aspect));
        }
        if let Ok(mode) = s.parse() {
            return Ok(SettingItem::Audio(mode));
        }
        Err(format!("unknown setting '{s}'"))
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] Unavailable),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("store write failed: {0}")]
    Init(#[from] eeprom::Failed),
    #[error("checksum mismatch")]
    ChecksumMismatch,
    #[error("a record already exists under key {0} (use --force to overwrite)")]
    AlreadyInitialized(eeprom::SettingKey),
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

const ENABLED: &str = "enabled";
const DISABLED: &str = "disabled";
const RULE: &str = "-------------------";

fn state(on: bool) -> &'static str {
    if on {
        ENABLED
    } else {
        DISABLED
    }
}

fn label(item: SettingItem) -> &'static str {
    match item {
        SettingItem::Resolution(Resolution::P480) => "480p",
        SettingItem::Resolution(Resolution::P720) => "720p",
        SettingItem::Resolution(Resolution::I1080) => "1080i",
        SettingItem::Aspect(AspectRatio::Normal) => "Normal",
        SettingItem::Aspect(AspectRatio::Widescreen) => "Widescreen",
        SettingItem::Aspect(AspectRatio::Letterbox) => "Letterbox",
        SettingItem::Audio(AudioMode::Mono) => "Mono",
        SettingItem::Audio(AudioMode::Stereo) => "Stereo",
        SettingItem::Audio(AudioMode::Surround) => "Surround",
        SettingItem::Audio(AudioMode::SurroundAc3) => "AC3",
        SettingItem::Audio(AudioMode::SurroundDts) => "DTS",
    }
}

/// Print the A/V table.
pub fn render_settings<S: NvStore>(engine: &mut FlagEngine<S>, out: &mut dyn Write) -> io::Result<()> {
    for res in Resolution::ALL {
        let on = engine.is_resolution_enabled(res);
        writeln!(out, "{:<6}-> {}", label(SettingItem::Resolution(res)), state(on))?;
    }
    writeln!(out, "{RULE}")?;
    for aspect in AspectRatio::ALL {
        let on = engine.is_aspect_ratio_enabled(aspect);
        writeln!(out, "{:<11}-> {}", label(SettingItem::Aspect(aspect)), state(on))?;
    }
    writeln!(out, "{RULE}")?;
    for mode in AudioMode::ALL {
        let on = engine.is_audio_mode_enabled(mode);
        writeln!(out, "{:<9}-> {}", label(SettingItem::Audio(mode)), state(on))?;
    }
    Ok(())
}

/// Print the audio word as 16 rows of `bit : value` pairs (bit i and i+16).
pub fn render_audio_bits(word: u32, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Audio Bits ==========================")?;
    for bit in 0..16u32 {
        let low = (word >> bit) & 1;
        let high = (word >> (bit + 16)) & 1;
        writeln!(out, "{:<3}: {}    {:<3}: {}", bit, low, bit + 16, high)?;
    }
    Ok(())
}

pub fn render_hex(image: &[u8; RECORD_SIZE], out: &mut dyn Write) -> io::Result<()> {
    for (row, chunk) in image.chunks(16).enumerate() {
        write!(out, "{:#06x}:", row * 16)?;
        for byte in chunk {
            write!(out, " {byte:02x}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn toggle<S: NvStore>(engine: &mut FlagEngine<S>, item: SettingItem) {
    match item {
        SettingItem::Resolution(res) => {
            let on = engine.is_resolution_enabled(res);
            engine.set_resolution_enabled(res, !on);
        }
        SettingItem::Aspect(aspect) => engine.set_active_aspect_ratio(aspect),
        SettingItem::Audio(mode) => {
            let on = engine.is_audio_mode_enabled(mode);
            engine.set_audio_mode_enabled(mode, !on);
        }
    }
}

fn commit<S: NvStore>(engine: &mut FlagEngine<S>, dry_run: bool, out: &mut dyn Write) -> Result<(), CliError> {
    if dry_run {
        render_settings(engine, out)?;
        engine.try_revert()?;
        writeln!(out, "dry run: changes discarded")?;
        return Ok(());
    }
    engine.try_save()?;
    render_settings(engine, out)?;
    writeln!(out, "settings saved")?;
    Ok(())
}

/// Run one command against `engine`.
pub fn execute<S: NvStore>(
    command: &Command,
    engine: &mut FlagEngine<S>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if let Command::Init { force } = command {
        let key = engine.codec().key();
        if !force && engine.codec().load().is_ok() {
            return Err(CliError::AlreadyInitialized(key));
        }
        let mut record = SettingsRecord::default();
        engine.codec_mut().store(&mut record)?;
        engine.try_revert()?;
        info!("avcfg: initialized blank record under key {}", key);
        writeln!(out, "initialized key {key}")?;
        return Ok(());
    }

    engine.try_revert()?;

    match command {
        Command::Show => render_settings(engine, out)?,
        Command::AudioBits => render_audio_bits(engine.audio_settings().unwrap_or(0), out)?,
        Command::Resolution { resolution, off, dry_run } => {
            engine.set_resolution_enabled(*resolution, !off);
            commit(engine, *dry_run, out)?;
        }
        Command::Aspect { aspect, dry_run } => {
            engine.set_active_aspect_ratio(*aspect);
            commit(engine, *dry_run, out)?;
        }
        Command::Audio { mode, off, dry_run } => {
            engine.set_audio_mode_enabled(*mode, !off);
            commit(engine, *dry_run, out)?;
        }
        Command::Toggle { item, dry_run } => {
            toggle(engine, *item);
            commit(engine, *dry_run, out)?;
        }
        Command::Verify => {
            let Some(record) = engine.record() else {
                return Ok(());
            };
            let report = record.verify_checksums();
            writeln!(
                out,
                "factory checksum: stored {:#010x} computed {:#010x} {}",
                report.factory_stored,
                report.factory_computed,
                if report.factory_ok() { "ok" } else { "MISMATCH" }
            )?;
            writeln!(
                out,
                "user checksum:    stored {:#010x} computed {:#010x} {}",
                report.user_stored,
                report.user_computed,
                if report.user_ok() { "ok" } else { "MISMATCH" }
            )?;
            if !report.is_valid() {
                return Err(CliError::ChecksumMismatch);
            }
        }
        Command::Dump => {
            if let Some(record) = engine.record() {
                render_hex(&record.to_image(), out)?;
            }
        }
        Command::Init { .. } => {}
    }
    Ok(())
}

/// Resolve config and store from `cli`, then run its command on the file store.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let store = nvram::FileStore::new(config.store_dir(cli.store_dir.as_deref()));
    info!("avcfg: using store {}", store.dir().display());
    let codec = eeprom::RecordCodec::with_key(store, config.key());
    let mut engine = FlagEngine::with_codec(codec);
    execute(&cli.command, &mut engine, out)
}
