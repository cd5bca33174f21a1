// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flag groups packed into the video and audio setting words.
//!
//! `VideoFlags`/`AudioFlags` name the raw bits. The enums are the typed view:
//! independent bits (`Resolution`) or exclusive groups (`AspectRatio`, the
//! primary part of `AudioMode`) where "no bit set" is itself a value.

use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Bits of the `videoSettings` word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VideoFlags: u32 {
        const WIDESCREEN = 0x0001_0000;
        const HDTV_720P = 0x0002_0000;
        const HDTV_1080I = 0x0004_0000;
        const HDTV_480P = 0x0008_0000;
        const LETTERBOX = 0x0010_0000;
    }
}

bitflags! {
    /// Bits of the `audioSettings` word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AudioFlags: u32 {
        const MONO = 0x0000_0001;
        const SURROUND = 0x0000_0002;
        const AC3 = 0x0001_0000;
        const DTS = 0x0002_0000;
    }
}

impl VideoFlags {
    /// The exclusive aspect-ratio group.
    pub const ASPECT_GROUP: Self = Self::WIDESCREEN.union(Self::LETTERBOX);
}

impl AudioFlags {
    /// The exclusive primary-mode group.
    pub const PRIMARY_GROUP: Self = Self::MONO.union(Self::SURROUND);
    /// Codec bits that only apply in surround mode.
    pub const SURROUND_CODECS: Self = Self::AC3.union(Self::DTS);
}

/// Error returned when parsing a flag name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}' (expected one of: {expected})")]
pub struct ParseFlagError {
    kind: &'static str,
    name: alloc::string::String,
    expected: &'static str,
}

impl ParseFlagError {
    fn new(kind: &'static str, name: &str, expected: &'static str) -> Self {
        Self { kind, name: name.into(), expected }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Output resolutions; each one is enabled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    P480,
    P720,
    I1080,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::P480, Resolution::P720, Resolution::I1080];

    pub fn to_bits(self) -> VideoFlags {
        match self {
            Resolution::P480 => VideoFlags::HDTV_480P,
            Resolution::P720 => VideoFlags::HDTV_720P,
            Resolution::I1080 => VideoFlags::HDTV_1080I,
        }
    }

    /// Resolutions enabled in `bits`, in `ALL` order.
    pub fn enabled_in(bits: VideoFlags) -> impl Iterator<Item = Resolution> {
        Self::ALL.into_iter().filter(move |res| bits.contains(res.to_bits()))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resolution::P480 => "480p",
            Resolution::P720 => "720p",
            Resolution::I1080 => "1080i",
        })
    }
}

impl FromStr for Resolution {
    type Err = ParseFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "480p" => Ok(Resolution::P480),
            "720p" => Ok(Resolution::P720),
            "1080i" => Ok(Resolution::I1080),
            _ => Err(ParseFlagError::new("resolution", s, "480p, 720p, 1080i")),
        }
    }
}

// ============================================================================
// Aspect ratio
// ============================================================================

/// Aspect ratio. `Normal` has no bit of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    #[default]
    Normal,
    Widescreen,
    Letterbox,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] =
        [AspectRatio::Normal, AspectRatio::Widescreen, AspectRatio::Letterbox];

    /// Bits this ratio occupies inside `VideoFlags::ASPECT_GROUP`.
    pub fn to_bits(self) -> VideoFlags {
        match self {
            AspectRatio::Normal => VideoFlags::empty(),
            AspectRatio::Widescreen => VideoFlags::WIDESCREEN,
            AspectRatio::Letterbox => VideoFlags::LETTERBOX,
        }
    }

    /// Decode the group. Widescreen wins when both bits are present.
    pub fn from_bits(bits: VideoFlags) -> Self {
        if bits.contains(VideoFlags::WIDESCREEN) {
            AspectRatio::Widescreen
        } else if bits.contains(VideoFlags::LETTERBOX) {
            AspectRatio::Letterbox
        } else {
            AspectRatio::Normal
        }
    }

    /// Whether this ratio reads as enabled in `bits`.
    ///
    /// Widescreen and letterbox are plain bit tests, so a word carrying both
    /// bits reports both as enabled.
    pub fn is_set_in(self, bits: VideoFlags) -> bool {
        match self {
            AspectRatio::Normal => !bits.intersects(VideoFlags::ASPECT_GROUP),
            other => bits.contains(other.to_bits()),
        }
    }

    /// Replace the aspect group in `bits` with this ratio.
    pub fn apply(self, bits: VideoFlags) -> VideoFlags {
        bits.difference(VideoFlags::ASPECT_GROUP).union(self.to_bits())
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AspectRatio::Normal => "normal",
            AspectRatio::Widescreen => "widescreen",
            AspectRatio::Letterbox => "letterbox",
        })
    }
}

impl FromStr for AspectRatio {
    type Err = ParseFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(AspectRatio::Normal),
            "widescreen" => Ok(AspectRatio::Widescreen),
            "letterbox" => Ok(AspectRatio::Letterbox),
            _ => Err(ParseFlagError::new("aspect ratio", s, "normal, widescreen, letterbox")),
        }
    }
}

// ============================================================================
// Audio mode
// ============================================================================

/// Audio modes. Stereo, mono and surround form the primary group (stereo is
/// the absence of the other two); AC3 and DTS are surround codec options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioMode {
    Stereo,
    Mono,
    Surround,
    SurroundAc3,
    SurroundDts,
}

impl AudioMode {
    pub const ALL: [AudioMode; 5] = [
        AudioMode::Mono,
        AudioMode::Stereo,
        AudioMode::Surround,
        AudioMode::SurroundAc3,
        AudioMode::SurroundDts,
    ];

    pub fn to_bits(self) -> AudioFlags {
        match self {
            AudioMode::Stereo => AudioFlags::empty(),
            AudioMode::Mono => AudioFlags::MONO,
            AudioMode::Surround => AudioFlags::SURROUND,
            AudioMode::SurroundAc3 => AudioFlags::AC3,
            AudioMode::SurroundDts => AudioFlags::DTS,
        }
    }

    /// Decode the primary group. Mono wins when both primary bits are present.
    pub fn primary_from_bits(bits: AudioFlags) -> Self {
        if bits.contains(AudioFlags::MONO) {
            AudioMode::Mono
        } else if bits.contains(AudioFlags::SURROUND) {
            AudioMode::Surround
        } else {
            AudioMode::Stereo
        }
    }

    /// Whether this mode reads as enabled in `bits`.
    ///
    /// Codec bits are not gated on surround being active.
    pub fn is_set_in(self, bits: AudioFlags) -> bool {
        match self {
            AudioMode::Stereo => !bits.intersects(AudioFlags::PRIMARY_GROUP),
            other => bits.contains(other.to_bits()),
        }
    }

    /// True for the surround codec options.
    pub fn is_codec(self) -> bool {
        matches!(self, AudioMode::SurroundAc3 | AudioMode::SurroundDts)
    }
}

impl fmt::Display for AudioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AudioMode::Stereo => "stereo",
            AudioMode::Mono => "mono",
            AudioMode::Surround => "surround",
            AudioMode::SurroundAc3 => "ac3",
            AudioMode::SurroundDts => "dts",
        })
    }
}

impl FromStr for AudioMode {
    type Err = ParseFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stereo" => Ok(AudioMode::Stereo),
            "mono" => Ok(AudioMode::Mono),
            "surround" => Ok(AudioMode::Surround),
            "ac3" | "surround_ac3" => Ok(AudioMode::SurroundAc3),
            "dts" | "surround_dts" => Ok(AudioMode::SurroundDts),
            _ => Err(ParseFlagError::new("audio mode", s, "stereo, mono, surround, ac3, dts")),
        }
    }
}
