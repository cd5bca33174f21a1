// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Typed flag access over a lazily loaded settings record.
//!
//! Every query and setter first makes sure a record is loaded. When the
//! store cannot supply one, queries answer `false` (or `Normal`) and setters
//! do nothing; the next call tries the store again.

use log::{debug, info, warn};
use nvram::NvStore;

use crate::codec::{Failed, RecordCodec, Unavailable};
use crate::flags::{AspectRatio, AudioFlags, AudioMode, Resolution, VideoFlags};
use crate::record::SettingsRecord;

/// Load state of the engine's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No load attempted yet.
    Uninitialized,
    /// The latest load succeeded.
    Ready(SettingsRecord),
    /// The latest load failed.
    Unavailable,
}

pub struct FlagEngine<S> {
    codec: RecordCodec<S>,
    state: EngineState,
}

impl<S: NvStore> FlagEngine<S> {
    /// Engine bound to `store` under the well-known key. Nothing is loaded
    /// until the first call.
    pub fn new(store: S) -> Self {
        Self::with_codec(RecordCodec::new(store))
    }

    pub fn with_codec(codec: RecordCodec<S>) -> Self {
        Self { codec, state: EngineState::Uninitialized }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    pub fn codec(&self) -> &RecordCodec<S> {
        &self.codec
    }

    pub fn codec_mut(&mut self) -> &mut RecordCodec<S> {
        &mut self.codec
    }

    pub fn into_store(self) -> S {
        self.codec.into_store()
    }

    /// Loaded record, loading it first if needed.
    pub fn record(&mut self) -> Option<&SettingsRecord> {
        self.ready().map(|record| &*record)
    }

    fn reload(&mut self) -> Result<(), Unavailable> {
        match self.codec.load() {
            Ok(record) => {
                self.state = EngineState::Ready(record);
                Ok(())
            }
            Err(err) => {
                self.state = EngineState::Unavailable;
                Err(err)
            }
        }
    }

    fn ready(&mut self) -> Option<&mut SettingsRecord> {
        if !self.is_ready() {
            // failure already logged by the codec; callers degrade
            let _ = self.reload();
        }
        match &mut self.state {
            EngineState::Ready(record) => Some(record),
            _ => None,
        }
    }

    fn video(&mut self) -> Option<VideoFlags> {
        self.ready().map(|record| record.video_flags())
    }

    fn audio(&mut self) -> Option<AudioFlags> {
        self.ready().map(|record| record.audio_flags())
    }

    // ------------------------------------------------------------------
    // Video
    // ------------------------------------------------------------------

    pub fn is_resolution_enabled(&mut self, resolution: Resolution) -> bool {
        self.video().is_some_and(|bits| bits.contains(resolution.to_bits()))
    }

    pub fn set_resolution_enabled(&mut self, resolution: Resolution, enabled: bool) {
        let Some(record) = self.ready() else { return };
        let mut bits = record.video_flags();
        bits.set(resolution.to_bits(), enabled);
        record.set_video_flags(bits);
        debug!("eeprom: resolution {} -> {}", resolution, enabled);
    }

    pub fn is_aspect_ratio_enabled(&mut self, aspect: AspectRatio) -> bool {
        self.video().is_some_and(|bits| aspect.is_set_in(bits))
    }

    pub fn set_active_aspect_ratio(&mut self, aspect: AspectRatio) {
        let Some(record) = self.ready() else { return };
        record.set_video_flags(aspect.apply(record.video_flags()));
        debug!("eeprom: aspect ratio -> {}", aspect);
    }

    pub fn active_aspect_ratio(&mut self) -> AspectRatio {
        self.video().map(AspectRatio::from_bits).unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Audio
    // ------------------------------------------------------------------

    pub fn is_audio_mode_enabled(&mut self, mode: AudioMode) -> bool {
        self.audio().is_some_and(|bits| mode.is_set_in(bits))
    }

    /// Primary audio mode (stereo, mono or surround). `None` if not loaded.
    pub fn active_audio_mode(&mut self) -> Option<AudioMode> {
        self.audio().map(AudioMode::primary_from_bits)
    }

    /// Enable or disable an audio mode.
    ///
    /// Enabling a primary mode replaces the current one; mono and stereo also
    /// drop both surround codecs. Codecs can only be enabled while surround is
    /// active and can always be disabled. Disabling a primary mode does
    /// nothing: switch by enabling another one.
    pub fn set_audio_mode_enabled(&mut self, mode: AudioMode, enabled: bool) {
        let Some(record) = self.ready() else { return };
        let mut bits = record.audio_flags();

        if enabled {
            match mode {
                AudioMode::Mono => {
                    bits.remove(AudioFlags::SURROUND | AudioFlags::SURROUND_CODECS);
                    bits.insert(AudioFlags::MONO);
                }
                AudioMode::Stereo => {
                    bits.remove(AudioFlags::PRIMARY_GROUP | AudioFlags::SURROUND_CODECS);
                }
                AudioMode::Surround => {
                    bits.remove(AudioFlags::MONO);
                    bits.insert(AudioFlags::SURROUND);
                }
                AudioMode::SurroundAc3 | AudioMode::SurroundDts => {
                    if !AudioMode::Surround.is_set_in(bits) {
                        debug!("eeprom: {} ignored, surround not active", mode);
                        return;
                    }
                    bits.insert(mode.to_bits());
                }
            }
        } else if mode.is_codec() {
            bits.remove(mode.to_bits());
        } else {
            return;
        }

        record.set_audio_flags(bits);
        debug!("eeprom: audio {} -> {} (word={:#010x})", mode, enabled, bits.bits());
    }

    // ------------------------------------------------------------------
    // Raw words
    // ------------------------------------------------------------------

    pub fn video_settings(&mut self) -> Option<u32> {
        self.ready().map(|record| record.video_settings())
    }

    pub fn audio_settings(&mut self) -> Option<u32> {
        self.ready().map(|record| record.audio_settings())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the in-memory record back with fresh checksums.
    ///
    /// A record that was never loaded is not written.
    pub fn try_save(&mut self) -> Result<(), SaveError> {
        if !self.is_ready() {
            self.reload().map_err(SaveError::NotLoaded)?;
        }
        if let EngineState::Ready(record) = &mut self.state {
            self.codec.store(record)?;
            info!("eeprom: settings saved to key {}", self.codec.key());
        }
        Ok(())
    }

    /// `try_save` reduced to success/failure.
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(err) => {
                warn!("eeprom: save failed: {}", err);
                false
            }
        }
    }

    /// Discard in-memory edits by reloading from the store.
    pub fn try_revert(&mut self) -> Result<(), Unavailable> {
        self.reload()
    }

    /// `try_revert` reduced to success/failure.
    pub fn revert(&mut self) -> bool {
        self.try_revert().is_ok()
    }
}

/// Why `try_save` did not persist the record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("no record loaded: {0}")]
    NotLoaded(#[source] Unavailable),
    #[error(transparent)]
    Write(#[from] Failed),
}
