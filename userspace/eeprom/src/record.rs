// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-memory form of the settings blob.
//!
//! Only the video/audio words and the two checksums are public. Every other
//! field is decoded for layout fidelity and written back unchanged.

use alloc::vec::Vec;

use thiserror::Error;

use crate::checksum::section_checksum;
use crate::flags::{AudioFlags, VideoFlags};
use crate::layout::*;

/// Blob could not be decoded as a settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("settings blob is {actual} bytes, expected {}", RECORD_SIZE)]
pub struct LayoutError {
    pub actual: usize,
}

/// Result of checking both stored checksums against the record contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumReport {
    pub factory_stored: u32,
    pub factory_computed: u32,
    pub user_stored: u32,
    pub user_computed: u32,
}

impl ChecksumReport {
    pub fn factory_ok(&self) -> bool {
        self.factory_stored == self.factory_computed
    }

    pub fn user_ok(&self) -> bool {
        self.user_stored == self.user_computed
    }

    pub fn is_valid(&self) -> bool {
        self.factory_ok() && self.user_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    // security section
    security_hash: [u8; SECURITY_HASH_LEN],
    confounder: [u8; CONFOUNDER_LEN],
    hdd_key: [u8; HDD_KEY_LEN],
    region_flags: u32,

    // factory section
    factory_checksum: u32,
    serial: [u8; SERIAL_LEN],
    mac_address: [u8; MAC_ADDRESS_LEN],
    padding_46: [u8; PADDING_46_LEN],
    online_key: [u8; ONLINE_KEY_LEN],
    video_standard: u32,
    padding_5c: u32,

    // user section
    user_checksum: u32,
    tz_bias: u32,
    tz_std_name: [u8; TZ_NAME_LEN],
    tz_dlt_name: [u8; TZ_NAME_LEN],
    padding_70: [u8; PADDING_8_LEN],
    tz_std_start: u32,
    tz_dlt_start: u32,
    padding_80: [u8; PADDING_8_LEN],
    tz_std_bias: u32,
    tz_dlt_bias: u32,
    language: u32,
    video_settings: u32,
    audio_settings: u32,
    parental_game: u32,
    parental_passcode: u32,
    parental_movie: u32,
    live_ip: u32,
    live_dns: u32,
    live_gateway: u32,
    live_subnet: u32,
    unknown_b8: u32,
    dvd_zone: u32,

    history: [u8; HISTORY_LEN],
}

fn field<const N: usize>(image: &[u8; RECORD_SIZE], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&image[offset..offset + N]);
    out
}

fn word(image: &[u8; RECORD_SIZE], offset: usize) -> u32 {
    u32::from_le_bytes(field(image, offset))
}

fn put(image: &mut [u8; RECORD_SIZE], offset: usize, bytes: &[u8]) {
    image[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn put_word(image: &mut [u8; RECORD_SIZE], offset: usize, value: u32) {
    put(image, offset, &value.to_le_bytes());
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::from_image(&[0u8; RECORD_SIZE])
    }
}

impl SettingsRecord {
    /// Decode a blob. The blob must be exactly `RECORD_SIZE` bytes.
    pub fn from_bytes(blob: &[u8]) -> Result<Self, LayoutError> {
        let image: &[u8; RECORD_SIZE] =
            blob.try_into().map_err(|_| LayoutError { actual: blob.len() })?;
        Ok(Self::from_image(image))
    }

    fn from_image(image: &[u8; RECORD_SIZE]) -> Self {
        Self {
            security_hash: field(image, SECURITY_HASH),
            confounder: field(image, CONFOUNDER),
            hdd_key: field(image, HDD_KEY),
            region_flags: word(image, REGION_FLAGS),
            factory_checksum: word(image, FACTORY_CHECKSUM),
            serial: field(image, SERIAL),
            mac_address: field(image, MAC_ADDRESS),
            padding_46: field(image, PADDING_46),
            online_key: field(image, ONLINE_KEY),
            video_standard: word(image, VIDEO_STANDARD),
            padding_5c: word(image, PADDING_5C),
            user_checksum: word(image, USER_CHECKSUM),
            tz_bias: word(image, TZ_BIAS),
            tz_std_name: field(image, TZ_STD_NAME),
            tz_dlt_name: field(image, TZ_DLT_NAME),
            padding_70: field(image, PADDING_70),
            tz_std_start: word(image, TZ_STD_START),
            tz_dlt_start: word(image, TZ_DLT_START),
            padding_80: field(image, PADDING_80),
            tz_std_bias: word(image, TZ_STD_BIAS),
            tz_dlt_bias: word(image, TZ_DLT_BIAS),
            language: word(image, LANGUAGE),
            video_settings: word(image, VIDEO_SETTINGS),
            audio_settings: word(image, AUDIO_SETTINGS),
            parental_game: word(image, PARENTAL_GAME),
            parental_passcode: word(image, PARENTAL_PASSCODE),
            parental_movie: word(image, PARENTAL_MOVIE),
            live_ip: word(image, LIVE_IP),
            live_dns: word(image, LIVE_DNS),
            live_gateway: word(image, LIVE_GATEWAY),
            live_subnet: word(image, LIVE_SUBNET),
            unknown_b8: word(image, UNKNOWN_B8),
            dvd_zone: word(image, DVD_ZONE),
            history: field(image, HISTORY),
        }
    }

    /// Encode the exact byte image, checksums as currently stored.
    pub fn to_image(&self) -> [u8; RECORD_SIZE] {
        let mut image = [0u8; RECORD_SIZE];
        put(&mut image, SECURITY_HASH, &self.security_hash);
        put(&mut image, CONFOUNDER, &self.confounder);
        put(&mut image, HDD_KEY, &self.hdd_key);
        put_word(&mut image, REGION_FLAGS, self.region_flags);
        put_word(&mut image, FACTORY_CHECKSUM, self.factory_checksum);
        put(&mut image, SERIAL, &self.serial);
        put(&mut image, MAC_ADDRESS, &self.mac_address);
        put(&mut image, PADDING_46, &self.padding_46);
        put(&mut image, ONLINE_KEY, &self.online_key);
        put_word(&mut image, VIDEO_STANDARD, self.video_standard);
        put_word(&mut image, PADDING_5C, self.padding_5c);
        put_word(&mut image, USER_CHECKSUM, self.user_checksum);
        put_word(&mut image, TZ_BIAS, self.tz_bias);
        put(&mut image, TZ_STD_NAME, &self.tz_std_name);
        put(&mut image, TZ_DLT_NAME, &self.tz_dlt_name);
        put(&mut image, PADDING_70, &self.padding_70);
        put_word(&mut image, TZ_STD_START, self.tz_std_start);
        put_word(&mut image, TZ_DLT_START, self.tz_dlt_start);
        put(&mut image, PADDING_80, &self.padding_80);
        put_word(&mut image, TZ_STD_BIAS, self.tz_std_bias);
        put_word(&mut image, TZ_DLT_BIAS, self.tz_dlt_bias);
        put_word(&mut image, LANGUAGE, self.language);
        put_word(&mut image, VIDEO_SETTINGS, self.video_settings);
        put_word(&mut image, AUDIO_SETTINGS, self.audio_settings);
        put_word(&mut image, PARENTAL_GAME, self.parental_game);
        put_word(&mut image, PARENTAL_PASSCODE, self.parental_passcode);
        put_word(&mut image, PARENTAL_MOVIE, self.parental_movie);
        put_word(&mut image, LIVE_IP, self.live_ip);
        put_word(&mut image, LIVE_DNS, self.live_dns);
        put_word(&mut image, LIVE_GATEWAY, self.live_gateway);
        put_word(&mut image, LIVE_SUBNET, self.live_subnet);
        put_word(&mut image, UNKNOWN_B8, self.unknown_b8);
        put_word(&mut image, DVD_ZONE, self.dvd_zone);
        put(&mut image, HISTORY, &self.history);
        image
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_image().to_vec()
    }

    pub fn video_settings(&self) -> u32 {
        self.video_settings
    }

    pub fn audio_settings(&self) -> u32 {
        self.audio_settings
    }

    pub fn video_flags(&self) -> VideoFlags {
        VideoFlags::from_bits_retain(self.video_settings)
    }

    pub fn audio_flags(&self) -> AudioFlags {
        AudioFlags::from_bits_retain(self.audio_settings)
    }

    /// Replace the video word. Bits outside `VideoFlags` are preserved as given.
    pub fn set_video_flags(&mut self, flags: VideoFlags) {
        self.video_settings = flags.bits();
    }

    /// Replace the audio word. Bits outside `AudioFlags` are preserved as given.
    pub fn set_audio_flags(&mut self, flags: AudioFlags) {
        self.audio_settings = flags.bits();
    }

    pub fn factory_checksum(&self) -> u32 {
        self.factory_checksum
    }

    pub fn user_checksum(&self) -> u32 {
        self.user_checksum
    }

    /// Checksums of the current contents as `(factory, user)`.
    pub fn compute_checksums(&self) -> (u32, u32) {
        let image = self.to_image();
        (
            section_checksum(&image[FACTORY_RANGE]),
            section_checksum(&image[USER_RANGE]),
        )
    }

    /// Recompute both checksums and store them in the record.
    pub fn update_checksums(&mut self) {
        let (factory, user) = self.compute_checksums();
        self.factory_checksum = factory;
        self.user_checksum = user;
    }

    pub fn verify_checksums(&self) -> ChecksumReport {
        let (factory_computed, user_computed) = self.compute_checksums();
        ChecksumReport {
            factory_stored: self.factory_checksum,
            factory_computed,
            user_stored: self.user_checksum,
            user_computed,
        }
    }
}
