// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Byte layout of the settings blob. All integers are little-endian.

use core::ops::Range;

/// Size of the whole record in bytes.
pub const RECORD_SIZE: usize = 0x100;

// Security section (RC4-encrypted at rest, carried opaque)
pub const SECURITY_HASH: usize = 0x00;
pub const SECURITY_HASH_LEN: usize = 20;
pub const CONFOUNDER: usize = 0x14;
pub const CONFOUNDER_LEN: usize = 8;
pub const HDD_KEY: usize = 0x1C;
pub const HDD_KEY_LEN: usize = 16;
pub const REGION_FLAGS: usize = 0x2C;

// Factory section
pub const FACTORY_CHECKSUM: usize = 0x30;
pub const SERIAL: usize = 0x34;
pub const SERIAL_LEN: usize = 12;
pub const MAC_ADDRESS: usize = 0x40;
pub const MAC_ADDRESS_LEN: usize = 6;
pub const PADDING_46: usize = 0x46;
pub const PADDING_46_LEN: usize = 2;
pub const ONLINE_KEY: usize = 0x48;
pub const ONLINE_KEY_LEN: usize = 16;
pub const VIDEO_STANDARD: usize = 0x58;
pub const PADDING_5C: usize = 0x5C;

// User section
pub const USER_CHECKSUM: usize = 0x60;
pub const TZ_BIAS: usize = 0x64;
pub const TZ_STD_NAME: usize = 0x68;
pub const TZ_DLT_NAME: usize = 0x6C;
pub const TZ_NAME_LEN: usize = 4;
pub const PADDING_70: usize = 0x70;
pub const PADDING_80: usize = 0x80;
pub const PADDING_8_LEN: usize = 8;
pub const TZ_STD_START: usize = 0x78;
pub const TZ_DLT_START: usize = 0x7C;
pub const TZ_STD_BIAS: usize = 0x88;
pub const TZ_DLT_BIAS: usize = 0x8C;
pub const LANGUAGE: usize = 0x90;
pub const VIDEO_SETTINGS: usize = 0x94;
pub const AUDIO_SETTINGS: usize = 0x98;
pub const PARENTAL_GAME: usize = 0x9C;
pub const PARENTAL_PASSCODE: usize = 0xA0;
pub const PARENTAL_MOVIE: usize = 0xA4;
pub const LIVE_IP: usize = 0xA8;
pub const LIVE_DNS: usize = 0xAC;
pub const LIVE_GATEWAY: usize = 0xB0;
pub const LIVE_SUBNET: usize = 0xB4;
pub const UNKNOWN_B8: usize = 0xB8;
pub const DVD_ZONE: usize = 0xBC;
pub const HISTORY: usize = 0xC0;
pub const HISTORY_LEN: usize = 64;

/// Bytes covered by the factory checksum (serial through padding, 0x2C bytes).
pub const FACTORY_RANGE: Range<usize> = SERIAL..USER_CHECKSUM;

/// Bytes covered by the user checksum (time zone bias through DVD zone, 0x5C bytes).
pub const USER_RANGE: Range<usize> = TZ_BIAS..HISTORY;

const _: () = assert!(HISTORY + HISTORY_LEN == RECORD_SIZE);
const _: () = assert!(USER_CHECKSUM - SERIAL == 0x2C);
const _: () = assert!(HISTORY - TZ_BIAS == 0x5C);
