// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: A/V settings blob codec and flag engine
//! OWNERS: @runtime
//! STATUS: Functional (host-first)
//! API_STABILITY: Stable (v1.0)
//! TEST_COVERAGE: Unit tests per module + proptest invariants + tests/eeprom_host
//!
//! PUBLIC API:
//!   - SettingsRecord: fixed 0x100-byte record, decode/encode and checksums
//!   - RecordCodec: load/store of the record against an NvStore
//!   - FlagEngine: lazily loaded typed access to video/audio flags
//!   - Resolution / AspectRatio / AudioMode: flag groups
//!   - Unavailable / Failed / SaveError / LayoutError: Error types
//!
//! DEPENDENCIES:
//!   - nvram: keyed non-volatile setting store
//!   - bitflags: raw masks of the video/audio words
//!
//! INVARIANTS:
//!   - Engine setters never leave both aspect bits or both primary audio bits set
//!   - Codec bits are only set through the engine while surround is active
//!   - Bytes outside the video/audio words pass through load/store unchanged

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod checksum;
pub mod codec;
pub mod engine;
pub mod flags;
pub mod layout;
pub mod record;

pub use checksum::section_checksum;
pub use codec::{Failed, RecordCodec, Unavailable};
pub use engine::{EngineState, FlagEngine, SaveError};
pub use flags::{AspectRatio, AudioFlags, AudioMode, ParseFlagError, Resolution, VideoFlags};
pub use layout::RECORD_SIZE;
pub use record::{ChecksumReport, LayoutError, SettingsRecord};

pub use nvram::{NvStore, SettingKey, StoreError, EEPROM_KEY};
