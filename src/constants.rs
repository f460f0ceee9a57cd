/// 24 * 60 * 60 - Number of seconds in a day
pub const SECONDS_PER_DAY: u64 = 86400; // 24 * 60 * 60

// PDA SEEDS

/// Seed for the singleton LedgerState PDA
pub const LEDGER_SEED: &[u8] = b"ledger";
/// Seed for the per-user CheckInRecord PDA
pub const CHECK_IN_SEED: &[u8] = b"check_in";

// CHECK-IN WINDOW

/// Default length of the check-in window in seconds.
/// A window of one second means a user may check in once per distinct cluster timestamp.
pub const DEFAULT_TIME_UNIT: u64 = 1;

/// The longest window the owner may configure (one year)
pub const MAX_TIME_UNIT: u64 = 365 * SECONDS_PER_DAY;

/// Logic module version written by `initialize`
pub const INITIAL_MODULE_VERSION: u32 = 1;

// STORAGE LAYOUT
// Byte offsets below exclude the 8 byte Anchor account discriminator.

/// Size of one reserved storage slot in bytes
pub const SLOT_SIZE: usize = 32;
/// Number of reserved slots kept at the tail of LedgerState
pub const LEDGER_RESERVED_SLOTS: usize = 40;
/// Reserved bytes kept at the tail of each CheckInRecord
pub const RECORD_RESERVED_BYTES: usize = 64;

pub const LEDGER_OWNER_OFFSET: usize = 0;
pub const LEDGER_PENDING_OWNER_OFFSET: usize = 32;
pub const LEDGER_INITIALIZED_OFFSET: usize = 64;
pub const LEDGER_PAUSED_OFFSET: usize = 65;
pub const LEDGER_ENTERED_OFFSET: usize = 66;
pub const LEDGER_BUMP_OFFSET: usize = 67;
pub const LEDGER_TIME_UNIT_OFFSET: usize = 68;
pub const LEDGER_LOGIC_MODULE_OFFSET: usize = 76;
pub const LEDGER_MODULE_VERSION_OFFSET: usize = 108;
pub const LEDGER_RESERVED_OFFSET: usize = 112;
/// Serialized LedgerState size, discriminator excluded
pub const LEDGER_STATE_SIZE: usize = LEDGER_RESERVED_OFFSET + LEDGER_RESERVED_SLOTS * SLOT_SIZE;

pub const RECORD_USER_OFFSET: usize = 0;
pub const RECORD_COUNT_OFFSET: usize = 32;
pub const RECORD_LAST_TIMESTAMP_OFFSET: usize = 40;
pub const RECORD_BUMP_OFFSET: usize = 48;
pub const RECORD_RESERVED_OFFSET: usize = 49;
/// Serialized CheckInRecord size, discriminator excluded
pub const CHECK_IN_RECORD_SIZE: usize = RECORD_RESERVED_OFFSET + RECORD_RESERVED_BYTES;
