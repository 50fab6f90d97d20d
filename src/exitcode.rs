//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (missing column, empty corpus, unexpected response)
pub const DATAERR: i32 = 65;

/// Cannot open input (dataset not found)
pub const NOINPUT: i32 = 66;

/// Service unavailable (rate limited, service error, network failure)
pub const UNAVAILABLE: i32 = 69;

/// Input/output error
pub const IOERR: i32 = 74;

/// Permission denied (classifier rejected the credentials)
pub const NOPERM: i32 = 77;

/// Configuration error
pub const CONFIG: i32 = 78;
