//! CLI Exit Code Registry
//!
//! Single source of truth for `xojt` exit codes. Scripts rely on them.
//!
//! | Code | Description                                   |
//! |------|-----------------------------------------------|
//! | 0    | Success                                       |
//! | 1    | General error (unspecified)                   |
//! | 2    | CLI usage error (bad args, bad unit index)    |
//! | 3    | I/O error (settings or template file)         |
//! | 4    | Rejected value (bad size, color, background)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Settings or template file could not be read/written.
pub const EXIT_IO: u8 = 3;

/// A value was rejected by the template model.
pub const EXIT_VALUE: u8 = 4;
