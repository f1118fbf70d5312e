//! cleartool-specific constants
//!
//! Centralized definitions for command names, flags, and the fixed phrases
//! cleartool writes into history output.

/// cleartool binary name
pub const CLEARTOOL_COMMAND: &str = "cleartool";

/// cleartool subcommands
pub mod commands {
    pub const LSHISTORY: &str = "lshistory";
}

/// cleartool command flags
pub mod flags {
    /// Recurse into directories below the given paths
    pub const RECURSE: &str = "-r";
    /// Only report events after the given date
    pub const SINCE: &str = "-since";
    /// Output format string
    pub const FORMAT: &str = "-fmt";
    /// Restrict to a branch type (`brtype:<name>`)
    pub const BRANCH: &str = "-branch";
    /// Exclude checkout events
    pub const NO_CHECKOUTS: &str = "-nco";
    /// Prefix for branch type selectors
    pub const BRANCH_TYPE_PREFIX: &str = "brtype:";
}

/// Formats of dates exchanged with cleartool
pub mod dates {
    /// Date token produced by `%Nd` in the history format (e.g. `20070906.091701`)
    pub const HISTORY_TIMESTAMP: &str = "%Y%m%d.%H%M%S";
    /// Date accepted by `-since` (e.g. `6-sep-2007.09:17:01`)
    pub const SINCE: &str = "%-d-%b-%Y.%H:%M:%S";
}

/// Event kinds as written in the `%e` field
pub mod events {
    /// Start of the phrase emitted for branch removal
    pub const DESTROY_SUB_BRANCH: &str = "destroy sub-branch";
    /// End of the phrase emitted for branch removal
    pub const OF_BRANCH: &str = "of branch";
}

/// Operation codes as written in the `%o` field
pub mod operations {
    pub const MKELEM: &str = "mkelem";
    pub const RMELEM: &str = "rmelem";
    pub const CHECKIN: &str = "checkin";
    pub const MKBRANCH: &str = "mkbranch";
    pub const RMBRANCH: &str = "rmbranch";
}

/// Diagnostic prefixes cleartool interleaves with regular output
pub mod diagnostics {
    pub const ERROR_PREFIX: &str = "cleartool: Error:";
    pub const WARNING_PREFIX: &str = "cleartool: Warning:";
}
