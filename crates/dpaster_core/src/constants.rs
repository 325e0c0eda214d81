//! Shared constants used across dpaster crates.

/// Default paste API endpoint (dpaste.com v2).
pub const DEFAULT_API_URL: &str = "https://dpaste.com/api/v2/";

/// Filename hint used when content arrives on standard input.
pub const STDIN_SENTINEL: &str = "<stdin>";

/// Syntax label used whenever no confident or mappable guess exists.
pub const FALLBACK_SYNTAX: &str = "text";

/// Suffix appended to a paste URL to get the raw-text view.
pub const RAW_URL_SUFFIX: &str = ".txt";

/// Bounds accepted by the service for `expiry_days`.
pub const MIN_EXPIRY_DAYS: u32 = 1;
/// Upper bound accepted by the service for `expiry_days`.
pub const MAX_EXPIRY_DAYS: u32 = 365;

/// Config directory name under the user's config home.
pub const CONFIG_DIR_NAME: &str = "dpaster";
/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "dpaster.conf";

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "DPASTER_CONFIG";
/// Environment variable overriding the paste API endpoint.
pub const API_URL_ENV: &str = "DPASTER_API_URL";
