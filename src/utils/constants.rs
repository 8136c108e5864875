//! Shared configuration constants for cedula_scrape
//!
//! Default values for the lookup protocol, pacing and output locations,
//! kept in one place so the config defaults and the CLI agree.

/// Public query form for voter-registry lookups
pub const QUERY_ENDPOINT: &str = "https://verificate.votopanama.net/";

/// Default identifier list file (one cedula per line)
pub const DEFAULT_INPUT_PATH: &str = "cedulas.txt";

/// Default CSV output file, truncated at the start of every run
pub const DEFAULT_OUTPUT_PATH: &str = "resultados_cedulas.csv";

/// Identifiers used when the input file is missing, unreadable or empty
pub const FALLBACK_IDENTIFIERS: &[&str] = &["8-930-2006", "8-625-6587"];

/// Navigation timeout: 30 seconds
///
/// Covers `goto` plus the load event of the query form.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Element wait timeout: 10 seconds
///
/// Applies separately to the input-field wait and the result-card wait.
pub const DEFAULT_ELEMENT_TIMEOUT_SECS: u64 = 10;

/// Poll interval while waiting for an element to appear
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Pause after every identifier, found or not
///
/// Keeps the remote form from seeing request bursts.
pub const DEFAULT_PACING_DELAY_MS: u64 = 2000;

/// CDP request timeout passed to chromiumoxide
pub const BROWSER_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable that forces a specific Chrome/Chromium executable
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// How long the page's resource count must hold still before navigation
/// counts as settled
pub const NETWORK_QUIET_WINDOW_MS: u64 = 500;
