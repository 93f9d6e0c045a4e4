//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

/// Default interval between checks in seconds.
pub const CHECK_INTERVAL_SECS: u64 = 300;

/// Default address lookup providers, in priority order.
pub const IP_APIS: [&str; 3] = [
    "https://api.ipify.org?format=json",
    "https://httpbin.org/ip",
    "https://api.ip.sb/jsonip",
];

/// Default geolocation URL template.
pub const LOCATION_API: &str =
    "http://ip-api.com/json/{ip}?fields=status,country,regionName,city,isp,query";

/// Default configuration file path.
pub const CONFIG_FILE: &str = "ipwatch.toml";

/// Default history file path.
pub const HISTORY_FILE: &str = "ip_history.json";

/// Default log file path.
pub const LOG_FILE: &str = "ip_monitor.log";

/// Default address providers as owned strings.
#[must_use]
pub fn ip_apis() -> Vec<String> {
    IP_APIS.iter().map(ToString::to_string).collect()
}

/// Default geolocation template as an owned string.
#[must_use]
pub fn location_api() -> String {
    LOCATION_API.to_string()
}
