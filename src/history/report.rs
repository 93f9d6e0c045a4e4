//! Human-readable history dump.

use std::fmt::Write;

use crate::observation::Observation;

/// Display format for observation timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the history as the numbered listing shown by the `history` command.
#[must_use]
pub fn render_history(history: &[Observation]) -> String {
    if history.is_empty() {
        return "No history recorded yet\n".to_string();
    }

    let mut out = format!(
        "\n=== IP change history ({} records) ===\n",
        history.len()
    );
    for (index, observation) in history.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{:2}. {}\n    IP: {}\n    Location: {}\n    ISP: {}\n\n",
            index + 1,
            observation.timestamp.format(TIMESTAMP_FORMAT),
            observation.address,
            observation.origin.place(),
            observation.origin.isp,
        );
    }
    out
}
