//! Time formatting helpers.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render a duration in seconds as its two largest units, e.g. `3d 0h` or `1m 1s`.
pub fn format_duration(secs: u64) -> String {
    let Some(i) = UNITS.iter().position(|(size, _)| secs >= *size) else {
        return "0s".to_string();
    };
    let (major, major_name) = UNITS[i];
    match UNITS.get(i + 1) {
        Some((minor, minor_name)) => {
            format!("{}{major_name} {}{minor_name}", secs / major, (secs % major) / minor)
        }
        None => format!("{secs}s"),
    }
}
