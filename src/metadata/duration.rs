/// Parse a compact ISO-8601 duration ("PT1H2M10S") into total seconds.
///
/// Scans left to right: digits accumulate into a pending number, `T` switches
/// into time mode, and `H`/`M`/`S` commit the pending number only while in
/// time mode (so the `M` in a date part like "P3M" is ignored). Missing units
/// are zero; "PT0S" parses to 0.
pub fn parse_iso8601(duration: &str) -> u64 {
    let mut hours = 0u64;
    let mut minutes = 0u64;
    let mut seconds = 0u64;
    let mut num = String::new();
    let mut in_time = false;

    for ch in duration.chars() {
        match ch {
            '0'..='9' => num.push(ch),
            'P' => {}
            'T' => in_time = true,
            'H' if in_time => {
                hours = num.parse().unwrap_or(0);
                num.clear();
            }
            'M' if in_time => {
                minutes = num.parse().unwrap_or(0);
                num.clear();
            }
            'S' if in_time => {
                seconds = num.parse().unwrap_or(0);
                num.clear();
            }
            _ => {}
        }
    }

    hours * 3600 + minutes * 60 + seconds
}

/// Format seconds as a zero-padded clock string: "HH:MM:SS", or "MM:SS" when
/// there is no hour component.
pub fn format_clock(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
