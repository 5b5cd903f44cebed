//! Display formatting for bitrates and timestamps

/// Render a bits-per-second value with the nearest sensible unit.
///
/// Values below 1 kbps are shown in bps, below 1 Mbps as whole kbps,
/// and everything larger with one decimal place.
pub fn humanize_bitrate(bits_per_second: u64) -> String {
    const KILO: f64 = 1_000.0;
    const MEGA: f64 = 1_000_000.0;
    const GIGA: f64 = 1_000_000_000.0;

    let bps = bits_per_second as f64;
    if bps < KILO {
        format!("{} bps", bits_per_second)
    } else if bps < MEGA {
        format!("{:.0} kbps", bps / KILO)
    } else if bps < GIGA {
        format!("{:.1} Mbps", bps / MEGA)
    } else {
        format!("{:.1} Gbps", bps / GIGA)
    }
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour upwards.
///
/// Negative and non-finite inputs render as `0:00`.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bitrate_units() {
        assert_eq!(humanize_bitrate(800), "800 bps");
        assert_eq!(humanize_bitrate(128_000), "128 kbps");
        assert_eq!(humanize_bitrate(2_400_000), "2.4 Mbps");
        assert_eq!(humanize_bitrate(1_500_000_000), "1.5 Gbps");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(7.9), "0:07");
        assert_eq!(format_timestamp(125.0), "2:05");
        assert_eq!(format_timestamp(3_725.0), "1:02:05");
        assert_eq!(format_timestamp(f64::NAN), "0:00");
        assert_eq!(format_timestamp(-3.0), "0:00");
    }
}
