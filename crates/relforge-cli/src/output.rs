//! Formatted output helpers for CLI commands.

/// Formats a byte count into a human-readable string (e.g., "128 MiB").
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Formats the size reduction between an input and output byte count.
#[must_use]
pub fn format_savings(bytes_in: u64, bytes_out: u64) -> String {
    if bytes_out >= bytes_in {
        return "no reduction".to_owned();
    }
    let saved = bytes_in - bytes_out;
    #[allow(clippy::cast_precision_loss)]
    let percent = saved as f64 / bytes_in as f64 * 100.0;
    format!("{} saved ({percent:.1}%)", format_bytes(saved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_displays_bytes() {
        assert_eq!(format_bytes(512), "512 B");
    }

    #[test]
    fn format_bytes_displays_kib() {
        assert_eq!(format_bytes(2048), "2.0 KiB");
    }

    #[test]
    fn format_bytes_displays_mib() {
        assert_eq!(format_bytes(134_217_728), "128.0 MiB");
    }

    #[test]
    fn format_savings_reports_percentage() {
        assert_eq!(format_savings(1000, 750), "250 B saved (25.0%)");
    }

    #[test]
    fn format_savings_handles_growth() {
        assert_eq!(format_savings(100, 120), "no reduction");
    }
}
