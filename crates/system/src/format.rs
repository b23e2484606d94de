use sysmon_core::ProcessSample;

/// Text shown in a ranked-list row that has no process to show.
pub const PLACEHOLDER: &str = "-------------";

const MIB: f64 = (1u64 << 20) as f64;

/// `"{name}: CPU {percent:.2}%"` — expects an already normalised percentage.
pub fn cpu_line(process: &ProcessSample) -> String {
    format!("{}: CPU {:.2}%", process.name, process.cpu_percent)
}

/// `"{name}: Memory {mib:.2} MB"`.
pub fn memory_line(process: &ProcessSample) -> String {
    format!("{}: Memory {:.2} MB", process.name, process.memory_bytes as f64 / MIB)
}

/// Format `ranked` with `line`, padded with [`PLACEHOLDER`] up to `rows` entries.
pub fn padded_rows(
    ranked: &[ProcessSample],
    rows: usize,
    line: fn(&ProcessSample) -> String,
) -> Vec<String> {
    ranked
        .iter()
        .take(rows)
        .map(line)
        .chain(std::iter::repeat_with(|| PLACEHOLDER.to_string()))
        .take(rows)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_line_two_decimals() {
        let p = ProcessSample::new("firefox", 12.3456, 0);
        assert_eq!(cpu_line(&p), "firefox: CPU 12.35%");
    }

    #[test]
    fn memory_line_in_mib() {
        let p = ProcessSample::new("code", 0.0, 512 * 1024 * 1024);
        assert_eq!(memory_line(&p), "code: Memory 512.00 MB");
    }

    #[test]
    fn short_lists_are_padded() {
        let ranked = vec![ProcessSample::new("a", 1.0, 0)];
        let rows = padded_rows(&ranked, 3, cpu_line);
        assert_eq!(rows, vec!["a: CPU 1.00%", PLACEHOLDER, PLACEHOLDER]);
    }

    #[test]
    fn long_lists_are_truncated() {
        let ranked: Vec<_> = (0..8).map(|i| ProcessSample::new(format!("p{i}"), 0.0, 0)).collect();
        assert_eq!(padded_rows(&ranked, 5, cpu_line).len(), 5);
    }
}
