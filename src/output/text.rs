//! Console rendering of the critical path.

use crate::aggregator::PathStep;
use crate::utils::config::PATH_LINE_PREFIX;
use std::io::{self, Write};

/// One ` + <frame>` line per frame, root to leaf
pub fn format_critical_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|frame| format!("{}{}\n", PATH_LINE_PREFIX, frame.as_ref()))
        .collect()
}

/// Like `format_critical_path`, with the sample count of each frame
pub fn format_critical_path_with_counts(steps: &[PathStep]) -> String {
    steps
        .iter()
        .map(|step| {
            let unit = if step.samples == 1 { "sample" } else { "samples" };
            format!(
                "{}{}  ({} {}, {:.1}%)\n",
                PATH_LINE_PREFIX, step.frame, step.samples, unit, step.percentage
            )
        })
        .collect()
}

/// Write already formatted lines to stdout
pub fn print_critical_path(rendered: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_critical_path() {
        let rendered = format_critical_path(&["a.B.c(B.java:1)", "a.B.d(B.java:2)"]);
        assert_eq!(rendered, " + a.B.c(B.java:1)\n + a.B.d(B.java:2)\n");
    }

    #[test]
    fn test_format_empty_path() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(format_critical_path(&empty), "");
    }

    #[test]
    fn test_format_with_counts() {
        let steps = vec![PathStep {
            frame: "a.B.c(B.java:1)".to_string(),
            samples: 3,
            percentage: 75.0,
        }];
        assert_eq!(
            format_critical_path_with_counts(&steps),
            " + a.B.c(B.java:1)  (3 samples, 75.0%)\n"
        );
    }

    #[test]
    fn test_format_single_sample() {
        let steps = vec![PathStep {
            frame: "a.B.c(B.java:1)".to_string(),
            samples: 1,
            percentage: 50.0,
        }];
        assert_eq!(
            format_critical_path_with_counts(&steps),
            " + a.B.c(B.java:1)  (1 sample, 50.0%)\n"
        );
    }
}
