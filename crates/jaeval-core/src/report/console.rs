//! Human-readable run output on stderr.

use crate::report::RunArtifacts;

/// Format a single progress line for display. Deterministic, unit-testable.
#[must_use]
pub fn format_progress_line(done: usize, total: usize) -> String {
    format!("Evaluating {}/{}...", done, total)
}

/// For large runs, emit at most every this many examples (10% step).
pub(crate) fn progress_step(total: usize) -> usize {
    if total <= 10 {
        1
    } else {
        std::cmp::max(1, total / 10)
    }
}

/// Emit a throttled progress line to stderr. Call after each example.
pub fn emit_progress(done: usize, total: usize) {
    if total <= 1 {
        return;
    }
    let step = progress_step(total);
    if done == total || done % step == 0 || done == 1 {
        eprintln!("{}", format_progress_line(done, total));
    }
}

pub fn print_summary(artifacts: &RunArtifacts) {
    eprintln!();
    for row in &artifacts.examples {
        let icon = if row.exact_match >= 1.0 { "✅" } else { "❌" };
        eprintln!(
            "{} {:<24} em={:.2} f1={:.2} ({:.1}s)",
            icon,
            row.qid,
            row.exact_match,
            row.f1,
            row.duration_ms as f64 / 1000.0
        );
    }

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "Task {} | model {} ({}) | {} examples",
        artifacts.task,
        artifacts.model,
        artifacts.provider,
        artifacts.examples.len()
    );
    for m in &artifacts.aggregate {
        let direction = if m.higher_is_better { "↑" } else { "↓" };
        eprintln!("  {:<12} {:.4} {}", m.name, m.value, direction);
    }
}

#[cfg(test)]
mod tests {
    use super::{format_progress_line, progress_step};

    #[test]
    fn progress_line_contains_done_and_total() {
        let s = format_progress_line(3, 10);
        assert!(s.contains("3/10"), "expected '3/10' in {:?}", s);
    }

    #[test]
    fn progress_step_logic() {
        assert_eq!(progress_step(5), 1);
        assert_eq!(progress_step(10), 1);
        assert_eq!(progress_step(25), 2);
        assert_eq!(progress_step(100), 10);
    }
}
