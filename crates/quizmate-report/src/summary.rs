//! Human-readable performance summaries.

/// Qualitative performance level for a score percentage.
pub fn performance_level(score: f64) -> &'static str {
    if score >= 90.0 {
        "Outstanding"
    } else if score >= 80.0 {
        "Excellent"
    } else if score >= 70.0 {
        "Good"
    } else if score >= 60.0 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}

/// One-line feedback on how many questions were missed.
pub fn performance_blurb(correct: u32, total: u32) -> String {
    let wrong = total.saturating_sub(correct);
    if total > 0 && wrong == 0 {
        "Perfect score! You got all questions right.".to_string()
    } else if wrong == 1 {
        "Almost perfect! Just one question to review.".to_string()
    } else {
        format!("You got {wrong} questions wrong. Review them to improve.")
    }
}

/// Format a duration in seconds as `"3m 21s"`.
pub fn format_duration(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(performance_level(95.0), "Outstanding");
        assert_eq!(performance_level(90.0), "Outstanding");
        assert_eq!(performance_level(85.0), "Excellent");
        assert_eq!(performance_level(72.5), "Good");
        assert_eq!(performance_level(60.0), "Fair");
        assert_eq!(performance_level(59.9), "Needs Improvement");
    }

    #[test]
    fn blurb_counts_wrong_answers() {
        assert!(performance_blurb(3, 3).starts_with("Perfect score"));
        assert!(performance_blurb(2, 3).starts_with("Almost perfect"));
        assert_eq!(
            performance_blurb(1, 3),
            "You got 2 questions wrong. Review them to improve."
        );
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0), "0m 0s");
        assert_eq!(format_duration(95), "1m 35s");
        assert_eq!(format_duration(3600), "60m 0s");
    }
}
