use unicode_width::UnicodeWidthStr;

use crate::metadata::{duration, VideoRecord};
use crate::transcript::{TranscriptRecord, NO_TRANSCRIPT_SENTINEL};

/// Truncate a string to fit within max_width (respecting unicode width).
fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + cw + 3 > max_width {
            result.push_str("...");
            break;
        }
        result.push(ch);
        width += cw;
    }
    result
}

/// Pad to a display width unicode-aware ({:<N} pads by char count, which
/// misaligns wide Hangul/CJK titles).
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    for _ in w..width {
        out.push(' ');
    }
    out
}

/// Render a view count with thousands separators.
pub fn format_views(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Print the comparison grid, one numbered row per video.
pub fn print_video_grid(records: &[VideoRecord]) {
    if records.is_empty() {
        println!("No videos found.");
        return;
    }

    println!(
        "{} video{}:\n",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );

    println!(
        "  {:>3} {} {} {:<12} {:>13} {:>9} {:>9}",
        "#",
        pad("TITLE", 42),
        pad("CHANNEL", 16),
        "PUBLISHED",
        "VIEWS",
        "COMMENTS",
        "LENGTH"
    );
    println!("  {}", "-".repeat(110));

    for (i, r) in records.iter().enumerate() {
        println!(
            "  {:>3} {} {} {:<12} {:>13} {:>9} {:>9}",
            i + 1,
            pad(&truncate(&r.title, 40), 42),
            pad(&truncate(&r.channel_name, 14), 16),
            r.published_date,
            format_views(r.view_count),
            format_views(r.comment_count),
            duration::format_clock(r.duration_seconds),
        );
        println!("      {}", r.url);
        if !r.thumbnail_url.is_empty() {
            println!("      thumb: {}", r.thumbnail_url);
        }
        println!();
    }
}

/// Print a post-collection summary: per-record status, title, and URL (the
/// transcript text itself goes to the export files, not the terminal).
pub fn print_transcript_summary(records: &[TranscriptRecord]) {
    if records.is_empty() {
        println!("No transcripts collected.");
        return;
    }

    println!(
        "Collected {} transcript{}:\n",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );

    for r in records {
        let status = if r.text == NO_TRANSCRIPT_SENTINEL {
            "none "
        } else if r.text.starts_with("(에러:") {
            "error"
        } else {
            "ok   "
        };
        println!("  [{status}] {}", truncate(&r.title, 60));
        println!("          {}\n", r.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_views_with_separators() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(1000), "1,000");
        assert_eq!(format_views(1234567), "1,234,567");
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate("short", 40), "short");
        let long = "a".repeat(50);
        let t = truncate(&long, 10);
        assert!(t.ends_with("..."));
        assert!(UnicodeWidthStr::width(t.as_str()) <= 10);
        // Hangul is double-width
        let t = truncate("가나다라마바사아자차", 10);
        assert!(UnicodeWidthStr::width(t.as_str()) <= 10);
    }

    #[test]
    fn pads_to_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(UnicodeWidthStr::width(pad("가나", 6).as_str()), 6);
    }
}
