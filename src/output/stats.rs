//! Statistics reporting.

use console::style;

use crate::download::{CollectionState, RunSummary};

/// Print statistics for a single blog.
pub fn print_collection_stats(state: &CollectionState) {
    println!();
    println!("{}", style(format!("Statistics for {}:", state.handle)).bold());
    println!("  Pages:  {}", state.pages_fetched);
    println!("  Posts:  {}", state.posts_seen);
    println!("  Media:  {} queued", state.jobs_queued);
}

/// Print statistics for the whole run.
pub fn print_run_stats(summary: &RunSummary) {
    let downloads = &summary.downloads;

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Blogs processed: {}", summary.collections_processed());
    if summary.collections_failed() > 0 {
        println!(
            "  Blogs failed:    {} ({})",
            style(summary.collections_failed()).red(),
            summary.failed.join(", ")
        );
    }
    println!("  Media queued:    {}", summary.total_jobs_queued());
    println!("  Saved:   {} ({})", style(downloads.saved).green(), format_bytes(downloads.bytes));
    println!("  Skipped: {} (already present)", style(downloads.skipped).yellow());
    if downloads.failed > 0 {
        println!("  Failed:  {}", style(downloads.failed).red());
    }
    println!("{}", style("═".repeat(50)).dim());
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
