//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Blog Archiver                                     ║
║     Posts, likes and media, page by page              ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(blogs: &[String], feed: &str, directory: &str, workers: usize) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Blogs:     {}", blogs.join(", "));
    println!("  Feed:      {}", feed);
    println!("  Directory: {}", directory);
    if workers == 0 {
        println!("  Media:     {}", style("disabled").dim());
    } else {
        println!("  Workers:   {}", workers);
    }
    println!();
}
