// Colored terminal summary of a report.
//
// Written to stderr so it can sit alongside the JSON report on stdout.

use colored::Colorize;

use super::report::Report;

/// Display a per-sector summary table.
pub fn display_summary(report: &Report) {
    if report.sectors.is_empty() {
        eprintln!("No sectors in the description document.");
        return;
    }

    eprintln!(
        "\n{}",
        format!("=== Sector Scores ({} sectors) ===", report.sectors.len()).bold()
    );
    eprintln!();

    eprintln!(
        "  {:<32} {:>8}  {:>7}  {:<24}",
        "Sector".dimmed(),
        "Keywords".dimmed(),
        "Total".dimmed(),
        "Top keyword".dimmed(),
    );
    eprintln!("  {}", "-".repeat(76).dimmed());

    for sector in &report.sectors {
        let total: u64 = sector.scores().iter().map(|&s| u64::from(s)).sum();
        let top = sector
            .top()
            .map(|(keyword, score)| format!("{keyword} ({score})"))
            .unwrap_or_else(|| "-".to_string());

        let name = super::truncate_chars(&sector.sector, 29);
        let total_str = format!("{total:>7}");
        let colored_total = if total == 0 {
            total_str.dimmed()
        } else if total >= 10 {
            total_str.bright_green()
        } else {
            total_str.normal()
        };

        eprintln!(
            "  {:<32} {:>8}  {}  {:<24}",
            name,
            sector.keywords().len(),
            colored_total,
            top,
        );
    }

    let unmatched = report
        .sectors
        .iter()
        .filter(|s| s.keywords().is_empty())
        .count();
    eprintln!();
    if unmatched > 0 {
        eprintln!(
            "  {} {} sectors matched no keywords",
            "~".yellow(),
            unmatched
        );
    }
}
