use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::LicenseGroup;

const HEADLINE_MAX: usize = 60;
const NAMES_SHOWN: usize = 5;

/// Render a colored terminal report.
pub fn render(groups: &[LicenseGroup], path: &Path, verbose: bool, quiet: bool) {
    let total: usize = groups.iter().map(|g| g.dependencies.len()).sum();
    let unknown: usize = groups
        .iter()
        .filter(|g| g.is_unknown())
        .map(|g| g.dependencies.len())
        .sum();

    if quiet {
        println!(
            "Dependencies: {}  Groups: {}  Unknown: {}",
            total,
            groups.len(),
            if unknown > 0 {
                unknown.to_string().yellow()
            } else {
                unknown.to_string().green()
            },
        );
        return;
    }

    println!(
        "\n {} v{}",
        "license-grouper".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Production dependencies : {}", total));
    println!(" │  {:<48} │", format!("License groups          : {}", groups.len()));
    println!(
        " │  {:<48} │",
        format!("{}  Unknown license      : {:>4}", "⚠".yellow(), unknown)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if groups.is_empty() {
        return;
    }

    render_table(groups, verbose);
    println!();

    if verbose {
        for (i, group) in groups.iter().enumerate() {
            println!(" {} {}\n", format!("[{}]", i + 1).cyan().bold(), group.dependencies.join(", "));
            println!("{}\n", group.content.trim_end());
        }
    }
}

fn render_table(groups: &[LicenseGroup], verbose: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Count").add_attribute(Attribute::Bold),
            Cell::new("Dependencies").add_attribute(Attribute::Bold),
        ]);

    for (i, group) in groups.iter().enumerate() {
        let license_color = if group.is_unknown() {
            Color::Yellow
        } else {
            Color::Reset
        };

        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(truncate(group.headline(), HEADLINE_MAX)).fg(license_color),
            Cell::new(group.dependencies.len()).set_alignment(CellAlignment::Right),
            Cell::new(summarize_names(&group.dependencies, verbose)),
        ]);
    }

    println!("{}", table);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

fn summarize_names(names: &[String], verbose: bool) -> String {
    if verbose || names.len() <= NAMES_SHOWN {
        return names.join(", ");
    }
    format!(
        "{} (+{} more)",
        names[..NAMES_SHOWN].join(", "),
        names.len() - NAMES_SHOWN
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("MIT License", 60), "MIT License");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn test_summarize_names() {
        let names: Vec<String> = (1..=7).map(|i| format!("dep{}", i)).collect();
        assert_eq!(
            summarize_names(&names, false),
            "dep1, dep2, dep3, dep4, dep5 (+2 more)"
        );
        assert_eq!(summarize_names(&names, true).matches(", ").count(), 6);
        assert_eq!(summarize_names(&names[..2], false), "dep1, dep2");
    }
}
