//! Standard output utilities for consistent command formatting

use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};

/// Display a section header with an underline
pub fn section_header_with_line(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Display a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        println!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        println!("{} {}", prefix.dimmed(), label);
    }
}

/// Tree section with nested items
pub fn tree_section(title: &str, items: Vec<(&str, String)>, is_last: bool) {
    tree_item(is_last, title, None);
    let continuation = if is_last { "   " } else { "│  " };

    for (i, (label, value)) in items.iter().enumerate() {
        let prefix = if i == items.len() - 1 { "└─" } else { "├─" };
        println!(
            "{}{} {}: {}",
            continuation.dimmed(),
            prefix.dimmed(),
            label,
            value
        );
    }
}

/// Create a standard table with our preferred styling
pub fn create_standard_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Create a standard header cell
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(TableColor::Cyan)
}

/// Format a number with thousands separator
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// `part` as a percentage of `total`, "0.0%" when there is nothing to count
pub fn format_share(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(0, 0), "0.0%");
        assert_eq!(format_share(1, 4), "25.0%");
    }
}
