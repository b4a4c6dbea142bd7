//! Terminal colorization for the class report
//!
//! Applies ANSI escape codes to report lines using crossterm.

use codenav::structure::{CLASS_HEADER_SUFFIX, PARENT_HEADING, REFERENCE_HEADING};
use crossterm::style::{Color, Stylize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Parents,
    References,
}

/// Colorize a class report using ANSI escape codes
///
/// - Class names: Red, bold
/// - Parent classes: Blue
/// - Reference classes: Green
/// - Headings: Default (terminal color)
pub fn colorize_report(report: &str) -> String {
    let mut result = String::with_capacity(report.len() * 2);
    let mut section = Section::None;

    for line in report.lines() {
        if let Some(name) = line.strip_suffix(CLASS_HEADER_SUFFIX) {
            section = Section::None;
            result.push_str(&format!(
                "{}{}",
                name.to_string().with(Color::Red).bold(),
                CLASS_HEADER_SUFFIX
            ));
        } else if line == PARENT_HEADING {
            section = Section::Parents;
            result.push_str(line);
        } else if line == REFERENCE_HEADING {
            section = Section::References;
            result.push_str(line);
        } else if let Some(name) = line.strip_prefix("\t\t") {
            let color = match section {
                Section::Parents => Some(Color::Blue),
                Section::References => Some(Color::Green),
                Section::None => None,
            };
            match color {
                Some(color) => result.push_str(&format!("\t\t{}", name.to_string().with(color))),
                None => result.push_str(line),
            }
        } else {
            result.push_str(line);
        }
        result.push('\n');
    }

    // Remove trailing newline to match input format
    if !report.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}
