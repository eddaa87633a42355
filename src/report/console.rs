//! Styled terminal summary

use super::display::{display_path, truncate_str};
use super::model::ReportModel;
use crate::diff::CategoryDelta;
use crate::fmt::{format_bytes, format_change, CHART, DECREASE, INCREASE, PACKAGE, WARNING};
use console::style;
use std::fmt::{self, Write as _};

/// Rows listed per category in the terminal
pub const CONSOLE_FILES_PER_CATEGORY: usize = 3;

const CATEGORY_COLUMN_WIDTH: usize = 56;

/// Format the comparison summary for console output
pub fn format_console_report(model: &ReportModel) -> Result<String, fmt::Error> {
    let mut output = String::new();

    writeln!(output, "\n{} Package Sizes", PACKAGE)?;
    for package in [&model.old_package, &model.new_package] {
        writeln!(
            output,
            "   {:<20} {}",
            truncate_str(&package.label, 20),
            style(format_bytes(package.file_size)).cyan()
        )?;
    }

    writeln!(output, "\n{} Overall Change", CHART)?;
    writeln!(
        output,
        "   Package:    {}",
        styled_change(model.package_size_diff)
    )?;
    writeln!(
        output,
        "   Installed:  {}",
        styled_change(model.total_uncompressed_diff)
    )?;
    writeln!(
        output,
        "   Categories: {}",
        styled_change(model.category_diff_sum)
    )?;
    if let Some(warning) = &model.metadata_warning {
        writeln!(
            output,
            "   {} {} not attributable to any file (zip headers/metadata)",
            WARNING,
            style(format_change(warning.metadata_diff)).yellow()
        )?;
    }

    if model.is_unchanged() {
        writeln!(output, "\n   {}", style("No resource category changed size").dim())?;
    }
    write_section(&mut output, model, INCREASE, "Increased", &model.increased_categories)?;
    write_section(&mut output, model, DECREASE, "Decreased", &model.decreased_categories)?;

    output.push('\n');
    Ok(output)
}

fn write_section(
    output: &mut String,
    model: &ReportModel,
    icon: impl fmt::Display,
    title: &str,
    deltas: &[CategoryDelta],
) -> fmt::Result {
    if deltas.is_empty() {
        return Ok(());
    }

    writeln!(output, "\n{} {}", icon, style(title).bold())?;
    for delta in deltas {
        writeln!(
            output,
            "   {:<width$} {:>12}  {}",
            truncate_str(&delta.category.to_string(), CATEGORY_COLUMN_WIDTH),
            styled_change(delta.compressed_diff),
            style(format!("installed {}", format_change(delta.uncompressed_diff()))).dim(),
            width = CATEGORY_COLUMN_WIDTH
        )?;

        if let Some(table) = model.files(&delta.category) {
            for file in table.files.iter().take(CONSOLE_FILES_PER_CATEGORY) {
                writeln!(
                    output,
                    "      {} {} ({})",
                    style("·").dim(),
                    style(display_path(&file.path)).dim(),
                    file.status.label()
                )?;
            }
        }
    }
    Ok(())
}

fn styled_change(change: i64) -> console::StyledObject<String> {
    let text = format_change(change);
    match change.signum() {
        1 => style(text).red(),
        -1 => style(text).green(),
        _ => style(text).dim(),
    }
}
