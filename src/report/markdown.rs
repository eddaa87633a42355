//! Markdown report (`result.md`)

use super::display::display_path;
use super::model::ReportModel;
use crate::diff::{CategoryDelta, FileTable};
use crate::fmt::{format_change, format_bytes, format_optional_size};
use std::fmt::{self, Write as _};

/// Render the Markdown report
///
/// `html_report` is linked from the summary when given.
pub fn format_markdown_report(
    model: &ReportModel,
    html_report: Option<&str>,
) -> Result<String, fmt::Error> {
    let mut output = String::new();

    writeln!(output, "# IPA Size Comparison Report\n")?;

    writeln!(output, "## Packages")?;
    for package in [&model.old_package, &model.new_package] {
        writeln!(
            output,
            "- **{} package size**: {}",
            escape_markdown(&package.label),
            format_bytes(package.file_size)
        )?;
    }
    writeln!(output)?;

    writeln!(output, "## Size Change Summary\n")?;
    writeln!(
        output,
        "**Sum of category changes**: {}  ",
        format_change(model.category_diff_sum)
    )?;
    writeln!(
        output,
        "**Actual package change**: {}  ",
        format_change(model.package_size_diff)
    )?;
    writeln!(
        output,
        "**Installed size change**: {}  ",
        format_change(model.total_uncompressed_diff)
    )?;
    if let Some(warning) = &model.metadata_warning {
        writeln!(
            output,
            "**Unattributed (zip headers/metadata)**: {}  ",
            format_change(warning.metadata_diff)
        )?;
    }
    if let Some(link) = html_report {
        writeln!(output, "**📊 HTML report**: [open in browser]({})  ", link)?;
    }
    writeln!(output, "\n---\n")?;

    if model.is_unchanged() {
        writeln!(output, "*No resource category changed size.*")?;
        return Ok(output);
    }

    write_section(
        &mut output,
        model,
        "📈 Increased Resource Categories",
        "*Sorted by growth, largest first:*",
        &model.increased_categories,
    )?;
    writeln!(output, "---\n")?;
    write_section(
        &mut output,
        model,
        "📉 Decreased Resource Categories",
        "*Sorted by reduction, largest first:*",
        &model.decreased_categories,
    )?;

    Ok(output)
}

fn write_section(
    output: &mut String,
    model: &ReportModel,
    title: &str,
    subtitle: &str,
    deltas: &[CategoryDelta],
) -> fmt::Result {
    if deltas.is_empty() {
        return Ok(());
    }

    writeln!(output, "## {}\n", title)?;
    writeln!(output, "{}\n", subtitle)?;
    for delta in deltas {
        writeln!(
            output,
            "- **{}**: package {}, installed {}",
            escape_markdown(&delta.category.to_string()),
            format_change(delta.compressed_diff),
            format_change(delta.uncompressed_diff())
        )?;
    }
    writeln!(output)?;

    for delta in deltas {
        if let Some(table) = model.files(&delta.category) {
            write_file_table(output, delta, table)?;
        }
    }
    Ok(())
}

fn write_file_table(output: &mut String, delta: &CategoryDelta, table: &FileTable) -> fmt::Result {
    if table.files.is_empty() {
        return Ok(());
    }

    writeln!(
        output,
        "### 📄 {} - files (package {}, installed {})\n",
        escape_markdown(&delta.category.to_string()),
        format_change(delta.compressed_diff),
        format_change(delta.uncompressed_diff())
    )?;
    writeln!(output, "| File | Old size | New size | Change | Status |")?;
    writeln!(output, "|------|----------|----------|--------|--------|")?;

    for file in &table.files {
        writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            escape_markdown(&display_path(&file.path)),
            format_optional_size(file.old_size),
            format_optional_size(file.new_size),
            format_change(file.change),
            file.status.label()
        )?;
    }

    if table.is_truncated() {
        writeln!(
            output,
            "\n*Note: {} has {} files, showing the {} with significant changes*",
            escape_markdown(&delta.category.to_string()),
            table.total_files,
            table.shown()
        )?;
    }
    writeln!(output)
}

/// Backslash-escape characters that Markdown would read as emphasis,
/// links, inline HTML or table cell separators
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
