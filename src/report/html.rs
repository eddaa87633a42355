//! Self-contained HTML report (`ipa_comparison_report.html`)

use super::display::display_path;
use super::model::ReportModel;
use crate::diff::{CategoryDelta, FileStatus};
use crate::fmt::{format_bytes, format_change, format_optional_size};
use std::fmt::{self, Write as _};

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f7fa; color: #2c3e50; margin: 0; padding: 20px; }
.container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 10px; padding: 30px; box-shadow: 0 2px 10px rgba(0,0,0,0.08); }
h1 { text-align: center; border-bottom: 3px solid #3498db; padding-bottom: 15px; }
.info-grid { display: flex; gap: 20px; justify-content: center; flex-wrap: wrap; }
.info-card { background: #f8f9fa; border: 1px solid #dee2e6; border-radius: 8px; padding: 12px 20px; }
.summary-box { background: #f8f9fa; border: 1px solid #dee2e6; border-radius: 8px; margin: 20px 0; padding: 20px; text-align: center; }
.summary-stats { display: flex; justify-content: center; flex-wrap: wrap; gap: 40px; }
.stat-number { display: block; font-size: 1.6em; font-weight: bold; }
.stat-label { font-size: 0.9em; }
.increase { color: #e74c3c; }
.decrease { color: #27ae60; }
.warning { background: #fff3cd; color: #856404; border-radius: 6px; padding: 10px; margin-top: 15px; }
details.resource-item { border: 1px solid #dee2e6; border-radius: 6px; margin-bottom: 10px; background: white; }
details.resource-item summary { cursor: pointer; padding: 15px 20px; display: flex; justify-content: space-between; }
.badge { color: white; border-radius: 4px; padding: 4px 10px; margin-left: 6px; font-weight: bold; }
.badge.package { background: #2196f3; }
.badge.installed { background: #e74c3c; }
.file-table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
.file-table th { background: #34495e; color: white; padding: 10px; text-align: left; }
.file-table td { padding: 8px 10px; border-bottom: 1px solid #dee2e6; }
.file-path { font-family: 'SF Mono', Monaco, monospace; font-size: 0.85em; }
.status-added { color: #155724; }
.status-modified { color: #856404; }
.status-removed { color: #721c24; }
.note { color: #6c757d; font-style: italic; padding: 10px 20px; }
"#;

/// Render the HTML report
pub fn format_html_report(model: &ReportModel) -> Result<String, fmt::Error> {
    let mut output = String::new();

    writeln!(output, "<!DOCTYPE html>")?;
    writeln!(output, "<html lang=\"en\">\n<head>")?;
    writeln!(output, "<meta charset=\"UTF-8\">")?;
    writeln!(
        output,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(output, "<title>IPA Size Comparison Report</title>")?;
    writeln!(output, "<style>{}</style>\n</head>\n<body>", STYLE)?;
    writeln!(output, "<div class=\"container\">")?;
    writeln!(output, "<h1>📊 IPA Size Comparison Report</h1>")?;

    writeln!(output, "<div class=\"info-grid\">")?;
    for package in [&model.old_package, &model.new_package] {
        writeln!(
            output,
            "<div class=\"info-card\"><strong>{}</strong> package size: {}</div>",
            escape_html(&package.label),
            format_bytes(package.file_size)
        )?;
    }
    writeln!(output, "</div>")?;

    writeln!(output, "<div class=\"summary-box\">\n<h3>📈 Overall Change</h3>")?;
    writeln!(output, "<div class=\"summary-stats\">")?;
    write_stat(&mut output, model.package_size_diff, "Package size change")?;
    write_stat(&mut output, model.total_uncompressed_diff, "Installed size change")?;
    writeln!(output, "</div>")?;
    if let Some(warning) = &model.metadata_warning {
        writeln!(
            output,
            "<div class=\"warning\">⚠️ {} of the package change is zip headers/metadata, not file contents</div>",
            format_change(warning.metadata_diff)
        )?;
    }
    writeln!(output, "</div>")?;

    write_section(
        &mut output,
        model,
        "📈 Increased Resource Categories",
        &model.increased_categories,
    )?;
    write_section(
        &mut output,
        model,
        "📉 Decreased Resource Categories",
        &model.decreased_categories,
    )?;

    writeln!(output, "</div>\n</body>\n</html>")?;
    Ok(output)
}

fn write_stat(output: &mut String, change: i64, label: &str) -> fmt::Result {
    writeln!(
        output,
        "<div><span class=\"stat-number {}\">{}</span><span class=\"stat-label\">{}</span></div>",
        change_class(change),
        format_change(change),
        label
    )
}

fn write_section(
    output: &mut String,
    model: &ReportModel,
    title: &str,
    deltas: &[CategoryDelta],
) -> fmt::Result {
    if deltas.is_empty() {
        return Ok(());
    }

    writeln!(output, "<h2>{}</h2>", title)?;
    for delta in deltas {
        let category = escape_html(&delta.category.to_string());

        writeln!(output, "<details class=\"resource-item\">")?;
        writeln!(
            output,
            "<summary><span>{}</span><span><span class=\"badge package\">package {}</span><span class=\"badge installed\">installed {}</span></span></summary>",
            category,
            format_change(delta.compressed_diff),
            format_change(delta.uncompressed_diff())
        )?;

        match model.files(&delta.category) {
            Some(table) if !table.files.is_empty() => {
                writeln!(output, "<table class=\"file-table\">")?;
                writeln!(
                    output,
                    "<tr><th>File</th><th>Old size</th><th>New size</th><th>Change</th><th>Status</th></tr>"
                )?;
                for file in &table.files {
                    writeln!(
                        output,
                        "<tr><td class=\"file-path\" title=\"{}\">{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td class=\"{}\">{}</td></tr>",
                        escape_html(&file.path),
                        escape_html(&display_path(&file.path)),
                        format_optional_size(file.old_size),
                        format_optional_size(file.new_size),
                        change_class(file.change),
                        format_change(file.change),
                        status_class(file.status),
                        file.status.label()
                    )?;
                }
                writeln!(output, "</table>")?;
                if table.is_truncated() {
                    writeln!(
                        output,
                        "<p class=\"note\">{} has {} files, showing the {} with significant changes</p>",
                        category,
                        table.total_files,
                        table.shown()
                    )?;
                }
            }
            _ => writeln!(
                output,
                "<p class=\"note\">No file changed by more than the significance threshold</p>"
            )?,
        }
        writeln!(output, "</details>")?;
    }
    Ok(())
}

fn change_class(change: i64) -> &'static str {
    if change > 0 {
        "increase"
    } else if change < 0 {
        "decrease"
    } else {
        ""
    }
}

fn status_class(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Added => "status-added",
        FileStatus::Modified => "status-modified",
        FileStatus::Removed => "status-removed",
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
