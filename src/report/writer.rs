//! Report files on disk and opening them in a browser

use super::html::format_html_report;
use super::markdown::format_markdown_report;
use super::model::ReportModel;
use crate::error::IpaDiffError;
use crate::infra::{CommandExecutor, FileSystem};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use url::Url;

/// Markdown report file name
pub const MARKDOWN_REPORT_FILE: &str = "result.md";
/// HTML report file name
pub const HTML_REPORT_FILE: &str = "ipa_comparison_report.html";

/// Paths of the reports written by [`write_reports`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    /// Markdown report
    pub markdown: PathBuf,
    /// HTML report
    pub html: PathBuf,
}

/// Write both reports into `output_dir`, creating it if needed
///
/// The Markdown report links to the HTML report.
pub fn write_reports<FS: FileSystem>(
    fs: &FS,
    model: &ReportModel,
    output_dir: &Path,
) -> Result<WrittenReports, IpaDiffError> {
    let io_error = |context: String| move |source: io::Error| IpaDiffError::Io { context, source };

    fs.create_dir_all(output_dir)
        .map_err(io_error(format!("creating {}", output_dir.display())))?;

    let html = output_dir.join(HTML_REPORT_FILE);
    let markdown = output_dir.join(MARKDOWN_REPORT_FILE);

    let html_content = format_html_report(model).map_err(|_| render_error("HTML"))?;
    fs.write(&html, html_content)
        .map_err(io_error(format!("writing {}", html.display())))?;

    let link = file_url(&html);
    let markdown_content =
        format_markdown_report(model, Some(&link)).map_err(|_| render_error("Markdown"))?;
    fs.write(&markdown, markdown_content)
        .map_err(io_error(format!("writing {}", markdown.display())))?;

    log::debug!(
        "wrote {} and {}",
        markdown.display(),
        html.display()
    );

    Ok(WrittenReports { markdown, html })
}

fn render_error(kind: &str) -> IpaDiffError {
    IpaDiffError::Io {
        context: format!("rendering {} report", kind),
        source: io::Error::other("formatter error"),
    }
}

/// `file://` URL of a local path
///
/// Every reserved or non-ASCII character is percent-encoded. Parentheses are
/// encoded too so the URL can sit inside a Markdown link.
pub fn file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match Url::from_file_path(&absolute) {
        Ok(url) => url.as_str().replace('(', "%28").replace(')', "%29"),
        Err(()) => absolute.display().to_string(),
    }
}

/// Program and leading arguments that open a file with the OS default handler
pub fn browser_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(windows) {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Open a report with the OS default handler
///
/// Callers treat failure as non-fatal.
pub fn open_in_browser<E: CommandExecutor>(executor: &E, path: &Path) -> io::Result<()> {
    let (program, args) = browser_command();
    let mut cmd = Command::new(program);
    cmd.args(args).arg(path);

    let status = executor.status(&mut cmd)?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{} exited with {}", program, status)))
    }
}
