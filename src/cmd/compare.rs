//! Compare command implementation
//!
//! Handles the `ipa-diff compare` command which compares two packages,
//! prints a summary and writes the Markdown and HTML reports.

use anyhow::{Context, Result};
use console::style;
use std::env;
use std::path::{Path, PathBuf};

use crate::archive::{find_package, PackageReader, ZipPackageReader};
use crate::config::{ConfigFile, ConfigLoader};
use crate::diff::DiffEngine;
use crate::error::IpaDiffError;
use crate::fmt::{CHECKMARK, INFO, PACKAGE, WARNING};
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};
use crate::report::console::format_console_report;
use crate::report::writer::{open_in_browser, write_reports, WrittenReports};
use crate::report::{to_json_string, PackageInfo, ReportModel};
use crate::snapshot::PackageSnapshots;

/// Options of `ipa-diff compare`
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Old package; discovered in the configured old directory when absent
    pub old: Option<PathBuf>,
    /// New package; discovered in the configured new directory when absent
    pub new: Option<PathBuf>,
    /// Print the report model as JSON instead of the styled summary
    pub json: bool,
    /// Open the HTML report once written
    pub open: bool,
    /// Skip writing report files
    pub no_write: bool,
    /// Override the configured output directory
    pub output_dir: Option<PathBuf>,
}

impl CompareOptions {
    fn writes_reports(&self) -> bool {
        !self.no_write && !self.json
    }
}

/// What a compare run produced
#[derive(Debug)]
pub struct CompareOutcome {
    /// The report that was rendered
    pub model: ReportModel,
    /// Report files, when written
    pub reports: Option<WrittenReports>,
}

/// Compare two packages
///
/// # Examples
///
/// ```no_run
/// use ipa_diff::cmd::compare::{cmd_compare, CompareOptions};
///
/// // Uses old/*.ipa and new/*.ipa in the current directory
/// cmd_compare(&CompareOptions::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - A package cannot be found
/// - A package is not a readable zip archive
/// - The configuration is invalid
/// - Reports cannot be written
pub fn cmd_compare(options: &CompareOptions) -> Result<()> {
    let root = env::current_dir().context("Failed to determine current directory")?;
    compare_in(
        &root,
        options,
        &RealFileSystem,
        &ZipPackageReader,
        &RealCommandExecutor,
    )?;
    Ok(())
}

/// Run a comparison rooted at `root` with injected IO
pub fn compare_in<FS, R, E>(
    root: &Path,
    options: &CompareOptions,
    fs: &FS,
    reader: &R,
    executor: &E,
) -> Result<CompareOutcome>
where
    FS: FileSystem,
    R: PackageReader,
    E: CommandExecutor,
{
    let config = ConfigLoader::load_with_fs(root, fs)?;

    let old_path = resolve_package(fs, root, options.old.as_deref(), &config, Side::Old)?;
    let new_path = resolve_package(fs, root, options.new.as_deref(), &config, Side::New)?;

    if !options.json {
        println!("{} Old package: {}", PACKAGE, style(old_path.display()).cyan());
        println!("{} New package: {}", PACKAGE, style(new_path.display()).cyan());
    }

    let old_listing = reader
        .read_listing(&old_path)
        .context("Failed to analyze old package")?;
    let new_listing = reader
        .read_listing(&new_path)
        .context("Failed to analyze new package")?;

    let old = PackageSnapshots::from_listing(&old_listing)?;
    let new = PackageSnapshots::from_listing(&new_listing)?;
    let result = DiffEngine::new(config.diff_options()).diff_packages(&old, &new);

    let model = ReportModel::from_diff(
        result,
        PackageInfo::label_for(&old_path),
        PackageInfo::label_for(&new_path),
        config.report.metadata_warning_bytes,
    );

    if let Some(warning) = &model.metadata_warning {
        log::warn!(
            "{} bytes of the package change are not attributable to any entry (threshold {})",
            warning.metadata_diff,
            warning.threshold
        );
    }

    if options.json {
        println!("{}", to_json_string(&model));
    } else {
        print!("{}", format_console_report(&model)?);
    }

    let reports = if options.writes_reports() {
        let output_dir = root.join(
            options
                .output_dir
                .as_deref()
                .unwrap_or(&config.paths.output_dir),
        );
        let written = write_reports(fs, &model, &output_dir)?;

        println!(
            "{} Reports written: {} and {}",
            CHECKMARK,
            style(written.markdown.display()).cyan(),
            style(written.html.display()).cyan()
        );

        if options.open {
            match open_in_browser(executor, &written.html) {
                Ok(()) => println!("{} Opened HTML report in the default browser", CHECKMARK),
                Err(e) => {
                    log::warn!("failed to open {}: {}", written.html.display(), e);
                    println!(
                        "{} Could not open a browser, open {} manually",
                        WARNING,
                        written.html.display()
                    );
                }
            }
        }
        Some(written)
    } else {
        if options.open && !options.json {
            println!("{} Nothing to open, reports were not written", INFO);
        }
        None
    };

    Ok(CompareOutcome { model, reports })
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Old,
    New,
}

impl Side {
    fn role(self) -> &'static str {
        match self {
            Side::Old => "Old",
            Side::New => "New",
        }
    }

    fn search_dir(self, config: &ConfigFile) -> &Path {
        match self {
            Side::Old => &config.paths.old_dir,
            Side::New => &config.paths.new_dir,
        }
    }
}

/// Explicit path when given (must be an existing file), else discovery
fn resolve_package<FS: FileSystem>(
    fs: &FS,
    root: &Path,
    explicit: Option<&Path>,
    config: &ConfigFile,
    side: Side,
) -> Result<PathBuf, IpaDiffError> {
    match explicit {
        Some(path) => {
            let path = root.join(path);
            match fs.metadata(&path) {
                Ok(metadata) if metadata.is_file() => Ok(path),
                _ => Err(IpaDiffError::FileNotFound {
                    path,
                    role: side.role().to_string(),
                }),
            }
        }
        None => find_package(
            fs,
            &root.join(side.search_dir(config)),
            &config.paths.package_extension,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{PackageListing, RawEntry};
    use crate::diff::FileStatus;
    use std::cell::RefCell;
    use std::io;
    use std::process::{Command, ExitStatus};
    use tempfile::TempDir;

    /// Serves listings by file name instead of reading zips
    struct FakeReader;

    impl PackageReader for FakeReader {
        fn read_listing(&self, path: &Path) -> Result<PackageListing, IpaDiffError> {
            let side = path.parent().and_then(|p| p.file_name()).unwrap_or_default();
            let entries = if side == "old" {
                vec![
                    RawEntry::new("Payload/App.app/App", 50_000, 20_000),
                    RawEntry::new("Payload/App.app/old.png", 3_000, 2_900),
                ]
            } else {
                vec![
                    RawEntry::new("Payload/App.app/App", 80_000, 30_000),
                    RawEntry::new("Payload/App.app/new.ttf", 6_000, 5_000),
                ]
            };
            let file_size = entries.iter().map(|e| e.compressed_size).sum::<u64>() + 500;
            Ok(PackageListing {
                path: path.to_path_buf(),
                file_size,
                entries,
            })
        }
    }

    #[derive(Default)]
    struct RecordingExecutor {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl CommandExecutor for RecordingExecutor {
        fn status(&self, cmd: &mut Command) -> io::Result<ExitStatus> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no opener"));
            }
            let last = cmd
                .get_args()
                .last()
                .map(|a| a.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.opened.borrow_mut().push(last);
            Ok(ExitStatus::default())
        }
    }

    fn workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        for dir in ["old", "new"] {
            std::fs::create_dir(temp.path().join(dir)).unwrap();
            std::fs::write(temp.path().join(dir).join("App.ipa"), b"").unwrap();
        }
        temp
    }

    #[test]
    fn test_compare_discovers_packages_and_writes_reports() {
        let temp = workspace();
        let executor = RecordingExecutor::default();

        let outcome = compare_in(
            temp.path(),
            &CompareOptions::default(),
            &RealFileSystem,
            &FakeReader,
            &executor,
        )
        .unwrap();

        assert_eq!(outcome.model.old_package.label, "old");
        assert_eq!(outcome.model.new_package.label, "new");
        assert_eq!(outcome.model.package_size_diff, 12_100);
        assert_eq!(outcome.model.metadata_diff, 0);

        let reports = outcome.reports.unwrap();
        assert!(reports.markdown.exists());
        assert!(reports.html.exists());
        assert!(executor.opened.borrow().is_empty());
    }

    #[test]
    fn test_compare_file_tables() {
        let temp = workspace();
        let outcome = compare_in(
            temp.path(),
            &CompareOptions {
                no_write: true,
                ..Default::default()
            },
            &RealFileSystem,
            &FakeReader,
            &RecordingExecutor::default(),
        )
        .unwrap();

        assert!(outcome.reports.is_none());
        let image = &outcome.model.files_by_category[&crate::classify::Category::Image];
        assert_eq!(image.files[0].status, FileStatus::Removed);
    }

    #[test]
    fn test_compare_opens_html_report() {
        let temp = workspace();
        let executor = RecordingExecutor::default();

        let outcome = compare_in(
            temp.path(),
            &CompareOptions {
                open: true,
                ..Default::default()
            },
            &RealFileSystem,
            &FakeReader,
            &executor,
        )
        .unwrap();

        let html = outcome.reports.unwrap().html;
        assert_eq!(
            executor.opened.borrow().as_slice(),
            &[html.to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn test_browser_failure_is_not_fatal() {
        let temp = workspace();
        let executor = RecordingExecutor {
            fail: true,
            ..Default::default()
        };

        let result = compare_in(
            temp.path(),
            &CompareOptions {
                open: true,
                ..Default::default()
            },
            &RealFileSystem,
            &FakeReader,
            &executor,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_json_mode_writes_nothing() {
        let temp = workspace();
        let outcome = compare_in(
            temp.path(),
            &CompareOptions {
                json: true,
                ..Default::default()
            },
            &RealFileSystem,
            &FakeReader,
            &RecordingExecutor::default(),
        )
        .unwrap();

        assert!(outcome.reports.is_none());
        assert!(!temp.path().join("result.md").exists());
    }

    #[test]
    fn test_output_dir_override() {
        let temp = workspace();
        let outcome = compare_in(
            temp.path(),
            &CompareOptions {
                output_dir: Some(PathBuf::from("out/reports")),
                ..Default::default()
            },
            &RealFileSystem,
            &FakeReader,
            &RecordingExecutor::default(),
        )
        .unwrap();

        assert_eq!(
            outcome.reports.unwrap().markdown,
            temp.path().join("out/reports/result.md")
        );
    }

    #[test]
    fn test_missing_explicit_package_is_file_not_found() {
        let temp = workspace();
        let err = compare_in(
            temp.path(),
            &CompareOptions {
                old: Some(PathBuf::from("nope.ipa")),
                ..Default::default()
            },
            &RealFileSystem,
            &FakeReader,
            &RecordingExecutor::default(),
        )
        .unwrap_err();

        let err = err.downcast_ref::<IpaDiffError>().unwrap();
        assert!(matches!(err, IpaDiffError::FileNotFound { role, .. } if role == "Old"));
    }

    #[test]
    fn test_missing_new_directory_is_package_not_found() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("old")).unwrap();
        std::fs::write(temp.path().join("old/App.ipa"), b"").unwrap();

        let err = compare_in(
            temp.path(),
            &CompareOptions::default(),
            &RealFileSystem,
            &FakeReader,
            &RecordingExecutor::default(),
        )
        .unwrap_err();

        assert_eq!(crate::error::ErrorFormatter::exit_code(&err), 66);
        assert!(err.to_string().contains("No .ipa package found"));
    }
}
