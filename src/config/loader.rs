//! Reading and writing `.ipa-diff.toml`

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Locates, parses and writes the config file of a working directory
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config of `root`, falling back to defaults when there is none
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ipa_diff::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Old packages live in {}", config.paths.old_dir.display());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(root, &RealFileSystem)
    }

    /// [`load`](Self::load) through a caller-supplied filesystem
    ///
    /// Only a missing file means defaults; any other read failure, a parse
    /// error or an invalid value is an error.
    pub fn load_with_fs<FS: FileSystem>(root: &Path, fs: &FS) -> Result<ConfigFile> {
        let path = root.join(CONFIG_FILE_NAME);

        let text = match fs.read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no {}, using default settings", path.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };

        let config: ConfigFile = toml_edit::de::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;

        log::debug!("settings loaded from {}", path.display());
        Ok(config)
    }

    /// Serialize `config` into `root`, replacing any existing file
    pub fn save_with_fs<FS: FileSystem>(config: &ConfigFile, root: &Path, fs: &FS) -> Result<()> {
        let path = root.join(CONFIG_FILE_NAME);
        let text = toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// True when `root` already holds a config file
    pub fn exists_with_fs<FS: FileSystem>(root: &Path, fs: &FS) -> bool {
        fs.metadata(&root.join(CONFIG_FILE_NAME)).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IpaDiffError;
    use std::cell::RefCell;
    use std::io;
    use std::path::PathBuf;

    /// Config text served from memory; writes are captured
    #[derive(Default)]
    struct MemoryConfig {
        text: Option<String>,
        failure: Option<ErrorKind>,
        written: RefCell<Option<String>>,
    }

    impl MemoryConfig {
        fn holding(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                ..Self::default()
            }
        }

        fn failing(kind: ErrorKind) -> Self {
            Self {
                failure: Some(kind),
                ..Self::default()
            }
        }

        fn check(&self) -> io::Result<()> {
            match self.failure {
                Some(kind) => Err(kind.into()),
                None => Ok(()),
            }
        }
    }

    impl FileSystem for MemoryConfig {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            self.check()?;
            self.text.clone().ok_or_else(|| ErrorKind::NotFound.into())
        }

        fn write(&self, _path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            self.check()?;
            *self.written.borrow_mut() = Some(String::from_utf8_lossy(contents.as_ref()).into_owned());
            Ok(())
        }

        fn metadata(&self, path: &Path) -> io::Result<std::fs::Metadata> {
            Err(io::Error::new(ErrorKind::NotFound, path.display().to_string()))
        }

        fn read_dir(&self, _path: &Path) -> io::Result<std::fs::ReadDir> {
            Err(ErrorKind::Unsupported.into())
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Err(ErrorKind::Unsupported.into())
        }
    }

    fn root() -> &'static Path {
        Path::new("/work")
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        let fs = MemoryConfig::holding(
            "[report]\nsignificance-threshold-bytes = 4096\n\n[paths]\noutput-dir = \"reports\"\n",
        );

        let config = ConfigLoader::load_with_fs(root(), &fs).unwrap();
        assert_eq!(config.report.significance_threshold_bytes, 4096);
        assert_eq!(config.report.max_files_per_category, 20);
        assert_eq!(config.paths.output_dir, PathBuf::from("reports"));
        assert_eq!(config.paths.old_dir, PathBuf::from("old"));
    }

    #[test]
    fn test_missing_or_empty_file_means_defaults() {
        let missing = ConfigLoader::load_with_fs(root(), &MemoryConfig::default()).unwrap();
        let empty = ConfigLoader::load_with_fs(root(), &MemoryConfig::holding("")).unwrap();

        assert_eq!(missing, ConfigFile::default());
        assert_eq!(empty, ConfigFile::default());
    }

    #[test]
    fn test_unreadable_file_is_an_error_not_defaults() {
        let fs = MemoryConfig::failing(ErrorKind::PermissionDenied);
        let err = ConfigLoader::load_with_fs(root(), &fs).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Failed to read"));
        assert!(message.ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_malformed_toml_and_wrong_types_are_rejected() {
        for text in [
            "invalid { toml syntax",
            "[report]\nmax-files-per-category = \"many\"\n",
        ] {
            let err = ConfigLoader::load_with_fs(root(), &MemoryConfig::holding(text)).unwrap_err();
            assert!(err.to_string().contains("Failed to parse"), "text: {}", text);
        }
    }

    #[test]
    fn test_out_of_range_values_surface_as_invalid_config() {
        let fs = MemoryConfig::holding("[paths]\npackage-extension = \".ipa\"\n");
        let err = ConfigLoader::load_with_fs(root(), &fs).unwrap_err();

        let config_error = err.downcast_ref::<IpaDiffError>().unwrap();
        assert!(matches!(config_error, IpaDiffError::InvalidConfig { .. }));
        assert_eq!(config_error.exit_code(), 78);
    }

    #[test]
    fn test_saved_text_is_kebab_case_and_loads_back() {
        let mut config = ConfigFile::default();
        config.report.metadata_warning_bytes = 0;
        config.paths.new_dir = PathBuf::from("candidate");

        let fs = MemoryConfig::default();
        ConfigLoader::save_with_fs(&config, root(), &fs).unwrap();

        let text = fs.written.borrow().clone().unwrap();
        assert!(text.contains("metadata-warning-bytes = 0"));
        assert!(text.contains("new-dir = \"candidate\""));

        let loaded = ConfigLoader::load_with_fs(root(), &MemoryConfig::holding(&text)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_failure_names_the_file() {
        let fs = MemoryConfig::failing(ErrorKind::PermissionDenied);
        let err = ConfigLoader::save_with_fs(&ConfigFile::default(), root(), &fs).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Failed to write"));
        assert!(message.ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_exists_checks_the_config_file() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::exists_with_fs(temp.path(), &RealFileSystem));

        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert!(ConfigLoader::exists_with_fs(temp.path(), &RealFileSystem));
    }
}
