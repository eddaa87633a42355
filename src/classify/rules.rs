//! Extension sets and path predicates used by the classifier

/// Image resources
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "ico"];

/// Video resources
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "m4v", "3gp"];

/// Audio resources
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "m4a", "caf"];

/// Font files
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "woff", "woff2"];

/// Interface definitions (compiled and source forms)
pub const INTERFACE_EXTENSIONS: &[&str] = &["nib", "storyboard", "storyboardc", "xib"];

/// Configuration and metadata
pub const CONFIG_EXTENSIONS: &[&str] = &["plist", "json", "xml", "strings"];

/// Embedded databases
pub const DATABASE_EXTENSIONS: &[&str] = &["db", "sqlite", "realm"];

/// Top-level directory holding the app bundle inside an `.ipa`
pub const PAYLOAD_DIR: &str = "payload";

/// Lower-cased extensions of every segment of an archive path
///
/// Directory segments count too, so members of compiled bundles such as
/// `Base.lproj/Main.storyboardc/Info.plist` carry `storyboardc`.
pub(crate) struct PathExtensions {
    extensions: Vec<String>,
}

impl PathExtensions {
    pub(crate) fn of(path: &str) -> Self {
        let extensions = path
            .split('/')
            .filter_map(|segment| {
                segment
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_ascii_lowercase())
            })
            .filter(|ext| !ext.is_empty())
            .collect();

        Self { extensions }
    }

    pub(crate) fn any_in(&self, set: &[&str]) -> bool {
        self.extensions.iter().any(|ext| set.contains(&ext.as_str()))
    }
}

/// Executable heuristic: an extension-less file directly inside the app
/// directory, i.e. `Payload/<App>.app/<name>`.
///
/// Any other extension-less resource at that level (`PkgInfo`, for one) is
/// reported as an executable too.
pub(crate) fn is_payload_executable(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();

    match segments.as_slice() {
        [payload, app, name] => {
            payload.eq_ignore_ascii_case(PAYLOAD_DIR)
                && !app.is_empty()
                && !name.is_empty()
                && !name.contains('.')
        }
        _ => false,
    }
}

/// Last segment of an archive path
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
