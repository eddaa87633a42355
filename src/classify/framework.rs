//! Framework categories and framework display names
//!
//! A framework's identity is its raw name as found in the archive. The
//! abbreviated form produced by [`shorten_framework_name`] is only used when
//! a category is displayed, so two frameworks whose shortened names collide
//! still aggregate separately.

use std::fmt;

/// Marker that identifies a path inside a framework bundle
pub const FRAMEWORK_MARKER: &str = ".framework/";

/// Suffix of a framework packaged as a single archive member
pub const FRAMEWORK_SUFFIX: &str = ".framework";

const BUNDLE_MARKER: &str = ".bundle/";
const FLUTTER_ASSETS_MARKER: &str = "flutter_assets/";

/// Maximum display length of a framework name before truncation
pub const MAX_FRAMEWORK_NAME_LEN: usize = 25;

/// Known long framework names and the abbreviation shown in reports.
///
/// Applied in order; every occurrence of the long form is replaced.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("SDWebImageWebPCoder", "SDWebImageWebP"),
    ("flutter_image_compress_common", "flutter_img_compress"),
    ("shared_preferences_foundation", "shared_prefs_foundation"),
    ("permission_handler_apple", "permission_handler"),
    ("path_provider_foundation", "path_provider"),
    ("package_info_plus", "package_info"),
    ("device_info_plus", "device_info"),
    ("sqflite_darwin", "sqflite"),
];

/// A framework, optionally narrowed to one of its internal components
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkCategory {
    /// Raw framework name without the `.framework` suffix
    pub name: String,
    /// Sub-structure inside the framework (detail mode only)
    pub component: Option<FrameworkComponent>,
}

/// Known sub-structures inside a framework bundle
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameworkComponent {
    /// A nested resource bundle, by name without the `.bundle` suffix
    Bundle(String),
    /// Flutter's asset directory, grouped by its first subdirectory
    FlutterAssets(AssetGroup),
}

/// Groupings inside a `flutter_assets/` directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetGroup {
    /// Files directly in `flutter_assets/` or in an unrecognized subdirectory
    Root,
    /// Assets shipped by a Dart package (`packages/<name>/`)
    Package(String),
    /// Compiled shaders
    Shaders,
    /// Bundled fonts
    Fonts,
    /// Application assets
    Assets,
}

impl FrameworkCategory {
    /// Framework category covering every file of the framework
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component: None,
        }
    }

    /// Framework category narrowed to one component
    pub fn with_component(name: impl Into<String>, component: FrameworkComponent) -> Self {
        Self {
            name: name.into(),
            component: Some(component),
        }
    }

    /// The same framework with the component dropped
    pub fn without_component(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl FrameworkCategory {
    /// Label with the raw framework name, never abbreviated or truncated
    ///
    /// Distinct frameworks always get distinct labels, so this is the form
    /// used wherever a category has to be identified by text.
    pub fn full_label(&self) -> String {
        let mut label = String::new();
        // Writing into a String cannot fail
        let _ = self.write_label(&mut label, &format!("{}{}", self.name, FRAMEWORK_SUFFIX));
        label
    }

    fn write_label(&self, f: &mut impl fmt::Write, framework: &str) -> fmt::Result {
        write!(f, "Framework - {}", framework)?;
        match &self.component {
            None => Ok(()),
            Some(FrameworkComponent::Bundle(bundle)) => write!(f, " → {}.bundle", bundle),
            Some(FrameworkComponent::FlutterAssets(group)) => {
                write!(f, " → flutter_assets")?;
                match group {
                    AssetGroup::Root => Ok(()),
                    AssetGroup::Package(package) => write!(f, " → {}", package),
                    AssetGroup::Shaders => write!(f, " → shaders"),
                    AssetGroup::Fonts => write!(f, " → fonts"),
                    AssetGroup::Assets => write!(f, " → assets"),
                }
            }
        }
    }
}

impl fmt::Display for FrameworkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_label(f, &shorten_framework_name(&self.name))
    }
}

/// Shorten a framework name for display
///
/// Known long names are abbreviated first; anything still longer than
/// [`MAX_FRAMEWORK_NAME_LEN`] characters is truncated with an ellipsis.
/// The result always carries the `.framework` suffix.
///
/// # Examples
///
/// ```
/// use ipa_diff::classify::shorten_framework_name;
///
/// assert_eq!(shorten_framework_name("Foo"), "Foo.framework");
/// assert_eq!(shorten_framework_name("sqflite_darwin"), "sqflite.framework");
/// assert_eq!(
///     shorten_framework_name("AVeryLongFrameworkNameThatKeepsGoing"),
///     "AVeryLongFrameworkName....framework"
/// );
/// ```
pub fn shorten_framework_name(name: &str) -> String {
    let mut short = name.replace(FRAMEWORK_SUFFIX, "");

    for (long, abbreviation) in ABBREVIATIONS {
        if short.contains(long) {
            short = short.replace(long, abbreviation);
        }
    }

    if short.chars().count() > MAX_FRAMEWORK_NAME_LEN {
        let kept: String = short.chars().take(MAX_FRAMEWORK_NAME_LEN - 3).collect();
        short = format!("{}...", kept);
    }

    format!("{}{}", short, FRAMEWORK_SUFFIX)
}

/// Locate the first framework marker in `path`.
///
/// Returns the framework name (last segment before the marker) and the
/// remainder of the path after it. The marker is matched ASCII
/// case-insensitively; the returned slices keep the original casing.
pub(crate) fn split_framework_path(path: &str) -> Option<(&str, &str)> {
    let lower = path.to_ascii_lowercase();
    let idx = lower.find(FRAMEWORK_MARKER)?;

    let before = &path[..idx];
    let name = before.rsplit('/').next().unwrap_or(before);
    let remainder = &path[idx + FRAMEWORK_MARKER.len()..];

    Some((name, remainder))
}

/// Identify the component a path inside a framework belongs to
pub(crate) fn detect_component(remainder: &str) -> Option<FrameworkComponent> {
    if let Some(idx) = remainder.find(BUNDLE_MARKER) {
        let before = &remainder[..idx];
        let bundle = before.rsplit('/').next().unwrap_or(before);
        return Some(FrameworkComponent::Bundle(bundle.to_string()));
    }

    if let Some(idx) = remainder.find(FLUTTER_ASSETS_MARKER) {
        let assets_path = &remainder[idx + FLUTTER_ASSETS_MARKER.len()..];
        let group = if let Some(package_path) = assets_path.strip_prefix("packages/") {
            let package = package_path.split('/').next().unwrap_or(package_path);
            AssetGroup::Package(package.to_string())
        } else if assets_path.starts_with("shaders/") {
            AssetGroup::Shaders
        } else if assets_path.starts_with("fonts/") {
            AssetGroup::Fonts
        } else if assets_path.starts_with("assets/") {
            AssetGroup::Assets
        } else {
            AssetGroup::Root
        };
        return Some(FrameworkComponent::FlutterAssets(group));
    }

    None
}
