//! Archive entry classification
//!
//! Maps an archive path to a resource [`Category`] using a priority-ordered
//! chain of path tests. The first matching rule wins:
//!
//! 1. Paths inside a `.framework/` bundle belong to that framework (with an
//!    optional component in [`ClassifyMode::Detail`])
//! 2. Archive members named `*.framework` are frameworks themselves
//! 3. Extension sets: image, video, audio, font, interface, then the
//!    executable heuristic, then config and database
//! 4. Everything else is [`Category::Other`]
//!
//! Classification looks at the path string only; entry contents are never read.

pub mod framework;
pub mod rules;

pub use framework::{
    shorten_framework_name, AssetGroup, FrameworkCategory, FrameworkComponent,
};

use framework::{detect_component, split_framework_path, FRAMEWORK_SUFFIX};
use rules::{
    file_name, is_payload_executable, PathExtensions, AUDIO_EXTENSIONS, CONFIG_EXTENSIONS,
    DATABASE_EXTENSIONS, FONT_EXTENSIONS, IMAGE_EXTENSIONS, INTERFACE_EXTENSIONS,
    VIDEO_EXTENSIONS,
};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Granularity of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifyMode {
    /// Every file inside a framework folds into the framework
    Aggregate,
    /// Framework files are split by bundle and Flutter asset group
    Detail,
}

/// Resource category of an archive entry
///
/// Categories are ordered and hashable so they can key aggregation maps.
/// The [`Display`](fmt::Display) form is the label shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// A framework bundle, optionally narrowed to a component
    Framework(FrameworkCategory),
    /// Image resources
    Image,
    /// Video resources
    Video,
    /// Audio resources
    Audio,
    /// Fonts
    Font,
    /// NIB/storyboard interface files
    Interface,
    /// The app's main executable
    Executable,
    /// Plists, JSON, XML and string tables
    Config,
    /// Embedded databases
    Database,
    /// Anything not matched by another rule
    Other,
}

impl Category {
    /// Project a category onto its aggregate-mode equivalent
    ///
    /// Detail framework categories lose their component; all other
    /// categories are identical in both modes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipa_diff::classify::{classify, Category, ClassifyMode};
    ///
    /// let path = "Payload/Runner.app/Frameworks/App.framework/flutter_assets/fonts/a.otf";
    /// let detail = classify(path, ClassifyMode::Detail);
    /// assert_eq!(detail.aggregate(), classify(path, ClassifyMode::Aggregate));
    /// assert_eq!(Category::Image.aggregate(), Category::Image);
    /// ```
    pub fn aggregate(&self) -> Category {
        match self {
            Category::Framework(framework) => Category::Framework(framework.without_component()),
            other => other.clone(),
        }
    }

    /// Untruncated label, unique per category
    ///
    /// Equal to the [`Display`](fmt::Display) label except that framework
    /// names are never abbreviated. Serialization uses this form.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipa_diff::classify::{Category, FrameworkCategory};
    ///
    /// let framework = Category::Framework(FrameworkCategory::new("sqflite_darwin"));
    /// assert_eq!(framework.to_string(), "Framework - sqflite.framework");
    /// assert_eq!(framework.full_label(), "Framework - sqflite_darwin.framework");
    /// assert_eq!(Category::Font.full_label(), "Font");
    /// ```
    pub fn full_label(&self) -> String {
        match self {
            Category::Framework(framework) => framework.full_label(),
            other => other.to_string(),
        }
    }

    /// True for framework categories
    pub fn is_framework(&self) -> bool {
        matches!(self, Category::Framework(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Framework(framework) => fmt::Display::fmt(framework, f),
            Category::Image => f.write_str("Image"),
            Category::Video => f.write_str("Video"),
            Category::Audio => f.write_str("Audio"),
            Category::Font => f.write_str("Font"),
            Category::Interface => f.write_str("Interface"),
            Category::Executable => f.write_str("Executable"),
            Category::Config => f.write_str("Config"),
            Category::Database => f.write_str("Database"),
            Category::Other => f.write_str("Other"),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.full_label())
    }
}

/// Classify an archive path
///
/// Total and deterministic: every path maps to exactly one category.
///
/// # Examples
///
/// ```
/// use ipa_diff::classify::{classify, Category, ClassifyMode};
///
/// assert_eq!(
///     classify("Payload/App.app/Frameworks/Foo.framework/icon.png", ClassifyMode::Aggregate)
///         .to_string(),
///     "Framework - Foo.framework"
/// );
/// assert_eq!(classify("Payload/App.app/icon.png", ClassifyMode::Detail), Category::Image);
/// assert_eq!(classify("Payload/App.app/App", ClassifyMode::Detail), Category::Executable);
/// assert_eq!(classify("Payload/App.app/Assets.car", ClassifyMode::Detail), Category::Other);
/// ```
pub fn classify(path: &str, mode: ClassifyMode) -> Category {
    if let Some((name, remainder)) = split_framework_path(path) {
        let framework = match mode {
            ClassifyMode::Aggregate => FrameworkCategory::new(name),
            ClassifyMode::Detail => match detect_component(remainder) {
                Some(component) => FrameworkCategory::with_component(name, component),
                None => FrameworkCategory::new(name),
            },
        };
        return Category::Framework(framework);
    }

    let name = file_name(path);
    if let Some(stem) = name.strip_suffix(FRAMEWORK_SUFFIX) {
        return Category::Framework(FrameworkCategory::new(stem));
    }

    let extensions = PathExtensions::of(path);
    if extensions.any_in(IMAGE_EXTENSIONS) {
        Category::Image
    } else if extensions.any_in(VIDEO_EXTENSIONS) {
        Category::Video
    } else if extensions.any_in(AUDIO_EXTENSIONS) {
        Category::Audio
    } else if extensions.any_in(FONT_EXTENSIONS) {
        Category::Font
    } else if extensions.any_in(INTERFACE_EXTENSIONS) {
        Category::Interface
    } else if is_payload_executable(path) {
        Category::Executable
    } else if extensions.any_in(CONFIG_EXTENSIONS) {
        Category::Config
    } else if extensions.any_in(DATABASE_EXTENSIONS) {
        Category::Database
    } else {
        Category::Other
    }
}
