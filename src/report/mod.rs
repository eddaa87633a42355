//! Report model and renderers
//!
//! [`ReportModel`] is the only input of every renderer. Renderers never
//! classify or diff; display-only shortening lives in [`display`].

pub mod console;
pub mod display;
pub mod html;
pub mod markdown;
pub mod model;
pub mod writer;

pub use model::{PackageInfo, ReportModel};

/// Serialize to JSON with pretty printing, fallback to empty object on error
///
/// # Examples
///
/// ```
/// use ipa_diff::report::to_json_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Data { value: i32 }
///
/// let json = to_json_string(&Data { value: 42 });
/// assert!(json.contains("\"value\""));
/// ```
pub fn to_json_string<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
