//! Output path derivation

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default output name for `input`: `<stem>.converted<.ext>` in the working directory
///
/// Returns `None` when `input` has no file name (e.g. `/` or `..`).
pub fn default_output_path(input: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?;

    let mut name = OsString::from(stem);
    name.push(".converted");
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    Some(PathBuf::from(name))
}
