use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Extensions the batch orchestrator treats as images (case-insensitive).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Recursively collect the supported image files under `root` in
/// deterministic (name-sorted) traversal order, together with a count of
/// regular files skipped for having an unsupported extension.
///
/// Unreadable directory entries are logged and skipped; they never abort
/// the traversal.
pub fn collect_image_files(root: &Path) -> (Vec<PathBuf>, usize) {
    let mut images = Vec::new();
    let mut skipped = 0;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if is_supported(entry.path()) {
            images.push(entry.into_path());
        } else {
            skipped += 1;
        }
    }
    (images, skipped)
}
