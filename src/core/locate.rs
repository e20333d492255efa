//! Project root detection.
//!
//! Walks up from a start directory looking for marker files.

use std::path::{Path, PathBuf};

use tracing::trace;

/// Find the closest ancestor of `start` (inclusive) containing any marker.
///
/// All markers are checked at a directory before moving to its parent, so a
/// closer directory always wins over a farther one regardless of marker
/// priority. Returns `None` when the filesystem root is reached.
pub fn locate(markers: &[&str], start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| {
            markers.iter().any(|marker| {
                let found = dir.join(marker).exists();
                trace!(dir = %dir.display(), marker, found, "checking marker");
                found
            })
        })
        .map(Path::to_path_buf)
}
