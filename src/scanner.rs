use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discover exported chat logs under a directory.
///
/// Messenger exports are plain `.txt` files; anything else (spreadsheets,
/// images dropped in the same folder) is skipped. Results are sorted so
/// batch runs are deterministic.
pub fn find_chat_exports(root: &Path) -> Vec<PathBuf> {
    let mut exports: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("txt"))
        .collect();

    exports.sort();
    exports
}
