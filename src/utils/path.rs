//! Output path suggestion and collision avoidance

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix inserted by [`suggest_output_path`]
pub const TRIMMED_SUFFIX: &str = "_trimmed";

/// Insert `suffix` between the file stem and the extension.
///
/// `dir/name.ext` becomes `dir/name<suffix>.ext`; a path without an extension
/// just gets the suffix appended.
pub fn insert_before_extension(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();

    let mut file_name = OsString::from(stem);
    file_name.push(suffix);
    if let Some(ext) = path.extension() {
        file_name.push(".");
        file_name.push(ext);
    }

    path.with_file_name(file_name)
}

/// Deterministic output name for a trim of `input_path`. Pure, no I/O.
pub fn suggest_output_path(input_path: &Path) -> PathBuf {
    insert_before_extension(input_path, TRIMMED_SUFFIX)
}

/// First of `candidate`, `stem_1.ext`, `stem_2.ext`, ... that does not exist on disk.
///
/// The answer is only valid at the moment of the check: another process may
/// create the file before the caller uses it.
pub fn find_available_output_path(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    let mut n: u64 = 1;
    loop {
        let numbered = insert_before_extension(candidate, &format!("_{}", n));
        if !numbered.exists() {
            return numbered;
        }
        n += 1;
    }
}

/// Temp output for an in-place trim: `name.trim-<job>.ext` next to the input
pub fn temp_output_candidate(input_path: &Path, job_id: &str) -> PathBuf {
    insert_before_extension(input_path, &format!(".trim-{}", job_id))
}

/// Backup location of the original during an in-place trim: `<input>.bak`
pub fn backup_candidate(input_path: &Path) -> PathBuf {
    let mut name = input_path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Directory a file will be written into; `.` for bare file names
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
