//! Filesystem preconditions checked before any subprocess is launched

use std::path::Path;

use crate::domain::rules::validate_extension;
use crate::error::{TrimSafeError, TrimSafeResult};
use crate::utils::path::parent_dir;

/// Source must be an existing regular file with a supported extension
pub fn check_source(input_path: &Path) -> TrimSafeResult<()> {
    if !input_path.is_file() {
        return Err(TrimSafeError::InputNotFound {
            path: input_path.to_path_buf(),
        });
    }
    validate_extension(input_path)
}

/// The directory `output_path` will be written into must accept new files
pub fn check_destination_dir(output_path: &Path) -> TrimSafeResult<()> {
    let dir = parent_dir(output_path);
    let not_writable = || TrimSafeError::DestinationNotWritable { dir: dir.clone() };

    if !dir.is_dir() {
        return Err(not_writable());
    }

    // Removed again when dropped
    tempfile::Builder::new()
        .prefix(".trimsafe-write-check")
        .tempfile_in(&dir)
        .map(drop)
        .map_err(|_| not_writable())
}

/// Output must not resolve to the input file
pub fn check_output_distinct(input_path: &Path, output_path: &Path) -> TrimSafeResult<()> {
    let same = match (input_path.canonicalize(), output_path.canonicalize()) {
        (Ok(input), Ok(output)) => input == output,
        _ => input_path == output_path,
    };

    if same {
        Err(TrimSafeError::OutputIsInput {
            path: output_path.to_path_buf(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_source() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("clip.MP4");
        let text = dir.path().join("notes.txt");
        fs::write(&video, b"data").unwrap();
        fs::write(&text, b"data").unwrap();

        assert!(check_source(&video).is_ok());
        assert!(matches!(
            check_source(&text),
            Err(TrimSafeError::UnsupportedExtension { .. })
        ));
        assert!(matches!(
            check_source(&dir.path().join("missing.mp4")),
            Err(TrimSafeError::InputNotFound { .. })
        ));
        assert!(matches!(
            check_source(dir.path()),
            Err(TrimSafeError::InputNotFound { .. })
        ));
    }

    #[test]
    fn test_check_destination_dir() {
        let dir = TempDir::new().unwrap();
        assert!(check_destination_dir(&dir.path().join("out.mp4")).is_ok());
        assert!(matches!(
            check_destination_dir(&dir.path().join("nope").join("out.mp4")),
            Err(TrimSafeError::DestinationNotWritable { .. })
        ));

        // Probe file must not linger
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_check_output_distinct() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.mp4");
        fs::write(&input, b"data").unwrap();

        assert!(check_output_distinct(&input, &dir.path().join("b.mp4")).is_ok());
        assert!(check_output_distinct(&input, &input).is_err());
        let indirect = dir.path().join(".").join("a.mp4");
        assert!(check_output_distinct(&input, &indirect).is_err());
    }
}
