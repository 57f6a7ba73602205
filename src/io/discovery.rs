//! Transaction file discovery
//!
//! A transaction file is any regular file in the input directory whose name
//! starts with the configured prefix and ends with the configured suffix
//! (`ventas_*.txt` by default).

use crate::types::SalesError;
use glob::Pattern;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Build the file name pattern `<prefix>*<suffix>`
///
/// Prefix and suffix are matched literally, even if they contain glob
/// metacharacters.
pub fn transaction_pattern(prefix: &str, suffix: &str) -> Result<Pattern, SalesError> {
    let raw = format!("{}*{}", Pattern::escape(prefix), Pattern::escape(suffix));
    Pattern::new(&raw).map_err(|e| SalesError::invalid_argument(format!("{}: {}", raw, e)))
}

/// List the transaction files of `dir`, sorted by file name
///
/// # Errors
///
/// * `SalesError::FileNotFound` if `dir` does not exist
/// * `SalesError::NoTransactionFiles` if no file matches
pub fn discover_transaction_files(
    dir: &Path,
    prefix: &str,
    suffix: &str,
) -> Result<Vec<PathBuf>, SalesError> {
    let pattern = transaction_pattern(prefix, suffix)?;
    let entries = fs::read_dir(dir).map_err(|e| SalesError::open_failed(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if pattern.matches(name) && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(SalesError::NoTransactionFiles {
            dir: dir.display().to_string(),
            pattern: format!("{}*{}", prefix, suffix),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} transaction file(s) in {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discovers_matching_files_sorted() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "ventas_TI_3.txt");
        touch(dir.path(), "ventas_CC_1.txt");
        touch(dir.path(), "vendedores.txt");
        touch(dir.path(), "productos.txt");
        touch(dir.path(), "ventas_CC_2.csv");
        touch(dir.path(), "reporte_ventas_x.txt");

        let files = discover_transaction_files(dir.path(), "ventas_", ".txt").unwrap();
        assert_eq!(names(&files), vec!["ventas_CC_1.txt", "ventas_TI_3.txt"]);
    }

    #[test]
    fn test_ignores_matching_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("ventas_old.txt")).unwrap();
        touch(dir.path(), "ventas_CC_1.txt");

        let files = discover_transaction_files(dir.path(), "ventas_", ".txt").unwrap();
        assert_eq!(names(&files), vec!["ventas_CC_1.txt"]);
    }

    #[test]
    fn test_no_matching_files_is_an_error() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "vendedores.txt");

        let result = discover_transaction_files(dir.path(), "ventas_", ".txt");
        assert!(matches!(
            result,
            Err(SalesError::NoTransactionFiles { ref pattern, .. }) if pattern == "ventas_*.txt"
        ));
    }

    #[test]
    fn test_missing_directory() {
        let result = discover_transaction_files(Path::new("no/such/dir"), "ventas_", ".txt");
        assert!(matches!(result, Err(SalesError::FileNotFound { .. })));
    }

    #[rstest]
    #[case::plain("ventas_", ".txt", "ventas_CC_1.txt", true)]
    #[case::wrong_suffix("ventas_", ".txt", "ventas_CC_1.csv", false)]
    #[case::literal_brackets("[x]_", ".txt", "[x]_1.txt", true)]
    #[case::literal_star("a*", ".txt", "abc.txt", false)]
    fn test_transaction_pattern(
        #[case] prefix: &str,
        #[case] suffix: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        let pattern = transaction_pattern(prefix, suffix).unwrap();
        assert_eq!(pattern.matches(name), expected);
    }
}
