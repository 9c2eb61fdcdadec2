use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error types for file operations
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl FileError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FileError::NotFound(path.to_path_buf())
        } else {
            FileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Read a file leniently, replacing invalid UTF-8 sequences
///
/// # Returns
/// * `Ok(String)` - File content
/// * `Err(FileError)` - File not found or I/O error
pub fn read_lossy<P: AsRef<Path>>(path: P) -> Result<String, FileError> {
    let path_ref = path.as_ref();
    let bytes = fs::read(path_ref).map_err(|e| FileError::from_io(path_ref, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a newline-delimited list of paths
///
/// Each line is trimmed and blank lines are dropped, so a trailing newline
/// or stray indentation never yields an empty entry.
pub fn read_path_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, FileError> {
    let content = read_lossy(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write each line followed by a newline
pub fn write_lines<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> Result<(), FileError> {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    write_text(path, &out)
}

/// Write lines joined by newlines, without a trailing newline
pub fn write_joined<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> Result<(), FileError> {
    let joined = lines.iter().map(|l| l.as_ref()).collect::<Vec<&str>>().join("\n");
    write_text(path, &joined)
}

/// Write text to a file, replacing any previous content
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), FileError> {
    let path_ref = path.as_ref();
    fs::write(path_ref, text).map_err(|e| FileError::from_io(path_ref, e))
}
