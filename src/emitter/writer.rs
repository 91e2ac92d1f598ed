//! Output file writing.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `content` to `output`, resolved against the package directory.
/// New files get mode `0644`; existing files are truncated.
///
/// `content` is written byte for byte. Rendered units are already trimmed
/// and end with a single newline, as gofmt expects.
pub fn write_output(dir: &Path, output: &str, content: &str) -> io::Result<PathBuf> {
    let path = dir.join(output);
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

#[cfg(test)]
#[path = "../tests/writer_tests.rs"]
mod writer_tests;
