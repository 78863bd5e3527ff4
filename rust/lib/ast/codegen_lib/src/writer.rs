use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{FileWriteError, WriteError};
use crate::GeneratedCode;

/// Write every generated file into `out_dir`, one at a time.
///
/// Each file is created or truncated, written and closed before the next
/// one is opened. A failing file does not stop the others; all failures are
/// returned together. The directory itself is never created.
pub fn write_files(out_dir: &Path, code: &GeneratedCode) -> Result<Vec<PathBuf>, WriteError> {
    let mut written = Vec::with_capacity(code.files.len());
    let mut failures = Vec::new();

    for file in &code.files {
        let path = out_dir.join(&file.path);
        match write_one(&path, &file.content) {
            Ok(()) => {
                info!("wrote {}", path.display());
                written.push(path);
            }
            Err(source) => {
                error!("cannot write {}: {}", path.display(), source);
                failures.push(FileWriteError { path, source });
            }
        }
    }

    if failures.is_empty() {
        Ok(written)
    } else {
        Err(WriteError {
            attempted: code.files.len(),
            failures,
        })
    }
}

fn write_one(path: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()
}
