use crate::error::FixError;
use std::fs;
use std::path::Path;

pub fn read_text(path: &Path) -> Result<String, FixError> {
    let bytes = fs::read(path).map_err(|e| FixError::from_io(path, e))?;
    String::from_utf8(bytes).map_err(|_| FixError::Encoding {
        path: path.to_path_buf(),
    })
}

pub fn write_text(path: &Path, content: &str) -> Result<(), FixError> {
    fs::write(path, content).map_err(|source| FixError::Io {
        path: path.to_path_buf(),
        source,
    })
}
