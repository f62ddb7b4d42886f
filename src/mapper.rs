//! The Data Mapper: memory-maps the data file read-only and hands out the
//! raw byte span. Owns the `File` and `Mmap` handles so the span's lifetime
//! matches the mapping's.

use crate::error::Error;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

pub struct DataMapper {
    _file: File,
    mmap: Mmap,
}

impl DataMapper {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| {
            Error::Config(format!("error opening data file {}: {e}", path.display()))
        })?;
        let metadata = file.metadata().map_err(|e| {
            Error::Config(format!("error fstating data file {}: {e}", path.display()))
        })?;
        if metadata.len() == 0 {
            return Err(Error::Config(format!(
                "data file {} is empty",
                path.display()
            )));
        }
        // SAFETY: the file is opened read-only and not expected to be mutated by
        // another process for the lifetime of this mapping; that's the documented
        // caveat of every `Mmap::map` call and matches the original tool's assumption
        // of an immutable data file while serving.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| {
            Error::Config(format!("error mmapping data file {}: {e}", path.display()))
        })?;
        Ok(Self { _file: file, mmap })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.mmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn maps_nonempty_file() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"alpha\tone\n").unwrap();
        let mapper = DataMapper::open(f.path()).unwrap();
        assert_eq!(mapper.as_slice(), b"alpha\tone\n");
    }

    #[test]
    fn rejects_empty_file() {
        let f = NamedTempFile::new().unwrap();
        let err = DataMapper::open(f.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_missing_file() {
        let err = DataMapper::open(Path::new("/nonexistent/path/to/data.tsv")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
