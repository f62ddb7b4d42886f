//! On-disk index: a fixed magic header, the serialized MPH, and the raw
//! offset table, in that order.

use crate::error::Error;
use crate::keys::{collect_record_offsets, extract_keys};
use crate::mph::MphEngine;
use crate::offsets::build_offset_table;
use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Format v000: 16 bytes, ASCII tag plus trailing NUL. The version is the last three
/// characters before the NUL; any other tag is rejected outright rather than sniffed.
pub const MAGIC: &[u8; 16] = b"bam index: v000\0";

/// The built (or loaded) index: the MPH and its parallel offset table.
pub struct Index {
    pub mph: MphEngine,
    pub offsets: Vec<u64>,
}

impl Index {
    /// Runs the full build pipeline: scan, validate/dedup keys, build the MPH, and
    /// reorder offsets into MPH-slot order.
    pub fn build(data: &[u8]) -> Result<Self, Error> {
        let scan_offsets = collect_record_offsets(data)?;
        let keys = extract_keys(data, &scan_offsets)?;
        let mph = MphEngine::build(&keys)?;
        let offsets = build_offset_table(&mph, &scan_offsets, &keys)?;
        Ok(Self { mph, offsets })
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Writes the index to a temp file beside `path` and renames it into place, so a
    /// crash mid-write never leaves a corrupt file at `path` itself.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let mut buf = Vec::with_capacity(MAGIC.len() + self.offsets.len() * 8);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.mph.dump()?);
        for offset in &self.offsets {
            buf.extend_from_slice(&offset.to_ne_bytes());
        }

        let tmp_path = with_suffix(path, ".tmp");
        fs::write(&tmp_path, &buf)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Loads and validates an index file: magic, MPH payload, and offset table.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = fs::read(path).map_err(|e| {
            Error::Index(format!("error reading index file {}: {e}", path.display()))
        })?;

        if bytes.len() < MAGIC.len() {
            return Err(Error::Index(format!(
                "index file {} is shorter than the magic header",
                path.display()
            )));
        }
        if &bytes[..MAGIC.len()] != MAGIC {
            return Err(Error::Index(format!(
                "index file {} has an unrecognized magic header",
                path.display()
            )));
        }

        let mut cursor = Cursor::new(&bytes[MAGIC.len()..]);
        let mph = MphEngine::load_from_reader(&mut cursor)?;
        let consumed = MAGIC.len() + cursor.position() as usize;
        let rest = &bytes[consumed..];

        if rest.len() % 8 != 0 {
            return Err(Error::Index(format!(
                "index file {} has a truncated offset table",
                path.display()
            )));
        }
        let offsets: Vec<u64> = rest
            .chunks_exact(8)
            .map(|c| u64::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        if offsets.is_empty() {
            return Err(Error::Index(format!(
                "index file {} has an empty offset table",
                path.display()
            )));
        }

        Ok(Self { mph, offsets })
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_save_and_load() {
        let data = b"alpha\tone\nbeta\ttwo\ngamma\tthree\n";
        let index = Index::build(data).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("data.idx");
        index.save(&path).unwrap();

        let contents = fs::read(&path).unwrap();
        assert!(contents.starts_with(MAGIC));

        let reloaded = Index::load(&path).unwrap();
        assert_eq!(reloaded.len(), index.len());
        for key in [&b"alpha"[..], b"beta", b"gamma"] {
            assert_eq!(index.mph.lookup(key), reloaded.mph.lookup(key));
        }
    }

    #[test]
    fn rejects_wrong_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.idx");
        fs::write(&path, b"not an index file at all.......").unwrap();
        assert!(matches!(Index::load(&path), Err(Error::Index(_))));
    }

    #[test]
    fn rejects_truncated_file() {
        let data = b"alpha\tone\nbeta\ttwo\ngamma\tthree\n";
        let index = Index::build(data).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("data.idx");
        index.save(&path).unwrap();

        let mut contents = fs::read(&path).unwrap();
        contents.pop();
        fs::write(&path, &contents).unwrap();

        assert!(matches!(Index::load(&path), Err(Error::Index(_))));
    }
}
