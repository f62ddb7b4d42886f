//! Build-time scan of the data span: discovers record offsets and, from
//! those, the key set fed to the MPH builder.

use crate::error::Error;
use crate::record::parse_record;

/// A restartable sequence over record start offsets. One linear scan of the
/// mapped span; lines without a TAB before their terminating LF are skipped.
/// `Clone` gives callers a cheap way to restart the scan from the beginning —
/// cloning resets nothing mutable other than the cursor, and a clone taken at
/// the start replays identically to the original.
#[derive(Clone)]
pub struct KeyIterator<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> KeyIterator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// A fresh iterator over the same span, cursor reset to the start.
    pub fn restart(&self) -> Self {
        Self::new(self.data)
    }
}

impl<'a> Iterator for KeyIterator<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let end = self.data.len();
        loop {
            if self.cursor >= end {
                return None;
            }
            let rest = &self.data[self.cursor..];
            let Some(nl) = rest.iter().position(|&b| b == b'\n') else {
                self.cursor = end;
                return None;
            };
            let line = &rest[..nl];
            let record_start = self.cursor;
            self.cursor += nl + 1;
            if line.contains(&b'\t') {
                return Some(record_start);
            }
            // Line without a TAB: skip and keep scanning.
        }
    }
}

/// Runs the scan to completion, failing if the file contains no valid records.
pub fn collect_record_offsets(data: &[u8]) -> Result<Vec<usize>, Error> {
    let offsets: Vec<usize> = KeyIterator::new(data).collect();
    if offsets.is_empty() {
        return Err(Error::Build(
            "data file contains no key-value pairs".to_string(),
        ));
    }
    Ok(offsets)
}

/// Extracts the key bytes at each offset and validates them: no NUL bytes, and no
/// duplicates across the whole key set (the MPH builder cannot accept duplicates).
pub fn extract_keys(data: &[u8], offsets: &[usize]) -> Result<Vec<Vec<u8>>, Error> {
    let mut keys = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        let span = parse_record(data, offset)
            .ok_or_else(|| Error::Build(format!("malformed record at offset {offset}")))?;
        let key = &data[span.key];
        if key.contains(&0u8) {
            return Err(Error::Build(format!(
                "key at offset {offset} contains a NUL byte"
            )));
        }
        keys.push(key.to_vec());
    }

    let mut sorted: Vec<&Vec<u8>> = keys.iter().collect();
    sorted.sort();
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(Error::Build(format!(
            "duplicate key in data file: {:?}",
            String::from_utf8_lossy(w[0])
        )));
    }

    Ok(keys)
}
