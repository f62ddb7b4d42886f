//! Builds the slot → record-offset table: a post-processing step over the
//! build-order offsets so query-time resolution is a single memory read.

use crate::error::Error;
use crate::mph::MphEngine;

pub fn build_offset_table(
    mph: &MphEngine,
    scan_offsets: &[usize],
    keys: &[Vec<u8>],
) -> Result<Vec<u64>, Error> {
    let n = scan_offsets.len();
    let mut table = vec![u64::MAX; n];
    for (key, &offset) in keys.iter().zip(scan_offsets) {
        let slot = mph.lookup(key).ok_or_else(|| {
            Error::Build(format!(
                "MPH failed to resolve key during offset table construction: {:?}",
                String::from_utf8_lossy(key)
            ))
        })? as usize;
        if slot >= n {
            return Err(Error::Build(format!(
                "MPH produced out-of-range slot {slot} for N={n}"
            )));
        }
        table[slot] = offset as u64;
    }
    Ok(table)
}
