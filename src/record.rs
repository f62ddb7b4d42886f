//! Pure, allocation-free functions for recognizing a record's key and value
//! spans in the mapped data file. A record is `KEY \t VALUE \n`; the
//! terminating LF belongs to the value span.

use std::ops::Range;

/// The key and value byte ranges of a single record, relative to the data span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpan {
    pub key: Range<usize>,
    /// Includes the trailing LF.
    pub value: Range<usize>,
}

/// Parses the record starting at `offset`. Returns `None` if `offset` does not point at
/// the start of a well-formed `KEY\tVALUE\n` record (no TAB before the next LF, or no
/// LF at all) — this should not happen for offsets drawn from the offset table, whose
/// invariant guarantees every slot points at a valid record, but query-time code must
/// not panic on a corrupt index.
pub fn parse_record(data: &[u8], offset: usize) -> Option<RecordSpan> {
    let key_end = find_byte(data, offset, b'\t')?;
    let value_start = key_end + 1;
    let line_end = find_byte(data, value_start, b'\n')?;
    let value_end = line_end + 1;
    Some(RecordSpan {
        key: offset..key_end,
        value: value_start..value_end,
    })
}

fn find_byte(data: &[u8], from: usize, needle: u8) -> Option<usize> {
    data.get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}
