//! The Lookup Service: resolves a query to a value, enforcing the mandatory
//! post-hash equality check (an MPH returns *some* slot for any input, so a
//! resolved record must still be checked against the query before it is
//! trusted).

use crate::mph::MphEngine;
use crate::record::parse_record;

pub struct LookupService<'a> {
    data: &'a [u8],
    mph: &'a MphEngine,
    offsets: &'a [u64],
}

impl<'a> LookupService<'a> {
    pub fn new(data: &'a [u8], mph: &'a MphEngine, offsets: &'a [u64]) -> Self {
        Self {
            data,
            mph,
            offsets,
        }
    }

    /// Returns the value bytes (including the trailing LF) for `query`, or `None` if
    /// `query` is not a key in the indexed set.
    pub fn lookup(&self, query: &[u8]) -> Option<&'a [u8]> {
        let slot = self.mph.lookup(query)? as usize;
        let offset = *self.offsets.get(slot)? as usize;
        let span = parse_record(self.data, offset)?;
        if &self.data[span.key.clone()] != query {
            return None;
        }
        Some(&self.data[span.value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Index;

    fn build(data: &'static [u8]) -> Index {
        Index::build(data).unwrap()
    }

    #[test]
    fn basic_lookup_hit_and_miss() {
        let data: &[u8] = b"alpha\tone\nbeta\ttwo\ngamma\tthree\n";
        let index = build(data);
        let svc = LookupService::new(data, &index.mph, &index.offsets);
        assert_eq!(svc.lookup(b"beta"), Some(&b"two\n"[..]));
        assert_eq!(svc.lookup(b"delta"), None);
    }

    #[test]
    fn empty_value_round_trips() {
        let data: &[u8] = b"k\t\nk2\tv\n";
        let index = build(data);
        let svc = LookupService::new(data, &index.mph, &index.offsets);
        assert_eq!(svc.lookup(b"k"), Some(&b"\n"[..]));
        assert_eq!(svc.lookup(b"k2"), Some(&b"v\n"[..]));
    }

    #[test]
    fn tabless_line_is_not_a_key() {
        let data: &[u8] = b"noTabHere\nx\ty\n";
        let index = build(data);
        assert_eq!(index.len(), 1);
        let svc = LookupService::new(data, &index.mph, &index.offsets);
        assert_eq!(svc.lookup(b"x"), Some(&b"y\n"[..]));
        assert_eq!(svc.lookup(b"noTabHere"), None);
    }

    #[test]
    fn negative_soundness_for_arbitrary_queries() {
        let data: &[u8] = b"alpha\tone\nbeta\ttwo\ngamma\tthree\n";
        let index = build(data);
        let svc = LookupService::new(data, &index.mph, &index.offsets);
        for q in ["", "al", "alphabet", "zzz", "GAMMA"] {
            assert_eq!(svc.lookup(q.as_bytes()), None);
        }
    }

    #[test]
    fn response_never_exceeds_its_record_bounds() {
        let data: &[u8] = b"alpha\tone\nbeta\ttwo\ngamma\tthree\n";
        let index = build(data);
        let svc = LookupService::new(data, &index.mph, &index.offsets);
        let value = svc.lookup(b"beta").unwrap();
        // `two\n` is 4 bytes and must not bleed into neighboring records.
        assert_eq!(value, b"two\n");
    }
}
