//! The MPH Engine: builds, queries, and (de)serializes a minimal perfect
//! hash over the data file's key set.
//!
//! The construction is `boomphf`'s multi-level CHD-like scheme rather than a
//! binding to the C `cmph` library the original tool depended on — see
//! DESIGN.md for why a native reimplementation was chosen over FFI.

use crate::error::Error;
use boomphf::Mphf;
use std::cell::RefCell;
use std::io::Read;

/// Space/time tradeoff passed to `Mphf::new`. Lower values build faster and use more
/// space per key; `1.7` is `boomphf`'s commonly quoted sweet spot (~3 bits/key) and
/// keeps build time close to linear without tuning per dataset size.
const GAMMA: f64 = 1.7;

// `boomphf::Mphf<T>::try_hash` takes `&T`, so querying it means owning a `Vec<u8>` to hand
// over. Reusing one scratch buffer per thread keeps that to an amortized-zero allocation
// instead of one per request after the buffer's capacity has grown to fit the largest key
// that thread has seen.
thread_local! {
    static SCRATCH_KEY: RefCell<Vec<u8>> = RefCell::new(Vec::new());
}

pub struct MphEngine {
    inner: Mphf<Vec<u8>>,
}

impl MphEngine {
    /// Builds a minimal perfect hash over `keys`. Caller has already deduplicated and
    /// validated the keys (see [`crate::keys::extract_keys`]).
    pub fn build(keys: &[Vec<u8>]) -> Result<Self, Error> {
        if keys.is_empty() {
            return Err(Error::Build("no keys to index".to_string()));
        }
        let inner = Mphf::new(GAMMA, keys);
        Ok(Self { inner })
    }

    /// Maps `key` to a slot. `None` means `key` is not (or is very unlikely to be) a
    /// member of the original key set. This is *not* sufficient on its own to decide
    /// membership: even a `Some` slot must still be checked against the resolved
    /// record's actual key (see [`crate::lookup::LookupService`]), since `try_hash`'s
    /// soundness for non-members is only probabilistic.
    pub fn lookup(&self, key: &[u8]) -> Option<u64> {
        SCRATCH_KEY.with(|scratch| {
            let mut buf = scratch.borrow_mut();
            buf.clear();
            buf.extend_from_slice(key);
            self.inner.try_hash(&buf)
        })
    }

    pub fn dump(&self) -> Result<Vec<u8>, Error> {
        bincode::serialize(&self.inner)
            .map_err(|e| Error::Index(format!("failed to serialize MPH: {e}")))
    }

    /// Deserializes an `Mphf` from `reader`, consuming exactly as many bytes as the
    /// encoded form requires and leaving the reader positioned right after it.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let inner: Mphf<Vec<u8>> = bincode::deserialize_from(reader)
            .map_err(|e| Error::Index(format!("corrupt MPH payload: {e}")))?;
        Ok(Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_over_build_set() {
        let keys: Vec<Vec<u8>> = vec![b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()];
        let mph = MphEngine::build(&keys).unwrap();
        let mut slots: Vec<u64> = keys.iter().map(|k| mph.lookup(k).unwrap()).collect();
        slots.sort();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn repeated_lookups_of_varying_length_keys_reuse_the_scratch_buffer_correctly() {
        let keys: Vec<Vec<u8>> = vec![b"a".to_vec(), b"bbbbbbbbbb".to_vec(), b"cc".to_vec()];
        let mph = MphEngine::build(&keys).unwrap();
        // Interleave long and short keys so a stale tail from a longer previous query
        // would corrupt a shorter one if the buffer weren't cleared before reuse.
        for _ in 0..3 {
            for key in &keys {
                assert!(mph.lookup(key).is_some());
            }
        }
        let mut slots: Vec<u64> = keys.iter().map(|k| mph.lookup(k).unwrap()).collect();
        slots.sort();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn round_trips_through_bincode() {
        let keys: Vec<Vec<u8>> = vec![b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()];
        let mph = MphEngine::build(&keys).unwrap();
        let bytes = mph.dump().unwrap();
        let mut cursor = std::io::Cursor::new(&bytes[..]);
        let reloaded = MphEngine::load_from_reader(&mut cursor).unwrap();
        for key in &keys {
            assert_eq!(mph.lookup(key), reloaded.lookup(key));
        }
    }
}
