//! A low-level, read-only, memory-mapped key-value server.
//!
//! ## Design
//!
//! The index is a minimal perfect hash (MPH, [`mph::MphEngine`]) built once over the key
//! set of a tab-separated data file, paired with a parallel offset table ([`offsets`])
//! that resolves an MPH slot back to a byte range in the memory-mapped data file
//! ([`mapper::DataMapper`]). Because an MPH is defined on every byte string but only
//! *meaningful* on its build-time key set, a resolved record's key is always checked
//! against the query before its value is returned — see [`lookup::LookupService`].
//!
//! ## Example
//!
//! ```
//! # use bam::{Error, index::Index, lookup::LookupService};
//! # fn example() -> Result<(), Error> {
//! let data: &[u8] = b"alpha\tone\nbeta\ttwo\n";
//! let index = Index::build(data)?;
//! let lookup = LookupService::new(data, &index.mph, &index.offsets);
//! assert_eq!(lookup.lookup(b"beta"), Some(&b"two\n"[..]));
//! assert_eq!(lookup.lookup(b"gamma"), None);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## IO concurrency
//!
//! Values are borrowed directly from the mapped span; accessing cold data blocks the
//! calling thread on a page fault serviced by the OS. The HTTP Adapter ([`server`])
//! dispatches requests across a small worker-thread pool to keep that blocking bounded
//! to one request per thread rather than the whole process.

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod index;
pub mod keys;
pub mod lookup;
pub mod mapper;
pub mod mph;
pub mod offsets;
pub mod record;
pub mod server;

pub use error::Error;
