//! Argument parsing. A thin collaborator at the boundary of the core,
//! implemented with `clap` derive.

use crate::error::Error;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bam",
    version,
    about = "Serve read-only key/value lookups over a memory-mapped TSV file, indexed by a minimal perfect hash."
)]
pub struct Cli {
    /// TSV data file. Records are "KEY\tVALUE\n"; lines without a TAB before
    /// their LF are ignored, and a trailing partial line is ignored.
    pub data: PathBuf,

    /// Index file path, or "-" to disable index persistence.
    /// Defaults to `<data>.idx`.
    #[arg(short = 'i', long = "index", value_name = "PATH")]
    pub index: Option<String>,

    /// TCP port to listen on.
    #[arg(short = 'p', long = "port", default_value_t = 8080, value_name = "N")]
    pub port: u16,

    /// Number of HTTP worker threads. Defaults to the number of online CPUs.
    #[arg(short = 't', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Build (or load) the index and exit without serving.
    #[arg(short = 'x', long = "exit")]
    pub exit: bool,

    /// Increase log verbosity (repeatable): -v for debug, -vv for trace.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn tracing_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Rejects a port or thread count of zero. `port` is a `u16` (so "negative" isn't
    /// representable) and `threads` is unset rather than zero by default, but both are
    /// still plain integers a caller can hand in as `0` explicitly.
    pub fn validate(&self) -> Result<(), Error> {
        if self.port == 0 {
            return Err(Error::Config("port must be a positive integer".to_string()));
        }
        if self.threads == Some(0) {
            return Err(Error::Config(
                "threads must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}
