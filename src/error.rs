use thiserror::Error;

/// Errors surfaced by the core. Only [`Error::Io`] wraps a foreign error type directly;
/// the others carry a formatted message because their root causes (a bad CLI flag, a
/// corrupt MPH payload, a duplicate key) are diagnosed at the point of failure and don't
/// need their own variant-per-cause.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad CLI arguments, a missing/empty data file, or an mmap failure.
    #[error("config error: {0}")]
    Config(String),

    /// Index file present but unreadable: wrong magic, short read, corrupt MPH payload,
    /// or an offset table whose length is inconsistent with the file.
    #[error("index error: {0}")]
    Index(String),

    /// The MPH construction refused the key set (duplicate or invalid keys), or the
    /// data file contained zero records.
    #[error("build error: {0}")]
    Build(String),

    /// The HTTP server failed to bind or start.
    #[error("server error: {0}")]
    Serve(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
