//! Bootstrap: the load-index vs. build-index vs. no-index decision tree run
//! once at startup, followed by either an immediate exit or handing the
//! context off to the HTTP Adapter.

use crate::cli::Cli;
use crate::error::Error;
use crate::index::Index;
use crate::mapper::DataMapper;
use crate::server::{self, ServerContext};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

pub fn run(cli: &Cli) -> Result<(), Error> {
    cli.validate()?;
    let data_mapper = DataMapper::open(&cli.data)?;
    let index_path = resolve_index_path(cli);
    let index = load_or_build(&data_mapper, index_path.as_deref())?;

    if cli.exit {
        tracing::info!("index ready, exiting without serving");
        return Ok(());
    }

    let threads = cli.threads.unwrap_or_else(online_cpu_count);
    let ctx = Arc::new(ServerContext::new(data_mapper, index));
    server::serve(ctx, cli.port, threads)
}

fn load_or_build(data_mapper: &DataMapper, index_path: Option<&std::path::Path>) -> Result<Index, Error> {
    let data = data_mapper.as_slice();

    let Some(index_path) = index_path else {
        tracing::info!("index persistence disabled (\"-i -\"), building in memory");
        return Index::build(data);
    };

    match fs::metadata(index_path) {
        Ok(_) => {
            tracing::info!(path = %index_path.display(), "loading index file");
            Index::load(index_path)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("building index");
            let index = Index::build(data)?;
            tracing::info!(path = %index_path.display(), n = index.len(), "saving index file");
            index.save(index_path)?;
            Ok(index)
        }
        Err(e) => Err(Error::Config(format!(
            "error opening index file {}: {e}",
            index_path.display()
        ))),
    }
}

/// `None` means index persistence is disabled ("-i -"); unset defaults to
/// "<data>.idx".
fn resolve_index_path(cli: &Cli) -> Option<PathBuf> {
    match cli.index.as_deref() {
        Some("-") => None,
        Some(path) => Some(PathBuf::from(path)),
        None => {
            let mut name: OsString = cli.data.clone().into_os_string();
            name.push(".idx");
            Some(PathBuf::from(name))
        }
    }
}

fn online_cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_default_index_path() {
        let cli = Cli {
            data: PathBuf::from("/tmp/data.tsv"),
            index: None,
            port: 8080,
            threads: None,
            exit: false,
            verbose: 0,
        };
        assert_eq!(
            resolve_index_path(&cli),
            Some(PathBuf::from("/tmp/data.tsv.idx"))
        );
    }

    #[test]
    fn dash_disables_index_persistence() {
        let cli = Cli {
            data: PathBuf::from("/tmp/data.tsv"),
            index: Some("-".to_string()),
            port: 8080,
            threads: None,
            exit: false,
            verbose: 0,
        };
        assert_eq!(resolve_index_path(&cli), None);
    }

    #[test]
    fn explicit_index_path_is_used_as_given() {
        let cli = Cli {
            data: PathBuf::from("/tmp/data.tsv"),
            index: Some("/var/lib/bam/custom.idx".to_string()),
            port: 8080,
            threads: None,
            exit: false,
            verbose: 0,
        };
        assert_eq!(
            resolve_index_path(&cli),
            Some(PathBuf::from("/var/lib/bam/custom.idx"))
        );
    }
}
