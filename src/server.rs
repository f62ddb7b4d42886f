//! The HTTP Adapter: wires the Lookup Service into a small worker pool of
//! blocking `tiny_http` threads sharing one listener and one immutable
//! [`ServerContext`].

use crate::error::Error;
use crate::index::Index;
use crate::lookup::LookupService;
use crate::mapper::DataMapper;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Method, Response, Server};

const NOT_FOUND_BODY: &str = "Resource not found\n";

/// Everything a worker thread needs to answer a request, shared without synchronization
/// because none of it is ever mutated after [`ServerContext::new`] returns.
pub struct ServerContext {
    data: DataMapper,
    index: Index,
}

impl ServerContext {
    pub fn new(data: DataMapper, index: Index) -> Self {
        Self { data, index }
    }

    fn lookup(&self) -> LookupService<'_> {
        LookupService::new(self.data.as_slice(), &self.index.mph, &self.index.offsets)
    }
}

/// Binds `port` and serves until a shutdown signal (SIGINT/SIGTERM) arrives, then joins
/// every worker thread. Replaces the original tool's `for(;;) sleep(...)` busy-wait with
/// an actual blocking join released by `tiny_http::Server::unblock`.
///
/// Expects `port != 0` and `threads >= 1`; callers validate those up front (see
/// `Cli::validate`) rather than this function silently substituting a fallback.
pub fn serve(ctx: Arc<ServerContext>, port: u16, threads: usize) -> Result<(), Error> {
    let server = Server::http(("0.0.0.0", port))
        .map_err(|e| Error::Serve(format!("failed to bind port {port}: {e}")))?;
    let server = Arc::new(server);
    let running = Arc::new(AtomicBool::new(true));

    {
        let server = Arc::clone(&server);
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            tracing::info!("shutdown signal received");
            running.store(false, Ordering::SeqCst);
            server.unblock();
        })
        .map_err(|e| Error::Serve(format!("failed to install signal handler: {e}")))?;
    }

    tracing::info!(port, threads, "serving");

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let server = Arc::clone(&server);
            let ctx = Arc::clone(&ctx);
            let running = Arc::clone(&running);
            thread::spawn(move || worker_loop(&server, &ctx, &running))
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
    Ok(())
}

fn worker_loop(server: &Server, ctx: &ServerContext, running: &AtomicBool) {
    while running.load(Ordering::SeqCst) {
        match server.recv() {
            Ok(request) => handle_request(ctx, request),
            Err(e) => {
                if running.load(Ordering::SeqCst) {
                    tracing::debug!(error = %e, "error receiving request");
                }
                return;
            }
        }
    }
}

fn handle_request(ctx: &ServerContext, request: tiny_http::Request) {
    if *request.method() != Method::Get {
        let _ = request.respond(Response::empty(405u16));
        return;
    }

    let text_plain = || Header::from_bytes(&b"Content-Type"[..], &b"text/plain"[..]).unwrap();

    let query = request.url().strip_prefix('/');
    let value = query.and_then(|q| ctx.lookup().lookup(q.as_bytes()));

    match value {
        Some(value) => {
            let response = Response::from_data(value)
                .with_status_code(200u16)
                .with_header(text_plain());
            let _ = request.respond(response);
        }
        None => {
            let response = Response::from_string(NOT_FOUND_BODY)
                .with_status_code(404u16)
                .with_header(text_plain());
            let _ = request.respond(response);
        }
    }
}
