//! `demystify serve` command implementation.
//!
//! Reads length-prefixed [`Request`] frames from stdin and answers each with a
//! [`Response`] frame on stdout, strictly in order. Every request gets its own
//! pipeline, so nothing leaks between requests. A failing or panicking run
//! becomes a failure response; the loop keeps going.

use demystify_core::Demystifier;
use demystify_proto::{read_frame, write_frame, Request, Response};
use miette::{IntoDiagnostic, Result};
use std::any::Any;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let served = serve(
        &mut BufReader::new(stdin.lock()),
        &mut BufWriter::new(stdout.lock()),
    )
    .into_diagnostic()?;
    info!(served, "input closed");
    Ok(())
}

/// Answer requests until `reader` hits a clean end of stream.
///
/// Returns the number of requests answered.
pub fn serve<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<usize> {
    let mut served = 0;
    while let Some(request) = read_frame::<_, Request>(reader)? {
        let response = handle(&request);
        if !response.success {
            warn!(id = %request.id, error = ?response.error, "request failed");
        }
        write_frame(writer, &response)?;
        served += 1;
    }
    Ok(served)
}

/// Run one request through a fresh pipeline.
pub fn handle(request: &Request) -> Response {
    debug!(id = %request.id, bytes = request.code.len(), "request");
    let demystifier = Demystifier::default();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        demystifier.run(&request.code).map(|out| out.code)
    }));
    match outcome {
        Ok(result) => Response::from_result(result, request.id.clone()),
        Err(payload) => Response::failure(panic_message(payload.as_ref()), request.id.clone()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "internal error".to_string()
    }
}
