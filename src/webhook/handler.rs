//! Admission Handler
//!
//! Reads a single JSON admission request, runs the mutator on its object and
//! writes a single JSON response:
//!
//!   azp-mutator review < request.json > response.json

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::envelope::{AdmissionRequest, AdmissionResponse};
use super::errors::WebhookError;
use crate::mutator::Mutator;

/// Admission handler dispatching to a mutator
pub struct AdmissionHandler<M> {
    mutator: M,
    pretty: bool,
}

impl<M: Mutator> AdmissionHandler<M> {
    /// Create a new handler around `mutator`
    pub fn new(mutator: M) -> Self {
        Self {
            mutator,
            pretty: false,
        }
    }

    /// Pretty-print responses
    pub fn with_pretty_output(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Run the handler, reading from stdin and writing to stdout
    pub fn run(&self) -> io::Result<()> {
        self.run_with_io(&mut io::stdin().lock(), &mut io::stdout().lock())
    }

    /// Run the handler with custom I/O (for testing)
    pub fn run_with_io<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> io::Result<()> {
        let request = match self.read_request(reader) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Rejecting unreadable admission request");
                let response = AdmissionResponse::denied(String::new(), e.to_payload());
                return self.write_response(writer, &response);
            }
        };

        let response = self.handle(request);
        self.write_response(writer, &response)
    }

    /// Handle one parsed admission request
    pub fn handle(&self, request: AdmissionRequest) -> AdmissionResponse {
        let AdmissionRequest {
            uid,
            operation,
            mut object,
            old_object,
        } = request;

        debug!(uid = %uid, operation = ?operation, "Handling admission request");

        match self.mutator.mutate(&mut object, old_object.as_ref()) {
            Ok(()) => AdmissionResponse::allowed(uid, object),
            Err(e) => {
                let err = WebhookError::from(e);
                warn!(uid = %uid, code = %err.code(), error = %err, "Mutation failed");
                AdmissionResponse::denied(uid, err.to_payload())
            }
        }
    }

    /// Read and parse the admission request from the reader
    fn read_request<R: BufRead>(&self, reader: &mut R) -> Result<AdmissionRequest, WebhookError> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|e| WebhookError::InvalidRequest(format!("Failed to read request: {}", e)))?;

        serde_json::from_str(&input)
            .map_err(|e| WebhookError::InvalidRequest(format!("Invalid JSON: {}", e)))
    }

    /// Write the response to the writer
    fn write_response<W: Write>(
        &self,
        writer: &mut W,
        response: &AdmissionResponse,
    ) -> io::Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(response)
        } else {
            serde_json::to_string(response)
        }
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{}", json)?;
        writer.flush()
    }
}
