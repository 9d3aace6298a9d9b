use crate::dns::wire::{decode, MessageEncoder};
use ruledns_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use ruledns_domain::{DnsRequest, Message, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns one received datagram into at most one reply datagram.
///
/// Nothing here panics on hostile input: undecodable datagrams are dropped,
/// and a failed lookup becomes SERVFAIL.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    encoder: MessageEncoder,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self {
            use_case,
            encoder: MessageEncoder::new(),
        }
    }

    /// Returns the bytes to send back to `client`, or `None` when nothing
    /// should be sent now.
    pub async fn handle_datagram(&self, buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let message = match decode(buf) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, client = %client, bytes = buf.len(), "Dropping malformed query");
                return None;
            }
        };

        if message.header.qr {
            debug!(id = message.header.id, client = %client, "Ignoring response on query socket");
            return None;
        }

        let request = DnsRequest::new(message, buf, client);

        let response = match self.use_case.execute(&request).await {
            Ok(QueryOutcome::Answered(response)) => response,
            Ok(QueryOutcome::Forwarded) => return None,
            Err(e) => {
                error!(error = %e, id = request.id(), client = %client, "Query handling failed");
                Message::error_response(&request.message, ResponseCode::ServFail)
            }
        };

        match self.encoder.encode(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(error = %e, id = response.header.id, "Failed to encode response");
                None
            }
        }
    }
}
