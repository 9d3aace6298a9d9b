use super::pending::PendingRequests;
use crate::dns::wire::{WireReader, HEADER_LEN};
use async_trait::async_trait;
use ruledns_application::ports::QueryForwarder;
use ruledns_domain::{DnsRequest, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, warn};

/// Largest upstream reply accepted without EDNS.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Relays unmatched queries to one upstream resolver over UDP.
///
/// Queries go out verbatim from a dedicated socket. [`run_relay`] reads the
/// replies on that socket and sends each one to the client recorded for its
/// transaction id.
///
/// [`run_relay`]: UdpForwarder::run_relay
pub struct UdpForwarder {
    socket: UdpSocket,
    upstream: SocketAddr,
    pending: Arc<PendingRequests>,
}

impl UdpForwarder {
    pub async fn bind(
        upstream: SocketAddr,
        pending: Arc<PendingRequests>,
    ) -> Result<Self, DomainError> {
        let bind_addr: SocketAddr = if upstream.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind upstream socket: {}", e))
        })?;

        Ok(Self {
            socket,
            upstream,
            pending,
        })
    }

    /// Delivers upstream replies to waiting clients through `client_socket`.
    /// Runs until the upstream socket fails.
    ///
    /// Replies are matched on the transaction id alone and relayed verbatim.
    pub async fn run_relay(&self, client_socket: Arc<UdpSocket>) -> Result<(), DomainError> {
        let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let (len, from) = self.socket.recv_from(&mut buf).await.map_err(|e| {
                error!(error = %e, "Upstream socket receive failed");
                DomainError::IoError(e.to_string())
            })?;

            if from != self.upstream {
                warn!(expected = %self.upstream, received_from = %from, "Reply from unexpected source dropped");
                continue;
            }

            let reply = &buf[..len];
            let Some(id) = transaction_id(reply) else {
                warn!(bytes = len, "Short upstream reply dropped");
                continue;
            };

            let Some(query) = self.pending.take(id) else {
                debug!(id = id, "No pending query for upstream reply");
                continue;
            };

            if let Err(e) = client_socket.send_to(reply, query.client).await {
                warn!(error = %e, client = %query.client, "Failed to relay upstream reply");
                continue;
            }

            debug!(
                id = id,
                client = %query.client,
                elapsed_ms = query.created.elapsed().as_millis() as u64,
                "Relayed upstream reply"
            );
        }
    }
}

fn transaction_id(reply: &[u8]) -> Option<u16> {
    if reply.len() < HEADER_LEN {
        return None;
    }
    WireReader::new(reply).read_u16().ok()
}

#[async_trait]
impl QueryForwarder for UdpForwarder {
    async fn forward(&self, request: &DnsRequest) -> Result<(), DomainError> {
        let id = request.id();
        if !self.pending.register(id, request.client) {
            return Err(DomainError::Forwarding(format!(
                "{} queries already awaiting upstream",
                self.pending.len()
            )));
        }

        if let Err(e) = self.socket.send_to(&request.raw, self.upstream).await {
            self.pending.remove(id);
            return Err(DomainError::Forwarding(format!(
                "Failed to send query to {}: {}",
                self.upstream, e
            )));
        }

        debug!(id = id, upstream = %self.upstream, bytes = request.raw.len(), "Query forwarded");
        Ok(())
    }
}
