use crate::Message;
use std::net::SocketAddr;
use std::sync::Arc;

/// A decoded query together with the datagram it came from.
///
/// The raw bytes are kept so an unmatched query can be forwarded verbatim.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub message: Message,
    pub raw: Arc<[u8]>,
    pub client: SocketAddr,
}

impl DnsRequest {
    pub fn new(message: Message, raw: impl Into<Arc<[u8]>>, client: SocketAddr) -> Self {
        Self {
            message,
            raw: raw.into(),
            client,
        }
    }

    pub fn id(&self) -> u16 {
        self.message.header.id
    }
}
