use async_trait::async_trait;
use ruledns_domain::{DnsRequest, DomainError};

/// Hands a query no rule matched to an upstream resolver.
///
/// Implementations return as soon as the query is on its way; the reply is
/// delivered to the client out of band.
#[async_trait]
pub trait QueryForwarder: Send + Sync {
    async fn forward(&self, request: &DnsRequest) -> Result<(), DomainError>;
}
