#![allow(dead_code)]

use async_trait::async_trait;
use ruledns_application::ports::QueryForwarder;
use ruledns_domain::{DnsRequest, DomainError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockQueryForwarder {
    forwarded: Arc<RwLock<Vec<DnsRequest>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockQueryForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub async fn forwarded(&self) -> Vec<DnsRequest> {
        self.forwarded.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.forwarded.read().await.len()
    }
}

#[async_trait]
impl QueryForwarder for MockQueryForwarder {
    async fn forward(&self, request: &DnsRequest) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::Forwarding("upstream unreachable".to_string()));
        }
        self.forwarded.write().await.push(request.clone());
        Ok(())
    }
}
