use ruledns_application::use_cases::HandleDnsQueryUseCase;
use ruledns_domain::{Config, RuleTable};
use ruledns_infrastructure::dns::{DnsServerHandler, PendingRequests, UdpForwarder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
    pub forwarder: Arc<UdpForwarder>,
    pub pending: Arc<PendingRequests>,
}

impl DnsServices {
    pub async fn new(config: &Config, rules: RuleTable) -> anyhow::Result<Self> {
        let upstream = config.upstream.socket_addr()?;
        let pending = Arc::new(PendingRequests::new(
            config.upstream.timeout(),
            config.upstream.max_pending,
        ));

        let forwarder = Arc::new(UdpForwarder::bind(upstream, Arc::clone(&pending)).await?);
        info!(
            upstream = %upstream,
            timeout_secs = config.upstream.timeout_secs,
            max_pending = config.upstream.max_pending,
            "Upstream forwarder ready"
        );

        let use_case = HandleDnsQueryUseCase::new(Arc::new(rules), forwarder.clone())
            .with_answer_ttl(config.rules.answer_ttl);

        Ok(Self {
            handler: Arc::new(DnsServerHandler::new(Arc::new(use_case))),
            forwarder,
            pending,
        })
    }
}
