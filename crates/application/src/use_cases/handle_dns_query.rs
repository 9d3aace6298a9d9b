use crate::ports::QueryForwarder;
use ruledns_domain::{
    CompiledRule, DnsRequest, DomainError, Header, Message, RecordClass, RecordType,
    ResourceRecord, ResponseCode, RuleResponse, RuleTable,
};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_ANSWER_TTL: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// A reply built locally, ready to encode and send back.
    Answered(Message),
    /// Handed to the upstream resolver; it will answer the client.
    Forwarded,
}

pub struct HandleDnsQueryUseCase {
    rules: Arc<RuleTable>,
    forwarder: Arc<dyn QueryForwarder>,
    answer_ttl: u32,
}

impl HandleDnsQueryUseCase {
    pub fn new(rules: Arc<RuleTable>, forwarder: Arc<dyn QueryForwarder>) -> Self {
        Self {
            rules,
            forwarder,
            answer_ttl: DEFAULT_ANSWER_TTL,
        }
    }

    pub fn with_answer_ttl(mut self, ttl: u32) -> Self {
        self.answer_ttl = ttl;
        self
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<QueryOutcome, DomainError> {
        let Some(question) = request.message.first_question() else {
            debug!(id = request.id(), client = %request.client, "Query without question");
            return Ok(QueryOutcome::Answered(Message::error_response(
                &request.message,
                ResponseCode::FormErr,
            )));
        };

        if let Some(rule) = self
            .rules
            .find(&question.qname, question.qtype, question.qclass)
        {
            info!(
                domain = %question.qname,
                qtype = %RecordType::describe(question.qtype),
                qclass = %RecordClass::describe(question.qclass),
                client = %request.client,
                "MATCHED"
            );
            return Ok(QueryOutcome::Answered(
                self.build_answer(&request.message, rule),
            ));
        }

        info!(
            domain = %question.qname,
            qtype = %RecordType::describe(question.qtype),
            qclass = %RecordClass::describe(question.qclass),
            client = %request.client,
            "FORWARD"
        );
        self.forwarder.forward(request).await?;
        Ok(QueryOutcome::Forwarded)
    }

    fn build_answer(&self, query: &Message, rule: &CompiledRule) -> Message {
        let mut response = Message {
            header: Header {
                id: query.header.id,
                qr: true,
                opcode: query.header.opcode,
                rd: query.header.rd,
                rcode: rule.response.rcode(),
                ..Header::default()
            },
            questions: query.questions.clone(),
            ..Message::default()
        };

        if let RuleResponse::Found {
            rtype,
            rclass,
            rdata,
        } = &rule.response
        {
            response.answers.push(ResourceRecord::new(
                rule.qname.clone(),
                *rtype,
                *rclass,
                self.answer_ttl,
                rdata.clone(),
            ));
        }

        response.sync_counts();
        response
    }
}
