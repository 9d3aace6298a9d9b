#![allow(dead_code)]
use ruledns_domain::{
    CompiledRule, DomainName, Header, Message, Question, ResourceRecord, RuleResponse,
};

pub fn name(dotted: &str) -> DomainName {
    dotted.parse().unwrap()
}

pub struct RuleBuilder {
    qtype: u16,
    qname: DomainName,
    qclass: u16,
    response: RuleResponse,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self {
            qtype: 1,
            qname: name("example.com"),
            qclass: 1,
            response: RuleResponse::Found {
                rtype: 1,
                rclass: 1,
                rdata: vec![93, 184, 216, 34],
            },
        }
    }

    pub fn qname(mut self, qname: &str) -> Self {
        self.qname = name(qname);
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn qclass(mut self, qclass: u16) -> Self {
        self.qclass = qclass;
        self
    }

    pub fn not_found(mut self) -> Self {
        self.response = RuleResponse::not_found();
        self
    }

    pub fn rdata(mut self, rdata: &[u8]) -> Self {
        self.response = RuleResponse::Found {
            rtype: self.qtype,
            rclass: self.qclass,
            rdata: rdata.to_vec(),
        };
        self
    }

    pub fn build(self) -> CompiledRule {
        CompiledRule {
            qtype: self.qtype,
            qname: self.qname,
            qclass: self.qclass,
            response: self.response,
        }
    }
}

pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn query(id: u16, qname: &str, qtype: u16) -> Self {
        let mut message = Message {
            header: Header {
                id,
                rd: true,
                ..Header::default()
            },
            questions: vec![Question::new(name(qname), qtype, 1)],
            ..Message::default()
        };
        message.sync_counts();
        Self { message }
    }

    pub fn answer(mut self, owner: &str, rtype: u16, ttl: u32, rdata: &[u8]) -> Self {
        self.message
            .answers
            .push(ResourceRecord::new(name(owner), rtype, 1, ttl, rdata.to_vec()));
        self.message.sync_counts();
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}
