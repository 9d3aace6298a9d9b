use crate::dns_record::ResponseCode;
use crate::DomainName;

/// Response code sent for `-` rules.
///
/// This is NOTIMP, not NXDOMAIN. Existing rule files depend on that value.
pub const NOT_FOUND_STATUS: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResponse {
    Found {
        rtype: u16,
        rclass: u16,
        rdata: Vec<u8>,
    },
    NotFound {
        status: u8,
    },
}

impl RuleResponse {
    pub fn not_found() -> Self {
        RuleResponse::NotFound {
            status: NOT_FOUND_STATUS,
        }
    }

    pub fn rcode(&self) -> u8 {
        match self {
            RuleResponse::Found { .. } => ResponseCode::NoError.to_u8(),
            RuleResponse::NotFound { status } => *status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub qtype: u16,
    pub qname: DomainName,
    pub qclass: u16,
    pub response: RuleResponse,
}

impl CompiledRule {
    pub fn matches(&self, qname: &DomainName, qtype: u16, qclass: u16) -> bool {
        self.qtype == qtype && self.qclass == qclass && &self.qname == qname
    }
}

/// The compiled rule set. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<CompiledRule>) -> Self {
        Self { rules }
    }

    /// First rule in source order whose name, type and class all match
    /// exactly.
    pub fn find(&self, qname: &DomainName, qtype: u16, qclass: u16) -> Option<&CompiledRule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(qname, qtype, qclass))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }
}
