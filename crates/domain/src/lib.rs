//! ruledns domain layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod dns_request;
pub mod domain_name;
pub mod errors;
pub mod rule;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{Header, Message, Question};
pub use dns_record::{RecordClass, RecordType, ResourceRecord, ResponseCode};
pub use dns_request::DnsRequest;
pub use domain_name::DomainName;
pub use errors::{CompileError, DecodeError, DomainError, EncodeError};
pub use rule::{CompiledRule, RuleResponse, RuleTable, NOT_FOUND_STATUS};
