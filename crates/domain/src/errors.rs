use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Malformed DNS message: {0}")]
    Decode(#[from] DecodeError),

    #[error("Cannot encode DNS message: {0}")]
    Encode(#[from] EncodeError),

    #[error("Rule compilation failed: {0}")]
    RuleCompile(#[from] CompileError),

    #[error("Forwarding failed: {0}")]
    Forwarding(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

/// Reasons an inbound datagram cannot be turned into a message.
///
/// All of these are the sender's fault; the datagram is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated message: needed {needed} bytes at offset {offset}, buffer has {len}")]
    TruncatedMessage {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Compression pointer cycle at offset {offset}")]
    NamePointerCycle { offset: usize },

    #[error("Compression pointer at offset {offset} targets {target}, buffer has {len} bytes")]
    NamePointerOutOfRange {
        offset: usize,
        target: usize,
        len: usize,
    },

    #[error("Invalid label length byte 0x{head:02X} at offset {offset}")]
    InvalidLabelLength { offset: usize, head: u8 },

    #[error("Non-ASCII label at offset {offset}")]
    NonAsciiLabel { offset: usize },

    #[error("Name starting at offset {offset} exceeds 255 bytes")]
    NameTooLong { offset: usize },
}

/// A caller-built message that violates the wire invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Record '{name}' declares rdlength {declared} but carries {actual} bytes of rdata")]
    RdataLengthMismatch {
        name: String,
        declared: u16,
        actual: usize,
    },

    #[error("Header {section} count is {declared} but the section holds {actual} entries")]
    HeaderCountMismatch {
        section: &'static str,
        declared: u16,
        actual: usize,
    },
}

/// Errors raised while compiling rule source text.
///
/// Offsets are byte offsets into the source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Unknown record {category} '{token}' at offset {offset}")]
    UnknownTypeOrClass {
        category: &'static str,
        token: String,
        offset: usize,
    },

    #[error("Malformed IPv4 address '{literal}' at offset {offset}")]
    MalformedIpv4Literal { literal: String, offset: usize },

    #[error("IPv6 address '{literal}' at offset {offset} is not supported")]
    UnsupportedAddressFamily { literal: String, offset: usize },

    #[error("Record type {rtype} at offset {offset} cannot be used in a response")]
    UnsupportedRecordType { rtype: String, offset: usize },

    #[error("Invalid name '{name}' at offset {offset}: {reason}")]
    InvalidName {
        name: String,
        reason: String,
        offset: usize,
    },

    #[error("Expected {expected}, but got {found} '{text}' at offset {offset}")]
    TokenMismatch {
        expected: &'static str,
        found: &'static str,
        text: String,
        offset: usize,
    },

    #[error("No alternative matched:{}", render_alternatives(.0))]
    NoAlternative(Vec<CompileError>),

    #[error("{0}")]
    Custom(String),
}

impl CompileError {
    /// True if this error, or any alternative nested under it, satisfies
    /// `predicate`.
    pub fn any(&self, predicate: &dyn Fn(&CompileError) -> bool) -> bool {
        match self {
            CompileError::NoAlternative(errors) => errors.iter().any(|e| e.any(predicate)),
            other => predicate(other),
        }
    }
}

fn render_alternatives(errors: &[CompileError]) -> String {
    errors.iter().map(|e| format!("\n  * {}", e)).collect()
}
