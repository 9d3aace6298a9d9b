use crate::dns_record::{ResourceRecord, ResponseCode};
use crate::DomainName;

/// The fixed 12-byte DNS header with its flag word split into fields.
///
/// `opcode` and `rcode` use their low 4 bits and `z` its low 3 bits; the
/// encoder masks anything wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: DomainName,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(qname: DomainName, qtype: u16, qclass: u16) -> Self {
        Self {
            qname,
            qtype,
            qclass,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    /// Only the first question is ever answered; further questions are
    /// carried but ignored.
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Rewrites the header counts from the section lengths.
    ///
    /// Sections longer than `u16::MAX` saturate, which the encoder reports as
    /// a count mismatch.
    pub fn sync_counts(&mut self) {
        self.header.qd_count = section_count(self.questions.len());
        self.header.an_count = section_count(self.answers.len());
        self.header.ns_count = section_count(self.authorities.len());
        self.header.ar_count = section_count(self.additionals.len());
    }

    /// An empty reply to `request` carrying `rcode`, echoing its id, opcode,
    /// recursion-desired bit and question section.
    pub fn error_response(request: &Message, rcode: ResponseCode) -> Message {
        let mut response = Message {
            header: Header {
                id: request.header.id,
                qr: true,
                opcode: request.header.opcode,
                rd: request.header.rd,
                rcode: rcode.to_u8(),
                ..Header::default()
            },
            questions: request.questions.clone(),
            ..Message::default()
        };
        response.sync_counts();
        response
    }
}

fn section_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}
