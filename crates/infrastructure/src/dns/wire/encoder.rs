use super::name::{write_name, NameCompressor};
use super::HEADER_LEN;
use ruledns_domain::{EncodeError, Header, Message, Question, ResourceRecord};

/// Serializes messages, compressing owner and question names by default.
#[derive(Debug, Clone, Copy)]
pub struct MessageEncoder {
    compress: bool,
}

impl Default for MessageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageEncoder {
    pub fn new() -> Self {
        Self { compress: true }
    }

    pub fn without_compression(mut self) -> Self {
        self.compress = false;
        self
    }

    /// Header counts must equal the section lengths and every record's
    /// rdlength must equal its rdata length. Nothing is repaired.
    pub fn encode(&self, message: &Message) -> Result<Vec<u8>, EncodeError> {
        validate(message)?;

        let mut out = Vec::with_capacity(512);
        write_header(&mut out, &message.header);

        let mut table = NameCompressor::new();
        let mut compressor = if self.compress { Some(&mut table) } else { None };

        for question in &message.questions {
            write_question(&mut out, question, compressor.as_deref_mut());
        }
        for record in message
            .answers
            .iter()
            .chain(&message.authorities)
            .chain(&message.additionals)
        {
            write_record(&mut out, record, compressor.as_deref_mut());
        }

        Ok(out)
    }
}

/// Encodes with compression enabled.
pub fn encode(message: &Message) -> Result<Vec<u8>, EncodeError> {
    MessageEncoder::new().encode(message)
}

fn validate(message: &Message) -> Result<(), EncodeError> {
    let header = &message.header;
    check_count("question", header.qd_count, message.questions.len())?;
    check_count("answer", header.an_count, message.answers.len())?;
    check_count("authority", header.ns_count, message.authorities.len())?;
    check_count("additional", header.ar_count, message.additionals.len())?;

    for record in message
        .answers
        .iter()
        .chain(&message.authorities)
        .chain(&message.additionals)
    {
        if !record.has_consistent_length() {
            return Err(EncodeError::RdataLengthMismatch {
                name: record.name.to_string(),
                declared: record.rdlength,
                actual: record.rdata.len(),
            });
        }
    }
    Ok(())
}

fn check_count(section: &'static str, declared: u16, actual: usize) -> Result<(), EncodeError> {
    if usize::from(declared) != actual {
        return Err(EncodeError::HeaderCountMismatch {
            section,
            declared,
            actual,
        });
    }
    Ok(())
}

fn write_header(out: &mut Vec<u8>, header: &Header) {
    let mut flags: u16 = 0;
    if header.qr {
        flags |= 0x8000;
    }
    flags |= u16::from(header.opcode & 0x0F) << 11;
    if header.aa {
        flags |= 0x0400;
    }
    if header.tc {
        flags |= 0x0200;
    }
    if header.rd {
        flags |= 0x0100;
    }
    if header.ra {
        flags |= 0x0080;
    }
    flags |= u16::from(header.z & 0x07) << 4;
    flags |= u16::from(header.rcode & 0x0F);

    out.extend_from_slice(&header.id.to_be_bytes());
    out.extend_from_slice(&flags.to_be_bytes());
    out.extend_from_slice(&header.qd_count.to_be_bytes());
    out.extend_from_slice(&header.an_count.to_be_bytes());
    out.extend_from_slice(&header.ns_count.to_be_bytes());
    out.extend_from_slice(&header.ar_count.to_be_bytes());
    debug_assert_eq!(out.len(), HEADER_LEN);
}

fn write_question(out: &mut Vec<u8>, question: &Question, compressor: Option<&mut NameCompressor>) {
    write_name(out, &question.qname, compressor);
    out.extend_from_slice(&question.qtype.to_be_bytes());
    out.extend_from_slice(&question.qclass.to_be_bytes());
}

fn write_record(
    out: &mut Vec<u8>,
    record: &ResourceRecord,
    compressor: Option<&mut NameCompressor>,
) {
    write_name(out, &record.name, compressor);
    out.extend_from_slice(&record.rtype.to_be_bytes());
    out.extend_from_slice(&record.rclass.to_be_bytes());
    out.extend_from_slice(&record.ttl.to_be_bytes());
    out.extend_from_slice(&record.rdlength.to_be_bytes());
    out.extend_from_slice(&record.rdata);
}
