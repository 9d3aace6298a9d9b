use super::name::read_name;
use super::reader::WireReader;
use ruledns_domain::{DecodeError, Header, Message, Question, ResourceRecord};

/// Parses a complete datagram.
///
/// Section lengths follow the header counts. Bytes after the last record are
/// ignored.
pub fn decode(buf: &[u8]) -> Result<Message, DecodeError> {
    let mut reader = WireReader::new(buf);
    let header = read_header(&mut reader)?;

    let mut questions = Vec::with_capacity(usize::from(header.qd_count).min(16));
    for _ in 0..header.qd_count {
        questions.push(read_question(&mut reader)?);
    }

    let answers = read_records(&mut reader, header.an_count)?;
    let authorities = read_records(&mut reader, header.ns_count)?;
    let additionals = read_records(&mut reader, header.ar_count)?;

    Ok(Message {
        header,
        questions,
        answers,
        authorities,
        additionals,
    })
}

fn read_header(reader: &mut WireReader<'_>) -> Result<Header, DecodeError> {
    let id = reader.read_u16()?;
    let flags = reader.read_u16()?;

    Ok(Header {
        id,
        qr: flags & 0x8000 != 0,
        opcode: ((flags >> 11) & 0x0F) as u8,
        aa: flags & 0x0400 != 0,
        tc: flags & 0x0200 != 0,
        rd: flags & 0x0100 != 0,
        ra: flags & 0x0080 != 0,
        z: ((flags >> 4) & 0x07) as u8,
        rcode: (flags & 0x0F) as u8,
        qd_count: reader.read_u16()?,
        an_count: reader.read_u16()?,
        ns_count: reader.read_u16()?,
        ar_count: reader.read_u16()?,
    })
}

fn read_question(reader: &mut WireReader<'_>) -> Result<Question, DecodeError> {
    let qname = read_name(reader)?;
    let qtype = reader.read_u16()?;
    let qclass = reader.read_u16()?;
    Ok(Question::new(qname, qtype, qclass))
}

fn read_records(
    reader: &mut WireReader<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, DecodeError> {
    let mut records = Vec::with_capacity(usize::from(count).min(16));
    for _ in 0..count {
        let name = read_name(reader)?;
        let rtype = reader.read_u16()?;
        let rclass = reader.read_u16()?;
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()?;
        let rdata = reader.read_bytes(usize::from(rdlength))?.to_vec();
        records.push(ResourceRecord {
            name,
            rtype,
            rclass,
            ttl,
            rdlength,
            rdata,
        });
    }
    Ok(records)
}
