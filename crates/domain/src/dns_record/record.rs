use crate::DomainName;

/// A resource record as it travels on the wire.
///
/// `rdlength` is kept as its own field because the decoder reports what the
/// sender declared; the encoder refuses records where it disagrees with
/// `rdata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,

    pub rtype: u16,

    pub rclass: u16,

    pub ttl: u32,

    pub rdlength: u16,

    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    /// Builds a record whose `rdlength` matches `rdata`.
    ///
    /// Rdata longer than `u16::MAX` saturates the declared length, which
    /// the encoder then rejects as a mismatch.
    pub fn new(name: DomainName, rtype: u16, rclass: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        let rdlength = u16::try_from(rdata.len()).unwrap_or(u16::MAX);
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdlength,
            rdata,
        }
    }

    pub fn has_consistent_length(&self) -> bool {
        self.rdlength as usize == self.rdata.len()
    }
}
