use ruledns_domain::DecodeError;

/// Big-endian cursor over a received datagram.
///
/// Every read is bounds checked and reports the offset it failed at.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// The whole message, needed to follow compression pointers.
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or(DecodeError::TruncatedMessage {
                offset: self.pos,
                needed: n,
                len: self.buf.len(),
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian() {
        let mut reader = WireReader::new(&[0x12, 0x34, 0x00, 0x00, 0x01, 0x2C, 0xFF]);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 300);
        assert_eq!(reader.read_u8().unwrap(), 0xFF);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_short_read_reports_offset() {
        let mut reader = WireReader::new(&[0x00, 0x01, 0x02]);
        reader.read_u16().unwrap();

        let err = reader.read_u16().unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedMessage {
                offset: 2,
                needed: 2,
                len: 3
            }
        );
        // A failed read does not move the cursor.
        assert_eq!(reader.position(), 2);
    }
}
