use super::reader::WireReader;
use ruledns_domain::{domain_name::MAX_NAME_WIRE_LEN, DecodeError, DomainName};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Upper bound on compression pointers followed while reading one name.
pub const MAX_POINTER_HOPS: usize = 128;

const POINTER_MASK: u8 = 0xC0;
const MAX_POINTER_OFFSET: usize = 0x3FFF;

/// Reads a possibly compressed name at the reader's position.
///
/// The reader ends up just past the name as it appears at the starting
/// position: after the terminating zero byte, or after the first pointer.
pub fn read_name(reader: &mut WireReader<'_>) -> Result<DomainName, DecodeError> {
    let buf = reader.buffer();
    let start = reader.position();
    let mut pos = start;
    let mut resume_at: Option<usize> = None;
    let mut visited: SmallVec<[usize; 8]> = SmallVec::new();
    let mut wire_len = 1usize;
    let mut name = DomainName::root();

    loop {
        let head = *buf.get(pos).ok_or(DecodeError::TruncatedMessage {
            offset: pos,
            needed: 1,
            len: buf.len(),
        })?;

        match head & POINTER_MASK {
            0xC0 => {
                let low = *buf.get(pos + 1).ok_or(DecodeError::TruncatedMessage {
                    offset: pos,
                    needed: 2,
                    len: buf.len(),
                })?;
                let target = (usize::from(head & !POINTER_MASK) << 8) | usize::from(low);

                if target >= buf.len() {
                    return Err(DecodeError::NamePointerOutOfRange {
                        offset: pos,
                        target,
                        len: buf.len(),
                    });
                }
                if visited.contains(&target) || visited.len() >= MAX_POINTER_HOPS {
                    return Err(DecodeError::NamePointerCycle { offset: pos });
                }
                visited.push(target);

                if resume_at.is_none() {
                    resume_at = Some(pos + 2);
                }
                pos = target;
            }
            0x00 => {
                let len = usize::from(head);
                if len == 0 {
                    reader.set_position(resume_at.unwrap_or(pos + 1));
                    return Ok(name);
                }

                let label = buf
                    .get(pos + 1..pos + 1 + len)
                    .ok_or(DecodeError::TruncatedMessage {
                        offset: pos + 1,
                        needed: len,
                        len: buf.len(),
                    })?;

                wire_len += len + 1;
                if wire_len > MAX_NAME_WIRE_LEN {
                    return Err(DecodeError::NameTooLong { offset: start });
                }

                let text = std::str::from_utf8(label)
                    .ok()
                    .filter(|text| text.is_ascii())
                    .ok_or(DecodeError::NonAsciiLabel { offset: pos })?;
                name.push_label(text)
                    .map_err(|_| DecodeError::NameTooLong { offset: start })?;

                pos += 1 + len;
            }
            _ => return Err(DecodeError::InvalidLabelLength { offset: pos, head }),
        }
    }
}

/// Offsets at which whole names were first written in one message.
///
/// Only exact repeats of a full label sequence are replaced by a pointer;
/// shared suffixes are written out again. Matching is byte-exact, like name
/// comparison everywhere else.
#[derive(Debug, Default)]
pub struct NameCompressor {
    offsets: HashMap<DomainName, u16>,
}

impl NameCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, name: &DomainName) -> Option<u16> {
        self.offsets.get(name).copied()
    }

    /// Pointers only address the first 16 KiB of a message; later offsets
    /// are not remembered.
    fn remember(&mut self, name: &DomainName, offset: usize) {
        if offset <= MAX_POINTER_OFFSET && !self.offsets.contains_key(name) {
            self.offsets.insert(name.clone(), offset as u16);
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Appends `name` to `out`. With a compressor, a name already written in
/// this message becomes a two-byte pointer to its first occurrence.
///
/// The root name is always the single zero byte.
pub fn write_name(out: &mut Vec<u8>, name: &DomainName, compressor: Option<&mut NameCompressor>) {
    if let Some(table) = compressor {
        if !name.is_root() {
            if let Some(offset) = table.lookup(name) {
                out.extend_from_slice(&(0xC000 | offset).to_be_bytes());
                return;
            }
            table.remember(name, out.len());
        }
    }

    for label in name.labels() {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
}
