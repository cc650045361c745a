//! Binary codec for the store blob
//!
//! The durable artifact is a single blob, rewritten whole on every save.
//! Layout (little-endian throughout, versionless):
//!
//! ```text
//! +------------------+
//! | Magic "CFS1"     | (4 bytes)
//! +------------------+
//! | next_id          | (u64 LE, persistent id counter)
//! +------------------+
//! | record count     | (u32 LE)
//! +------------------+
//! | record frames    | (count frames)
//! +------------------+
//! ```
//!
//! Record frame:
//!
//! ```text
//! +------------------+
//! | Frame Length     | (u32 LE, includes this field and the checksum)
//! +------------------+
//! | Id Present Flag  | (u8: 0 = absent, 1 = present)
//! +------------------+
//! | Id               | (u64 LE, zero when absent)
//! +------------------+
//! | Name             | (length-prefixed UTF-8)
//! +------------------+
//! | Email            | (length-prefixed UTF-8)
//! +------------------+
//! | Checksum         | (u32 LE, crc32 over all preceding frame bytes)
//! +------------------+
//! ```
//!
//! Round-trip is lossless for id, name, and email; the transient
//! validation error list is not persisted. Any structural defect
//! (bad magic, truncation, checksum mismatch, duplicate ids, a counter
//! not above every present id, trailing bytes) decodes to `CorruptData`
//! with the byte offset where decoding stopped.

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StoreError, StoreResult};
use crate::contact::Contact;

/// Identifies a cardfile store blob.
const MAGIC: [u8; 4] = *b"CFS1";

/// Magic + next_id + record count.
const HEADER_SIZE: usize = 4 + 8 + 4;

/// Length field + flag + id + two empty string prefixes + checksum.
const MIN_FRAME_SIZE: usize = 4 + 1 + 8 + 4 + 4 + 4;

/// Encodes the id counter and the full contact sequence into one blob.
pub fn encode_store(next_id: u64, contacts: &[Contact]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(HEADER_SIZE + contacts.len() * 64);

    blob.extend_from_slice(&MAGIC);
    blob.extend_from_slice(&next_id.to_le_bytes());
    blob.extend_from_slice(&(contacts.len() as u32).to_le_bytes());

    for contact in contacts {
        blob.extend_from_slice(&encode_frame(contact));
    }

    blob
}

/// Decodes a blob back into the id counter and the contact sequence.
pub fn decode_store(data: &[u8]) -> StoreResult<(u64, Vec<Contact>)> {
    if data.len() < HEADER_SIZE {
        return Err(StoreError::corrupt(
            0,
            format!(
                "truncated header: {} bytes, expected at least {}",
                data.len(),
                HEADER_SIZE
            ),
        ));
    }

    if data[0..4] != MAGIC {
        return Err(StoreError::corrupt(0, "bad magic, not a cardfile store"));
    }

    let next_id = u64::from_le_bytes(data[4..12].try_into().unwrap());
    let count = u32::from_le_bytes(data[12..16].try_into().unwrap()) as usize;

    // The count is untrusted input: reject it before sizing anything by
    // it. Every frame occupies at least MIN_FRAME_SIZE bytes, so a
    // count the remaining bytes cannot hold is structural damage.
    let body_len = data.len() - HEADER_SIZE;
    if count > body_len / MIN_FRAME_SIZE {
        return Err(StoreError::corrupt(
            12,
            format!(
                "record count {} cannot fit in {} remaining bytes",
                count, body_len
            ),
        ));
    }

    let mut contacts = Vec::with_capacity(count);
    let mut offset = HEADER_SIZE;

    for _ in 0..count {
        let (contact, consumed) = decode_frame(&data[offset..], offset as u64)?;

        if let Some(id) = contact.id {
            if contacts.iter().any(|c: &Contact| c.id == Some(id)) {
                return Err(StoreError::corrupt(
                    offset as u64,
                    format!("duplicate contact id {}", id),
                ));
            }
            if id >= next_id {
                return Err(StoreError::corrupt(
                    offset as u64,
                    format!("id counter {} not above contact id {}", next_id, id),
                ));
            }
        }

        contacts.push(contact);
        offset += consumed;
    }

    if offset != data.len() {
        return Err(StoreError::corrupt(
            offset as u64,
            format!("{} trailing bytes after last record", data.len() - offset),
        ));
    }

    Ok((next_id, contacts))
}

/// Serializes one contact frame: length prefix, body, trailing checksum.
fn encode_frame(contact: &Contact) -> Vec<u8> {
    let mut body = Vec::with_capacity(64);

    body.push(u8::from(contact.id.is_some()));
    body.extend_from_slice(&contact.id.unwrap_or(0).to_le_bytes());

    body.extend_from_slice(&(contact.name.len() as u32).to_le_bytes());
    body.extend_from_slice(contact.name.as_bytes());
    body.extend_from_slice(&(contact.email.len() as u32).to_le_bytes());
    body.extend_from_slice(contact.email.as_bytes());

    let frame_length = (4 + body.len() + 4) as u32;

    // Checksum covers the length field and the body.
    let mut checksum_data = Vec::with_capacity(4 + body.len());
    checksum_data.extend_from_slice(&frame_length.to_le_bytes());
    checksum_data.extend_from_slice(&body);
    let checksum = compute_checksum(&checksum_data);

    let mut frame = Vec::with_capacity(frame_length as usize);
    frame.extend_from_slice(&frame_length.to_le_bytes());
    frame.extend_from_slice(&body);
    frame.extend_from_slice(&checksum.to_le_bytes());

    frame
}

/// Deserializes one frame, verifying its checksum.
///
/// `base` is the frame's absolute byte offset in the blob, used for
/// error context. Returns the contact and the number of bytes consumed.
fn decode_frame(data: &[u8], base: u64) -> StoreResult<(Contact, usize)> {
    if data.len() < MIN_FRAME_SIZE {
        return Err(StoreError::corrupt(
            base,
            format!(
                "truncated record: {} bytes remaining, minimum frame size is {}",
                data.len(),
                MIN_FRAME_SIZE
            ),
        ));
    }

    let frame_length = u32::from_le_bytes(data[0..4].try_into().unwrap()) as usize;
    if frame_length < MIN_FRAME_SIZE {
        return Err(StoreError::corrupt(
            base,
            format!("invalid frame length {}", frame_length),
        ));
    }
    if data.len() < frame_length {
        return Err(StoreError::corrupt(
            base,
            format!(
                "truncated record: frame declares {} bytes, {} remain",
                frame_length,
                data.len()
            ),
        ));
    }

    let checksum_offset = frame_length - 4;
    let stored_checksum =
        u32::from_le_bytes(data[checksum_offset..frame_length].try_into().unwrap());
    if !verify_checksum(&data[..checksum_offset], stored_checksum) {
        return Err(StoreError::corrupt(base, "checksum mismatch"));
    }

    let mut cursor = Cursor {
        data: &data[..checksum_offset],
        pos: 4,
        base,
    };

    let id_present = cursor.read_u8()?;
    let raw_id = cursor.read_u64()?;
    let id = match id_present {
        0 => None,
        1 => Some(raw_id),
        other => {
            return Err(StoreError::corrupt(
                base + 4,
                format!("invalid id flag {}", other),
            ))
        }
    };

    let name = cursor.read_string("name")?;
    let email = cursor.read_string("email")?;

    if cursor.pos != checksum_offset {
        return Err(StoreError::corrupt(
            base + cursor.pos as u64,
            "frame body longer than its fields",
        ));
    }

    Ok((Contact::from_parts(id, name, email), frame_length))
}

/// Slice cursor with absolute-offset error context.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: u64,
}

impl Cursor<'_> {
    fn take(&mut self, n: usize, what: &str) -> StoreResult<&[u8]> {
        if self.data.len() - self.pos < n {
            return Err(StoreError::corrupt(
                self.base + self.pos as u64,
                format!("truncated {}", what),
            ));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> StoreResult<u8> {
        Ok(self.take(1, "id flag")?[0])
    }

    fn read_u64(&mut self) -> StoreResult<u64> {
        Ok(u64::from_le_bytes(self.take(8, "id")?.try_into().unwrap()))
    }

    fn read_string(&mut self, what: &str) -> StoreResult<String> {
        let len = u32::from_le_bytes(self.take(4, what)?.try_into().unwrap()) as usize;
        let start = self.base + self.pos as u64;
        let bytes = self.take(len, what)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| StoreError::corrupt(start, format!("{} is not valid UTF-8", what)))
    }
}
