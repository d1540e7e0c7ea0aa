//! Binary graph container.
//!
//! Layout (little-endian):
//! - 0-3: magic `b"GFLD"`
//! - 4-7: format version
//! - 8-11: CRC32 of the payload
//! - 12-15: payload size in bytes
//! - 16..: postcard-encoded `GraphDef`

use crate::graph_def::GraphDef;
use crate::json::GraphError;

pub const MAGIC: [u8; 4] = *b"GFLD";
pub const VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 16;

pub(crate) fn has_magic(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && bytes[..MAGIC.len()] == MAGIC
}

/// Value of the header size field for a payload of `len` bytes.
pub(crate) fn payload_size(len: usize) -> Result<u32, GraphError> {
    u32::try_from(len).map_err(|_| GraphError::TooLarge { size: len })
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl GraphDef {
    /// Decode a graph from the binary container.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GraphError> {
        if bytes.len() < HEADER_SIZE {
            return Err(GraphError::Truncated {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }
        if !has_magic(bytes) {
            return Err(GraphError::BadMagic);
        }

        let version = read_u32(bytes, 4);
        if version != VERSION {
            return Err(GraphError::UnsupportedVersion(version));
        }

        let checksum = read_u32(bytes, 8);
        let size = read_u32(bytes, 12) as usize;
        let payload = &bytes[HEADER_SIZE..];
        if payload.len() < size {
            return Err(GraphError::Truncated {
                expected: HEADER_SIZE + size,
                actual: bytes.len(),
            });
        }
        let payload = &payload[..size];

        let actual = crc32fast::hash(payload);
        if actual != checksum {
            return Err(GraphError::ChecksumMismatch {
                expected: checksum,
                actual,
            });
        }

        postcard::from_bytes(payload).map_err(GraphError::Binary)
    }

    /// Encode the graph into the binary container.
    ///
    /// Fails when the payload does not fit the 32-bit size field.
    pub fn to_binary(&self) -> Result<Vec<u8>, GraphError> {
        let payload = postcard::to_allocvec(self).map_err(GraphError::Binary)?;
        let size = payload_size(payload.len())?;

        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }
}
