//! JSON codec for graphs.

use crate::graph_def::GraphDef;

/// Error while decoding a serialized graph.
#[derive(Debug)]
pub enum GraphError {
    Json(serde_json::Error),
    Binary(postcard::Error),
    /// Input does not start with the binary container magic.
    BadMagic,
    UnsupportedVersion(u32),
    /// Input is shorter than the header or the size it declares.
    Truncated { expected: usize, actual: usize },
    ChecksumMismatch { expected: u32, actual: u32 },
    /// Payload exceeds what the 32-bit size field can describe.
    TooLarge { size: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
            Self::BadMagic => write!(f, "not a binary graph (bad magic)"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported binary graph version {v}"),
            Self::Truncated { expected, actual } => {
                write!(f, "truncated binary graph: expected {expected} bytes, got {actual}")
            }
            Self::ChecksumMismatch { expected, actual } => write!(
                f,
                "binary graph checksum mismatch: header says {expected:#010x}, payload is {actual:#010x}"
            ),
            Self::TooLarge { size } => {
                write!(f, "graph payload of {size} bytes exceeds the binary format limit")
            }
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
            _ => None,
        }
    }
}

impl GraphDef {
    /// Parse a graph from JSON.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(GraphError::Json)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).expect("serialization should not fail")
    }

    /// Decode either container format.
    ///
    /// Inputs that start with the binary magic are decoded as binary,
    /// everything else as UTF-8 JSON.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GraphError> {
        if crate::binary::has_magic(bytes) {
            return Self::from_binary(bytes);
        }
        serde_json::from_slice(bytes).map_err(GraphError::Json)
    }
}
