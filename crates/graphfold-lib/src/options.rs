//! Constant folding options.

use serde::Deserialize;

/// Limits applied by the constant folder.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// let opts: graphfold_lib::FoldOptions =
///     serde_json::from_str(r#"{ "excluded_ops": ["Div"] }"#).unwrap();
/// assert_eq!(opts.max_constant_elements, 1 << 20);
/// assert!(opts.is_excluded("Div"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FoldOptions {
    /// Results with more elements than this stay unfolded.
    pub max_constant_elements: usize,
    /// Op names that never fold.
    pub excluded_ops: Vec<String>,
}

impl FoldOptions {
    pub const DEFAULT_MAX_CONSTANT_ELEMENTS: usize = 1 << 20;

    pub fn is_excluded(&self, op: &str) -> bool {
        self.excluded_ops.iter().any(|o| o == op)
    }
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            max_constant_elements: Self::DEFAULT_MAX_CONSTANT_ELEMENTS,
            excluded_ops: Vec::new(),
        }
    }
}
