use thiserror::Error;

/// Errors reported by the fallible entry points of [`Variant`].
///
/// [`Variant`]: crate::Variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    #[error("tag index {index} does not name any of the {len} alternatives")]
    TagOutOfRange { index: usize, len: usize },

    #[error("expected alternative `{expected}`, but `{found}` is active")]
    WrongAlternative {
        expected: &'static str,
        found: &'static str,
    },
}
