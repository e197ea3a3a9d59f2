//! Error types for the mask pipeline.

use lamina_kernel::KernelError;
use thiserror::Error;

/// Errors that can occur while building a mask.
#[derive(Error, Debug)]
pub enum MaskError {
    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A configuration file could not be parsed.
    #[error("invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The face window does not intersect the head mesh.
    #[error("face window does not intersect the head mesh")]
    EmptySection,

    /// Composition finished but produced no geometry.
    #[error("composition produced an empty solid")]
    EmptyMask,

    /// A pipeline stage failed in the kernel.
    #[error("{stage} failed: {source}")]
    Stage {
        /// Name of the failed pipeline stage.
        stage: &'static str,
        /// The underlying kernel error.
        #[source]
        source: KernelError,
    },

    /// An input or output file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The input bytes are not a valid binary STL.
    #[error("invalid STL: {0}")]
    InvalidStl(String),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, MaskError>;

/// Attach a stage name to a kernel error.
pub(crate) fn stage(name: &'static str) -> impl Fn(KernelError) -> MaskError {
    move |source| MaskError::Stage {
        stage: name,
        source,
    }
}
