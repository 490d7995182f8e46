//! Processing pipelines and their shared primitives.
pub mod crop;
pub mod mask;
pub mod matting;
pub mod resize;
pub mod save;
