//! Filesystem layer: deterministic batch traversal and JPEG writing.
pub mod walk;
pub mod writers;
