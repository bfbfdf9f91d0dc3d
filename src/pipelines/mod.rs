//! # Inference pipeline boundary
//!
//! Span extraction is delegated to the `rust-bert` question answering
//! pipeline; nothing in this crate tokenizes text or scores spans. The
//! [`question_answering::QaPipeline`] trait is the seam the HTTP layer talks
//! to, so handlers can be exercised without a torch runtime.

pub mod question_answering;
