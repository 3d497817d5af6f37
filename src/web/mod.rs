//! axum integration surface.
//!
//! This module is the boundary between axum and the normalizer. It handles:
//! - Rendering [`ApiResponse`](crate::ApiResponse) and [`Failure`](crate::Failure) as HTTP responses
//! - Classifying axum extractor rejections into failure kinds
//! - A JSON extractor whose rejections are already normalized
//!
//! # Integration Flow
//!
//! ```text
//! HTTP Request
//!   ↓
//! Payload<T> extractor (rejections → Failure)
//!   ↓
//! Handler wraps inputs in Tainted<T> and runs sanitizers
//!   ↓
//! Ok(ApiResponse) or Err(Failure)
//!   ↓
//! process_failure() → envelope + status code
//! ```

mod rejection;
mod response;

pub mod example_handler;

pub use rejection::Payload;
