//! gmail-content-rs: Content engine for Gmail-style message payloads
//!
//! This crate implements the message-processing core shared by tools that
//! expose mailbox operations over a remote-procedure surface: extracting
//! readable text and attachment metadata from the recursively nested part
//! tree of a fetched message, and serializing outbound replies into the
//! provider's encoded raw-message format. Network transport, credentials,
//! and the tool-registration surface belong to the calling layer.
//!
//! # Architecture
//!
//! - [`models`]: Provider-shaped part tree and boundary DTOs
//! - [`errors`]: Application error model
//! - [`mime`]: Part-tree traversal, body extraction, and attachment collection
//! - [`html`]: HTML fragment to plain-text normalization
//! - [`raw`]: Outbound raw-message serialization and encoding
//!
//! # Example
//!
//! ```
//! use gmail_content_rs::mime;
//! use gmail_content_rs::models::MessagePart;
//!
//! let payload: MessagePart = serde_json::from_str(
//!     r#"{"mimeType": "text/plain", "body": {"size": 5, "data": "aGVsbG8="}}"#,
//! )
//! .unwrap();
//! assert_eq!(mime::extract_body(&payload), "hello");
//! ```

pub mod errors;
pub mod html;
pub mod mime;
pub mod models;
pub mod raw;

pub use errors::{ContentError, ContentResult};
pub use html::html_to_text;
pub use mime::{
    extract_attachments, extract_body, extract_content, find_attachment, find_body_text,
    header_value,
};
pub use models::{
    AttachmentInfo, MessageContent, MessageHeader, MessagePart, OutboundMessage, PartBody,
};
pub use raw::build_raw_message;
