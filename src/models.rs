//! Payload tree and boundary DTOs
//!
//! Defines the provider-shaped message-part tree plus the derived result
//! types. Field names follow the provider's camelCase JSON wire shape so a
//! provider-API client can deserialize fetch responses straight into these
//! types. Each type is annotated with `JsonSchema` for automatic schema
//! generation at the tool boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generic placeholder filename for attachments that carry none
pub const DEFAULT_ATTACHMENT_FILENAME: &str = "attachment";

/// Generic media type for attachments whose part declares none
pub const DEFAULT_ATTACHMENT_MIME_TYPE: &str = "application/octet-stream";

/// One node of the recursively nested message body
///
/// The structure is a strict tree: parents own their children directly.
/// A node either carries inline payload data, references an attachment by
/// identifier, or is purely structural (children only).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagePart {
    /// Provider-assigned part identifier (e.g., `0`, `1.2`)
    pub part_id: Option<String>,
    /// Media type of this part (e.g., `text/plain`, `multipart/mixed`)
    pub mime_type: String,
    /// Attachment filename; empty for non-attachment parts
    pub filename: String,
    /// Header name/value pairs; populated on the payload root and
    /// occasionally on nested message parts
    pub headers: Vec<MessageHeader>,
    /// Inline payload or attachment reference
    pub body: Option<PartBody>,
    /// Ordered child parts (empty for leaf nodes)
    pub parts: Vec<MessagePart>,
}

/// Body of a message part
///
/// Inline content arrives as URL-safe base64 in `data`; larger content is
/// referenced by `attachment_id` and fetched out-of-band.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PartBody {
    /// Opaque identifier usable to fetch the payload out-of-band
    pub attachment_id: Option<String>,
    /// Declared payload size in bytes
    pub size: Option<u64>,
    /// Inline payload, URL-safe base64 encoded
    pub data: Option<String>,
}

/// Single message header as name/value pair
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MessageHeader {
    /// Header name (e.g., `Subject`); matched case-insensitively on lookup
    pub name: String,
    /// Header value verbatim
    pub value: String,
}

/// Attachment metadata derived from the part tree
///
/// Fields are carried verbatim from the part that declared them; the
/// `*_or_default` accessors apply the generic placeholders for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AttachmentInfo {
    /// Opaque attachment identifier for out-of-band retrieval
    pub attachment_id: String,
    /// Filename as declared by the part (may be empty)
    pub filename: String,
    /// Media type as declared by the part (may be empty)
    pub mime_type: String,
    /// Declared size in bytes, if the part carried one
    pub size: Option<u64>,
}

impl AttachmentInfo {
    /// Filename for display, substituting the generic placeholder
    pub fn filename_or_default(&self) -> &str {
        if self.filename.is_empty() {
            DEFAULT_ATTACHMENT_FILENAME
        } else {
            &self.filename
        }
    }

    /// Media type for display, substituting the generic binary type
    pub fn mime_type_or_default(&self) -> &str {
        if self.mime_type.is_empty() {
            DEFAULT_ATTACHMENT_MIME_TYPE
        } else {
            &self.mime_type
        }
    }
}

/// Reshaped read-path result for a fetched message
///
/// Combines the common display headers with the extracted body text and
/// attachment descriptors. Header fields are `None` when the payload root
/// does not carry the corresponding header.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageContent {
    /// Subject header value
    pub subject: Option<String>,
    /// From header value
    pub from: Option<String>,
    /// To header value
    pub to: Option<String>,
    /// Date header value
    pub date: Option<String>,
    /// Extracted plain-text body (empty if no textual part exists)
    pub body: String,
    /// Attachment descriptors in traversal order
    pub attachments: Vec<AttachmentInfo>,
}

/// Input record for outbound raw-message construction
///
/// Produced transiently per send/draft request. `thread_id` is the
/// thread-continuation identifier: it rides alongside the encoded message
/// in the provider send request and is never serialized into the header
/// block.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    /// Recipient address list for the To header
    pub to: String,
    /// Subject line (always emitted, even when empty)
    pub subject: String,
    /// Plain-text body, carried verbatim
    pub body: String,
    /// Cc header value (header omitted when absent or empty)
    #[serde(default)]
    pub cc: Option<String>,
    /// Bcc header value (header omitted when absent or empty)
    #[serde(default)]
    pub bcc: Option<String>,
    /// Thread-continuation identifier for reply grouping
    #[serde(default)]
    pub thread_id: Option<String>,
    /// Message identifier being replied to (In-Reply-To header)
    #[serde(default)]
    pub in_reply_to: Option<String>,
    /// Prior message identifiers for the References header
    #[serde(default)]
    pub references: Vec<String>,
}
