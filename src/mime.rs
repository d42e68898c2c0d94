//! Message-part tree traversal and content extraction
//!
//! Walks the recursively nested part tree of a fetched message to locate
//! the best-available textual body and the flat list of attachment
//! descriptors, and reshapes the result for display. HTML bodies are piped
//! through the normalizer when no plain-text part exists.

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use tracing::{debug, warn};

use crate::html;
use crate::models::{AttachmentInfo, MessageContent, MessageHeader, MessagePart};

/// URL-safe base64, no line wrapping
///
/// Provider payloads appear both padded and unpadded in the wild, so the
/// decode side accepts either; the encode side emits canonical padding.
pub(crate) const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Depth-first pre-order walk over a part tree
///
/// Visits the node itself, then its children left-to-right. The visitor
/// returns `true` to stop the traversal (early-return lookups) or `false`
/// to continue (accumulating collectors).
fn walk(part: &MessagePart, visit: &mut impl FnMut(&MessagePart) -> bool) -> bool {
    if visit(part) {
        return true;
    }
    for child in &part.parts {
        if walk(child, visit) {
            return true;
        }
    }
    false
}

/// Find the first part of the given media type carrying inline text
///
/// Media types are compared case-sensitively and the first match in
/// traversal order wins. The payload is decoded from URL-safe base64 and
/// interpreted as UTF-8 (lossily). A payload that fails to decode is
/// treated as having no content at that node; the traversal continues.
///
/// Returns `None` when no part matches; this is not an error.
pub fn find_body_text(part: &MessagePart, mime_type: &str) -> Option<String> {
    let mut found = None;
    walk(part, &mut |node| {
        if node.mime_type == mime_type
            && let Some(body) = &node.body
            && let Some(data) = &body.data
            && !data.is_empty()
        {
            match URL_SAFE_LENIENT.decode(data) {
                Ok(bytes) => {
                    found = Some(String::from_utf8_lossy(&bytes).into_owned());
                    return true;
                }
                Err(err) => {
                    warn!(mime_type, error = %err, "inline payload failed base64 decode; skipping node");
                }
            }
        }
        false
    });
    found
}

/// Extract the message body as plain text
///
/// A `text/plain` part takes precedence and is returned unchanged, even
/// when an HTML part appears earlier in traversal order. Otherwise the
/// first `text/html` part is normalized to plain text. A tree with
/// neither textual part yields the empty string rather than failing.
pub fn extract_body(part: &MessagePart) -> String {
    if let Some(text) = find_body_text(part, "text/plain") {
        return text;
    }
    if let Some(html_body) = find_body_text(part, "text/html") {
        debug!("no text/plain part; normalizing text/html body");
        return html::html_to_text(&html_body);
    }
    debug!("message has no textual part");
    String::new()
}

/// Collect attachment descriptors from the full tree
///
/// Every node carrying a non-empty attachment identifier qualifies,
/// regardless of media type (inline images with identifiers included).
/// Fields are carried verbatim with no defaulting; results follow
/// pre-order traversal. A tree without attachments yields an empty vec.
pub fn extract_attachments(part: &MessagePart) -> Vec<AttachmentInfo> {
    let mut attachments = Vec::new();
    walk(part, &mut |node| {
        if let Some(descriptor) = attachment_descriptor(node) {
            attachments.push(descriptor);
        }
        false
    });
    attachments
}

/// Find the part carrying the given attachment identifier
///
/// Returns the first matching descriptor in traversal order, or `None`
/// when the identifier is absent from the tree. Attachment metadata is
/// best-effort: callers substitute the generic defaults on lookup failure
/// rather than failing the operation.
pub fn find_attachment(part: &MessagePart, attachment_id: &str) -> Option<AttachmentInfo> {
    let mut found = None;
    walk(part, &mut |node| {
        match attachment_descriptor(node) {
            Some(descriptor) if descriptor.attachment_id == attachment_id => {
                found = Some(descriptor);
                true
            }
            _ => false,
        }
    });
    found
}

/// Build a descriptor when the node references an attachment
fn attachment_descriptor(node: &MessagePart) -> Option<AttachmentInfo> {
    let body = node.body.as_ref()?;
    let id = body.attachment_id.as_deref()?;
    if id.is_empty() {
        return None;
    }
    Some(AttachmentInfo {
        attachment_id: id.to_owned(),
        filename: node.filename.clone(),
        mime_type: node.mime_type.clone(),
        size: body.size,
    })
}

/// Get header value by case-insensitive name
///
/// Returns the first matching header's value.
pub fn header_value<'a>(headers: &'a [MessageHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find_map(|header| header.name.eq_ignore_ascii_case(name).then_some(header.value.as_str()))
}

/// Reshape a payload tree into display-ready message content
///
/// Pulls the common display headers from the payload root and runs the
/// body/attachment extraction pipeline over the whole tree.
pub fn extract_content(part: &MessagePart) -> MessageContent {
    MessageContent {
        subject: header_value(&part.headers, "Subject").map(str::to_owned),
        from: header_value(&part.headers, "From").map(str::to_owned),
        to: header_value(&part.headers, "To").map(str::to_owned),
        date: header_value(&part.headers, "Date").map(str::to_owned),
        body: extract_body(part),
        attachments: extract_attachments(part),
    }
}
