//! Outbound raw-message serialization
//!
//! Assembles an RFC 2822-style header block and plain-text body with CRLF
//! line terminators, then encodes the whole message with URL-safe base64
//! so it can ride in a single JSON field of a provider send request.
//! Outbound messages are plain text only: no folding, no multipart, no
//! attachment embedding.

use base64::Engine;

use crate::errors::{ContentError, ContentResult};
use crate::mime::URL_SAFE_LENIENT;
use crate::models::OutboundMessage;

/// Serialize and encode an outbound message
///
/// Headers are emitted in fixed order: To; Cc and Bcc when non-empty;
/// Subject (always, even when empty); In-Reply-To and References when
/// non-empty (reference identifiers joined with single spaces); then
/// MIME-Version and Content-Type. A blank line separates the header block
/// from the body, which is carried verbatim.
///
/// The thread-continuation identifier on the record is not a header;
/// callers pass it alongside the encoded message in the send request.
///
/// # Errors
///
/// - `InvalidInput` if `to` is empty or any header-destined field
///   contains control characters (header-injection guard). Body content
///   is intentionally not validated; it is the caller's responsibility.
pub fn build_raw_message(message: &OutboundMessage) -> ContentResult<String> {
    if message.to.is_empty() {
        return Err(ContentError::invalid("to must not be empty"));
    }
    validate_header_field(&message.to, "to")?;
    validate_header_field(&message.subject, "subject")?;
    for (value, field) in [
        (&message.cc, "cc"),
        (&message.bcc, "bcc"),
        (&message.in_reply_to, "in_reply_to"),
    ] {
        if let Some(v) = value {
            validate_header_field(v, field)?;
        }
    }
    for reference in &message.references {
        validate_header_field(reference, "references")?;
    }

    let mut lines = Vec::new();
    lines.push(format!("To: {}", message.to));
    if let Some(cc) = non_empty(&message.cc) {
        lines.push(format!("Cc: {cc}"));
    }
    if let Some(bcc) = non_empty(&message.bcc) {
        lines.push(format!("Bcc: {bcc}"));
    }
    lines.push(format!("Subject: {}", message.subject));
    if let Some(in_reply_to) = non_empty(&message.in_reply_to) {
        lines.push(format!("In-Reply-To: {in_reply_to}"));
    }
    if !message.references.is_empty() {
        lines.push(format!("References: {}", message.references.join(" ")));
    }
    lines.push("MIME-Version: 1.0".to_owned());
    lines.push("Content-Type: text/plain; charset=\"UTF-8\"".to_owned());

    let mut assembled = lines.join("\r\n");
    assembled.push_str("\r\n\r\n");
    assembled.push_str(&message.body);

    Ok(URL_SAFE_LENIENT.encode(assembled))
}

/// Reject control characters in header-destined values
fn validate_header_field(value: &str, field: &str) -> ContentResult<()> {
    if value.chars().any(|ch| ch.is_ascii_control()) {
        return Err(ContentError::InvalidInput(format!(
            "{field} must not contain control characters"
        )));
    }
    Ok(())
}

/// Treat absent and empty optional header values alike
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use base64::Engine;

    use super::build_raw_message;
    use crate::mime::URL_SAFE_LENIENT;
    use crate::models::OutboundMessage;

    /// Minimal valid outbound record
    fn outbound(to: &str, subject: &str, body: &str) -> OutboundMessage {
        OutboundMessage {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
            cc: None,
            bcc: None,
            thread_id: None,
            in_reply_to: None,
            references: Vec::new(),
        }
    }

    /// Decode builder output back to the assembled message text
    fn decode(encoded: &str) -> String {
        let bytes = URL_SAFE_LENIENT.decode(encoded).expect("output must decode");
        String::from_utf8(bytes).expect("output must be UTF-8")
    }

    #[test]
    fn builds_minimal_message_with_fixed_header_order() {
        let encoded =
            build_raw_message(&outbound("bob@example.com", "Hi", "Hello Bob")).expect("must build");
        let raw = decode(&encoded);

        assert_eq!(
            raw,
            "To: bob@example.com\r\n\
             Subject: Hi\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: text/plain; charset=\"UTF-8\"\r\n\
             \r\n\
             Hello Bob"
        );
    }

    #[test]
    fn omits_empty_optional_headers_entirely() {
        let mut message = outbound("bob@example.com", "Hi", "Body");
        message.cc = Some(String::new());
        message.bcc = None;
        message.in_reply_to = Some(String::new());

        let raw = decode(&build_raw_message(&message).expect("must build"));
        assert!(!raw.contains("Cc:"));
        assert!(!raw.contains("Bcc:"));
        assert!(!raw.contains("In-Reply-To:"));
    }

    #[test]
    fn includes_each_supplied_header_exactly_once() {
        let mut message = outbound("bob@example.com", "Re: plans", "See above.");
        message.cc = Some("carol@example.com".to_owned());
        message.bcc = Some("dave@example.com".to_owned());
        message.in_reply_to = Some("<m1@example.com>".to_owned());
        message.references = vec!["<m0@example.com>".to_owned(), "<m1@example.com>".to_owned()];

        let raw = decode(&build_raw_message(&message).expect("must build"));
        let (headers, body) = raw.split_once("\r\n\r\n").expect("blank line separator");

        assert_eq!(body, "See above.");
        let lines: Vec<&str> = headers.split("\r\n").collect();
        assert_eq!(
            lines,
            vec![
                "To: bob@example.com",
                "Cc: carol@example.com",
                "Bcc: dave@example.com",
                "Subject: Re: plans",
                "In-Reply-To: <m1@example.com>",
                "References: <m0@example.com> <m1@example.com>",
                "MIME-Version: 1.0",
                "Content-Type: text/plain; charset=\"UTF-8\"",
            ]
        );
    }

    #[test]
    fn body_is_carried_verbatim_after_single_blank_line() {
        let body = "line one\nline two\n\nline four";
        let raw = decode(&build_raw_message(&outbound("a@b.c", "S", body)).expect("must build"));
        let (_, carried) = raw.split_once("\r\n\r\n").expect("blank line separator");
        assert_eq!(carried, body);
    }

    #[test]
    fn empty_subject_header_is_still_emitted() {
        let raw = decode(&build_raw_message(&outbound("a@b.c", "", "x")).expect("must build"));
        assert!(raw.contains("Subject: \r\n"));
    }

    #[test]
    fn rejects_empty_recipient() {
        let err = build_raw_message(&outbound("", "Hi", "Body")).expect_err("must fail");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_header_injection_attempts() {
        let err = build_raw_message(&outbound("a@b.c\r\nBcc: evil@x.y", "Hi", "Body"))
            .expect_err("must fail");
        assert!(err.to_string().contains("control characters"));

        let err = build_raw_message(&outbound("a@b.c", "Hi\nX-Evil: 1", "Body"))
            .expect_err("must fail");
        assert!(err.to_string().contains("control characters"));

        let mut message = outbound("a@b.c", "Hi", "Body");
        message.references = vec!["<ok@x.y>".to_owned(), "<bad@x.y>\r\n".to_owned()];
        build_raw_message(&message).expect_err("must fail");
    }

    #[test]
    fn thread_id_never_appears_in_headers() {
        let mut message = outbound("a@b.c", "Hi", "Body");
        message.thread_id = Some("thr-123".to_owned());
        let raw = decode(&build_raw_message(&message).expect("must build"));
        assert!(!raw.contains("thr-123"));
    }
}
