// ABOUTME: Stateless decoder for the engine's streamed progress protocol.
// ABOUTME: Classifies each line as progress or an in-band error; never fails.

use serde_json::Value;

/// One decoded unit of the engine's progress/error output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Opaque progress text (a status line, a build step, or raw text the
    /// engine interleaved between JSON messages).
    Progress(String),
    /// The engine reported a failure in-band; payload is its message.
    Error(String),
}

/// Decode one raw chunk into events.
///
/// The engine emits line-oriented JSON but is known to interleave plain
/// text, and a chunk usually carries one self-contained message. Decoding
/// is total: lines that fail to parse as structured data degrade to
/// `Progress` with the raw text, never to an error.
pub fn decode_chunk(chunk: &[u8]) -> Vec<StreamEvent> {
    let text = String::from_utf8_lossy(chunk);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(classify_line)
        .collect()
}

fn classify_line(line: &str) -> StreamEvent {
    match serde_json::from_str::<Value>(line) {
        Ok(value) => match error_message(&value) {
            Some(message) => StreamEvent::Error(message),
            None => StreamEvent::Progress(render_progress(&value).unwrap_or_else(|| line.to_string())),
        },
        Err(_) => StreamEvent::Progress(line.to_string()),
    }
}

/// The error predicate over decoded messages.
///
/// `errorDetail.message` is authoritative; the engine also emits a bare
/// top-level `error` string alongside it, accepted as a fallback.
pub fn error_message(value: &Value) -> Option<String> {
    if let Some(message) = value
        .get("errorDetail")
        .and_then(|detail| detail.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }
    value.get("error").and_then(Value::as_str).map(str::to_string)
}

/// Render the human-readable part of a structured progress message.
///
/// Pull messages carry `status` (and optionally `id`/`progress`), build
/// messages carry `stream`. Anything else falls back to the raw line.
fn render_progress(value: &Value) -> Option<String> {
    if let Some(stream) = value.get("stream").and_then(Value::as_str) {
        return Some(stream.trim_end().to_string());
    }

    let status = value.get("status").and_then(Value::as_str)?;
    let mut line = match value.get("id").and_then(Value::as_str) {
        Some(id) => format!("{id}: {status}"),
        None => status.to_string(),
    };
    if let Some(progress) = value.get("progress").and_then(Value::as_str) {
        line.push(' ');
        line.push_str(progress);
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_is_classified_as_error() {
        let events = decode_chunk(br#"{"errorDetail":{"message":"elvis lives!"}}"#);
        assert_eq!(events, vec![StreamEvent::Error("elvis lives!".to_string())]);
    }

    #[test]
    fn top_level_error_is_a_fallback() {
        let events = decode_chunk(br#"{"error":"no such image"}"#);
        assert_eq!(events, vec![StreamEvent::Error("no such image".to_string())]);
    }

    #[test]
    fn status_messages_are_progress() {
        let events = decode_chunk(br#"{"status":"Downloading","id":"abc123"}"#);
        assert_eq!(
            events,
            vec![StreamEvent::Progress("abc123: Downloading".to_string())]
        );
    }

    #[test]
    fn build_stream_messages_are_progress() {
        let events = decode_chunk(b"{\"stream\":\"Step 1/4 : FROM alpine\\n\"}");
        assert_eq!(
            events,
            vec![StreamEvent::Progress("Step 1/4 : FROM alpine".to_string())]
        );
    }

    #[test]
    fn plain_text_degrades_to_progress() {
        let events = decode_chunk(b"not json at all");
        assert_eq!(
            events,
            vec![StreamEvent::Progress("not json at all".to_string())]
        );
    }

    #[test]
    fn non_object_json_is_progress() {
        let events = decode_chunk(b"[1, 2, 3]");
        assert_eq!(events, vec![StreamEvent::Progress("[1, 2, 3]".to_string())]);
    }

    #[test]
    fn one_chunk_may_carry_many_lines() {
        let chunk = b"{\"status\":\"Pulling\"}\n{\"errorDetail\":{\"message\":\"boom\"}}\n";
        let events = decode_chunk(chunk);
        assert_eq!(
            events,
            vec![
                StreamEvent::Progress("Pulling".to_string()),
                StreamEvent::Error("boom".to_string()),
            ]
        );
    }

    #[test]
    fn empty_and_blank_chunks_yield_nothing() {
        assert!(decode_chunk(b"").is_empty());
        assert!(decode_chunk(b"\n  \n").is_empty());
    }

    #[test]
    fn invalid_utf8_never_panics() {
        let events = decode_chunk(&[0xff, 0xfe, 0x80]);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], StreamEvent::Progress(_)));
    }

    #[test]
    fn error_predicate_ignores_null_error() {
        let value: Value = serde_json::from_str(r#"{"error":null,"status":"ok"}"#).unwrap();
        assert_eq!(error_message(&value), None);
    }
}
