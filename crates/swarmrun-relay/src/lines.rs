//! Incremental newline splitting for streamed response bodies.

/// Splits a byte stream into lines as chunks arrive.
///
/// Chunks may end mid-line or mid-character; partial data is held until the
/// next newline. Blank lines are dropped and a trailing `\r` is stripped.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    /// Feed a chunk, returning every line it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(line) = decode(&raw[..raw.len() - 1]) {
                lines.push(line);
            }
        }
        lines
    }

    /// Flush whatever follows the last newline.
    pub fn finish(self) -> Option<String> {
        decode(&self.buffer)
    }
}

fn decode(raw: &[u8]) -> Option<String> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_across_chunks() {
        let mut decoder = LineDecoder::default();
        assert!(decoder.push(b"{\"type\":\"st").is_empty());
        assert_eq!(
            decoder.push(b"art\"}\n{\"type\":\"complete\"}\n"),
            vec![r#"{"type":"start"}"#, r#"{"type":"complete"}"#]
        );
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let mut decoder = LineDecoder::default();
        assert_eq!(decoder.push(b"a\r\n\n\r\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_tail_is_flushed() {
        let mut decoder = LineDecoder::default();
        assert!(decoder.push(b"tail").is_empty());
        assert_eq!(decoder.finish().as_deref(), Some("tail"));
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let bytes = "é\n".as_bytes();
        let mut decoder = LineDecoder::default();
        assert!(decoder.push(&bytes[..1]).is_empty());
        assert_eq!(decoder.push(&bytes[1..]), vec!["é"]);
    }
}
