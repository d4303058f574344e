/// Incremental UTF-8 decoder for chunked response bodies.
///
/// The transport may split a multi-byte character across two chunks. The
/// decoder holds the incomplete trailing sequence back until the rest
/// arrives, so each character decodes exactly once. Interior invalid bytes
/// decode to U+FFFD and decoding continues.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Feed the next chunk and return every completely-decodable character.
    pub fn feed(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut decoded = String::with_capacity(self.pending.len());
        let mut offset = 0;

        loop {
            match std::str::from_utf8(&self.pending[offset..]) {
                Ok(text) => {
                    decoded.push_str(text);
                    offset = self.pending.len();
                    break;
                }
                Err(error) => {
                    let valid = error.valid_up_to();
                    decoded.push_str(
                        std::str::from_utf8(&self.pending[offset..offset + valid])
                            .unwrap_or_default(),
                    );
                    match error.error_len() {
                        Some(skip) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            offset += valid + skip;
                        }
                        None => {
                            // Truncated sequence at the tail: carry it over.
                            offset += valid;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..offset);
        decoded
    }

    /// Drop any truncated trailing sequence at true end-of-stream and
    /// return how many bytes were discarded. Transports sometimes end a
    /// body exactly on a character boundary split; that is not an error.
    pub fn finish(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
