use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Decode base64 file content as returned by the contents API.
///
/// The API wraps the encoded text with line breaks, which are stripped
/// first. Content that is not valid base64 decodes to an empty string, and
/// invalid UTF-8 sequences are replaced.
pub fn decode_content(encoded: &str) -> String {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::warn!("Stored content is not valid base64, treating as empty: {}", e);
            String::new()
        }
    }
}

/// Encode document text for upload.
pub fn encode_content(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}
