//! Byte-level decoding of the source file.
//!
//! The published dataset is UTF-8, but re-exports from spreadsheet tools are
//! frequently Latin-1 or Windows-1252. Both are detected and decoded here.

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string, stripping a leading UTF-8 byte order mark.
///
/// Charset names are resolved with WHATWG label rules, so `iso-8859-1` and
/// `latin1` decode as Windows-1252 (identical for every printable Latin-1
/// byte). Unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let label = match encoding.trim().to_lowercase().as_str() {
        "latin-1" => "latin1".to_string(),
        other => other.to_string(),
    };
    match encoding_rs::Encoding::for_label(label.as_bytes()) {
        Some(enc) if enc != encoding_rs::UTF_8 => {
            enc.decode_without_bom_handling(bytes).0.into_owned()
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Detect and decode in one step.
pub fn decode_auto(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.strip_prefix('\u{feff}').unwrap_or(s).to_string();
    }
    let encoding = detect_encoding(bytes);
    decode_content(bytes, &encoding)
}
