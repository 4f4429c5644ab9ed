use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use engine_logging::engine_warn;

/// Bytes of the document head searched for a `<meta charset>` declaration.
const META_SNIFF_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown encoding label `{0}`")]
    UnknownLabel(String),
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Resolve a WHATWG encoding label such as `gbk` or `iso-8859-1`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, DecodeError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DecodeError::UnknownLabel(label.to_string()))
}

/// Decode saved page bytes into UTF-8 using: BOM -> forced encoding -> meta charset -> chardetng fallback.
///
/// Malformed sequences become U+FFFD, except under a forced encoding where
/// they are an error.
pub fn decode_html(
    bytes: &[u8],
    forced: Option<&'static Encoding>,
) -> Result<DecodedHtml, DecodeError> {
    // 1) BOM wins over everything, as browsers do
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Ok(decode_lossy(bytes, encoding));
    }

    // 2) Caller-supplied encoding
    if let Some(enc) = forced {
        return decode_strict(bytes, enc);
    }

    // 3) <meta charset="..."> or http-equiv content type in the head
    if let Some(enc) = sniff_meta_charset(bytes) {
        return Ok(decode_lossy(bytes, enc));
    }

    // 4) chardetng detection over the whole file
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    Ok(decode_lossy(bytes, enc))
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\'', ' '])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    if label.is_empty() {
        return None;
    }
    // A meta-declared UTF-16 can only have been read as ASCII, so it means UTF-8.
    Encoding::for_label(label.as_bytes()).map(Encoding::output_encoding)
}

fn decode_lossy(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        engine_warn!(
            "Malformed {} sequences replaced with U+FFFD",
            enc.name()
        );
    }
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    }
}

fn decode_strict(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "input contains byte sequences invalid for this encoding".into(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}
