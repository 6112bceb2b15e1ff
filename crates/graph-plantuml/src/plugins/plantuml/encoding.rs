//! PlantUML text encoding
//!
//! PlantUML servers accept diagram sources compressed with raw DEFLATE and
//! written in a URL-safe 64 character alphabet. [`encode`] produces that form,
//! [`decode`] reverses it.

use base64::alphabet::Alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::core::GeneratorError;

const PLANTUML_ALPHABET: Alphabet = match Alphabet::new(
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_",
) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("invalid PlantUML alphabet"),
};

const PLANTUML_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &PLANTUML_ALPHABET,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Compress and encode a script for transport
///
/// A trailing partial group is filled with `0` up to four characters, the
/// same shape the reference PlantUML encoders emit.
///
/// # Example
/// ```
/// use graph_plantuml::plugins::plantuml::{decode, encode};
///
/// let encoded = encode("@startuml\nA --|> B\n@enduml\n").unwrap();
/// assert_eq!(decode(&encoded).unwrap(), "@startuml\nA --|> B\n@enduml\n");
/// ```
pub fn encode(text: &str) -> Result<String, GeneratorError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(text.as_bytes())?;
    let compressed = encoder.finish()?;

    let mut encoded = PLANTUML_ENGINE.encode(compressed);
    while encoded.len() % 4 != 0 {
        encoded.push('0');
    }
    Ok(encoded)
}

/// Reverse [`encode`]
pub fn decode(encoded: &str) -> Result<String, GeneratorError> {
    let compressed = PLANTUML_ENGINE
        .decode(encoded.trim())
        .map_err(|e| GeneratorError::decode_error(e.to_string()))?;

    // fill characters decode to zero bytes after the end of the deflate stream
    let mut text = String::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_string(&mut text)
        .map_err(|e| GeneratorError::decode_error(e.to_string()))?;
    Ok(text)
}

/// URL of a rendered diagram on a PlantUML server
///
/// # Example
/// ```
/// use graph_plantuml::plugins::plantuml::server_url;
///
/// let url = server_url("https://www.plantuml.com/plantuml/", "svg", "@startuml\n@enduml\n").unwrap();
/// assert!(url.starts_with("https://www.plantuml.com/plantuml/svg/"));
/// ```
pub fn server_url(base: &str, format: &str, text: &str) -> Result<String, GeneratorError> {
    Ok(format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        format,
        encode(text)?
    ))
}
