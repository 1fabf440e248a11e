// Bundled audio assets, looked up by logical name

/// Logical name of the reference tone
pub const TONE_ASSET: &str = "442";

/// File extension of the bundled tone, used as a decoder hint
pub const TONE_EXTENSION: &str = "wav";

/// One second of a 442Hz sine, 44.1kHz mono 16-bit.
/// 442 whole cycles fit in the file, so it loops without a seam.
static TONE_442: &[u8] = include_bytes!("../../assets/442.wav");

/// Bytes of a bundled asset
pub fn bundled(name: &str) -> Option<&'static [u8]> {
    match name {
        TONE_ASSET => Some(TONE_442),
        _ => None,
    }
}
