//! WinAnsiEncoding for the standard Type 1 fonts.

/// Code points 0x80..=0x9F of WinAnsiEncoding. `None` marks unused slots.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
    Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
    None, Some('‘'), Some('’'), Some('“'), Some('”'), Some('•'), Some('–'), Some('—'),
    Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
];

fn encode_char(ch: char) -> Option<u8> {
    match ch as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(ch as u8),
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|c| *c == Some(ch))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encode `text`, returning the first character the encoding cannot hold.
pub(crate) fn encode(text: &str) -> Result<Vec<u8>, char> {
    text.chars().map(|ch| encode_char(ch).ok_or(ch)).collect()
}
