const HEX: &[u8; 16] = b"0123456789abcdef";

pub(crate) const SHELL_METACHARACTERS: &[u8] = b"`^()&{}[]$*?!|;'\"\\";
pub(crate) const SHELL_DQ_METACHARACTERS: &[u8] = b"\\`$\"";

#[inline]
fn unicode_escape(unit: u16) -> [u8; 6] {
    [
        b'\\',
        b'u',
        HEX[usize::from(unit >> 12) & 0xf],
        HEX[usize::from(unit >> 8) & 0xf],
        HEX[usize::from(unit >> 4) & 0xf],
        HEX[usize::from(unit) & 0xf],
    ]
}

/// JSON string-body escaping. Bytes that are not valid UTF-8 are escaped
/// one by one as `\u00XX`.
pub(crate) fn json(input: &[u8], mut emit: impl FnMut(&[u8])) {
    for chunk in input.utf8_chunks() {
        for ch in chunk.valid().chars() {
            match ch {
                '\\' => emit(b"\\\\"),
                '"' => emit(b"\\\""),
                '/' => emit(b"\\/"),
                '\n' => emit(b"\\n"),
                '\r' => emit(b"\\r"),
                '\t' => emit(b"\\t"),
                '\u{8}' => emit(b"\\b"),
                '\u{c}' => emit(b"\\f"),
                ' '..='~' => emit(&[ch as u8]),
                _ => {
                    let mut units = [0u16; 2];
                    for unit in ch.encode_utf16(&mut units) {
                        emit(&unicode_escape(*unit));
                    }
                }
            }
        }
        for &byte in chunk.invalid() {
            emit(&unicode_escape(u16::from(byte)));
        }
    }
}

/// Prefixes every byte found in `set` with a backslash.
pub(crate) fn backslash(input: &[u8], set: &[u8], mut emit: impl FnMut(&[u8])) {
    let mut start = 0;
    for (index, byte) in input.iter().enumerate() {
        if set.contains(byte) {
            emit(&input[start..index]);
            emit(b"\\");
            start = index;
        }
    }
    emit(&input[start..]);
}
