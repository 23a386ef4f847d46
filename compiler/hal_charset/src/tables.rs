//! Static translation data.
//!
//! `DIRECT` lists every ASCII data character with its internal (EBCDIC)
//! code; ``[ \ ] ^ { }`` are absent because their EBCDIC codes are only
//! reachable through escapes. `ESCAPES` gives, per base character, the
//! internal code produced by a level-1 and a level-2 escape (0 = undefined).

pub(crate) const DIRECT: [(u8, u8); 88] = [
    (b' ', 0x40), (b'!', 0x5A), (b'"', 0x7F), (b'#', 0x7B), (b'$', 0x5B), (b'%', 0x6C),
    (b'&', 0x50), (b'\'', 0x7D), (b'(', 0x4D), (b')', 0x5D), (b'*', 0x5C), (b'+', 0x4E),
    (b',', 0x6B), (b'-', 0x60), (b'.', 0x4B), (b'/', 0x61), (b'0', 0xF0), (b'1', 0xF1),
    (b'2', 0xF2), (b'3', 0xF3), (b'4', 0xF4), (b'5', 0xF5), (b'6', 0xF6), (b'7', 0xF7),
    (b'8', 0xF8), (b'9', 0xF9), (b':', 0x7A), (b';', 0x5E), (b'<', 0x4C), (b'=', 0x7E),
    (b'>', 0x6E), (b'?', 0x6F), (b'@', 0x7C), (b'A', 0xC1), (b'B', 0xC2), (b'C', 0xC3),
    (b'D', 0xC4), (b'E', 0xC5), (b'F', 0xC6), (b'G', 0xC7), (b'H', 0xC8), (b'I', 0xC9),
    (b'J', 0xD1), (b'K', 0xD2), (b'L', 0xD3), (b'M', 0xD4), (b'N', 0xD5), (b'O', 0xD6),
    (b'P', 0xD7), (b'Q', 0xD8), (b'R', 0xD9), (b'S', 0xE2), (b'T', 0xE3), (b'U', 0xE4),
    (b'V', 0xE5), (b'W', 0xE6), (b'X', 0xE7), (b'Y', 0xE8), (b'Z', 0xE9), (b'_', 0x6D),
    (b'a', 0x81), (b'b', 0x82), (b'c', 0x83), (b'd', 0x84), (b'e', 0x85), (b'f', 0x86),
    (b'g', 0x87), (b'h', 0x88), (b'i', 0x89), (b'j', 0x91), (b'k', 0x92), (b'l', 0x93),
    (b'm', 0x94), (b'n', 0x95), (b'o', 0x96), (b'p', 0x97), (b'q', 0x98), (b'r', 0x99),
    (b's', 0xA2), (b't', 0xA3), (b'u', 0xA4), (b'v', 0xA5), (b'w', 0xA6), (b'x', 0xA7),
    (b'y', 0xA8), (b'z', 0xA9), (b'|', 0x4F), (b'~', 0x5F),
];

pub(crate) const ESCAPES: [(u8, u8, u8); 83] = [
    (b' ', 0x4A, 0xFF), (b'"', 0x00, 0xFE), (b'#', 0x51, 0xEC), (b'$', 0x53, 0xEE),
    (b'%', 0x00, 0xFD), (b'&', 0x48, 0xE0), (b'*', 0x46, 0xDB), (b'+', 0x44, 0xD0),
    (b',', 0x54, 0xEF), (b'-', 0x45, 0xDA), (b'.', 0xAF, 0xDC), (b'/', 0x0E, 0xDD),
    (b'0', 0x00, 0xBC), (b'1', 0x01, 0xBE), (b'2', 0x02, 0xBF), (b'3', 0x03, 0xC0),
    (b'4', 0x04, 0xCA), (b'5', 0x05, 0xCB), (b'6', 0x06, 0xCC), (b'7', 0x07, 0xCD),
    (b'8', 0x08, 0xCE), (b'9', 0x09, 0xCF), (b':', 0x56, 0xFB), (b';', 0x55, 0xFA),
    (b'<', 0x21, 0xEA), (b'=', 0x49, 0xE1), (b'>', 0x20, 0xEB), (b'@', 0x52, 0xED),
    (b'A', 0x10, 0x57), (b'B', 0x11, 0x58), (b'C', 0x19, 0x59), (b'D', 0x13, 0x62),
    (b'E', 0x14, 0x63), (b'F', 0x1A, 0x64), (b'G', 0x12, 0x65), (b'H', 0x0B, 0x66),
    (b'I', 0x0C, 0x67), (b'J', 0x0F, 0x68), (b'K', 0x22, 0x69), (b'L', 0x1F, 0x6A),
    (b'M', 0x23, 0x70), (b'N', 0x24, 0x71), (b'O', 0x1C, 0x72), (b'P', 0x17, 0x73),
    (b'Q', 0x25, 0x74), (b'R', 0x1E, 0x75), (b'S', 0x18, 0x76), (b'T', 0x15, 0x77),
    (b'U', 0x26, 0x78), (b'V', 0x0A, 0x79), (b'W', 0x1D, 0x80), (b'X', 0x27, 0x8A),
    (b'Y', 0x1B, 0x8C), (b'Z', 0x28, 0x8D), (b'_', 0x16, 0xFC), (b'a', 0x29, 0x8E),
    (b'b', 0x2A, 0x8F), (b'c', 0x2B, 0x90), (b'd', 0x2C, 0x9A), (b'e', 0x2D, 0x9C),
    (b'f', 0x2E, 0x9D), (b'g', 0x2F, 0x9E), (b'h', 0x30, 0x9F), (b'i', 0x31, 0xA0),
    (b'j', 0x32, 0xA1), (b'k', 0x33, 0xAA), (b'l', 0x34, 0xAB), (b'm', 0x35, 0xAC),
    (b'n', 0x36, 0xAE), (b'o', 0x37, 0xB0), (b'p', 0x38, 0xB1), (b'q', 0x39, 0xB2),
    (b'r', 0x3A, 0xB3), (b's', 0x3B, 0xB4), (b't', 0x3C, 0xB5), (b'u', 0x3D, 0xB6),
    (b'v', 0x3E, 0xB7), (b'w', 0x3F, 0xB8), (b'x', 0x41, 0xB9), (b'y', 0x42, 0xBA),
    (b'z', 0x43, 0xBB), (b'|', 0x0D, 0xDE), (b'~', 0x47, 0xDF),
];

/// ASCII byte -> internal code, 0 where undefined.
pub(crate) static ASCII_TO_INTERNAL: [u8; 128] = {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < DIRECT.len() {
        table[DIRECT[i].0 as usize] = DIRECT[i].1;
        i += 1;
    }
    table
};

/// Internal code -> ASCII byte, 0 where undefined.
pub(crate) static INTERNAL_TO_ASCII: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < DIRECT.len() {
        table[DIRECT[i].1 as usize] = DIRECT[i].0;
        i += 1;
    }
    table
};

/// ASCII base -> [level-1 code, level-2 code].
pub(crate) static ESCAPE_IN: [[u8; 2]; 128] = {
    let mut table = [[0u8; 2]; 128];
    let mut i = 0;
    while i < ESCAPES.len() {
        let (base, one, two) = ESCAPES[i];
        table[base as usize] = [one, two];
        i += 1;
    }
    table
};

/// Internal code -> (level, ASCII base); level 0 means not produced by an escape.
pub(crate) static ESCAPE_OUT: [(u8, u8); 256] = {
    let mut table = [(0u8, 0u8); 256];
    let mut i = 0;
    while i < ESCAPES.len() {
        let (base, one, two) = ESCAPES[i];
        // Level-1 `0` is the one escape that legitimately yields 0x00.
        if one != 0 || base == b'0' {
            table[one as usize] = (1, base);
        }
        if two != 0 {
            table[two as usize] = (2, base);
        }
        i += 1;
    }
    table
};
