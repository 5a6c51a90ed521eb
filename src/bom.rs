//! Byte order mark and NUL code-point writers.
//!
//! These emit the fixed byte patterns directly instead of going through the
//! encoders, since the output never varies: `EF BB BF` for UTF-8, `U+FEFF`
//! in the unit width and endianness for UTF-16 and UTF-32, and all-zero
//! units for NUL.

use byteorder::ByteOrder;

use crate::{Cursor, Diagnostics, Encoded};

/// Writes the UTF-8 byte order mark `EF BB BF` at the cursor position.
pub fn encode_utf8_bom<B: AsRef<[u8]> + AsMut<[u8]>>(text: &mut Cursor<B>) -> Encoded {
    let mut status = text.check();
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if tail.len() < 3 {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            tail[0] = 0xEF;
            tail[1] = 0xBB;
            tail[2] = 0xBF;
            bytes = 3;
        }
    }
    Encoded { bytes, status }
}

/// Writes the UTF-16 byte order mark at the cursor position: `FF FE` little
/// endian, `FE FF` big endian.
pub fn encode_utf16_bom<E: ByteOrder, B: AsRef<[u8]> + AsMut<[u8]>>(
    text: &mut Cursor<B>,
) -> Encoded {
    let mut status = text.check_aligned(1);
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if tail.len() < 2 {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            E::write_u16(tail, 0xFEFF);
            bytes = 2;
        }
    }
    Encoded { bytes, status }
}

/// Writes the UTF-32 byte order mark at the cursor position: `FF FE 00 00`
/// little endian, `00 00 FE FF` big endian.
pub fn encode_utf32_bom<E: ByteOrder, B: AsRef<[u8]> + AsMut<[u8]>>(
    text: &mut Cursor<B>,
) -> Encoded {
    let mut status = text.check_aligned(3);
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if tail.len() < 4 {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            E::write_u32(tail, 0xFEFF);
            bytes = 4;
        }
    }
    Encoded { bytes, status }
}

/// Writes a one byte NUL at the cursor position.
pub fn encode_utf8_null<B: AsRef<[u8]> + AsMut<[u8]>>(text: &mut Cursor<B>) -> Encoded {
    let mut status = text.check();
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if tail.is_empty() {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            tail[0] = 0x00;
            bytes = 1;
        }
    }
    Encoded { bytes, status }
}

/// Writes a two byte NUL unit at the cursor position.
pub fn encode_utf16_null<B: AsRef<[u8]> + AsMut<[u8]>>(text: &mut Cursor<B>) -> Encoded {
    let mut status = text.check_aligned(1);
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if tail.len() < 2 {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            tail[0] = 0x00;
            tail[1] = 0x00;
            bytes = 2;
        }
    }
    Encoded { bytes, status }
}

/// Writes a four byte NUL unit at the cursor position.
pub fn encode_utf32_null<B: AsRef<[u8]> + AsMut<[u8]>>(text: &mut Cursor<B>) -> Encoded {
    let mut status = text.check_aligned(3);
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if tail.len() < 4 {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            tail[..4].fill(0x00);
            bytes = 4;
        }
    }
    Encoded { bytes, status }
}
