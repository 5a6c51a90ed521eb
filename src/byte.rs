//! The single-byte codec: ISO-8859-1 style bytes and strict 7-bit ASCII.
//!
//! With `ascii` set, byte values with the top bit set are illegal on both
//! sides; without it every byte value maps straight to the first 256
//! code-points.

use crate::{Cursor, Decoded, Diagnostics, Encoded, Unicode};

/// Returns the encoded length of `unicode` as a byte: 1 when it fits the
/// range, 0 otherwise.
pub const fn len_byte(unicode: Unicode, ascii: bool) -> usize {
    let limit = if ascii { 0x7F } else { 0xFF };
    if unicode >= 0 && unicode <= limit {
        1
    } else {
        0
    }
}

/// Encodes one code-point as a single byte at the cursor position.
pub fn encode_byte<B: AsRef<[u8]> + AsMut<[u8]>>(
    text: &mut Cursor<B>,
    unicode: Unicode,
    ascii: bool,
) -> Encoded {
    let mut status = text.check();
    let limit = if ascii { 0x7F } else { 0xFF };
    if unicode <= 0 {
        status |= if unicode != 0 {
            Diagnostics::FAILED
                | Diagnostics::NOT_ENCODABLE
                | Diagnostics::INVALID_POINT
                | Diagnostics::NOT_ENOUGH_BITS
        } else {
            Diagnostics::DELIMIT_STRING
        };
    } else if unicode > limit {
        status |= Diagnostics::FAILED | Diagnostics::NOT_ENCODABLE | Diagnostics::NOT_ENOUGH_BITS;
        if unicode >= 0xD800 {
            if unicode > 0x0010_FFFF {
                status |= Diagnostics::EXTENDED_UCS4;
            } else if unicode >= 0xFDD0 {
                if unicode <= 0xFDEF || (unicode & 0xFFFE) == 0xFFFE {
                    status |= Diagnostics::NON_CHARACTER;
                }
                if unicode > 0xFFFF {
                    status |= Diagnostics::SUPPLEMENTARY;
                }
            } else if (unicode as u32 & 0xFFFF_F800) == 0xD800 {
                status |= if unicode & 0x0400 != 0 {
                    Diagnostics::LOW_SURROGATE
                } else {
                    Diagnostics::HIGH_SURROGATE
                };
            }
        }
    }
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail_mut();
        if tail.is_empty() {
            status |= Diagnostics::FAILED | Diagnostics::WRITE_OVERFLOW;
        } else {
            tail[0] = unicode as u8;
            bytes = 1;
        }
    }
    Encoded { bytes, status }
}

/// Decodes one byte at the cursor position.
///
/// With `ascii` and `coalesce`, a run of top-bit bytes reports as a single
/// invalid code-point.
pub fn decode_byte<B: AsRef<[u8]>>(text: &Cursor<B>, ascii: bool, coalesce: bool) -> Decoded {
    let mut status = text.check();
    let mut unicode = 0;
    let mut bytes = 0;
    if status.no_error() {
        let tail = text.tail();
        if tail.is_empty() {
            status |= Diagnostics::READ_EXHAUSTED;
        } else {
            unicode = tail[0] as Unicode;
            bytes = 1;
            if ascii && unicode & 0x80 != 0 {
                status |=
                    Diagnostics::FAILED | Diagnostics::NOT_DECODABLE | Diagnostics::DISALLOWED_BYTE;
                if coalesce {
                    bytes = tail.len();
                    for (index, &byte) in tail.iter().enumerate().skip(1) {
                        if byte & 0x80 == 0 {
                            bytes = index;
                            break;
                        }
                    }
                }
            } else if unicode == 0 {
                status |= Diagnostics::DELIMIT_STRING;
            }
        }
    }
    Decoded {
        unicode,
        bytes,
        status,
    }
}

/// Advances the cursor by up to `count` byte code-points, returning how
/// many it moved over.
pub fn step_byte<B: AsRef<[u8]>>(
    text: &mut Cursor<B>,
    count: usize,
    ascii: bool,
    coalesce: bool,
) -> usize {
    let mut points = 0;
    if count != 0 && text.check().no_error() {
        let length = text.len();
        let mut limit = length - text.offset;
        if ascii && coalesce {
            let Some(buffer) = text.buffer() else {
                return points;
            };
            let tail = &buffer[text.offset..];
            let mut index = 0;
            let mut clean = true;
            while points < count && limit > 0 {
                limit -= 1;
                if tail[index] & 0x80 == 0 {
                    points += 1;
                    clean = true;
                } else if clean {
                    points += 1;
                    clean = false;
                }
                index += 1;
            }
            text.offset = length - limit;
        } else {
            points = count.min(limit);
            text.offset += points;
        }
    }
    points
}

/// Moves the cursor back by up to `count` byte code-points, returning how
/// many it moved over.
pub fn back_byte<B: AsRef<[u8]>>(
    text: &mut Cursor<B>,
    count: usize,
    ascii: bool,
    coalesce: bool,
) -> usize {
    let mut points = 0;
    if count != 0 && text.check().no_error() {
        let mut limit = text.offset;
        if ascii && coalesce {
            let Some(buffer) = text.buffer() else {
                return points;
            };
            let head = &buffer[..text.offset];
            let mut clean = true;
            while points < count && limit > 0 {
                limit -= 1;
                if head[limit] & 0x80 == 0 {
                    points += 1;
                    clean = true;
                } else if clean {
                    points += 1;
                    clean = false;
                }
            }
            text.offset = limit;
        } else {
            points = count.min(limit);
            text.offset -= points;
        }
    }
    points
}
