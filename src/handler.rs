//! The uniform handler operations on [`Encoding`].
//!
//! Every variant exposes the same contract: `get`/`set` for one code-point
//! at the cursor position, `read`/`write` which also advance the offset,
//! the byte order mark and NUL writers, the stream steppers, a whole-buffer
//! `validate`, and the line helpers that normalize the Unicode newline
//! functions to a plain line feed.

use byteorder::{BigEndian, LittleEndian};

use crate::{
    back_byte, back_cp1252, back_utf16, back_utf32, back_utf8, decode_byte, decode_cp1252,
    decode_utf16, decode_utf32, decode_utf8, encode_byte, encode_cp1252, encode_utf16,
    encode_utf16_bom, encode_utf16_null, encode_utf32, encode_utf32_bom, encode_utf32_null,
    encode_utf8, encode_utf8_bom, encode_utf8_null, step_byte, step_cp1252, step_utf16,
    step_utf32, step_utf8, Cursor, Decoded, Diagnostics, Encoded, Encoding, Family, Unicode,
};

/// A line sliced out of a buffer by [`Encoding::get_line`].
///
/// `line` views the line's bytes without the terminator; `bytes` counts the
/// line plus its terminator, which is how far the cursor advances when
/// reading line by line.
#[derive(Clone, Copy, Debug)]
pub struct Line<'a> {
    /// The line's bytes, positioned at their start.
    pub line: Cursor<&'a [u8]>,
    /// Total bytes covered, terminator included.
    pub bytes: usize,
    /// Errors and warnings raised while scanning.
    pub status: Diagnostics,
}

impl Encoding {
    /// Decodes one code-point at the cursor position.
    pub fn get<B: AsRef<[u8]>>(self, text: &Cursor<B>) -> Decoded {
        match self.family() {
            Family::Utf8 => {
                decode_utf8(text, self.cesu(), self.java(), self.strict(), self.coalesce())
            }
            Family::Utf16Le => decode_utf16::<LittleEndian, _>(text, self.ucs2()),
            Family::Utf16Be => decode_utf16::<BigEndian, _>(text, self.ucs2()),
            Family::Utf32Le => decode_utf32::<LittleEndian, _>(text, self.cesu(), self.ucs4()),
            Family::Utf32Be => decode_utf32::<BigEndian, _>(text, self.cesu(), self.ucs4()),
            Family::Other => match self {
                Encoding::Cp1252 | Encoding::Cp1252Ns | Encoding::Cp1252St => {
                    decode_cp1252(text, self.strict(), self.coalesce())
                }
                _ => decode_byte(text, self.ascii(), self.coalesce()),
            },
        }
    }

    /// Encodes one code-point at the cursor position.
    pub fn set<B: AsRef<[u8]> + AsMut<[u8]>>(self, text: &mut Cursor<B>, unicode: Unicode) -> Encoded {
        match self.family() {
            Family::Utf8 => encode_utf8(text, unicode, self.cesu(), self.java()),
            Family::Utf16Le => encode_utf16::<LittleEndian, _>(text, unicode, self.ucs2()),
            Family::Utf16Be => encode_utf16::<BigEndian, _>(text, unicode, self.ucs2()),
            Family::Utf32Le => {
                encode_utf32::<LittleEndian, _>(text, unicode, self.cesu(), self.ucs4())
            }
            Family::Utf32Be => encode_utf32::<BigEndian, _>(text, unicode, self.cesu(), self.ucs4()),
            Family::Other => match self {
                Encoding::Cp1252 | Encoding::Cp1252Ns | Encoding::Cp1252St => {
                    encode_cp1252(text, unicode, self.strict())
                }
                _ => encode_byte(text, unicode, self.ascii()),
            },
        }
    }

    /// Writes this variant's byte order mark at the cursor position.
    ///
    /// CP1252 has no mark; its writer reports zero bytes and no status.
    /// The plain byte encodings take the UTF-8 mark.
    pub fn set_bom<B: AsRef<[u8]> + AsMut<[u8]>>(self, text: &mut Cursor<B>) -> Encoded {
        match self.family() {
            Family::Utf16Le => encode_utf16_bom::<LittleEndian, _>(text),
            Family::Utf16Be => encode_utf16_bom::<BigEndian, _>(text),
            Family::Utf32Le => encode_utf32_bom::<LittleEndian, _>(text),
            Family::Utf32Be => encode_utf32_bom::<BigEndian, _>(text),
            _ => match self {
                Encoding::Cp1252 | Encoding::Cp1252Ns | Encoding::Cp1252St => Encoded {
                    bytes: 0,
                    status: Diagnostics::empty(),
                },
                _ => encode_utf8_bom(text),
            },
        }
    }

    /// Writes this variant's NUL code-point at the cursor position.
    pub fn set_null<B: AsRef<[u8]> + AsMut<[u8]>>(self, text: &mut Cursor<B>) -> Encoded {
        match self.family() {
            Family::Utf16Le | Family::Utf16Be => encode_utf16_null(text),
            Family::Utf32Le | Family::Utf32Be => encode_utf32_null(text),
            _ => encode_utf8_null(text),
        }
    }

    /// Advances the cursor by up to `count` code-points, returning how many
    /// it moved over.
    pub fn step<B: AsRef<[u8]>>(self, text: &mut Cursor<B>, count: usize) -> usize {
        match self.family() {
            Family::Utf8 => step_utf8(
                text,
                count,
                self.cesu(),
                self.java(),
                self.strict(),
                self.coalesce(),
            ),
            Family::Utf16Le => step_utf16::<LittleEndian, _>(text, count, self.ucs2()),
            Family::Utf16Be => step_utf16::<BigEndian, _>(text, count, self.ucs2()),
            Family::Utf32Le => step_utf32::<LittleEndian, _>(text, count, self.cesu()),
            Family::Utf32Be => step_utf32::<BigEndian, _>(text, count, self.cesu()),
            Family::Other => match self {
                Encoding::Cp1252 | Encoding::Cp1252Ns | Encoding::Cp1252St => {
                    step_cp1252(text, count, self.strict(), self.coalesce())
                }
                _ => step_byte(text, count, self.ascii(), self.coalesce()),
            },
        }
    }

    /// Moves the cursor back by up to `count` code-points, returning how
    /// many it moved over.
    pub fn back<B: AsRef<[u8]>>(self, text: &mut Cursor<B>, count: usize) -> usize {
        match self.family() {
            Family::Utf8 => back_utf8(
                text,
                count,
                self.cesu(),
                self.java(),
                self.strict(),
                self.coalesce(),
            ),
            Family::Utf16Le => back_utf16::<LittleEndian, _>(text, count, self.ucs2()),
            Family::Utf16Be => back_utf16::<BigEndian, _>(text, count, self.ucs2()),
            Family::Utf32Le => back_utf32::<LittleEndian, _>(text, count, self.cesu()),
            Family::Utf32Be => back_utf32::<BigEndian, _>(text, count, self.cesu()),
            Family::Other => match self {
                Encoding::Cp1252 | Encoding::Cp1252Ns | Encoding::Cp1252St => {
                    back_cp1252(text, count, self.strict(), self.coalesce())
                }
                _ => back_byte(text, count, self.ascii(), self.coalesce()),
            },
        }
    }

    /// Decodes one code-point and advances the cursor past it.
    pub fn read<B: AsRef<[u8]>>(self, text: &mut Cursor<B>) -> Decoded {
        let out = self.get(text);
        text.offset += out.bytes;
        out
    }

    /// Encodes one code-point and advances the cursor past it.
    pub fn write<B: AsRef<[u8]> + AsMut<[u8]>>(self, text: &mut Cursor<B>, unicode: Unicode) -> Encoded {
        let out = self.set(text, unicode);
        text.offset += out.bytes;
        out
    }

    /// Writes the byte order mark and advances the cursor past it.
    pub fn write_bom<B: AsRef<[u8]> + AsMut<[u8]>>(self, text: &mut Cursor<B>) -> Encoded {
        let out = self.set_bom(text);
        text.offset += out.bytes;
        out
    }

    /// Writes the NUL code-point and advances the cursor past it.
    pub fn write_null<B: AsRef<[u8]> + AsMut<[u8]>>(self, text: &mut Cursor<B>) -> Encoded {
        let out = self.set_null(text);
        text.offset += out.bytes;
        out
    }

    /// Reads the whole buffer from the cursor position, accumulating every
    /// warning and stopping at the first error.
    ///
    /// A well-formed buffer reports only warnings, with
    /// [`Diagnostics::READ_EXHAUSTED`] marking the clean end.
    pub fn validate<B: AsRef<[u8]>>(self, text: &Cursor<B>) -> Diagnostics {
        let mut status = text.check();
        if status.error() {
            return status;
        }
        let mut scan = text.reborrow(text.offset);
        loop {
            let out = self.read(&mut scan);
            status |= out.status;
            if status.error() || out.status.contains(Diagnostics::READ_EXHAUSTED) {
                return status;
            }
        }
    }

    /// Decodes one code-point with line terminators normalized.
    ///
    /// LF, VT, FF, CR, NEL, LS and PS all decode as `0x0A`, and the two
    /// character pairs CR LF and LF CR are consumed whole, with `bytes`
    /// covering both.
    pub fn get_nlf<B: AsRef<[u8]>>(self, text: &Cursor<B>) -> Decoded {
        let mut out = self.get(text);
        if out.status.no_error() {
            match out.unicode {
                0x000A | 0x000D => {
                    let next = text.reborrow(text.offset + out.bytes);
                    let pair = self.get(&next);
                    if pair.status.no_error() && pair.unicode == (out.unicode ^ 0x0007) {
                        out.bytes += pair.bytes;
                        out.status |= pair.status;
                    }
                    out.unicode = 0x000A;
                }
                0x000B | 0x000C | 0x0085 | 0x2028 | 0x2029 => {
                    out.unicode = 0x000A;
                }
                _ => {}
            }
        }
        out
    }

    /// Decodes one terminator-normalized code-point and advances past it.
    pub fn read_nlf<B: AsRef<[u8]>>(self, text: &mut Cursor<B>) -> Decoded {
        let out = self.get_nlf(text);
        text.offset += out.bytes;
        out
    }

    /// Scans from the cursor position to the next line terminator or NUL.
    ///
    /// Returns the line's span (excluding the terminator) and the byte count
    /// including it.  The end of the buffer also ends a line, reported
    /// through the [`Diagnostics::READ_EXHAUSTED`] warning.  On any error
    /// the span is empty and no bytes are covered.
    fn line_span<B: AsRef<[u8]>>(self, text: &Cursor<B>) -> (usize, usize, Diagnostics) {
        let mut status = text.check();
        if status.error() {
            return (0, 0, status);
        }
        let mut scan = text.reborrow(text.offset);
        let start = text.offset;
        loop {
            let out = self.get_nlf(&scan);
            status |= out.status;
            if status.error() {
                return (0, 0, status);
            }
            if out.unicode == 0x000A || out.unicode == 0x0000 {
                let length = scan.offset - start;
                return (length, length + out.bytes, status);
            }
            scan.offset += out.bytes;
        }
    }

    /// Slices the line at the cursor position into a borrowed view.
    pub fn get_line<'a, B: AsRef<[u8]>>(self, text: &'a Cursor<B>) -> Line<'a> {
        let (length, bytes, status) = self.line_span(text);
        let line = match text.buffer() {
            Some(buffer) if !status.error() => {
                Cursor::new(&buffer[text.offset..text.offset + length])
            }
            _ => Cursor::detached(),
        };
        Line {
            line,
            bytes,
            status,
        }
    }

    /// Slices the line at the cursor position and advances past it,
    /// terminator included.
    pub fn read_line<'a, B: AsRef<[u8]>>(self, text: &'a mut Cursor<B>) -> Line<'a> {
        let start = text.offset;
        let (length, bytes, status) = self.line_span(text);
        text.offset += bytes;
        let line = match text.buffer() {
            Some(buffer) if !status.error() => Cursor::new(&buffer[start..start + length]),
            _ => Cursor::detached(),
        };
        Line {
            line,
            bytes,
            status,
        }
    }
}
