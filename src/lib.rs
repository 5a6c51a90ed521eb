//! Robust Unicode code-point handling over caller-owned byte buffers.
//!
//! This crate provides a family of per-code-point encoders and decoders for
//! several variants of UTF-8, UTF-16 and UTF-32 plus a few legacy single-byte
//! encodings (ISO-8859-1 style bytes, strict 7-bit ASCII and Windows code
//! page 1252), together with stream stepping functions that walk encoded
//! buffers forwards and backwards without materializing scalars.
//!
//! All operations work on a [`Cursor`], a non-owning view over a byte buffer
//! with an explicit offset, and report their outcome through a [`Diagnostics`]
//! bitset instead of `Result`.  Errors (a truncated sequence, an illegal
//! byte, a buffer overflow) and warnings (an overlong form, an unpaired
//! surrogate, a non-character) travel in the same 32-bit word so that callers
//! can be exactly as strict as they need to be.  Nothing here allocates and
//! nothing panics on malformed input.
//!
//! The decoders are deliberately permissive by default: overlong and extended
//! UTF-8 forms, isolated surrogates, the full 31-bit UCS-4 range and the
//! compatibility schemes CESU-8 and modified (Java style) UTF-8 can all be
//! read and written, each flagged precisely.  The strict variants reject
//! irregular forms and consume a single byte per failure, which is the
//! behaviour of mainstream browser decoders.
//!
//! # Examples
//!
//! ```
//! use utfcodec::{Cursor, Encoding};
//!
//! let mut text = Cursor::new([0u8; 8]);
//! let out = Encoding::Utf8St.write(&mut text, 0x20AC);
//! assert!(out.status.no_error());
//! assert_eq!(out.bytes, 3);
//!
//! text.offset = 0;
//! let back = Encoding::Utf8St.read(&mut text);
//! assert_eq!(back.unicode, 0x20AC);
//! assert_eq!(back.bytes, 3);
//! ```
//!
//! Decoding malformed input never fails catastrophically; the offending lead
//! byte comes back as the scalar along with the reason:
//!
//! ```
//! use utfcodec::{Cursor, Diagnostics, Encoding};
//!
//! // An overlong encoding of '/' is rejected by the strict decoder.
//! let text = Cursor::new(&[0xC0u8, 0xAF][..]);
//! let out = Encoding::Utf8St.get(&text);
//! assert!(out.status.failed());
//! assert!(out.status.contains(Diagnostics::OVERLONG_UTF8));
//! assert_eq!(out.bytes, 1);
//! assert_eq!(out.unicode, 0xC0);
//! ```

#![warn(
    missing_copy_implementations,
    unused_extern_crates,
    unused_qualifications,
    clippy::all
)]

mod bom;
mod byte;
mod classify;
mod cp1252;
mod cursor;
mod diagnostics;
mod encoding;
mod escape;
mod handler;
mod overlong;
mod utf16;
mod utf32;
mod utf8;
mod walk;

pub use bom::{
    encode_utf16_bom, encode_utf16_null, encode_utf32_bom, encode_utf32_null, encode_utf8_bom,
    encode_utf8_null,
};
pub use byte::{back_byte, decode_byte, encode_byte, len_byte, step_byte};
pub use classify::{
    bit_count_utf8, is_bad_utf8, is_bom, is_c0, is_c1, is_cc, is_character, is_cont_utf8,
    is_high_surrogate, is_lead_utf8, is_low_surrogate, is_non_character, is_private_use,
    is_special, is_supplementary, is_surrogate, is_unicode, lead_to_bytes_utf8, max_unicode_utf8,
};
pub use cp1252::{
    back_cp1252, cp1252_to_unicode, decode_cp1252, encode_cp1252, len_cp1252, step_cp1252,
    unicode_to_cp1252, Cp1252Strictness,
};
pub use diagnostics::Diagnostics;
pub use encoding::{identify, Encoding, Family, OtherEncoding};
pub use escape::{
    from_short_escape, from_short_escape_json, hex_to_lower_unicode, hex_to_upper_unicode,
    to_short_escape, to_short_escape_json, unicode_to_hex,
};
pub use handler::Line;
pub use overlong::{
    index_to_overlong_utf8, is_overlong_utf8, overlong_to_index_utf8, OVERLONG_COUNT,
};
pub use utf16::{back_utf16, decode_utf16, encode_utf16, len_utf16, step_utf16};
pub use utf32::{back_utf32, decode_utf32, encode_utf32, len_utf32, step_utf32};
pub use utf8::{decode_utf8, encode_utf8, encode_utf8_sized, len_utf8};
pub use walk::{back_utf8, step_utf8};

/// A Unicode code-point scalar.
///
/// Valid Unicode scalar values occupy `U+0000..=U+D7FF` and
/// `U+E000..=U+10FFFF`.  Values up to `0x7FFF_FFFF` are representable for
/// diagnostic purposes (extended UTF-8 and UCS-4 forms); negative values are
/// always invalid points.
pub type Unicode = i32;

/// Outcome of decoding a single code-point from a [`Cursor`].
///
/// On a decode failure `unicode` holds the lead byte of the offending
/// sequence (which is not necessarily the byte that caused the failure) and
/// `bytes` covers either that single byte or the coalesced invalid run,
/// depending on the variant in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded scalar, or the lead byte of a failed sequence.
    pub unicode: Unicode,
    /// Bytes consumed by this code-point.
    pub bytes: usize,
    /// Errors and warnings raised by the decode.
    pub status: Diagnostics,
}

/// Outcome of encoding a single code-point into a [`Cursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// Bytes written, or 0 when nothing was written.
    pub bytes: usize,
    /// Errors and warnings raised by the encode.
    pub status: Diagnostics,
}

/// A non-owning view over an encoded text buffer with an explicit offset.
///
/// The cursor is the unit of state shared between the codec functions: reads
/// and writes happen at `offset`, and the stream stepping functions move
/// `offset` over whole code-points.  The buffer parameter accepts anything
/// that dereferences to bytes, so `Cursor<&[u8]>`, `Cursor<&mut [u8]>` and
/// `Cursor<[u8; N]>` all work; decoding needs `AsRef<[u8]>` and encoding
/// additionally needs `AsMut<[u8]>`.
///
/// A cursor may also be *detached* (no buffer at all), in which case every
/// codec operation reports [`Diagnostics::INVALID_BUFFER`].
///
/// # Examples
///
/// ```
/// use utfcodec::{decode_utf8, Cursor};
///
/// let text = Cursor::new(&b"hi"[..]);
/// let out = decode_utf8(&text, false, false, false, true);
/// assert_eq!(out.unicode, 'h' as i32);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<B> {
    buffer: Option<B>,
    /// Current byte position; well-formed calls keep `offset <= len`.
    pub offset: usize,
}
