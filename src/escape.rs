//! Hexadecimal digit and short escape code conversions.
//!
//! These are the small translations a diagnostic or serialisation layer
//! needs when printing code-points: hex digits in both cases, the standard
//! C style short escapes and the JSON subset of them.

use crate::Unicode;

/// Converts a hexadecimal digit code-point to its 4-bit value.
///
/// Accepts `0123456789abcdefABCDEF`.
#[inline]
pub const fn unicode_to_hex(unicode: Unicode) -> Option<u32> {
    match unicode {
        0x30..=0x39 => Some((unicode - 0x30) as u32),
        0x41..=0x46 => Some((unicode - 0x41 + 10) as u32),
        0x61..=0x66 => Some((unicode - 0x61 + 10) as u32),
        _ => None,
    }
}

/// Converts a 4-bit value to a lower case hex digit code-point
/// (`0123456789abcdef`).  Only the low 4 bits of `hex` are used.
#[inline]
pub const fn hex_to_lower_unicode(hex: u32) -> Unicode {
    let hex = (hex & 15) as Unicode;
    if hex < 10 {
        hex + '0' as Unicode
    } else {
        hex - 10 + 'a' as Unicode
    }
}

/// Converts a 4-bit value to an upper case hex digit code-point
/// (`0123456789ABCDEF`).  Only the low 4 bits of `hex` are used.
#[inline]
pub const fn hex_to_upper_unicode(hex: u32) -> Unicode {
    let hex = (hex & 15) as Unicode;
    if hex < 10 {
        hex + '0' as Unicode
    } else {
        hex - 10 + 'A' as Unicode
    }
}

/// Converts a code-point to its standard short escape character, as in
/// `0x0A` to `n` for `\n`.
pub const fn to_short_escape(unicode: Unicode) -> Option<Unicode> {
    match unicode {
        0x0007 => Some(0x0061), // bell -> 'a'
        0x0008 => Some(0x0062), // back-space -> 'b'
        0x0009 => Some(0x0074), // tab -> 't'
        0x000A => Some(0x006E), // line-feed -> 'n'
        0x000B => Some(0x0076), // vertical tab -> 'v'
        0x000C => Some(0x0066), // form-feed -> 'f'
        0x000D => Some(0x0072), // carriage return -> 'r'
        0x0022 | 0x0027 | 0x002F | 0x003F | 0x005C => Some(unicode),
        _ => None,
    }
}

/// Converts a standard short escape character back to its code-point, as in
/// `n` to `0x0A`.
pub const fn from_short_escape(unicode: Unicode) -> Option<Unicode> {
    match unicode {
        0x0022 | 0x0027 | 0x002F | 0x003F | 0x005C => Some(unicode),
        0x0061 => Some(0x0007), // 'a' -> bell
        0x0062 => Some(0x0008), // 'b' -> back-space
        0x0066 => Some(0x000C), // 'f' -> form-feed
        0x006E => Some(0x000A), // 'n' -> line-feed
        0x0072 => Some(0x000D), // 'r' -> carriage return
        0x0074 => Some(0x0009), // 't' -> tab
        0x0076 => Some(0x000B), // 'v' -> vertical tab
        _ => None,
    }
}

/// Converts a code-point to its JSON short escape character.
///
/// JSON only defines a subset of the standard short escapes.
pub const fn to_short_escape_json(unicode: Unicode) -> Option<Unicode> {
    match unicode {
        0x0008 => Some(0x0062), // back-space -> 'b'
        0x0009 => Some(0x0074), // tab -> 't'
        0x000A => Some(0x006E), // line-feed -> 'n'
        0x000C => Some(0x0066), // form-feed -> 'f'
        0x000D => Some(0x0072), // carriage return -> 'r'
        0x0022 | 0x002F | 0x005C => Some(unicode),
        _ => None,
    }
}

/// Converts a JSON short escape character back to its code-point.
pub const fn from_short_escape_json(unicode: Unicode) -> Option<Unicode> {
    match unicode {
        0x0022 | 0x002F | 0x005C => Some(unicode),
        0x0062 => Some(0x0008), // 'b' -> back-space
        0x0066 => Some(0x000C), // 'f' -> form-feed
        0x006E => Some(0x000A), // 'n' -> line-feed
        0x0072 => Some(0x000D), // 'r' -> carriage return
        0x0074 => Some(0x0009), // 't' -> tab
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_digits() {
        assert_eq!(unicode_to_hex('0' as Unicode), Some(0));
        assert_eq!(unicode_to_hex('9' as Unicode), Some(9));
        assert_eq!(unicode_to_hex('a' as Unicode), Some(10));
        assert_eq!(unicode_to_hex('F' as Unicode), Some(15));
        assert_eq!(unicode_to_hex('g' as Unicode), None);
        assert_eq!(unicode_to_hex(-1), None);

        for value in 0..16 {
            assert_eq!(unicode_to_hex(hex_to_lower_unicode(value)), Some(value));
            assert_eq!(unicode_to_hex(hex_to_upper_unicode(value)), Some(value));
        }
        assert_eq!(hex_to_lower_unicode(0x1F), 'f' as Unicode);
    }

    #[test]
    fn test_short_escapes() {
        assert_eq!(to_short_escape(0x0A), Some('n' as Unicode));
        assert_eq!(from_short_escape('n' as Unicode), Some(0x0A));
        assert_eq!(to_short_escape(0x27), Some(0x27));
        assert_eq!(to_short_escape(0x41), None);
        assert_eq!(from_short_escape(0x41), None);
    }

    #[test]
    fn test_json_escapes_are_a_subset() {
        // '\v', '?' and '\'' have standard escapes but no JSON ones.
        assert_eq!(to_short_escape_json(0x0B), None);
        assert_eq!(to_short_escape_json(0x3F), None);
        assert_eq!(to_short_escape_json(0x27), None);
        assert_eq!(to_short_escape_json(0x0A), Some('n' as Unicode));
        assert_eq!(from_short_escape_json('t' as Unicode), Some(0x09));
        assert_eq!(from_short_escape_json('v' as Unicode), None);
    }
}
