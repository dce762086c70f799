//! Code point decoding at byte offsets of UTF-8 text.

const TAG_TWO_B: u8 = 0b1100_0000;
const TAG_THREE_B: u8 = 0b1110_0000;
const TAG_FOUR_B: u8 = 0b1111_0000;

const CONT_VALUE_MASK: u8 = 0b0011_1111;

/// Width in bytes of the code point whose encoding starts with `v`.
/// Returns `None` for continuation bytes and bytes that never lead a UTF-8 sequence.
pub(crate) fn len_from_first_byte(v: u8) -> Option<usize> {
    if v < 0x80 {
        Some(1)
    } else if v & 0b1111_1000 == TAG_FOUR_B {
        Some(4)
    } else if v & 0b1111_0000 == TAG_THREE_B {
        Some(3)
    } else if v & 0b1110_0000 == TAG_TWO_B {
        Some(2)
    } else {
        None
    }
}

#[inline]
fn utf8_first_byte(byte: u8, cont_len: usize) -> u32 {
    (byte & (0x7F >> cont_len)) as u32
}

#[inline]
fn utf8_acc_cont_byte(ch: u32, byte: u8) -> u32 {
    (ch << 6) | (byte & CONT_VALUE_MASK) as u32
}

/// Decodes the code point starting at `index`, returning it with its width in bytes.
///
/// `index` must fall on a char boundary of `bytes`. Returns `None` at the end of
/// input or when the bytes there are not a complete UTF-8 sequence.
pub(crate) fn decode_at(bytes: &[u8], index: usize) -> Option<(u32, usize)> {
    let head = *bytes.get(index)?;
    let width = len_from_first_byte(head)?;
    let cont = bytes.get(index + 1..index + width)?;
    let mut v = utf8_first_byte(head, cont.len());
    for c in cont.iter().copied() {
        v = utf8_acc_cont_byte(v, c);
    }
    Some((v, width))
}
