//! Order codes and payment references
//!
//! Both identifiers derive deterministically from the order's monotonic
//! number, so uniqueness is inherited from the sequence rather than
//! collision-checked.
//!
//! The order code is what volunteers read out at the pickup table; the
//! payment reference is what customers type into their banking app as the
//! transfer memo, so incoming payments can be reconciled to orders. It uses
//! the Belgian structured-communication format: ten digits grouped
//! `+++xxx/xxxx/xxxxx+++` with a trailing mod-97 check pair.

/// Characters used in order codes. Ambiguous glyphs (0/O, 1/I, 5/S) are
/// excluded so codes survive handwriting and phone calls.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRTUVWXYZ2346789";

/// Minimum length of the encoded part of an order code.
const CODE_WIDTH: usize = 4;

/// Build the human-readable order code for an order number.
///
/// The number is encoded in the unambiguous alphabet and left-padded to four
/// characters behind a fixed `B` prefix. Distinct numbers always yield
/// distinct codes.
pub fn order_code(number: u64) -> String {
    let base = CODE_ALPHABET.len() as u64;
    let mut encoded = Vec::with_capacity(CODE_WIDTH);
    let mut rest = number;

    loop {
        let digit = (rest % base) as usize;
        encoded.push(CODE_ALPHABET.get(digit).copied().unwrap_or(b'A'));
        rest /= base;

        if rest == 0 {
            break;
        }
    }

    while encoded.len() < CODE_WIDTH {
        encoded.push(b'A');
    }

    encoded.push(b'B');
    encoded.reverse();

    String::from_utf8(encoded).unwrap_or_default()
}

/// Build the structured payment communication for an order number.
///
/// The body is the order number modulo 10¹⁰, zero-padded to ten digits; the
/// check pair is the body modulo 97, with 0 written as 97 per the Belgian
/// convention. References are distinct for all realistic order volumes.
pub fn payment_reference(number: u64) -> String {
    let body = number % 10_000_000_000;

    let mut check = body % 97;
    if check == 0 {
        check = 97;
    }

    let first = body / 10_000_000;
    let middle = (body / 1_000) % 10_000;
    let last = body % 1_000;

    format!("+++{first:03}/{middle:04}/{last:03}{check:02}+++")
}
