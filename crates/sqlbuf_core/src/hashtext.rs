//! PostgreSQL `hashtext()` computed over a value's byte view.
//!
//! [`hashtext_old`] is the lookup2 based hash used up to PostgreSQL 8.3,
//! [`hashtext_new`] the lookup3 based one used since 8.4. Both read the key
//! as little-endian words, so results match a little-endian server.

use tracing::trace;

use crate::buffer::extract;
use crate::error::ExtractResult;
use crate::value::Value;

const GOLDEN_RATIO: u32 = 0x9e37_79b9;
const SEED: u32 = 3_923_095;

/// Splits up to 12 bytes into three zero-padded little-endian words.
fn words(block: &[u8]) -> [u32; 3] {
    let mut buf = [0u8; 12];
    buf[..block.len()].copy_from_slice(block);
    [0, 4, 8].map(|i| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]))
}

fn add_block(state: &mut [u32; 3], block: [u32; 3]) {
    for (s, w) in state.iter_mut().zip(block) {
        *s = s.wrapping_add(w);
    }
}

fn mix_old([mut a, mut b, mut c]: [u32; 3]) -> [u32; 3] {
    for (ra, rb, rc) in [(13, 8, 13), (12, 16, 5), (3, 10, 15)] {
        a = a.wrapping_sub(b).wrapping_sub(c) ^ (c >> ra);
        b = b.wrapping_sub(c).wrapping_sub(a) ^ (a << rb);
        c = c.wrapping_sub(a).wrapping_sub(b) ^ (b >> rc);
    }
    [a, b, c]
}

fn mix_new([mut a, mut b, mut c]: [u32; 3]) -> [u32; 3] {
    for (r1, r2, r3) in [(4, 6, 8), (16, 19, 4)] {
        a = a.wrapping_sub(c) ^ c.rotate_left(r1);
        c = c.wrapping_add(b);
        b = b.wrapping_sub(a) ^ a.rotate_left(r2);
        a = a.wrapping_add(c);
        c = c.wrapping_sub(b) ^ b.rotate_left(r3);
        b = b.wrapping_add(a);
    }
    [a, b, c]
}

fn final_new([mut a, mut b, mut c]: [u32; 3]) -> [u32; 3] {
    c = (c ^ b).wrapping_sub(b.rotate_left(14));
    a = (a ^ c).wrapping_sub(c.rotate_left(11));
    b = (b ^ a).wrapping_sub(a.rotate_left(25));
    c = (c ^ b).wrapping_sub(b.rotate_left(16));
    a = (a ^ c).wrapping_sub(c.rotate_left(4));
    b = (b ^ a).wrapping_sub(a.rotate_left(14));
    c = (c ^ b).wrapping_sub(b.rotate_left(24));
    [a, b, c]
}

/// Pre-8.4 `hashtext()` of raw bytes.
pub fn hash_bytes_old(key: &[u8]) -> i32 {
    let mut state = [GOLDEN_RATIO, GOLDEN_RATIO, SEED];
    let mut blocks = key.chunks_exact(12);
    for block in &mut blocks {
        add_block(&mut state, words(block));
        state = mix_old(state);
    }
    // the lowest byte of c is reserved for the length
    let [a, b, c] = words(blocks.remainder());
    add_block(&mut state, [a, b, (c << 8).wrapping_add(key.len() as u32)]);
    mix_old(state)[2] as i32
}

/// 8.4+ `hashtext()` of raw bytes.
pub fn hash_bytes_new(key: &[u8]) -> i32 {
    let init = GOLDEN_RATIO.wrapping_add(key.len() as u32).wrapping_add(SEED);
    let mut state = [init; 3];
    let mut blocks = key.chunks_exact(12);
    for block in &mut blocks {
        add_block(&mut state, words(block));
        state = mix_new(state);
    }
    let [a, b, c] = words(blocks.remainder());
    add_block(&mut state, [a, b, c << 8]);
    final_new(state)[2] as i32
}

/// Hashes the byte view of `value` the way PostgreSQL 8.3 and older did.
///
/// # Errors
///
/// Fails like [`extract`]: null is rejected and a failing text conversion is
/// passed through.
pub fn hashtext_old(value: &Value<'_>) -> ExtractResult<i32> {
    let view = extract(value)?;
    trace!(len = view.len(), zero_copy = view.is_zero_copy(), "hashtext_old");
    Ok(hash_bytes_old(&view))
}

/// Hashes the byte view of `value` the way PostgreSQL 8.4 and newer do.
///
/// # Errors
///
/// Same as [`hashtext_old`].
///
/// # Examples
///
/// ```
/// use sqlbuf_core::{hashtext_new, Value};
///
/// let value = Value::from("");
/// assert_eq!(hashtext_new(&value).unwrap(), -1477818771);
/// ```
pub fn hashtext_new(value: &Value<'_>) -> ExtractResult<i32> {
    let view = extract(value)?;
    trace!(len = view.len(), zero_copy = view.is_zero_copy(), "hashtext_new");
    Ok(hash_bytes_new(&view))
}
