//! Stable identity hashing.
//!
//! Identity hashes end up in class names and cache keys, so they must be stable
//! across processes and platforms. `std`'s hasher makes no such promise; this
//! module uses 32-bit MurmurHash2 rendered in base 36.

const M: u32 = 0x5bd1_e995;

/// Hashes `input` with MurmurHash2 (seed 0) and renders the result in base 36.
///
/// ```rust
/// use tokenstyle::hash::murmur2;
///
/// assert_eq!(murmur2(""), "0");
/// assert_eq!(murmur2("colorPrimary"), murmur2("colorPrimary"));
/// ```
pub fn murmur2(input: &str) -> String {
    to_base36(murmur2_u32(input.as_bytes()))
}

fn murmur2_u32(bytes: &[u8]) -> u32 {
    let mut h: u32 = 0;
    let mut chunks = bytes.chunks_exact(4);

    for chunk in &mut chunks {
        let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        k = k.wrapping_mul(M);
        k ^= k >> 24;
        h = k.wrapping_mul(M) ^ h.wrapping_mul(M);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        if tail.len() >= 3 {
            h ^= u32::from(tail[2]) << 16;
        }
        if tail.len() >= 2 {
            h ^= u32::from(tail[1]) << 8;
        }
        h ^= u32::from(tail[0]);
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^ (h >> 15)
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
    }

    #[test]
    fn test_hash_is_stable_and_discriminating() {
        assert_eq!(murmur2("Button"), murmur2("Button"));
        assert_ne!(murmur2("Button"), murmur2("Buttom"));
    }

    #[test]
    fn test_tail_lengths_all_hash() {
        // Exercise every remainder branch.
        let hashes: Vec<String> = ["a", "ab", "abc", "abcd", "abcde"]
            .iter()
            .map(|s| murmur2(s))
            .collect();
        for (i, a) in hashes.iter().enumerate() {
            for b in hashes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
