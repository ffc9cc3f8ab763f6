//! Benchmark utilities.

use bytes::Bytes;
use rand::distributions::{Alphanumeric, Distribution, Uniform};
use rand::Rng;

/// Payload sizes used across benchmarks.
pub const SIZES: &[usize] = &[16, 256, 4096, 65536];

/// Generate random bytes of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate random alphanumeric text of the specified size.
pub fn random_text(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect()
}

/// Generate text where roughly one character in `every` needs escaping.
pub fn escape_heavy_text(size: usize, every: u32) -> String {
    let mut rng = rand::thread_rng();
    let pick = Uniform::new(0, every.max(1));
    let specials = ['\'', '\\', '\t', '\n'];
    (0..size)
        .map(|i| {
            if pick.sample(&mut rng) == 0 {
                specials[i % specials.len()]
            } else {
                char::from(rng.sample(Alphanumeric))
            }
        })
        .collect()
}

/// Split `data` into `segments` roughly equal chunks.
pub fn chunked(data: &[u8], segments: usize) -> Vec<Bytes> {
    let step = data.len().div_ceil(segments.max(1)).max(1);
    data.chunks(step).map(Bytes::copy_from_slice).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_honour_size() {
        assert_eq!(random_data(32).len(), 32);
        assert_eq!(random_text(32).len(), 32);
        assert_eq!(escape_heavy_text(32, 4).chars().count(), 32);
    }

    #[test]
    fn chunked_covers_input() {
        let data = random_data(100);
        let chunks = chunked(&data, 3);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.concat(), data);
    }
}
