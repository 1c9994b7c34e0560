pub mod generator;

use rand::Rng;

pub use generator::KeyGenerator;

/// Characters a key suffix is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Returns `prefix` followed by `length` characters picked uniformly from [`ALPHABET`],
/// using the thread-local rng.
pub fn generate(prefix: &str, length: usize) -> String {
    generate_with(&mut rand::thread_rng(), prefix, length)
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, prefix: &str, length: usize) -> String {
    let mut key = String::with_capacity(prefix.len() + length);
    key.push_str(prefix);
    key.extend((0..length).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char));
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shape() {
        for _ in 0..1000 {
            let key = generate("p.", 8);
            assert_eq!(key.len(), "p.".len() + 8);
            assert!(key.starts_with("p."));
            assert!(key[2..].bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_zero_length_is_prefix() {
        assert_eq!(generate("ds.yo.1.2.", 0), "ds.yo.1.2.");
        assert_eq!(generate("", 0), "");
    }

    #[test]
    fn test_empty_prefix() {
        let key = generate("", 16);
        assert_eq!(key.len(), 16);
        assert!(key.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_alphabet_is_alphanumeric() {
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
        let mut sorted = ALPHABET.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 62);
    }
}
