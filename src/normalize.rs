use ahash::AHashSet;
use std::hash::Hasher as _;
use twox_hash::XxHash64;

/// A document's comparison unit: the set of hashed word n-grams
/// ("shingles") over its normalized token stream. Hashing the shingles to
/// u64 keeps set intersection a cheap integer lookup.
pub type ShingleSet = AHashSet<u64>;

/// Normalize extracted text into word tokens: lower-case fold, punctuation
/// stripped to whitespace, whitespace collapsed by the split.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                folded.push(lower);
            }
        } else {
            folded.push(' ');
        }
    }

    folded.split_whitespace().map(str::to_string).collect()
}

/// Build the shingle set over a token stream.
///
/// Shingles are contiguous runs of `shingle_size` tokens. A document with
/// fewer tokens than that yields a single shingle covering its full token
/// sequence; zero tokens yield an empty set. Deterministic: the hash seed
/// is fixed, so identical text always produces an identical set.
pub fn shingle_set(tokens: &[String], shingle_size: usize) -> ShingleSet {
    assert!(shingle_size > 0, "shingle size must be at least 1");

    if tokens.is_empty() {
        return ShingleSet::new();
    }

    if tokens.len() < shingle_size {
        let mut set = ShingleSet::with_capacity(1);
        set.insert(hash_shingle(tokens));
        return set;
    }

    let mut set = ShingleSet::with_capacity(tokens.len() - shingle_size + 1);
    for window in tokens.windows(shingle_size) {
        set.insert(hash_shingle(window));
    }
    set
}

fn hash_shingle(tokens: &[String]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    for token in tokens {
        hasher.write(token.as_bytes());
        // Separator byte so ["ab","c"] and ["a","bc"] hash differently.
        hasher.write_u8(0xff);
    }
    hasher.finish()
}
