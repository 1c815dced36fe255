//! Hashing for [`TypeId`](core::any::TypeId) keys.
//!
//! A `TypeId` is already a hash produced by the compiler, so the hasher only
//! folds its words together instead of mixing them again.

use core::hash::{BuildHasher, Hasher};

// -----------------------------------------------------------------------------
// TypeIdHasher

/// A hasher for keys that write compiler-generated hashes.
///
/// Integer writes are XOR-ed into the state. Byte writes are split into
/// little-endian 8-byte words, zero-padded, and folded the same way, so a
/// `u128` written as bytes folds its two halves.
#[derive(Copy, Clone, Default, Debug)]
pub struct TypeIdHasher {
    hash: u64,
}

impl TypeIdHasher {
    #[inline(always)]
    fn fold(&mut self, word: u64) {
        self.hash ^= word;
    }
}

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0_u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.fold(u64::from_le_bytes(word));
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.fold(i as u64);
        self.fold((i >> 64) as u64);
    }
}

/// [`BuildHasher`] for [`TypeIdHasher`].
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use core::hash::BuildHasher;
/// use og_utils::hash::TypeIdState;
///
/// let a = TypeIdState.hash_one(TypeId::of::<u32>());
/// let b = TypeIdState.hash_one(TypeId::of::<u32>());
/// let c = TypeIdState.hash_one(TypeId::of::<i32>());
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct TypeIdState;

impl BuildHasher for TypeIdState {
    type Hasher = TypeIdHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        TypeIdHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hasher};

    use super::TypeIdState;

    #[test]
    fn words_pass_through() {
        let mut hasher = TypeIdState.build_hasher();
        hasher.write_u64(0xDEAD_BEEF);

        assert_eq!(hasher.finish(), 0xDEAD_BEEF);
    }

    #[test]
    fn bytes_fold_like_words() {
        let value: u128 = (7 << 64) | 5;

        let mut words = TypeIdState.build_hasher();
        words.write_u128(value);

        let mut bytes = TypeIdState.build_hasher();
        bytes.write(&value.to_le_bytes());

        assert_eq!(words.finish(), 7 ^ 5);
        assert_eq!(bytes.finish(), words.finish());
    }

    #[test]
    fn short_writes_are_padded() {
        let mut hasher = TypeIdState.build_hasher();
        hasher.write(&[1, 0, 0]);

        assert_eq!(hasher.finish(), 1);
    }
}
