//! Property-based tests for the integer collaborators.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{Integer, Nmod};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for moduli, including ones above 2^63
    fn modulus() -> impl Strategy<Value = u64> {
        prop_oneof![2u64..1000u64, (1u64 << 63)..u64::MAX]
    }

    proptest! {
        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(a.clone() + b.clone(), b.clone() + a.clone());
        }

        #[test]
        fn integer_additive_inverse(a in small_int()) {
            let a = Integer::new(a);
            let neg_a = -a.clone();
            prop_assert!((a + neg_a).is_zero());
        }

        #[test]
        fn integer_words_roundtrip(words in proptest::collection::vec(any::<u64>(), 1..4)) {
            let value = Integer::from_words_le(&words);
            let mut out = vec![0u64; words.len()];
            prop_assert!(value.write_words_le(&mut out));
            prop_assert_eq!(out, words);
        }

        #[test]
        fn nmod_neg_involution(n in modulus(), a in any::<u64>()) {
            let m = Nmod::new(n);
            let a = m.reduce(a);
            prop_assert_eq!(m.neg(m.neg(a)), a);
            prop_assert_eq!(m.add(a, m.neg(a)), 0);
        }

        #[test]
        fn nmod_add_sub_inverse(n in modulus(), a in any::<u64>(), b in any::<u64>()) {
            let m = Nmod::new(n);
            let a = m.reduce(a);
            let b = m.reduce(b);
            prop_assert_eq!(m.sub(m.add(a, b), b), a);
        }
    }
}
