//! Property-based tests for packing and the polynomial container.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tessera_integers::{Integer, Nmod};

    use crate::context::MpolyCtx;
    use crate::error::MpolyError;
    use crate::monomial::{self, cmp_mask};
    use crate::mpoly::NmodMpoly;
    use crate::ordering::MonomialOrder;
    use crate::packing::{
        exp_bits_required_ui, fix_bits, pack, pack_ui, unpack, unpack_ui, words_per_exp,
    };

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ordering() -> impl Strategy<Value = MonomialOrder> {
        prop_oneof![
            Just(MonomialOrder::Lex),
            Just(MonomialOrder::Deglex),
            Just(MonomialOrder::Degrevlex),
        ]
    }

    fn context() -> impl Strategy<Value = MpolyCtx> {
        (1usize..6, ordering()).prop_map(|(n, ord)| MpolyCtx::new(n, ord))
    }

    // Widths covering single-word, odd and multi-word layouts
    fn width() -> impl Strategy<Value = u32> {
        prop_oneof![Just(8u32), Just(13), Just(21), Just(32), Just(64), Just(128), Just(192)]
    }

    // Context together with an exponent vector of matching length
    fn ctx_and_exps(max: u64) -> impl Strategy<Value = (MpolyCtx, Vec<u64>)> {
        context().prop_flat_map(move |ctx| {
            let n = ctx.nvars();
            (Just(ctx), proptest::collection::vec(0..max, n))
        })
    }

    // Context with a short list of exponent vectors and nonzero coefficients mod 101
    fn ctx_and_terms() -> impl Strategy<Value = (MpolyCtx, Vec<(u64, Vec<u64>)>)> {
        context().prop_flat_map(|ctx| {
            let n = ctx.nvars();
            let term = (1u64..101, proptest::collection::vec(0u64..50, n));
            (Just(ctx), proptest::collection::vec(term, 0..8))
        })
    }

    fn build(ctx: &MpolyCtx, terms: &[(u64, Vec<u64>)]) -> NmodMpoly {
        let mut p = NmodMpoly::new(ctx);
        for (c, e) in terms {
            p.push_term_ui(*c, e, ctx).unwrap();
        }
        p
    }

    proptest! {
        #[test]
        fn pack_unpack_roundtrip((ctx, exps) in ctx_and_exps(1 << 20), bits in width()) {
            let bits = fix_bits(bits.max(exp_bits_required_ui(&exps, &ctx).unwrap())).unwrap();
            let words = pack_ui(&exps, bits, &ctx).unwrap();
            prop_assert_eq!(words.len(), words_per_exp(bits, &ctx));
            prop_assert_eq!(unpack_ui(&words, bits, &ctx).unwrap(), exps.clone());

            let big: Vec<Integer> = exps.iter().map(|&e| Integer::from(e)).collect();
            prop_assert_eq!(pack(&big, bits, &ctx).unwrap(), words.clone());
            prop_assert_eq!(unpack(&words, bits, &ctx).unwrap(), big);
        }

        #[test]
        fn words_per_exp_monotone(ctx in context(), a in 1u32..400, b in 1u32..400) {
            let (lo, hi) = (fix_bits(a.min(b)).unwrap(), fix_bits(a.max(b)).unwrap());
            prop_assert!(words_per_exp(lo, &ctx) <= words_per_exp(hi, &ctx));
            prop_assert!(words_per_exp(lo, &ctx) >= 1);
        }

        #[test]
        fn too_narrow_overflows((ctx, exps) in ctx_and_exps(u64::MAX)) {
            let required = exp_bits_required_ui(&exps, &ctx).unwrap();
            prop_assume!(required > 8);
            let result = pack_ui(&exps, 8, &ctx);
            prop_assert_eq!(result, Err(MpolyError::ExponentOverflow { bits: 8 }));
        }

        #[test]
        fn packed_cmp_agrees_with_unpacked(
            (ctx, a) in ctx_and_exps(200),
            seed in proptest::collection::vec(0u64..200, 5),
            bits in width(),
        ) {
            let b: Vec<u64> = seed.iter().copied().cycle().take(ctx.nvars()).collect();
            let bits = fix_bits(
                bits.max(exp_bits_required_ui(&a, &ctx).unwrap())
                    .max(exp_bits_required_ui(&b, &ctx).unwrap()),
            )
            .unwrap();
            let mask = cmp_mask(bits, &ctx).unwrap();
            let pa = pack_ui(&a, bits, &ctx).unwrap();
            let pb = pack_ui(&b, bits, &ctx).unwrap();
            prop_assert_eq!(monomial::cmp(&pa, &pb, &mask), ctx.ord().compare_unpacked(&a, &b));
        }

        #[test]
        fn packed_add_matches_unpacked((ctx, a) in ctx_and_exps(1000), bits in width()) {
            let doubled: Vec<u64> = a.iter().map(|&e| 2 * e).collect();
            let bits = fix_bits(bits.max(exp_bits_required_ui(&doubled, &ctx).unwrap())).unwrap();
            let pa = pack_ui(&a, bits, &ctx).unwrap();
            let sum = monomial::mul_checked(&pa, &pa, bits, &ctx).unwrap();
            prop_assert_eq!(unpack_ui(&sum, bits, &ctx).unwrap(), doubled);
        }

        #[test]
        fn fit_bits_idempotent((ctx, terms) in ctx_and_terms(), bits in width()) {
            init_logging();
            let mut p = build(&ctx, &terms);
            p.fit_bits(bits, &ctx).unwrap();
            let once = p.clone();
            p.fit_bits(bits, &ctx).unwrap();
            prop_assert_eq!(p.bits(), once.bits());
            prop_assert_eq!(p.exps(&ctx), once.exps(&ctx));

            // Narrower requests are no-ops
            p.fit_bits(8, &ctx).unwrap();
            prop_assert_eq!(p.bits(), once.bits());
        }

        #[test]
        fn promotion_preserves_terms((ctx, terms) in ctx_and_terms(), bits in width()) {
            let mut p = build(&ctx, &terms);
            let before = p.clone();
            p.fit_bits(bits, &ctx).unwrap();
            prop_assert!(p.equal(&before, &ctx));
            for (i, (_, e)) in terms.iter().enumerate() {
                prop_assert_eq!(&p.get_term_exp_ui(i as i64, &ctx).unwrap(), e);
            }
        }

        #[test]
        fn neg_involution((ctx, terms) in ctx_and_terms()) {
            let ring = Nmod::new(101);
            let p = build(&ctx, &terms);
            let q = p.neg(&ring, &ctx).unwrap();
            let back = q.neg(&ring, &ctx).unwrap();
            prop_assert_eq!(back.coeffs(), p.coeffs());
            prop_assert_eq!(back.exps(&ctx), p.exps(&ctx));
            prop_assert_eq!(q.exps(&ctx), p.exps(&ctx));
        }

        #[test]
        fn term_accessor_bounds((ctx, terms) in ctx_and_terms(), extra in 0i64..5, neg in 1i64..1000) {
            let p = build(&ctx, &terms);
            let len = p.len() as i64;
            for i in 0..len {
                let exps = p.get_term_exp(i, &ctx).unwrap();
                let expected: Vec<Integer> =
                    terms[i as usize].1.iter().map(|&e| Integer::from(e)).collect();
                prop_assert_eq!(exps, expected);
            }
            let over = p.get_term_exp(len + extra, &ctx).unwrap_err();
            let is_out_of_range = matches!(over, MpolyError::IndexOutOfRange { .. });
            prop_assert!(is_out_of_range);
            prop_assert_eq!(
                p.get_term_exp(-neg, &ctx),
                Err(MpolyError::IndexOutOfRange { index: -neg, length: p.len() })
            );
        }

        #[test]
        fn sort_makes_canonical((ctx, terms) in ctx_and_terms()) {
            let ring = Nmod::new(101);
            let mut p = build(&ctx, &terms);
            p.sort_terms(&ctx).unwrap();
            p.combine_like_terms(&ring, &ctx);
            prop_assert!(p.is_canonical(&ring, &ctx));
        }
    }
}
