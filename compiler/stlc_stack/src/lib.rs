//! Stack safety for deeply nested terms and values.
//!
//! Terms are trees, and both the evaluator and the DSL parser walk them
//! recursively. A `Nat` built from ten thousand `next` constructors is a
//! perfectly ordinary value, so every recursive step goes through
//! [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call.

/// Remaining stack below which we grow (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version, calls `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Peano {
        Zero,
        Next(Box<Peano>),
    }

    fn build(n: usize) -> Peano {
        let mut p = Peano::Zero;
        for _ in 0..n {
            p = Peano::Next(Box::new(p));
        }
        p
    }

    fn count(p: &Peano) -> usize {
        ensure_sufficient_stack(|| match p {
            Peano::Zero => 0,
            Peano::Next(inner) => count(inner) + 1,
        })
    }

    #[test]
    fn shallow_tree() {
        assert_eq!(count(&build(3)), 3);
    }

    #[test]
    fn deep_tree_does_not_overflow() {
        let deep = build(200_000);
        assert_eq!(count(&deep), 200_000);
        // Iterative drop so the test itself does not overflow.
        let mut cur = deep;
        while let Peano::Next(inner) = cur {
            cur = *inner;
        }
    }

    #[test]
    fn propagates_results() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
