// Helpers shared by the host, present and root crates
pub mod timing;
pub mod arena;
pub mod log;
pub mod logging;
pub mod region;

extern crate anyhow;
pub use anyhow::{anyhow, Context, Error, Result};

/// Larger of two PartialOrd values, `a` on ties
///
/// Works for the f32 analog values and extents alike.
pub fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    match a >= b {
        true => a,
        false => b,
    }
}

/// Smaller of two PartialOrd values, `a` on ties
pub fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    match a <= b {
        true => a,
        false => b,
    }
}

/// Clamp `val` into `[lo, hi]`.
///
/// Unlike `Ord::clamp` this does not panic when `lo > hi`, the lower
/// bound wins. Surface capabilities from some drivers report such ranges.
pub fn partial_clamp<T: PartialOrd>(val: T, lo: T, hi: T) -> T {
    partial_max(lo, partial_min(val, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_prefers_lower_bound() {
        assert_eq!(partial_clamp(5, 1, 3), 3);
        assert_eq!(partial_clamp(0, 1, 3), 1);
        assert_eq!(partial_clamp(2, 4, 3), 4);
        assert_eq!(partial_max(1.5, 0.5), 1.5);
    }
}
