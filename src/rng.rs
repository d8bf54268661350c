//! Small entropy helpers over `getrandom` (browser crypto on wasm). Not for secrets.

use gloo::console;

/// Random bytes. If the platform source fails the error is logged and the
/// buffer stays zeroed; ids still carry their timestamp in that case.
pub fn bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    if let Err(err) = getrandom::getrandom(&mut buf) {
        console::error!(format!("random source unavailable: {err}"));
    }
    buf
}

pub fn next_u64() -> u64 {
    u64::from_le_bytes(bytes::<8>())
}

/// Uniform float in `[0, 1)`.
pub fn unit() -> f64 {
    let raw = u32::from_le_bytes(bytes::<4>());
    raw as f64 / (u32::MAX as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_stays_in_range() {
        for _ in 0..256 {
            let x = unit();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn words_are_not_constant() {
        let draws: std::collections::HashSet<u64> = (0..8).map(|_| next_u64()).collect();
        assert_eq!(draws.len(), 8);
    }
}
