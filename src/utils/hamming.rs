/// Number of set bits in `x`
pub fn hamming_weight(x: u64) -> u32 {
    x.count_ones()
}

/// Evenly split over uniformly random input: true when the popcount is even
pub fn has_even_hamming_weight(x: u64) -> bool {
    hamming_weight(x) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_weight() {
        assert_eq!(hamming_weight(0), 0);
        assert_eq!(hamming_weight(0b1011), 3);
        assert_eq!(hamming_weight(u64::MAX), 64);
    }

    #[test]
    fn test_even_weight() {
        assert!(has_even_hamming_weight(0));
        assert!(has_even_hamming_weight(0b11));
        assert!(!has_even_hamming_weight(0b111));
    }
}
