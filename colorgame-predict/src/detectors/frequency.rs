use colorgame_feed::models::Record;
use super::Detector;
use crate::tally::{digit_counts, first_max};

/// Chiffre le plus fréquent sur toute la fenêtre, le plus petit à égalité.
pub struct OverallFrequency;

impl OverallFrequency {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OverallFrequency {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for OverallFrequency {
    fn name(&self) -> &str {
        "OverallFrequency"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        first_max(&digit_counts(history))
    }

    fn min_history(&self) -> usize {
        1
    }
}

/// Premier chiffre (ordre croissant) absent des `k` derniers résultats.
pub struct MissingRecent {
    k: usize,
}

impl MissingRecent {
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }
}

impl Detector for MissingRecent {
    fn name(&self) -> &str {
        "MissingRecentDigit"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        if history.len() < self.k {
            return None;
        }
        let recent = &history[..self.k];
        (0..10u8).find(|d| recent.iter().all(|r| r.number != *d))
    }

    fn min_history(&self) -> usize {
        self.k
    }
}

/// Parité majoritaire sur la fenêtre (égalité -> impair), puis le chiffre
/// le plus fréquent de cette parité.
pub struct ParityMajority;

impl ParityMajority {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ParityMajority {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ParityMajority {
    fn name(&self) -> &str {
        "ParityMajority"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        if history.is_empty() {
            return None;
        }
        let counts = digit_counts(history);
        let even: u32 = counts.iter().step_by(2).sum();
        let odd: u32 = counts.iter().skip(1).step_by(2).sum();
        let parity = if even > odd { 0 } else { 1 };

        let mut masked = counts;
        for (d, c) in masked.iter_mut().enumerate() {
            if d % 2 != parity {
                *c = 0;
            }
        }
        first_max(&masked)
    }

    fn min_history(&self) -> usize {
        1
    }
}

/// Plus petit chiffre apparaissant exactement `count` fois dans les `window` derniers résultats.
pub struct ExactCount {
    window: usize,
    count: u32,
    name: String,
}

impl ExactCount {
    pub fn new(window: usize, count: u32) -> Self {
        let count = count.max(1);
        Self {
            window,
            count,
            name: format!("ExactCount{}In{}", count, window),
        }
    }
}

impl Detector for ExactCount {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        let window = self.window.min(history.len());
        let counts = digit_counts(&history[..window]);
        counts.iter().position(|&c| c == self.count).map(|d| d as u8)
    }

    fn min_history(&self) -> usize {
        self.count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::make_test_history;

    #[test]
    fn test_overall_frequency() {
        let h = make_test_history(&[4, 7, 7, 1, 4, 7]);
        assert_eq!(OverallFrequency::new().detect(&h), Some(7));
    }

    #[test]
    fn test_overall_frequency_tie_smallest() {
        let h = make_test_history(&[8, 3, 8, 3]);
        assert_eq!(OverallFrequency::new().detect(&h), Some(3));
    }

    #[test]
    fn test_missing_recent() {
        let h = make_test_history(&[0, 1, 3, 2]);
        assert_eq!(MissingRecent::new(3).detect(&h), Some(2));

        let h = make_test_history(&[5, 6, 7]);
        assert_eq!(MissingRecent::new(3).detect(&h), Some(0));
    }

    #[test]
    fn test_missing_recent_too_short() {
        let h = make_test_history(&[0, 1]);
        assert_eq!(MissingRecent::new(3).detect(&h), None);
    }

    #[test]
    fn test_parity_majority_even() {
        // pairs : 2,2,4,6 (4) vs impairs : 1,9 (2) -> pair, 2 le plus fréquent
        let h = make_test_history(&[2, 1, 2, 4, 9, 6]);
        assert_eq!(ParityMajority::new().detect(&h), Some(2));
    }

    #[test]
    fn test_parity_majority_odd_tie_smallest() {
        // impairs : 9,9,3,3,5 vs pairs : 0,8 -> impair, 3 et 9 à égalité -> 3
        let h = make_test_history(&[9, 0, 3, 9, 8, 3, 5]);
        assert_eq!(ParityMajority::new().detect(&h), Some(3));
    }

    #[test]
    fn test_parity_majority_tie_goes_odd() {
        let h = make_test_history(&[2, 7, 4, 7]);
        assert_eq!(ParityMajority::new().detect(&h), Some(7));
    }

    #[test]
    fn test_exact_triple() {
        // 5 apparaît 3 fois, 1 apparaît 4 fois
        let h = make_test_history(&[5, 1, 5, 1, 5, 1, 1, 8]);
        assert_eq!(ExactCount::new(20, 3).detect(&h), Some(5));
    }

    #[test]
    fn test_exact_triple_only_within_window() {
        let mut digits = vec![9u8; 20];
        digits[0] = 2;
        digits[1] = 2;
        digits.extend([2, 2, 2]);
        // dans les 20 derniers, 2 n'apparaît que 2 fois et 9 18 fois
        let h = make_test_history(&digits);
        assert_eq!(ExactCount::new(20, 3).detect(&h), None);
    }

    #[test]
    fn test_exact_count_name() {
        assert_eq!(ExactCount::new(20, 3).name(), "ExactCount3In20");
    }

    #[test]
    fn test_exact_triple_smallest() {
        let h = make_test_history(&[6, 4, 6, 4, 6, 4]);
        assert_eq!(ExactCount::new(20, 3).detect(&h), Some(4));
    }
}
