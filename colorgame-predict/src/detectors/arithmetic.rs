use colorgame_feed::models::Record;
use super::Detector;

/// Suite arithmétique sur les `len` derniers chiffres : si tous les écarts
/// consécutifs valent k, prolonge la suite d'un pas, modulo 10.
pub struct ArithmeticSequence {
    len: usize,
}

impl ArithmeticSequence {
    pub fn new(len: usize) -> Self {
        Self { len: len.max(2) }
    }
}

impl Detector for ArithmeticSequence {
    fn name(&self) -> &str {
        "ArithmeticSequence"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        if history.len() < self.len {
            return None;
        }
        let digits: Vec<i32> = history[..self.len].iter().map(|r| r.number as i32).collect();

        // d0-d1, d1-d2, ... (ordre du plus récent au plus ancien)
        let k = digits[0] - digits[1];
        if digits.windows(2).any(|w| w[0] - w[1] != k) {
            return None;
        }
        Some((digits[0] - k).rem_euclid(10) as u8)
    }

    fn min_history(&self) -> usize {
        self.len
    }
}
