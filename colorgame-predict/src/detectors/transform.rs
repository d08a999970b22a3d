use colorgame_feed::models::Record;
use super::Detector;

/// 9 - dernier chiffre.
pub struct Complement;

impl Complement {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Complement {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for Complement {
    fn name(&self) -> &str {
        "Complement"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        history.first().map(|r| 9 - r.number.min(9))
    }

    fn min_history(&self) -> usize {
        1
    }
}

/// (dernier chiffre + offset) mod 10.
pub struct ShiftBy {
    offset: u8,
    name: String,
}

impl ShiftBy {
    pub fn new(offset: u8) -> Self {
        let offset = offset % 10;
        Self {
            offset,
            name: format!("ShiftBy{}", offset),
        }
    }
}

impl Detector for ShiftBy {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        history.first().map(|r| (r.number + self.offset) % 10)
    }

    fn min_history(&self) -> usize {
        1
    }
}

/// L'avant-dernier chiffre.
pub struct PreviousDigit;

impl PreviousDigit {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PreviousDigit {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PreviousDigit {
    fn name(&self) -> &str {
        "PreviousDigit"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        history.get(1).map(|r| r.number)
    }

    fn min_history(&self) -> usize {
        2
    }
}

/// Moyenne arrondie (demi vers le haut) des `k` derniers chiffres, mod 10.
pub struct RecentAverage {
    k: usize,
}

impl RecentAverage {
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }
}

impl Detector for RecentAverage {
    fn name(&self) -> &str {
        "RecentAverage"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        if history.len() < self.k {
            return None;
        }
        let sum: usize = history[..self.k].iter().map(|r| r.number as usize).sum();
        // round(sum / k) en entiers : floor((2·sum + k) / 2k)
        let rounded = (2 * sum + self.k) / (2 * self.k);
        Some((rounded % 10) as u8)
    }

    fn min_history(&self) -> usize {
        self.k
    }
}

/// Dérivé de la période, pas du chiffre : période la plus récente mod 10.
pub struct IndexModulo;

impl IndexModulo {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IndexModulo {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for IndexModulo {
    fn name(&self) -> &str {
        "IndexModulo"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        history.first().map(|r| (r.period % 10) as u8)
    }

    fn min_history(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::make_test_history;

    #[test]
    fn test_complement() {
        assert_eq!(Complement::new().detect(&make_test_history(&[2, 8])), Some(7));
        assert_eq!(Complement::new().detect(&make_test_history(&[9])), Some(0));
    }

    #[test]
    fn test_shift_by_two_wraps() {
        let d = ShiftBy::new(2);
        assert_eq!(d.name(), "ShiftBy2");
        assert_eq!(d.detect(&make_test_history(&[3])), Some(5));
        assert_eq!(d.detect(&make_test_history(&[8])), Some(0));
        assert_eq!(d.detect(&make_test_history(&[9])), Some(1));
    }

    #[test]
    fn test_previous_digit() {
        assert_eq!(PreviousDigit::new().detect(&make_test_history(&[1, 6, 3])), Some(6));
        assert_eq!(PreviousDigit::new().detect(&make_test_history(&[1])), None);
    }

    #[test]
    fn test_recent_average() {
        // (1+2+3+4+5)/5 = 3
        assert_eq!(RecentAverage::new(5).detect(&make_test_history(&[1, 2, 3, 4, 5, 9])), Some(3));
        // 22/5 = 4.4 -> 4
        assert_eq!(RecentAverage::new(5).detect(&make_test_history(&[9, 9, 2, 2, 0])), Some(4));
        // 23/5 = 4.6 -> 5
        assert_eq!(RecentAverage::new(5).detect(&make_test_history(&[9, 9, 2, 2, 1])), Some(5));
    }

    #[test]
    fn test_recent_average_half_rounds_up() {
        // k = 2 : (3+4)/2 = 3.5 -> 4
        assert_eq!(RecentAverage::new(2).detect(&make_test_history(&[3, 4])), Some(4));
    }

    #[test]
    fn test_recent_average_too_short() {
        assert_eq!(RecentAverage::new(5).detect(&make_test_history(&[1, 2, 3, 4])), None);
    }

    #[test]
    fn test_index_modulo_uses_period() {
        let history = vec![Record::new(20250117, 4), Record::new(20250116, 9)];
        assert_eq!(IndexModulo::new().detect(&history), Some(7));
    }
}
