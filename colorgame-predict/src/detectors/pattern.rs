use colorgame_feed::models::{Record, Size};
use super::Detector;

/// Parités alternées sur 3 pas : prédit la parité opposée au dernier chiffre
/// (0 pour pair, 1 pour impair).
pub struct EvenOddSwitch;

impl EvenOddSwitch {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EvenOddSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for EvenOddSwitch {
    fn name(&self) -> &str {
        "EvenOddSwitch"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        if history.len() < 4 {
            return None;
        }
        let p: Vec<u8> = history[..4].iter().map(|r| r.number % 2).collect();
        if p[0] != p[1] && p[1] != p[2] {
            Some(if p[0] == 0 { 1 } else { 0 })
        } else {
            None
        }
    }

    fn min_history(&self) -> usize {
        4
    }
}

pub struct Repeat;

impl Repeat {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for Repeat {
    fn name(&self) -> &str {
        "Repeat"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        match history {
            [a, b, ..] if a.number == b.number => Some(a.number),
            _ => None,
        }
    }

    fn min_history(&self) -> usize {
        2
    }
}

/// Série de `k` Big -> 2, série de `k` Small -> 7.
pub struct BigSmallStreak {
    k: usize,
}

impl BigSmallStreak {
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }
}

impl Detector for BigSmallStreak {
    fn name(&self) -> &str {
        "BigSmallStreak"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        if history.len() < self.k {
            return None;
        }
        let recent = &history[..self.k];
        if recent.iter().all(|r| r.size() == Size::Big) {
            Some(2)
        } else if recent.iter().all(|r| r.size() == Size::Small) {
            Some(7)
        } else {
            None
        }
    }

    fn min_history(&self) -> usize {
        self.k
    }
}

/// 0 -> 5, 5 -> 0.
pub struct SpecialWrap;

impl SpecialWrap {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpecialWrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SpecialWrap {
    fn name(&self) -> &str {
        "SpecialWrap"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        match history.first()?.number {
            0 => Some(5),
            5 => Some(0),
            _ => None,
        }
    }

    fn min_history(&self) -> usize {
        1
    }
}

/// Pic ou creux sur les 3 derniers chiffres : répète le plus récent.
pub struct ZigZag;

impl ZigZag {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZigZag {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ZigZag {
    fn name(&self) -> &str {
        "ZigZag"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        let [a, b, c] = match history {
            [a, b, c, ..] => [a.number, b.number, c.number],
            _ => return None,
        };
        if (a > b && b < c) || (a < b && b > c) {
            Some(a)
        } else {
            None
        }
    }

    fn min_history(&self) -> usize {
        3
    }
}
