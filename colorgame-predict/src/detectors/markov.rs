use colorgame_feed::models::Record;
use super::Detector;

/// Table de transitions chiffre -> chiffre suivant dans l'ordre stocké
/// (history[i] -> history[i+1]), puis successeur le plus fréquent du dernier chiffre.
pub struct TransitionFrequency;

impl TransitionFrequency {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TransitionFrequency {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for TransitionFrequency {
    fn name(&self) -> &str {
        "TransitionFrequency"
    }

    fn detect(&self, history: &[Record]) -> Option<u8> {
        if history.len() < 2 {
            return None;
        }

        // successors[d] = chiffres observés juste après d, dans l'ordre de rencontre
        let mut successors: Vec<Vec<u8>> = vec![Vec::new(); 10];
        for pair in history.windows(2) {
            let (curr, next) = (pair[0].number as usize, pair[1].number);
            if curr < successors.len() {
                successors[curr].push(next);
            }
        }

        let last = history[0].number as usize;
        let nexts = successors.get(last)?;

        // Comptage en ordre d'insertion : à égalité, le premier rencontré gagne
        let mut tally: Vec<(u8, u32)> = Vec::new();
        for &n in nexts {
            match tally.iter_mut().find(|(d, _)| *d == n) {
                Some((_, c)) => *c += 1,
                None => tally.push((n, 1)),
            }
        }

        let mut best: Option<(u8, u32)> = None;
        for &(d, c) in &tally {
            match best {
                Some((_, b)) if c <= b => {}
                _ => best = Some((d, c)),
            }
        }
        best.map(|(d, _)| d)
    }

    fn min_history(&self) -> usize {
        2
    }
}
