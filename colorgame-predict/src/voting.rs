use colorgame_feed::models::{Color, Record, Size};
use serde::Serialize;

use crate::detectors::{detectors_for, Detector, Roster};
use crate::tally::first_max;

pub const DEFAULT_MIN_HISTORY: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub detector: String,
    pub digit: u8,
}

/// Multiset des réponses des détecteurs qui ne se sont pas abstenus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ballot {
    pub votes: Vec<Vote>,
}

impl Ballot {
    #[cfg(test)]
    pub fn from_digits(digits: &[u8]) -> Self {
        Self {
            votes: digits
                .iter()
                .map(|&digit| Vote { detector: String::new(), digit })
                .collect(),
        }
    }

    pub fn tally(&self) -> [u32; 10] {
        let mut counts = [0u32; 10];
        for v in &self.votes {
            if let Some(c) = counts.get_mut(v.digit as usize) {
                *c += 1;
            }
        }
        counts
    }

    /// Majorité relative, le plus petit chiffre à égalité. None si bulletin vide.
    pub fn winner(&self) -> Option<u8> {
        first_max(&self.tally())
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub digit: u8,
    pub color: Color,
    pub size: Size,
    pub ballot: Ballot,
}

pub struct Predictor {
    pub detectors: Vec<Box<dyn Detector>>,
    pub min_history: usize,
}

impl Predictor {
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self {
            detectors,
            min_history: DEFAULT_MIN_HISTORY,
        }
    }

    pub fn for_roster(roster: Roster, min_history: usize) -> Self {
        Self {
            detectors: detectors_for(roster),
            min_history,
        }
    }

    pub fn with_min_history(mut self, min_history: usize) -> Self {
        self.min_history = min_history;
        self
    }

    pub fn ballot(&self, history: &[Record]) -> Ballot {
        let votes = self
            .detectors
            .iter()
            .filter(|d| d.is_ready(history))
            .filter_map(|d| {
                d.detect(history).map(|digit| Vote {
                    detector: d.name().to_string(),
                    digit,
                })
            })
            .collect();
        Ballot { votes }
    }

    /// history[0] = résultat le plus récent. None tant que l'historique est
    /// trop court ou que tous les détecteurs s'abstiennent.
    pub fn predict(&self, history: &[Record]) -> Option<Prediction> {
        if history.len() < self.min_history {
            tracing::debug!(len = history.len(), min = self.min_history, "historique insuffisant");
            return None;
        }
        let ballot = self.ballot(history);
        let digit = ballot.winner()?;
        tracing::debug!(digit, votes = ballot.len(), "prédiction calculée");
        Some(Prediction {
            digit,
            color: Color::of(digit),
            size: Size::of(digit),
            ballot,
        })
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::for_roster(Roster::Full, DEFAULT_MIN_HISTORY)
    }
}
