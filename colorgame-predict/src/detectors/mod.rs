pub mod arithmetic;
pub mod frequency;
pub mod markov;
pub mod pattern;
pub mod transform;

use colorgame_feed::models::Record;
use serde::{Deserialize, Serialize};

pub trait Detector: Send + Sync {
    fn name(&self) -> &str;
    /// history[0] = résultat le plus récent. None = abstention.
    fn detect(&self, history: &[Record]) -> Option<u8>;
    /// En dessous de ce nombre de résultats, le détecteur s'abstient toujours.
    fn min_history(&self) -> usize;

    fn is_ready(&self, history: &[Record]) -> bool {
        history.len() >= self.min_history()
    }
}

/// Jeux de détecteurs disponibles. Tous passent par le même vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Roster {
    /// Les 16 détecteurs
    #[default]
    Full,
    /// Les 12 règles du module utilitaire
    Utils,
    /// Séquence, transitions et fréquence globale
    Table,
}

impl std::fmt::Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Roster::Full => write!(f, "full"),
            Roster::Utils => write!(f, "utils"),
            Roster::Table => write!(f, "table"),
        }
    }
}

pub fn all_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(arithmetic::ArithmeticSequence::new(4)),
        Box::new(markov::TransitionFrequency::new()),
        Box::new(frequency::OverallFrequency::new()),
        Box::new(frequency::MissingRecent::new(3)),
        Box::new(transform::Complement::new()),
        Box::new(transform::ShiftBy::new(2)),
        Box::new(frequency::ParityMajority::new()),
        Box::new(transform::PreviousDigit::new()),
        Box::new(transform::RecentAverage::new(5)),
        Box::new(frequency::ExactCount::new(20, 3)),
        Box::new(pattern::EvenOddSwitch::new()),
        Box::new(pattern::Repeat::new()),
        Box::new(pattern::BigSmallStreak::new(3)),
        Box::new(pattern::SpecialWrap::new()),
        Box::new(pattern::ZigZag::new()),
        Box::new(transform::IndexModulo::new()),
    ]
}

pub fn detectors_for(roster: Roster) -> Vec<Box<dyn Detector>> {
    match roster {
        Roster::Full => all_detectors(),
        Roster::Utils => vec![
            Box::new(arithmetic::ArithmeticSequence::new(4)),
            Box::new(pattern::EvenOddSwitch::new()),
            Box::new(pattern::Repeat::new()),
            Box::new(markov::TransitionFrequency::new()),
            Box::new(frequency::OverallFrequency::new()),
            Box::new(pattern::BigSmallStreak::new(3)),
            Box::new(pattern::SpecialWrap::new()),
            Box::new(pattern::ZigZag::new()),
            Box::new(transform::Complement::new()),
            Box::new(transform::RecentAverage::new(5)),
            Box::new(frequency::ParityMajority::new()),
            Box::new(transform::IndexModulo::new()),
        ],
        Roster::Table => vec![
            Box::new(arithmetic::ArithmeticSequence::new(4)),
            Box::new(markov::TransitionFrequency::new()),
            Box::new(frequency::OverallFrequency::new()),
        ],
    }
}

/// Historique de test : digits[0] est le plus récent, périodes décroissantes.
pub fn make_test_history(digits: &[u8]) -> Vec<Record> {
    let top = 1000 + digits.len() as u64;
    digits
        .iter()
        .enumerate()
        .map(|(i, &d)| Record::new(top - i as u64, d))
        .collect()
}
