use colorgame_feed::feed::{FeedError, HistoryFeed};
use colorgame_feed::history::History;
use colorgame_feed::models::Record;
use serde::Serialize;

use crate::classifier::{refine, DisplayLabel};
use crate::voting::{Prediction, Predictor};

/// Ce que la couche d'affichage consomme à chaque cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub prediction: Option<Prediction>,
    pub label: Option<DisplayLabel>,
    pub next_period: Option<u64>,
}

/// Prédiction émise pour une période encore inconnue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    period: u64,
    digit: u8,
}

/// Instantané affiché : historique courant + prédiction dérivée.
/// Chaque cycle réussi recalcule tout ; un échec conserve l'instantané précédent.
pub struct Session {
    history: History,
    predictor: Predictor,
    state: DisplayState,
    pending: Option<Pending>,
    /// Dernier verdict number/color/size, masqué pendant une erreur du flux
    last_refinement: Option<DisplayLabel>,
}

impl Session {
    pub fn new(predictor: Predictor, retention: usize) -> Self {
        Self {
            history: History::new(retention),
            predictor,
            state: DisplayState::default(),
            pending: None,
            last_refinement: None,
        }
    }

    /// Le flux renvoie toute la fenêtre : on remplace l'historique.
    pub fn apply_snapshot(&mut self, records: Vec<Record>) -> &DisplayState {
        self.history.replace(records);
        self.recompute();
        &self.state
    }

    /// Un cycle complet : récupération puis recalcul, ou conservation en cas d'échec.
    pub fn refresh(&mut self, feed: &dyn HistoryFeed) -> &DisplayState {
        match feed.fetch() {
            Ok(records) => self.apply_snapshot(records),
            Err(e) => self.apply_error(&e),
        }
    }

    /// Saisie manuelle d'un résultat. Retourne false si la période est déjà connue.
    pub fn push_record(&mut self, record: Record) -> bool {
        if !self.history.prepend(record) {
            return false;
        }
        self.recompute();
        true
    }

    pub fn apply_error(&mut self, err: &FeedError) -> &DisplayState {
        tracing::warn!(error = %err, "flux indisponible, on garde l'instantané précédent");
        self.state.label = Some(DisplayLabel::PredictionError);
        &self.state
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    fn recompute(&mut self) {
        let resolved = self.pending.and_then(|p| {
            self.history
                .records()
                .iter()
                .find(|r| r.period == p.period)
                .map(|actual| refine(p.digit, actual.number))
        });

        if resolved.is_some() {
            self.last_refinement = resolved;
        }

        let prediction = self.predictor.predict(self.history.records());
        let next_period = self.history.next_period();

        self.pending = match (&prediction, next_period) {
            (Some(p), Some(period)) => Some(Pending { period, digit: p.digit }),
            _ => None,
        };

        self.state = DisplayState {
            prediction,
            label: self.last_refinement,
            next_period,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::{make_test_history, Detector};
    use colorgame_feed::feed::StaticFeed;
    use colorgame_feed::history::DEFAULT_RETENTION;
    use colorgame_feed::models::Color;

    struct DownFeed;

    impl HistoryFeed for DownFeed {
        fn fetch(&self) -> Result<Vec<Record>, FeedError> {
            Err(FeedError::Decode { reason: "timeout".into() })
        }
    }

    struct Always(u8);

    impl Detector for Always {
        fn name(&self) -> &str {
            "Always"
        }
        fn detect(&self, history: &[Record]) -> Option<u8> {
            history.first().map(|_| self.0)
        }
        fn min_history(&self) -> usize {
            1
        }
    }

    fn session_always(digit: u8, min_history: usize) -> Session {
        let predictor = Predictor::new(vec![Box::new(Always(digit))]).with_min_history(min_history);
        Session::new(predictor, DEFAULT_RETENTION)
    }

    #[test]
    fn test_snapshot_sets_prediction_and_next_period() {
        let mut session = session_always(4, 1);
        let state = session.apply_snapshot(make_test_history(&[1, 2, 3]));
        assert_eq!(state.prediction.as_ref().map(|p| p.digit), Some(4));
        assert_eq!(state.next_period, Some(1004));
        assert_eq!(state.label, None);
    }

    #[test]
    fn test_insufficient_history_no_prediction() {
        let mut session = Session::new(Predictor::default(), DEFAULT_RETENTION);
        let state = session.apply_snapshot(make_test_history(&[1; 10]));
        assert_eq!(state.prediction, None);
        assert_eq!(state.next_period, Some(1011));
    }

    #[test]
    fn test_error_keeps_previous_snapshot() {
        let mut session = session_always(4, 1);
        session.apply_snapshot(make_test_history(&[1, 2, 3]));
        let before = session.state().prediction.clone();

        let err = FeedError::Status { status: 503 };
        let state = session.apply_error(&err);
        assert_eq!(state.prediction, before);
        assert_eq!(state.label, Some(DisplayLabel::PredictionError));
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn test_recovery_clears_error_label() {
        let mut session = session_always(4, 1);
        session.apply_snapshot(make_test_history(&[1, 2, 3]));
        session.apply_error(&FeedError::Status { status: 500 });
        let state = session.apply_snapshot(make_test_history(&[1, 2, 3]));
        assert_eq!(state.label, None);
    }

    #[test]
    fn test_label_refined_when_period_resolves() {
        let mut session = session_always(4, 1);
        session.apply_snapshot(vec![Record::new(10, 1)]);

        // période 11 tombe sur 6 : même couleur que 4
        let state = session.apply_snapshot(vec![Record::new(11, 6), Record::new(10, 1)]);
        assert_eq!(state.label, Some(DisplayLabel::Color(Color::Red)));

        // période 12 tombe sur 4 : chiffre exact
        let state = session.apply_snapshot(vec![
            Record::new(12, 4),
            Record::new(11, 6),
            Record::new(10, 1),
        ]);
        assert_eq!(state.label, Some(DisplayLabel::Number(4)));
    }

    #[test]
    fn test_recovery_restores_last_refinement() {
        let mut session = session_always(4, 1);
        session.apply_snapshot(vec![Record::new(10, 1)]);
        let resolved = vec![Record::new(11, 6), Record::new(10, 1)];
        session.apply_snapshot(resolved.clone());
        assert_eq!(session.state().label, Some(DisplayLabel::Color(Color::Red)));

        session.apply_error(&FeedError::Status { status: 502 });
        assert_eq!(session.state().label, Some(DisplayLabel::PredictionError));

        // même fenêtre au retour du flux : aucune nouvelle période résolue
        let state = session.apply_snapshot(resolved);
        assert_eq!(state.label, Some(DisplayLabel::Color(Color::Red)));
    }

    #[test]
    fn test_label_kept_on_identical_refresh() {
        let mut session = session_always(3, 1);
        session.apply_snapshot(vec![Record::new(10, 1)]);
        session.apply_snapshot(vec![Record::new(11, 8), Record::new(10, 1)]);
        let label = session.state().label;
        let state = session.apply_snapshot(vec![Record::new(11, 8), Record::new(10, 1)]);
        assert_eq!(state.label, label);
        assert_eq!(state.label.map(|l| l.to_string()), Some("Size: Small".to_string()));
    }

    #[test]
    fn test_refresh_from_feed() {
        let mut session = session_always(9, 1);
        let feed = StaticFeed::new(make_test_history(&[2, 2]));
        let state = session.refresh(&feed);
        assert_eq!(state.prediction.as_ref().map(|p| p.digit), Some(9));

        let state = session.refresh(&DownFeed);
        assert_eq!(state.prediction.as_ref().map(|p| p.digit), Some(9));
        assert_eq!(state.label, Some(DisplayLabel::PredictionError));
    }

    #[test]
    fn test_push_record_rejects_known_period() {
        let mut session = session_always(0, 1);
        assert!(session.push_record(Record::new(5, 2)));
        assert!(!session.push_record(Record::new(5, 3)));
        assert!(session.push_record(Record::new(6, 0)));
        assert_eq!(session.state().label, Some(DisplayLabel::Number(0)));
    }

    #[test]
    fn test_recompute_idempotent() {
        let mut session = Session::new(Predictor::default(), DEFAULT_RETENTION);
        let digits: Vec<u8> = (0..40).map(|i| ((i * 7 + 3) % 10) as u8).collect();
        let first = session.apply_snapshot(make_test_history(&digits)).clone();
        let second = session.apply_snapshot(make_test_history(&digits)).clone();
        assert_eq!(first.prediction, second.prediction);
        assert_eq!(first.next_period, second.next_period);
    }
}
