use colorgame_feed::models::{Color, Record, Size};
use serde::{Deserialize, Serialize};

use crate::voting::Predictor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorScore {
    pub name: String,
    pub votes: usize,
    pub hits: usize,
}

impl DetectorScore {
    pub fn hit_rate(&self) -> f64 {
        if self.votes == 0 {
            0.0
        } else {
            self.hits as f64 / self.votes as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub min_history: usize,
    pub n_tests: usize,
    pub abstentions: usize,
    pub number_hits: usize,
    pub color_hits: usize,
    pub size_hits: usize,
    pub detectors: Vec<DetectorScore>,
}

impl BacktestReport {
    pub fn predictions(&self) -> usize {
        self.n_tests - self.abstentions
    }

    pub fn rate(&self, hits: usize) -> f64 {
        let n = self.predictions();
        if n == 0 {
            0.0
        } else {
            hits as f64 / n as f64
        }
    }
}

/// Walk-forward : pour chaque résultat t, on prédit à partir de history[t+1..]
/// (strictement plus ancien) et on compare à history[t].
///
/// history[0] = le plus récent. Les points de test sans assez d'historique
/// derrière eux sont ignorés.
pub fn walk_forward(predictor: &Predictor, history: &[Record]) -> BacktestReport {
    let max_t = history.len().saturating_sub(predictor.min_history.max(1));

    let mut detectors: Vec<DetectorScore> = predictor
        .detectors
        .iter()
        .map(|d| DetectorScore {
            name: d.name().to_string(),
            votes: 0,
            hits: 0,
        })
        .collect();

    let mut report = BacktestReport {
        min_history: predictor.min_history,
        n_tests: 0,
        abstentions: 0,
        number_hits: 0,
        color_hits: 0,
        size_hits: 0,
        detectors: Vec::new(),
    };

    for t in 0..max_t {
        let past = &history[t + 1..];
        let actual = history[t].number;
        report.n_tests += 1;

        for (score, detector) in detectors.iter_mut().zip(&predictor.detectors) {
            if !detector.is_ready(past) {
                continue;
            }
            if let Some(d) = detector.detect(past) {
                score.votes += 1;
                if d == actual {
                    score.hits += 1;
                }
            }
        }

        let Some(pred) = predictor.predict(past) else {
            report.abstentions += 1;
            continue;
        };
        if pred.digit == actual {
            report.number_hits += 1;
        }
        if pred.color == Color::of(actual) {
            report.color_hits += 1;
        }
        if pred.size == Size::of(actual) {
            report.size_hits += 1;
        }
    }

    tracing::debug!(tests = report.n_tests, hits = report.number_hits, "backtest terminé");
    report.detectors = detectors;
    report
}

/// Taux de réussite d'un détecteur entre deux rapports.
#[derive(Debug, Clone, PartialEq)]
pub struct RateDelta {
    pub name: String,
    /// None si le détecteur n'existait pas dans le rapport précédent
    pub previous: Option<f64>,
    pub current: f64,
}

impl RateDelta {
    pub fn change(&self) -> Option<f64> {
        self.previous.map(|p| self.current - p)
    }
}

/// Rapproche les détecteurs par nom, dans l'ordre du rapport courant.
pub fn compare_reports(previous: &BacktestReport, current: &BacktestReport) -> Vec<RateDelta> {
    current
        .detectors
        .iter()
        .map(|score| RateDelta {
            name: score.name.clone(),
            previous: previous
                .detectors
                .iter()
                .find(|p| p.name == score.name)
                .map(DetectorScore::hit_rate),
            current: score.hit_rate(),
        })
        .collect()
}

pub fn save_report(report: &BacktestReport, path: &std::path::Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_report(path: &std::path::Path) -> anyhow::Result<BacktestReport> {
    let json = std::fs::read_to_string(path)?;
    let report: BacktestReport = serde_json::from_str(&json)?;
    Ok(report)
}
