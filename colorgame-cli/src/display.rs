use comfy_table::{Attribute, Table, ContentArrangement, presets::UTF8_FULL, Cell, Color as CellColor};

use colorgame_feed::models::{is_special, Color, Record};
use colorgame_predict::backtest::{BacktestReport, RateDelta};
use colorgame_predict::session::DisplayState;
use colorgame_predict::voting::Prediction;

pub fn color_marker(digit: u8) -> &'static str {
    match digit {
        0 => "🔴🟣",
        5 => "🟢🟣",
        d if d % 2 == 0 => "🔴",
        _ => "🟢",
    }
}

fn cell_color(color: Color) -> CellColor {
    match color {
        Color::Red => CellColor::Red,
        Color::Green => CellColor::Green,
    }
}

/// Le chiffre garde sa couleur ; 0 et 5 passent en gras, le violet est porté par le marqueur.
fn number_style(digit: u8) -> (CellColor, Option<Attribute>) {
    let bold = is_special(digit).then_some(Attribute::Bold);
    (cell_color(Color::of(digit)), bold)
}

fn number_cell(digit: u8) -> Cell {
    let (color, attribute) = number_style(digit);
    let cell = Cell::new(digit).fg(color);
    match attribute {
        Some(a) => cell.add_attribute(a),
        None => cell,
    }
}

pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn display_history(records: &[Record]) {
    if records.is_empty() {
        println!("Aucun résultat à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Période", "Chiffre", "Couleur", "Taille"]);

    for r in records {
        table.add_row(vec![
            Cell::new(format!("{:03}", r.period)),
            number_cell(r.number),
            Cell::new(color_marker(r.number)),
            Cell::new(r.size().to_string()),
        ]);
    }

    println!("{table}");
}

pub fn display_countdown(next_period: Option<u64>, countdown: u32) {
    let next = next_period
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("Prochaine période : {}    Compte à rebours : {}", next, format_countdown(countdown));
}

pub fn display_prediction(state: &DisplayState) {
    match &state.prediction {
        Some(pred) => {
            println!(
                "\n🎯 Prédiction : {}  {}  Join: {}  ({})",
                pred.digit,
                color_marker(pred.digit),
                pred.color.to_string().to_uppercase(),
                pred.size
            );
        }
        None => println!("\n🎯 Prédiction : Calcul en cours..."),
    }
    if let Some(label) = &state.label {
        println!("   Dernier résultat : {label}");
    }
}

pub fn display_ballot(prediction: &Prediction) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Détecteur", "Vote"]);

    for vote in &prediction.ballot.votes {
        let mut cell = Cell::new(vote.digit);
        if vote.digit == prediction.digit {
            cell = cell.fg(CellColor::Yellow);
        }
        table.add_row(vec![Cell::new(&vote.detector), cell]);
    }
    println!("{table}");

    let tally = prediction.ballot.tally();
    let summary = tally
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0)
        .map(|(d, c)| format!("{d}×{c}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("Décompte : {summary}");
}

pub fn display_backtest(report: &BacktestReport) {
    println!("\n== Backtest walk-forward ({} tests, min {} résultats) ==\n", report.n_tests, report.min_history);

    if report.n_tests == 0 {
        println!("  (Historique trop court pour évaluer)");
        return;
    }

    println!("  Prédictions émises : {}  (abstentions : {})", report.predictions(), report.abstentions);
    println!("  Chiffre exact      : {:.1} %  (hasard : 10 %)", 100.0 * report.rate(report.number_hits));
    println!("  Couleur            : {:.1} %  (hasard : 50 %)", 100.0 * report.rate(report.color_hits));
    println!("  Taille             : {:.1} %  (hasard : 50 %)\n", 100.0 * report.rate(report.size_hits));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Détecteur", "Votes", "Justes", "Taux"]);

    let mut sorted = report.detectors.clone();
    sorted.sort_by(|a, b| b.hit_rate().partial_cmp(&a.hit_rate()).unwrap_or(std::cmp::Ordering::Equal));

    for score in &sorted {
        let rate = score.hit_rate();
        let color = if score.votes == 0 {
            CellColor::DarkGrey
        } else if rate > 0.1 {
            CellColor::Green
        } else {
            CellColor::White
        };
        table.add_row(vec![
            Cell::new(&score.name),
            Cell::new(score.votes),
            Cell::new(score.hits),
            Cell::new(format!("{:.1} %", 100.0 * rate)).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_comparison(previous: &BacktestReport, current: &BacktestReport, deltas: &[RateDelta]) {
    println!("\n== Comparaison avec le rapport précédent ==\n");
    println!(
        "  Chiffre exact : {:.1} % -> {:.1} %",
        100.0 * previous.rate(previous.number_hits),
        100.0 * current.rate(current.number_hits)
    );
    println!(
        "  Couleur       : {:.1} % -> {:.1} %\n",
        100.0 * previous.rate(previous.color_hits),
        100.0 * current.rate(current.color_hits)
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Détecteur", "Avant", "Maintenant", "Écart"]);

    for delta in deltas {
        let before = delta
            .previous
            .map(|r| format!("{:.1} %", 100.0 * r))
            .unwrap_or_else(|| "-".to_string());
        let change = match delta.change() {
            Some(c) => {
                let color = if c > 0.0 {
                    CellColor::Green
                } else if c < 0.0 {
                    CellColor::Red
                } else {
                    CellColor::White
                };
                Cell::new(format!("{:+.1}", 100.0 * c)).fg(color)
            }
            None => Cell::new("nouveau").fg(CellColor::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(&delta.name),
            Cell::new(before),
            Cell::new(format!("{:.1} %", 100.0 * delta.current)),
            change,
        ]);
    }
    println!("{table}");
}
