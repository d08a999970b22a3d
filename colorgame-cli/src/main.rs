mod config;
mod display;
mod manual;
mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use colorgame_feed::feed::{HistoryFeed, HttpFeed};
use colorgame_predict::backtest::{compare_reports, load_report, save_report, walk_forward};
use colorgame_predict::detectors::Roster;
use colorgame_predict::session::Session;
use colorgame_predict::voting::Predictor;

use crate::config::{load_config, save_config, WatchConfig};
use crate::display::{
    display_backtest, display_ballot, display_comparison, display_history, display_prediction,
};

#[derive(Parser)]
#[command(name = "colorgame", about = "Prédicteur du Color Game 1 minute")]
struct Cli {
    /// Fichier de configuration JSON
    #[arg(short, long, global = true, default_value = "colorgame.json")]
    config: PathBuf,

    /// URL du flux de résultats
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Ensemble de détecteurs
    #[arg(short, long, global = true)]
    roster: Option<Roster>,

    /// Nombre minimal de résultats avant de prédire
    #[arg(long, global = true)]
    min_history: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Afficher les derniers résultats
    History {
        /// Nombre de résultats à afficher
        #[arg(short, long, default_value = "20")]
        last: usize,
    },

    /// Prédire le prochain chiffre
    Predict,

    /// Surveiller le jeu en continu
    Watch {
        /// Lignes d'historique affichées
        #[arg(long, default_value = "20")]
        rows: usize,

        /// Arrêter après N rafraîchissements d'écran
        #[arg(long)]
        cycles: Option<u64>,
    },

    /// Évaluer les détecteurs sur l'historique récupéré
    Backtest {
        /// Sauvegarder le rapport en JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comparer à un rapport JSON sauvegardé
        #[arg(long)]
        compare: Option<PathBuf>,
    },

    /// Saisir les résultats à la main
    Manual,

    /// Afficher la configuration effective
    Config {
        /// Écrire la configuration effective dans le fichier
        #[arg(long)]
        save: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("COLORGAME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn effective_config(cli: &Cli) -> Result<WatchConfig> {
    let mut config = load_config(&cli.config)?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(roster) = cli.roster {
        config.roster = roster;
    }
    if let Some(min_history) = cli.min_history {
        config.min_history = min_history;
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    match cli.command {
        Command::History { last } => cmd_history(&config, last),
        Command::Predict => cmd_predict(&config),
        Command::Watch { rows, cycles } => cmd_watch(&config, rows, cycles),
        Command::Backtest { output, compare } => {
            cmd_backtest(&config, output.as_deref(), compare.as_deref())
        }
        Command::Manual => cmd_manual(&config),
        Command::Config { save } => cmd_config(&config, &cli.config, save),
    }
}

fn open_feed(config: &WatchConfig) -> Result<HttpFeed> {
    HttpFeed::new(&config.endpoint, config.timeout())
        .with_context(|| format!("Impossible de préparer le client HTTP pour {}", config.endpoint))
}

fn new_session(config: &WatchConfig) -> Session {
    Session::new(
        Predictor::for_roster(config.roster, config.min_history),
        config.retention,
    )
}

fn fetch_session(config: &WatchConfig) -> Result<Session> {
    let feed = open_feed(config)?;
    let records = feed
        .fetch()
        .with_context(|| format!("Échec de la récupération depuis {}", feed.url()))?;
    let mut session = new_session(config);
    session.apply_snapshot(records);
    Ok(session)
}

fn cmd_history(config: &WatchConfig, last: usize) -> Result<()> {
    let session = fetch_session(config)?;
    let records = session.history().records();
    println!("{} résultat(s) récupéré(s)\n", records.len());
    display_history(&records[..records.len().min(last)]);
    Ok(())
}

fn cmd_predict(config: &WatchConfig) -> Result<()> {
    let session = fetch_session(config)?;
    let history = session.history();
    let state = session.state();

    match &state.prediction {
        Some(prediction) => {
            println!("Ensemble : {}  ({} détecteurs)\n", config.roster, session.predictor().detectors.len());
            display_ballot(prediction);
        }
        None => println!(
            "Historique insuffisant : {} résultat(s), minimum {}.",
            history.len(),
            session.predictor().min_history
        ),
    }
    if let Some(next) = state.next_period {
        println!("\nProchaine période : {}", next);
    }
    display_prediction(state);
    Ok(())
}

fn cmd_watch(config: &WatchConfig, rows: usize, cycles: Option<u64>) -> Result<()> {
    let feed = open_feed(config)?;
    let mut session = new_session(config);
    watch::run_watch(&feed, &mut session, config, rows, cycles)
}

fn cmd_backtest(config: &WatchConfig, output: Option<&Path>, compare: Option<&Path>) -> Result<()> {
    // lu avant la récupération : un chemin invalide échoue tout de suite
    let previous = compare
        .map(|path| {
            load_report(path).with_context(|| format!("Impossible de charger le rapport {}", path.display()))
        })
        .transpose()?;

    let session = fetch_session(config)?;
    let report = walk_forward(session.predictor(), session.history().records());
    display_backtest(&report);

    if let Some(previous) = &previous {
        display_comparison(previous, &report, &compare_reports(previous, &report));
    }

    if let Some(path) = output {
        save_report(&report, path)?;
        println!("\nRapport sauvegardé dans {}", path.display());
    }
    Ok(())
}

fn cmd_manual(config: &WatchConfig) -> Result<()> {
    let mut session = new_session(config);
    manual::run_manual(&mut session)
}

fn cmd_config(config: &WatchConfig, path: &Path, save: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if save {
        save_config(config, path)?;
        println!("\nConfiguration écrite dans {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "colorgame",
            "--config",
            "/nonexistent/colorgame.json",
            "--roster",
            "table",
            "--min-history",
            "5",
            "predict",
        ]);
        let config = effective_config(&cli).unwrap();
        assert_eq!(config.roster, Roster::Table);
        assert_eq!(config.min_history, 5);
        assert_eq!(config.retention, 100);
    }

    #[test]
    fn test_backtest_compare_flag() {
        let cli = Cli::parse_from(["colorgame", "backtest", "--compare", "avant.json", "-o", "apres.json"]);
        match cli.command {
            Command::Backtest { output, compare } => {
                assert_eq!(compare, Some(PathBuf::from("avant.json")));
                assert_eq!(output, Some(PathBuf::from("apres.json")));
            }
            _ => panic!("sous-commande inattendue"),
        }
    }

    #[test]
    fn test_backtest_compare_missing_report() {
        let config = WatchConfig::default();
        let err = cmd_backtest(&config, None, Some(Path::new("/nonexistent/rapport.json"))).unwrap_err();
        assert!(err.to_string().contains("Impossible de charger le rapport"));
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli = Cli::parse_from([
            "colorgame",
            "watch",
            "--cycles",
            "1",
            "--endpoint",
            "http://localhost:1/feed",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:1/feed"));
        assert!(matches!(cli.command, Command::Watch { rows: 20, cycles: Some(1) }));
    }
}
