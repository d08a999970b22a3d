use std::io::{self, Write};

use anyhow::{Context, Result};

use colorgame_feed::models::Record;
use colorgame_predict::session::Session;

use crate::display::{color_marker, display_history, display_prediction};

/// La saisie commence 50 périodes avant la période en cours.
const BACKFILL: u64 = 50;

#[derive(Debug, PartialEq)]
enum Entry {
    Digit(u8),
    Show,
    Quit,
}

fn parse_entry(input: &str) -> Option<Entry> {
    match input.trim().to_lowercase().as_str() {
        "q" | "quit" | "quitter" | "exit" => Some(Entry::Quit),
        "t" | "table" | "historique" => Some(Entry::Show),
        s => match s.parse::<u8>() {
            Ok(n) if n <= 9 => Some(Entry::Digit(n)),
            _ => None,
        },
    }
}

pub fn start_period(current: u64) -> u64 {
    current.saturating_sub(BACKFILL)
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let n = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if n == 0 {
        anyhow::bail!("Fin de l'entrée");
    }
    Ok(input.trim().to_string())
}

fn prompt_period() -> Result<u64> {
    loop {
        let input = prompt("Période en cours (ex: 20250117100) : ")?;
        match input.parse::<u64>() {
            Ok(p) => return Ok(p),
            Err(_) => println!("Période invalide. Réessayez."),
        }
    }
}

pub fn run_manual(session: &mut Session) -> Result<()> {
    println!("Saisie manuelle des résultats\n");

    let current = prompt_period()?;
    let mut period = start_period(current);
    println!(
        "Commencez par le résultat de la période {:03} (q pour quitter, t pour le tableau).",
        period
    );

    loop {
        let input = match prompt(&format!("[{:03}] chiffre (0-9) : ", period)) {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };
        if input.is_empty() {
            continue;
        }

        match parse_entry(&input) {
            Some(Entry::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(Entry::Show) => display_history(session.history().records()),
            Some(Entry::Digit(n)) => {
                let record = Record::new(period, n);
                if !session.push_record(record) {
                    println!("Période {:03} déjà saisie.", period);
                    continue;
                }
                println!(
                    "  {:03}  {}  {}  {}",
                    record.period,
                    n,
                    color_marker(n),
                    record.size()
                );
                period += 1;
                display_prediction(session.state());
            }
            None => println!("Entrée invalide : '{}'. Tapez un chiffre de 0 à 9.", input),
        }
    }

    Ok(())
}
