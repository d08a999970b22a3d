use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Timelike, Utc};

use colorgame_feed::feed::HistoryFeed;
use colorgame_predict::session::Session;

use crate::config::WatchConfig;
use crate::display::{display_countdown, display_history, display_prediction};

/// Secondes restantes avant la fin de la minute en cours.
pub fn countdown_at(now: DateTime<FixedOffset>) -> u32 {
    59u32.saturating_sub(now.second())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Countdown,
    Forced,
}

/// Les deux cadences de rafraîchissement : fin de minute et intervalle fixe.
pub struct Timers {
    refresh: Duration,
    last_forced: Option<Instant>,
}

impl Timers {
    pub fn new(refresh: Duration) -> Self {
        Self {
            refresh,
            last_forced: None,
        }
    }

    pub fn due(&mut self, countdown: u32, now: Instant) -> Option<Trigger> {
        let forced = match self.last_forced {
            None => true,
            Some(t) => now.duration_since(t) >= self.refresh,
        };
        if forced {
            self.last_forced = Some(now);
            return Some(Trigger::Forced);
        }
        if countdown <= 1 {
            return Some(Trigger::Countdown);
        }
        None
    }
}

pub fn run_watch(
    feed: &dyn HistoryFeed,
    session: &mut Session,
    config: &WatchConfig,
    rows: usize,
    cycles: Option<u64>,
) -> Result<()> {
    let offset = config.offset()?;
    let mut timers = Timers::new(config.refresh_interval());
    let mut ticks = 0u64;

    tracing::info!(roster = %config.roster, refresh = config.refresh_secs, "surveillance démarrée");

    loop {
        let now = Utc::now().with_timezone(&offset);
        let countdown = countdown_at(now);

        if let Some(trigger) = timers.due(countdown, Instant::now()) {
            tracing::debug!(?trigger, countdown, "rafraîchissement");
            session.refresh(feed);
        }

        // effacer l'écran puis redessiner
        print!("\x1B[2J\x1B[H");
        println!("── Color Game · 1 minute ──\n");
        let state = session.state();
        display_countdown(state.next_period, countdown);
        display_prediction(state);
        println!();
        let records = session.history().records();
        display_history(&records[..records.len().min(rows)]);

        ticks += 1;
        if cycles.is_some_and(|max| ticks >= max) {
            break;
        }

        // aligné sur la prochaine seconde pleine
        let millis = 1000u64.saturating_sub(now.timestamp_subsec_millis() as u64).max(1);
        std::thread::sleep(Duration::from_millis(millis));
    }

    Ok(())
}
