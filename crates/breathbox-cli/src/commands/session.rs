use std::sync::Arc;

use breathbox_core::{
    AccountabilityClient, AudioPlayer, Event, NullObserver, Person, SessionConfig, SessionEngine,
    SessionObserver, SettingsStore,
};
use chrono::{Local, Timelike};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Run a full breathing session in the foreground
    Start {
        /// Inhale duration in seconds
        #[arg(long)]
        inhale: Option<i64>,
        /// Hold duration in seconds (0 skips the hold)
        #[arg(long)]
        hold: Option<i64>,
        /// Exhale duration in seconds
        #[arg(long)]
        exhale: Option<i64>,
        /// Number of cycles
        #[arg(long)]
        cycles: Option<i64>,
        /// Disable audio cues for this run
        #[arg(long)]
        silent: bool,
        /// Record an accountability completion for this person afterwards
        #[arg(long)]
        person: Option<String>,
        /// Accountability server to record against
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Print the current engine state as JSON
    Status,
}

/// Prints session progress as it happens.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_event(&self, event: &Event) {
        match event {
            Event::SessionStarted { total_cycles, .. } => {
                println!("starting: {total_cycles} cycles");
            }
            Event::CycleStarted { cycle, total_cycles, .. } => {
                println!("cycle {cycle}/{total_cycles}");
            }
            Event::PhaseStarted { phase, duration_secs, .. } => {
                println!("  {phase} {duration_secs}s");
            }
            Event::SessionCompleted { cycles_completed, .. } => {
                println!("done: {cycles_completed} cycles completed");
            }
            Event::SessionStopped { .. } => {
                println!("stopped");
            }
            Event::StateSnapshot { .. } => {}
        }
    }
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open()?;

    match action {
        SessionAction::Start { inhale, hold, exhale, cycles, silent, person, server } => {
            let person: Option<Person> = person.as_deref().map(str::parse).transpose()?;
            let mut config = store.load();
            apply_overrides(&mut config, inhale, hold, exhale, cycles, silent);
            let config = config.clamped();
            println!(
                "{} cycles of {}s, about {}s total",
                config.total_cycles,
                config.cycle_secs(),
                config.session_secs()
            );

            // Flag overrides are for this run only; they are not saved.
            let engine = SessionEngine::with_config(
                config,
                AudioPlayer::silent(),
                Arc::new(ConsoleObserver),
            );

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                engine.start();
                let completed = tokio::select! {
                    _ = engine.wait_until_idle() => true,
                    _ = tokio::signal::ctrl_c() => {
                        engine.stop();
                        false
                    }
                };
                // Only a fully run session counts for the tracker.
                if completed {
                    if let Some(person) = person {
                        record_completion(&server, person).await;
                    }
                }
            });
        }
        SessionAction::Status => {
            let engine = SessionEngine::with_config(
                store.load(),
                AudioPlayer::silent(),
                Arc::new(NullObserver),
            );
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }
    Ok(())
}

/// Report the finished session to the accountability server. Failures are
/// reported but never fail the session itself.
async fn record_completion(server: &str, person: Person) {
    let client = AccountabilityClient::new(server);
    match client.record_completion(person, Local::now().hour()).await {
        Ok(ack) => println!("{person} marked for {}", ack.time_period),
        Err(e) => eprintln!("could not record completion: {e}"),
    }
}

fn apply_overrides(
    config: &mut SessionConfig,
    inhale: Option<i64>,
    hold: Option<i64>,
    exhale: Option<i64>,
    cycles: Option<i64>,
    silent: bool,
) {
    if let Some(v) = inhale {
        config.inhale_secs = v;
    }
    if let Some(v) = hold {
        config.hold_secs = v;
    }
    if let Some(v) = exhale {
        config.exhale_secs = v;
    }
    if let Some(v) = cycles {
        config.total_cycles = v;
    }
    if silent {
        config.audio_enabled = false;
    }
}
