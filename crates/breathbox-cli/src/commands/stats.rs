use breathbox_core::{AccountabilityClient, DayPeriod, Ledger, LedgerStore, Person};
use chrono::{Local, Timelike};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show today's completion table
    Show {
        /// Query a running server instead of the local ledger
        #[arg(long)]
        server: Option<String>,
    },
    /// Record a session completion for a person
    Complete {
        /// Person name
        person: String,
        /// Local hour used for period bucketing (defaults to now)
        #[arg(long)]
        hour: Option<u32>,
        /// Record against a running server instead of the local ledger
        #[arg(long)]
        server: Option<String>,
    },
    /// Clear the table for a new day
    Reset {
        /// Reset a running server instead of the local ledger
        #[arg(long)]
        server: Option<String>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Show { server } => {
            let ledger = match server {
                Some(url) => block_on(AccountabilityClient::new(url).stats())?,
                None => LedgerStore::open_default()?.stats(),
            };
            print_table(&ledger);
        }
        StatsAction::Complete { person, hour, server } => {
            let person: Person = person.parse()?;
            let hour = hour.unwrap_or_else(|| Local::now().hour());
            let period = DayPeriod::from_hour(hour);
            let ledger = match server {
                Some(url) => {
                    block_on(AccountabilityClient::new(url).record_completion(person, hour))?.data
                }
                None => LedgerStore::open_default()?.record(person, period)?,
            };
            println!("{person} marked for {period}");
            print_table(&ledger);
        }
        StatsAction::Reset { server } => {
            match server {
                Some(url) => block_on(AccountabilityClient::new(url).reset_daily())?,
                None => LedgerStore::open_default()?.reset_daily()?,
            }
            println!("table cleared");
        }
    }
    Ok(())
}

fn block_on<T>(
    fut: impl std::future::Future<Output = breathbox_core::error::Result<T>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(fut)?)
}

fn print_table(ledger: &Ledger) {
    println!("{:<8} {:>8} {:>8} {:>8}", "", "morning", "midday", "evening");
    for person in Person::ALL {
        let day = ledger.person(person);
        println!(
            "{:<8} {:>8} {:>8} {:>8}",
            person.name(),
            mark(day.morning),
            mark(day.midday),
            mark(day.evening),
        );
    }
}

fn mark(done: bool) -> &'static str {
    if done { "x" } else { "-" }
}
