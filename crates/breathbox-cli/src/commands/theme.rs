use breathbox_core::theme::{gradient_for_hour, star_layer_counts, stars_visible, to_css};
use breathbox_core::DayPeriod;
use chrono::{Local, Timelike};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the ambient look for an hour of the day
    Show {
        /// Hour 0-23 (defaults to the current local hour)
        #[arg(long)]
        hour: Option<u32>,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ThemeAction::Show { hour } => {
            let hour = hour.unwrap_or_else(|| Local::now().hour());
            println!("hour:     {hour}");
            println!("period:   {}", DayPeriod::from_hour(hour));
            println!("gradient: {}", to_css(gradient_for_hour(hour)));
            if stars_visible(hour) {
                let [front, mid, back] = star_layer_counts(false);
                println!("stars:    visible ({front}/{mid}/{back} per layer)");
            } else {
                println!("stars:    hidden");
            }
        }
    }
    Ok(())
}
