use breathbox_core::{SessionConfig, SettingsStore};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "inhaleTime", "audioEnabled")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings values
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open()?;

    match action {
        ConfigAction::Get { key } => {
            let fields = serde_json::to_value(store.load())?;
            match fields.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut fields = serde_json::to_value(store.load())?;
            let slot = match fields.get_mut(&key) {
                Some(slot) => slot,
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            };
            // Numbers and booleans parse as themselves; anything else is
            // rejected when the record deserializes below.
            *slot = serde_json::from_str(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            let config: SessionConfig = serde_json::from_value(fields)?;
            store.save(&config.clamped())?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(&store.load())?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            store.save(&SessionConfig::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
