use clap::Subcommand;
use apnea_core::{catalog, Config, PlanId};

use super::check_args;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "feedback.bell", "plan.id")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Choose the plan `apnea run` uses
    Plan {
        /// Plan id, see `apnea plans`
        id: u32,
        /// Plan arguments; the plan's defaults when omitted
        #[arg(allow_negative_numbers = true)]
        args: Vec<i64>,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::Plan { id, args } => {
            let desc = catalog::lookup(PlanId(id))?;
            let args = if args.is_empty() {
                desc.arg_defaults.to_vec()
            } else {
                args
            };
            check_args(desc, &args)?;
            let mut config = Config::load()?;
            config.select_plan(desc.id, args)?;
            config.save()?;
            println!("plan set to '{}'", desc.name);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
