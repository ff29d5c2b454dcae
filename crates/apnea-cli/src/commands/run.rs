use std::io::Write;

use apnea_core::{
    catalog, Config, Database, DisplayPort, IntervalClock, MemoryStore, PlanId, SessionState,
    SignalPort, Silent, Snapshot, StorePort, TimerController,
};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::check_args;

#[derive(Args)]
pub struct RunArgs {
    /// Plan id to run instead of the configured one, see `apnea plans`
    #[arg(long)]
    plan: Option<u32>,
    /// Plan arguments; the configured or default ones when omitted
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    args: Vec<i64>,
    /// Do not ring the terminal bell between phases
    #[arg(long)]
    no_bell: bool,
    /// Do not write the session to the log book
    #[arg(long)]
    dry_run: bool,
}

/// Prints the countdown, one line per update.
struct TerminalDisplay {
    every_second: bool,
    last_label: String,
}

impl DisplayPort for TerminalDisplay {
    fn on_session_start(&mut self) {
        println!("Enter ends a breath-hold or breath phase, q stops.");
    }

    fn on_session_end(&mut self) {
        println!("Session over.");
    }

    fn update(&mut self, snapshot: &Snapshot) {
        if !self.every_second && snapshot.text_label == self.last_label {
            return;
        }
        let hint = match snapshot.state {
            SessionState::CountingUp => "  (Enter when done)",
            _ => "",
        };
        println!("{:>6}  {}{hint}", snapshot.time_label, snapshot.text_label);
        self.last_label.clone_from(&snapshot.text_label);
    }
}

/// Terminal bell.
struct Bell;

impl SignalPort for Bell {
    fn signal(&mut self) {
        let mut out = std::io::stdout();
        // Feedback only; nothing to do if the terminal is gone.
        let _ = out.write_all(b"\x07").and_then(|()| out.flush());
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let plan = match args.plan {
        Some(id) => {
            let desc = catalog::lookup(PlanId(id))?;
            let plan_args = if args.args.is_empty() {
                desc.arg_defaults.to_vec()
            } else {
                args.args
            };
            check_args(desc, &plan_args)?;
            desc.make(&plan_args)?
        }
        None if !args.args.is_empty() => {
            let desc = catalog::resolve(config.plan.id);
            check_args(desc, &args.args)?;
            desc.make(&args.args)?
        }
        None => {
            let plan = config.plan();
            check_args(plan.descriptor(), plan.args())?;
            plan
        }
    };
    println!("{}", plan.descriptor().name);

    let display = TerminalDisplay {
        every_second: config.display.every_second,
        last_label: String::new(),
    };
    let signal: Box<dyn SignalPort> = if config.feedback.bell && !args.no_bell {
        Box::new(Bell)
    } else {
        Box::new(Silent)
    };
    let store: Box<dyn StorePort> = if args.dry_run {
        Box::new(MemoryStore::new())
    } else {
        Box::new(Database::open()?)
    };

    let controller = TimerController::new(
        plan,
        IntervalClock::new(),
        Box::new(display),
        signal,
        store,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(controller));
    // A pending stdin read sits on a blocking thread that cannot be
    // cancelled; do not wait for it once the session is over.
    runtime.shutdown_background();
    result?;
    Ok(())
}

/// Feed clock ticks and stdin commands to the controller until the session ends.
async fn drive(mut controller: TimerController<IntervalClock>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    controller.start();

    while controller.state() != SessionState::Done {
        tokio::select! {
            _ = controller.clock_mut().fired() => controller.tick(),
            line = lines.next_line() => match line? {
                Some(input) => match input.trim() {
                    "q" | "quit" | "stop" => controller.stop(),
                    "" => controller.advance(),
                    other => debug!(input = other, "ignored input"),
                },
                // stdin closed: nobody left to end an open-ended phase
                None => controller.stop(),
            },
        }
    }
    Ok(())
}
