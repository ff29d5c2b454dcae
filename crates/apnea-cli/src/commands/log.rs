use apnea_core::{Database, RecordEntry};
use chrono::Local;

fn entries(entries: &[RecordEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}={}", e.name, e.value))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(limit: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let sessions = db.sessions(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("no sessions yet");
        return Ok(());
    }

    for session in sessions {
        let record = &session.record;
        let when = session.recorded_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        let outcome = match record.completed_reps {
            None => "complete".to_string(),
            Some(n) => format!("stopped after {n} rep(s)"),
        };
        println!("{when}  {}  ({outcome})", record.plan_name);
        if !record.args.is_empty() {
            println!("    {}", entries(&record.args));
        }
        if !record.details.is_empty() {
            println!("    {}", entries(&record.details));
        }
    }
    Ok(())
}
