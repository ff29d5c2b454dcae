pub mod config;
pub mod log;
pub mod plans;
pub mod run;

use apnea_core::PlanDescriptor;

/// Arguments the terminal front end accepts for a plan: at least one rep and
/// positive times. Increments may be zero or negative.
pub fn check_args(desc: &PlanDescriptor, args: &[i64]) -> Result<(), String> {
    if args.len() != desc.arg_names.len() {
        return Err(format!(
            "'{}' takes {} argument(s) ({}), got {}",
            desc.name,
            desc.arg_names.len(),
            desc.arg_names.join(", "),
            args.len()
        ));
    }
    for (name, value) in desc.arg_names.iter().zip(args) {
        if !name.starts_with("increment") && *value < 1 {
            return Err(format!("'{name}' must be at least 1, got {value}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apnea_core::catalog;

    #[test]
    fn rejects_zero_reps_and_times() {
        let o2 = &catalog::list()[0];
        assert!(check_args(o2, &[0, 120, 15, 120]).is_err());
        assert!(check_args(o2, &[6, 120, 15, 0]).is_err());
        assert!(check_args(o2, &[6, 120, 15]).is_err());
    }

    #[test]
    fn increments_may_be_negative() {
        let co2 = &catalog::list()[2];
        assert!(check_args(co2, &[6, 120, 120, -15]).is_ok());
        assert!(check_args(co2, &[6, 120, 120, 0]).is_ok());
    }
}
