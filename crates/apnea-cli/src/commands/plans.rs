use apnea_core::catalog;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog::list())?);
        return Ok(());
    }

    for desc in catalog::list() {
        println!("{:>3}  {}", desc.id, desc.name);
        for (name, default) in desc.arg_names.iter().zip(desc.arg_defaults) {
            println!("       {name} = {default}");
        }
    }
    Ok(())
}
