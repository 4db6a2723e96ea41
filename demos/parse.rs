use bpmn_model::{Parser, params};

extern crate pretty_env_logger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/formation.bpmn".into());

    // Parse the BPMN file
    let mut parser = Parser::new();
    parser.parse(&std::fs::read_to_string(&path)?)?;

    let model = parser.model()?;
    println!("Model: {} ({}) v{}", model.name, model.id, model.version);

    for process in parser.processes()? {
        println!(
            "Process {}: {} activities, {} transitions, {} gateways",
            process.id,
            process.activity_map.len(),
            process.transitions.len(),
            process.gateways().count()
        );
        for default in &process.default_transitions {
            println!(
                "  {} defaults to {} via {}",
                default.gateway, default.activity, default.transition
            );
        }
    }

    let required = params::required_parameters(
        &model.data_store_fields,
        parser.processes()?,
        params::AGREEMENT_DATA_ID,
    );
    for (path, parameter_type) in &required {
        println!("Parameter {path}: {parameter_type}");
    }

    // Print everything as JSON
    println!("{}", serde_json::to_string_pretty(parser.processes()?)?);
    Ok(())
}
