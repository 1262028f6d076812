use flowlint_linter::schema::{CLAUSE_PROPERTIES, COMMANDS, CommandSchema, VALID_PLATFORMS};

use crate::ExitStatus;
use crate::output::OutputFormat;

pub fn run_commands(output_format: String) -> Result<ExitStatus, anyhow::Error> {
    match OutputFormat::from(output_format.as_str()) {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "commands": COMMANDS,
                "when": {
                    "properties": CLAUSE_PROPERTIES,
                    "platforms": VALID_PLATFORMS,
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => show_commands(),
    }
    Ok(ExitStatus::Success)
}

fn show_commands() {
    println!("Supported Commands:");
    println!();

    for schema in COMMANDS {
        println!("  {}", describe(schema));
    }
    println!();

    println!("Conditional Execution (when):");
    println!("  properties: {}", CLAUSE_PROPERTIES.join(", "));
    println!("  platforms:  {}", VALID_PLATFORMS.join(", "));
    println!();
}

fn describe(schema: &CommandSchema) -> String {
    let mut line = schema.name.to_string();
    if schema.requires_value {
        line.push_str(" (value required)");
    }
    if schema.has_required_group() {
        line.push_str(&format!("\n      requires: {}", schema.required_alternatives()));
    }
    if !schema.optional.is_empty() {
        line.push_str(&format!("\n      optional: {}", schema.optional.join(", ")));
    }
    line
}
