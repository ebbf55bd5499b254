use clap::Args;

use revalue_core::extract;

use super::CommandResult;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[arg(long, help = "Free-text device description to parse")]
    pub text: String,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

pub fn run(args: ExtractArgs) -> CommandResult {
    let attributes = extract(&args.text);

    let output = if args.json {
        serde_json::to_string_pretty(&attributes)
            .unwrap_or_else(|error| format!("{{\"error\":\"serialization failed: {error}\"}}"))
    } else {
        [
            format!("- brand = {}", display(&attributes.brand)),
            format!("- model = {}", display(&attributes.model)),
            format!("- specs = {}", display(&attributes.specs)),
            format!("- condition = {}", attributes.condition.label()),
        ]
        .join("\n")
    };

    CommandResult { exit_code: 0, output }
}

fn display(value: &str) -> &str {
    if value.is_empty() {
        "<none>"
    } else {
        value
    }
}
