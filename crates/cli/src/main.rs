use std::process::ExitCode;

fn main() -> ExitCode {
    revalue_cli::run()
}
