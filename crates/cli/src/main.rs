use std::process::ExitCode;

fn main() -> ExitCode {
    expenso_cli::run()
}
