use std::process::ExitCode;

fn main() -> ExitCode {
    dt174b_cli::run()
}
