//! probebench binary entry point.

fn main() {
    if let Err(error) = probebench_cli::run() {
        eprintln!("probebench: {error:#}");
        std::process::exit(1);
    }
}
