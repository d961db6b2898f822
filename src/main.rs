use std::process;

fn main() {
    if let Err(e) = pi_precision::cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
