fn main() {
    if let Err(err) = delegator::cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
