fn main() {
    if let Err(e) = dieindex_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
