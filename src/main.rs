fn main() {
    if let Err(err) = stoqs_trim::run() {
        eprintln!("error: {err:#}");
        std::process::exit(stoqs_trim::exit_status(&err));
    }
}
