#![forbid(unsafe_code)]

fn main() {
    cviz_demo::init_logging(&cviz_demo::config::log_filter());
    if let Err(error) = cviz_demo::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
