use std::io;

fn main() {
    arena_cli::logging::init_logging(arena_cli::logging::DEFAULT_FILTER);
    if let Err(e) = arena_cli::signal::install() {
        tracing::warn!(error = %e, "Could not install Ctrl+C handler");
    }

    let code = arena_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
