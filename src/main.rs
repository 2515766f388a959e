use std::process::ExitCode;

fn main() -> ExitCode {
    match decaf_runner::cli::run() {
        Ok(code) => code,
        Err(e) => {
            let report = miette::Report::new(e);
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}
