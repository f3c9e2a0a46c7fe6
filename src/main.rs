use clap::Parser;
use nodeshare::cli::{self, Args};
use nodeshare::core::{AppError, DefaultErrorReporter, ErrorReporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    let _logging = match nodeshare::logging::init(args.command.workspace()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            DefaultErrorReporter::new().report_warning("logging disabled", Some(format!("{:#}", err)));
            None
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error = match err.downcast::<AppError>() {
                Ok(app_error) => app_error,
                Err(other) => AppError::from(other),
            };
            DefaultErrorReporter::new().report_error(&error);
            ExitCode::FAILURE
        }
    }
}
