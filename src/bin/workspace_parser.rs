use clap::Parser;
use kurmi_workspace::config::DEFAULT_CONFIG_FILES;
use kurmi_workspace::logging::init_logging;
use kurmi_workspace::{
    generate_sample_config, KurmiError, MenuIo, OutputFormatter, OutputMode, ParserCli,
    UserFriendlyError, WorkspaceParser,
};
use std::io;
use std::path::Path;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = ParserCli::parse();

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            print_startup_error(&KurmiError::Io(e));
            return 1;
        }
    };

    if cli.common.generate_config {
        return handle_generate_config(&working_dir, cli.common.config.as_deref());
    }

    let config = match cli.load_config(&working_dir) {
        Ok(config) => config,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    let _log_guard = match init_logging(
        &working_dir,
        &config.logging.parser_log,
        cli.common.verbose,
        cli.common.quiet,
    ) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {:#}", e);
            None
        }
    };

    let parser = WorkspaceParser::new(
        config,
        &working_dir,
        cli.common.output_mode(),
        cli.common.verbosity_level(),
        cli.common.quiet,
    );

    let stdin = io::stdin();
    let mut menu = MenuIo::new(stdin.lock(), io::stdout());

    match parser.run(cli.input.as_deref(), &mut menu) {
        Ok(report) => {
            parser.output_formatter().print_extraction_report(&report);
            if report.has_warnings() {
                parser.output_formatter().warning(&format!(
                    "{} archive members were rejected because of unsafe paths",
                    report.rejected.len()
                ));
            }
            0
        }
        Err(e) => {
            parser.handle_error(&e);
            exit_code(&e)
        }
    }
}

fn exit_code(error: &KurmiError) -> i32 {
    match error {
        KurmiError::Archive { .. } => 2,
        KurmiError::ArchiveNotFound { .. } | KurmiError::NoArchivesFound { .. } => 3,
        KurmiError::NoCategoriesSelected => 4,
        _ => 1,
    }
}

fn handle_generate_config(working_dir: &Path, config: Option<&Path>) -> i32 {
    let config_path = config
        .map(|p| working_dir.join(p))
        .unwrap_or_else(|| working_dir.join(DEFAULT_CONFIG_FILES[0]));

    match generate_sample_config(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!(
                "  kurmi-workspace-parser --config {}",
                config_path.display()
            );
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &KurmiError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
