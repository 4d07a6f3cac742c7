use clap::Parser;
use kurmi_workspace::config::DEFAULT_CONFIG_FILES;
use kurmi_workspace::logging::init_logging;
use kurmi_workspace::{
    generate_sample_config, FilterCli, FilterOutcome, KurmiError, MenuIo, OutputFormatter,
    OutputMode, UserFriendlyError, VendorFilter,
};
use std::io;
use std::path::Path;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = FilterCli::parse();

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
        &config.logging.filter_log,
        cli.common.verbose,
        cli.common.quiet,
    ) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {:#}", e);
            None
        }
    };

    let filter = VendorFilter::new(
        config,
        working_dir.join(&cli.directory),
        cli.common.output_mode(),
        cli.common.verbosity_level(),
        cli.common.quiet,
    );

    let stdin = io::stdin();
    let mut menu = MenuIo::new(stdin.lock(), io::stdout());

    match filter.run(&mut menu) {
        Ok(FilterOutcome::Pruned(report)) => {
            filter.output_formatter().print_prune_report(&report);
            0
        }
        Ok(FilterOutcome::Aborted) => 0,
        Err(e) => {
            filter.handle_error(&e);
            exit_code(&e)
        }
    }
}

fn exit_code(error: &KurmiError) -> i32 {
    match error {
        KurmiError::ExtractionDirNotFound { .. } => 5,
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
            println!("  kurmi-vendor-filter --config {}", config_path.display());
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
