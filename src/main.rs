use clap::Parser;
use page_object_gen::cli::commands::{cmd_generate, cmd_inspect};
use page_object_gen::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Generate(args) => {
            let outcome = cmd_generate(&args, &config)?;
            let po = &outcome.page_object;
            println!(
                "Generated {} ({} elements, {} child pages)",
                po.name,
                po.tree.len(),
                po.child_pages.len()
            );
            for path in &outcome.written {
                println!("  wrote     {}", path);
            }
            for path in &outcome.unchanged {
                println!("  unchanged {}", path);
            }
            if po.instruction.is_virtual {
                print!("{}", po.generated_source);
            }
        }
        Commands::Inspect(filter) => {
            print!("{}", cmd_inspect(&filter, &config)?);
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the level follows `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
