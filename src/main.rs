use bt_dualboot::cli::{convert, run_interactive, ConvertOptions, OutputFormat, Rendered};
use bt_dualboot::render::instructions;
use bt_dualboot::telemetry::init_tracing;
use bt_dualboot::transcode::format_mac;
use bt_dualboot::{FieldName, RawFieldSet};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROFILE: &str = env!("BT_DUALBOOT_PROFILE");
const GIT_HASH: &str = env!("BT_DUALBOOT_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "bt-dualboot")]
#[command(
    about = "Convert Bluetooth pairing keys from the Windows registry to the Linux Bluetooth info file format",
    long_about = None,
    after_help = "The info file lives at /var/lib/bluetooth/{adapter}/{device}/info.\nThis tool never modifies it; copy the output there yourself."
)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for each key and print the converted info file sections (default)
    #[command(alias = "i")]
    Interactive {
        /// Output format (info or json)
        #[arg(long, default_value = "info", value_parser = parse_format)]
        format: OutputFormat,
    },

    /// Convert keys given as options or read from a file
    #[command(alias = "c")]
    Convert {
        /// Key=Value file, or a JSON object if the name ends in .json
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// LTK (or LinkKey) hex bytes
        #[arg(long)]
        ltk: Option<String>,

        /// KeyLength DWORD hex bytes, e.g. "10 00 00 00"
        #[arg(long)]
        key_length: Option<String>,

        /// ERand QWORD hex bytes
        #[arg(long)]
        erand: Option<String>,

        /// EDIV DWORD hex bytes
        #[arg(long)]
        ediv: Option<String>,

        /// IRK hex bytes
        #[arg(long)]
        irk: Option<String>,

        /// CSRK hex bytes
        #[arg(long)]
        csrk: Option<String>,

        /// CSRKInbound hex bytes
        #[arg(long)]
        csrk_inbound: Option<String>,

        /// Device MAC address
        #[arg(long)]
        mac: Option<String>,

        /// Output format (info or json)
        #[arg(long, default_value = "info", value_parser = parse_format)]
        format: OutputFormat,
    },

    /// Format a device MAC address as BlueZ names its directories
    Mac {
        /// Address, e.g. 60abd2916ef6
        address: String,
    },

    /// Show how to extract the keys from a Windows registry hive
    Instructions,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn print_warnings(rendered: &Rendered) {
    for diagnostic in &rendered.diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("bt-dualboot {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Bare invocation runs the prompt-driven session
    let command = cli.command.unwrap_or(Commands::Interactive {
        format: OutputFormat::Info,
    });

    if let Err(e) = init_tracing() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let result = match command {
        Commands::Interactive { format } => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            run_interactive(&mut stdin.lock(), &mut stdout.lock(), format).map(|_| ())
        }

        Commands::Convert {
            input,
            ltk,
            key_length,
            erand,
            ediv,
            irk,
            csrk,
            csrk_inbound,
            mac,
            format,
        } => {
            let mut fields = RawFieldSet::new();
            for (field, value) in [
                (FieldName::Ltk, ltk),
                (FieldName::KeyLength, key_length),
                (FieldName::ERand, erand),
                (FieldName::Ediv, ediv),
                (FieldName::Irk, irk),
                (FieldName::Csrk, csrk),
                (FieldName::CsrkInbound, csrk_inbound),
            ] {
                if let Some(value) = value {
                    fields.insert(field, value);
                }
            }

            let options = ConvertOptions {
                input,
                fields,
                mac,
                format,
            };

            convert(&options).map(|rendered| {
                print_warnings(&rendered);
                print!("{}", rendered.output);
            })
        }

        Commands::Mac { address } => {
            println!("{}", format_mac(&address));
            Ok(())
        }

        Commands::Instructions => {
            print!("{}", instructions());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
