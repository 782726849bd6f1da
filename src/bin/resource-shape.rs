//! Resource Shaping CLI
//!
//! Command-line interface for shaping employee collections and previewing links.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use resource_shape::{
    employee_composer, init_logging, load_items, EmployeeDto, RequestContext, ShapeConfig,
    SUPPORTED_MEDIA_TYPES,
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "resource-shape")]
#[command(about = "Shape resource collections and attach hypermedia links")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shape a JSON array of employees for a company
    Shape {
        /// File containing a JSON array of employees
        items: PathBuf,

        /// Company the employees belong to
        #[arg(long)]
        company: Uuid,

        /// Comma-separated fields to keep (all fields if omitted)
        #[arg(long)]
        fields: Option<String>,

        /// Accept header value used to pick the response media type
        #[arg(long, default_value = "application/json")]
        accept: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        config: ShapeConfig,
    },

    /// Print the employee fields a `fields` request resolves to
    Fields {
        /// Comma-separated fields to keep (all fields if omitted)
        #[arg(long)]
        fields: Option<String>,

        #[command(flatten)]
        config: ShapeConfig,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Shape {
            items,
            company,
            fields,
            accept,
            output,
            pretty,
            config,
        } => {
            init_logging(&config.log_level);
            run_shape(ShapeArgs {
                items,
                company,
                fields,
                accept,
                output,
                pretty,
                config,
            })
        }
        Commands::Fields { fields, config } => {
            init_logging(&config.log_level);
            run_fields(fields.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

struct ShapeArgs {
    items: PathBuf,
    company: Uuid,
    fields: Option<String>,
    accept: String,
    output: Option<PathBuf>,
    pretty: bool,
    config: ShapeConfig,
}

fn run_shape(args: ShapeArgs) -> Result<(), u8> {
    let ShapeArgs {
        items,
        company,
        fields,
        accept,
        output,
        pretty,
        config,
    } = args;

    let employees: Vec<EmployeeDto> = load_items(&items).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let context =
        RequestContext::from_accept(&config.base_url, Some(&accept), SUPPORTED_MEDIA_TYPES)
            .map_err(|e| {
                eprintln!("Error: {}", e);
                e.exit_code() as u8
            })?;

    let composer = employee_composer().map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    info!(
        items = employees.len(),
        company = %company,
        media_type = %context.media_type(),
        "Shaping employees"
    );

    let response = composer
        .compose(&employees, fields.as_deref(), &company, &context)
        .map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_fields(fields: Option<&str>) -> Result<(), u8> {
    let composer = employee_composer().map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let resolved = composer.shaper().resolve(fields);
    let json_output = serde_json::to_string(&resolved).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;
    println!("{}", json_output);

    Ok(())
}
