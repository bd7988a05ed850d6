use schemerd::{prisma_to_erd, sql_to_tables};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>   Output file (default: stdout)");
        eprintln!("  -f, --format <fmt>    Input format: sql, prisma (default: detect)");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut format: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = Some(args[i].clone());
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let format = format.unwrap_or_else(|| detect_format(&input).to_string());

    let output = match format.as_str() {
        "sql" => sql_to_tables(&input),
        "prisma" => prisma_to_erd(&input),
        other => {
            eprintln!("Invalid format: {}", other);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}

fn detect_format(input: &str) -> &'static str {
    if input.contains("CREATE TABLE") {
        "sql"
    } else {
        "prisma"
    }
}
