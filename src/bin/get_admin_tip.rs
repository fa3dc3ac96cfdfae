// Utility to look up the admin-curated tip for a given date

use std::path::Path;
use std::{env, process};

use chrono::NaiveDate;

use sqldaily::admin::{admin_tip_for, ADMIN_TIPS_FILE};

/// Print the curated tip for a date, so CI can capture it into `TIP_CONTENT`
fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 || args.iter().any(|arg| arg.starts_with('-')) {
        usage(&args[0]);
    }

    // The export keys tips by ISO date
    let date = &args[1];
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        eprintln!("Error: `{date}` is not a date in YYYY-MM-DD format");
        usage(&args[0]);
    }

    match admin_tip_for(date, Path::new(ADMIN_TIPS_FILE)) {
        // An admin added a tip for this date
        Ok(Some(content)) => println!("{content}"),

        // No curated tip for this date
        Ok(None) => {}

        Err(e) => {
            eprintln!("Error reading the admin tips export: {e:#}");
            process::exit(1);
        }
    }
}

/// Print usage information and exit
fn usage(prog: &str) {
    println!("Usage:");
    println!("{prog} <YYYY-MM-DD>");
    println!("\nExample:");
    println!("{prog} 2025-01-15");

    process::exit(1);
}
