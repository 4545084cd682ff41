//! statement-csv CLI
//!
//! Converts a bank statement PDF into CSV transaction rows.
//!
//! # Usage
//!
//! ```bash
//! statement-csv statement.pdf
//! statement-csv --layout card --year 2023 --holder "JANE Q PUBLIC" statement.pdf
//! statement-csv --pre-rendered --output march.csv statement.html
//! ```
//!
//! The statement is rendered with `pdftohtml -stdout`, parsed, and the rows
//! written to the output file (default `output.csv`), replacing its contents.
//!
//! # Diagnostics
//!
//! Warnings about wrapped lines are logged to stderr; set `RUST_LOG=debug` for
//! section transitions. When parsing fails, the rows parsed so far are dumped
//! to stdout before exiting.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Rendering, parsing or output error
//! - 2: Invalid arguments

use statement_csv::cli;
use statement_csv::convert::{create_renderer, StatementConverter};
use statement_csv::io::write_entries_csv;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();
    let profile = args.to_profile();
    let layout = profile.layout;
    let converter = StatementConverter::new(create_renderer(args.renderer_kind()), profile);

    if let Err(e) = converter.convert(&args.input_file, &args.output_file) {
        if let Some(entries) = e.partial_entries() {
            let mut stdout = std::io::stdout();
            if let Err(dump_error) = write_entries_csv(entries, layout, &mut stdout) {
                log::error!("failed to dump parsed entries: {}", dump_error);
            }
        }
        log::error!("{}", e);
        process::exit(1);
    }
}
