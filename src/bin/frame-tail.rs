use clap::{Parser, ValueEnum};
use frame_ingest::{
    app::constant::DEFAULT_TAIL_POLL_MS,
    core::{preview::PreviewRecord, tail::LogTail},
};
use std::{
    io::{self, Write as _},
    path::PathBuf,
    thread,
    time::Duration,
};

/// Follow a length-prefixed frame log as it grows.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the frame log
    path: PathBuf,

    /// Start from end (like tail -f) instead of from beginning
    #[arg(long)]
    from_end: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Poll interval while waiting for more bytes
    #[arg(long, default_value_t = DEFAULT_TAIL_POLL_MS)]
    ms: u64,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Pretty,
    Compact,
}

fn main() -> Result<(), Box<dyn core::error::Error + Send + Sync + 'static>> {
    let args = Args::parse();
    let mut tail = LogTail::open(&args.path, args.from_end)
        .map_err(|e| format!("open {}: {e}", args.path.display()))?;
    let interval = Duration::from_millis(args.ms);

    loop {
        let records = tail.poll()?;
        if !records.is_empty() {
            let mut out = io::stdout().lock();
            for record in &records {
                print_record(&mut out, record, args.format)?;
            }
            out.flush()?;
        }
        thread::sleep(interval);
    }
}

fn print_record(
    out: &mut impl io::Write,
    record: &PreviewRecord,
    format: Format,
) -> io::Result<()> {
    match format {
        Format::Pretty => serde_json::to_writer_pretty(&mut *out, record)?,
        Format::Compact => serde_json::to_writer(&mut *out, record)?,
    }
    out.write_all(b"\n")
}
