//! List directories without allocating per entry.

use ap_storage_examples::init_logging;
use ap_storage_linux::read_dir;
use anyhow::Error;
use gumdrop::Options;
use std::io::Write;

#[derive(Debug, Options)]
struct CommandOptions {
    /// Print the help message.
    help: bool,

    /// Show the type of every entry.
    long: bool,

    /// Show the directory-entries as well.
    verbose: bool,

    /// Directories to list.  Defaults to the current one.
    #[options(free)]
    dirs: Vec<String>,
}

fn main() -> Result<(), Error> {
    init_logging();
    let mut opts = CommandOptions::parse_args_default_or_exit();
    if opts.dirs.is_empty() {
        opts.dirs.push(".".into());
    }
    let mut out = std::io::stdout().lock();
    for dir in &opts.dirs {
        tracing::debug!(%dir, "listing");
        let mut count = 0;
        let mut iter = read_dir(dir);
        while let Some(entry) = iter.next() {
            count += 1;
            if opts.verbose {
                writeln!(out, "{entry}")?;
                continue;
            }
            write!(out, "{:16}\t", entry.ino)?;
            if opts.long {
                write!(out, "{:16}\t", entry.typ)?;
            }
            out.write_all(entry.name)?;
            out.write_all(b"\n")?;
        }
        if count == 0 {
            tracing::warn!(%dir, "no entries");
        }
    }
    Ok(())
}
