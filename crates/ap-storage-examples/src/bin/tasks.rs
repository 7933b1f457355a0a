//! List all tasks of all processes by scanning procfs.
//!
//! A single buffer is reused for all stat files and the directory listings do
//! not allocate per entry.

use ap_storage_examples::{init_logging, Stat};
use ap_storage_linux::{read_dir, read_file};
use ap_util_bytestring::parse_uint;
use anyhow::{anyhow, Error};
use gumdrop::Options;
use std::fmt::Write as _;
use std::io::Write;

#[derive(Debug, Options)]
struct CommandOptions {
    /// Print the help message.
    help: bool,

    /// Print the number of remaining stat fields as well.
    verbose: bool,

    /// Only show the main thread of every process.
    no_threads: bool,

    /// The procfs mount point.
    #[options(meta = "DIR", default = "/proc")]
    procfs: String,
}

fn main() -> Result<(), Error> {
    init_logging();
    let opts = CommandOptions::parse_args_default_or_exit();
    let mut out = std::io::stdout().lock();
    let mut buf = Vec::new();
    let mut path = String::new();
    let mut processes = 0;

    let mut procs = read_dir(&opts.procfs);
    while let Some(entry) = procs.next() {
        if !entry.is_dir() {
            continue;
        }
        let Some(pid) = parse_uint(entry.name) else {
            continue;
        };
        processes += 1;

        let tids: Vec<u64> = if opts.no_threads {
            vec![pid]
        } else {
            let mut tids = Vec::new();
            let mut tasks = read_dir(&format!("{}/{pid}/task", opts.procfs));
            while let Some(task) = tasks.next() {
                tids.extend(parse_uint(task.name));
            }
            tids
        };

        for tid in tids {
            path.clear();
            write!(path, "{}/{pid}/task/{tid}/stat", opts.procfs)?;
            let (next, ok) = read_file(&path, std::mem::take(&mut buf));
            buf = next;
            if !ok {
                // the task might be gone already
                tracing::warn!(%path, "cannot read");
                continue;
            }
            let Some(stat) = Stat::parse(&buf) else {
                tracing::warn!(%path, "cannot parse");
                continue;
            };
            write!(out, "{pid}\t{}\t{}\t{}\t", stat.pid, stat.ppid, stat.state as char)?;
            out.write_all(stat.comm)?;
            if opts.verbose {
                write!(out, "\t{}", stat.more)?;
            }
            out.write_all(b"\n")?;
        }
    }
    if processes == 0 {
        return Err(anyhow!("no processes found in {}", opts.procfs));
    }
    tracing::debug!(processes, "done");
    Ok(())
}
