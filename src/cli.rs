// src/cli.rs
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{self, consts::{CONFIG_FILE, STORE_DIR}, options::{AppOptions, ExportFormat}};
use crate::file::{normalize_separators, write_run_outputs, write_tables};
use crate::model::{OperationAttendance, SquadAttendance};
use crate::preprocess::preprocess;
use crate::progress::{Diagnostic, Progress};
use crate::runner::run_preprocessed;
use crate::store;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Command {
    /// History → ops → JSON + tables
    #[default]
    Run,
    /// History → preprocessed messages only
    Preprocess,
    /// Parsed ops JSON → tables
    Export,
}

/// What was typed. Everything optional here overrides the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub include_headers: Option<bool>,
    pub workers: Option<usize>,
    pub dump_processed: bool,
    /// Write the resolved options back to the config file before running.
    pub save_config: bool,
    pub quiet: bool,
    pub debug: bool,
    pub help: bool,
}

pub fn help_text() -> &'static str {
    include_str!("cli_help.txt")
}

pub fn parse_args<I>(args: I) -> Result<CliArgs, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter().peekable();

    if let Some(first) = args.peek() {
        let cmd = match first.as_str() {
            "run" => Some(Command::Run),
            "preprocess" => Some(Command::Preprocess),
            "export" => Some(Command::Export),
            _ => None,
        };
        if let Some(c) = cmd {
            cli.command = c;
            args.next();
        }
    }

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-i" | "--input" => cli.input = Some(path_arg(args.next().ok_or("Missing input path")?)),
            "-o" | "--out" => cli.out = Some(path_arg(args.next().ok_or("Missing output directory")?)),
            "-c" | "--config" => cli.config = Some(path_arg(args.next().ok_or("Missing config path")?)),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                cli.format = Some(ExportFormat::parse(&v).ok_or_else(|| format!("Unknown format: {}", v))?);
            }
            "--include-headers" => cli.include_headers = Some(true),
            "--no-headers" => cli.include_headers = Some(false),
            "-w" | "--workers" => {
                let v: usize = args.next().ok_or("Missing value for --workers")?.parse()?;
                if v == 0 { return Err("Worker count must be at least 1".into()); }
                cli.workers = Some(v);
            }
            "--dump-processed" => cli.dump_processed = true,
            "--save-config" => cli.save_config = true,
            "-q" | "--quiet" => cli.quiet = true,
            "--debug" => cli.debug = true,
            "-h" | "--help" => cli.help = true,
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(cli)
}

fn path_arg(v: String) -> PathBuf {
    PathBuf::from(normalize_separators(&v))
}

pub fn config_path(cli: &CliArgs) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| Path::new(STORE_DIR).join(CONFIG_FILE))
}

/// Defaults, then the config file, then flags.
pub fn resolve_options(cli: &CliArgs) -> AppOptions {
    let mut opts = AppOptions::default();
    let conf = config_path(cli);
    if !config::file::load(&conf, &mut opts) && cli.config.is_some() {
        logw!("Config: {} not found, using defaults", conf.display());
    }

    if let Some(p) = &cli.input { opts.input = p.clone(); }
    if let Some(p) = &cli.out { opts.export.set_out_dir(p); }
    if let Some(f) = cli.format { opts.export.format = f; }
    if let Some(h) = cli.include_headers { opts.export.include_headers = h; }
    if let Some(n) = cli.workers { opts.run.set_workers(n); }
    if cli.dump_processed { opts.export.dump_processed = true; }
    opts
}

pub fn run(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if cli.help {
        eprintln!("{}", help_text());
        return Ok(());
    }
    let opts = resolve_options(cli);
    if cli.save_config {
        let conf = config_path(cli);
        config::file::save(&conf, &opts)?;
        if !cli.quiet {
            println!("Wrote {}", conf.display());
        }
    }
    match cli.command {
        Command::Run => cmd_run(&opts, cli.quiet),
        Command::Preprocess => cmd_preprocess(&opts, cli.quiet),
        Command::Export => cmd_export(cli, &opts),
    }
}

fn cmd_run(opts: &AppOptions, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let raw = store::load_history(&opts.input, &opts.reactions)?;
    let processed = preprocess(&raw);
    if !quiet {
        println!("{} msgs input, processed into {}", raw.len(), processed.len());
    }

    let dump = opts.export.dump_processed.then(|| processed.clone());
    let mut console = ConsoleProgress { quiet, err: io::stderr() };
    let report = run_preprocessed(processed, &opts.run, Some(&mut console));

    if !quiet {
        for op in &report.operations {
            print!("{}", format_op_summary(op));
        }
    }

    let written = write_run_outputs(&opts.export, &report.operations, dump.as_deref())?;
    if !quiet {
        println!(
            "{} ops, {} lines rejected, {} BAD-flagged skipped, {} groups undated",
            report.operations.len(),
            report.rejected_lines(),
            report.bad_flagged(),
            report.undated_groups()
        );
        for p in written {
            println!("Wrote {}", p.display());
        }
    }
    Ok(())
}

fn cmd_preprocess(opts: &AppOptions, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let raw = store::load_history(&opts.input, &opts.reactions)?;
    let processed = preprocess(&raw);
    let path = opts.export.processed_path();
    store::save_messages_json(&path, &processed)?;
    if !quiet {
        println!("{} msgs input, processed into {}", raw.len(), processed.len());
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_export(cli: &CliArgs, opts: &AppOptions) -> Result<(), Box<dyn std::error::Error>> {
    // `--input` here names parsed ops, not a raw history
    let src = cli.input.clone().unwrap_or_else(|| opts.export.parsed_path());
    let ops = store::load_operations_json(&src)?;
    let written = write_tables(&opts.export, &ops)?;
    if !cli.quiet {
        for p in written {
            println!("Wrote {}", p.display());
        }
    }
    Ok(())
}

/// `[2022-05-21] OP with 8 members, 3 squads:` followed by one indented line per squad.
pub fn format_op_summary(op: &OperationAttendance) -> String {
    let mut s = format!(
        "[{}] OP with {} members, {} squads:\n",
        op.op_date,
        op.user_count(),
        op.squad_count()
    );
    for squad in &op.attendance {
        s.push_str("  ");
        s.push_str(&format_squad(squad));
        s.push('\n');
    }
    s
}

fn format_squad(squad: &SquadAttendance) -> String {
    let members: Vec<String> = squad
        .members
        .iter()
        .map(|m| match &m.role {
            Some(r) => format!("{} ({})", m.user, r),
            None => m.user.clone(),
        })
        .collect();
    join!(&squad.squad, ": ", &members.join(", "))
}

/// Diagnostics to `err` (stderr in the binary) as they happen, BAD-flag skips included.
struct ConsoleProgress<W: Write> {
    quiet: bool,
    err: W,
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn begin(&mut self, groups: usize) {
        if !self.quiet {
            println!("Segmented into {groups} op groups");
        }
    }

    fn log(&mut self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    fn diagnostic(&mut self, d: &Diagnostic) {
        if !self.quiet {
            let _ = writeln!(self.err, "{d}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SquadMember;
    use chrono::NaiveDate;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_is_run_with_defaults() {
        let cli = parse_args(args(&[])).unwrap();
        assert_eq!(cli, CliArgs::default());
        assert_eq!(cli.command, Command::Run);
    }

    #[test]
    fn command_and_flags() {
        let cli = parse_args(args(&["export", "--format", "tsv", "--no-headers", "-w", "4", "-q"])).unwrap();
        assert_eq!(cli.command, Command::Export);
        assert_eq!(cli.format, Some(ExportFormat::Tsv));
        assert_eq!(cli.include_headers, Some(false));
        assert_eq!(cli.workers, Some(4));
        assert!(cli.quiet);
    }

    #[test]
    fn command_only_counts_in_first_position() {
        assert!(parse_args(args(&["--debug", "export"])).is_err());
    }

    #[test]
    fn save_config_flag() {
        let cli = parse_args(args(&["--save-config", "-c", "my.conf"])).unwrap();
        assert!(cli.save_config);
        assert_eq!(config_path(&cli), PathBuf::from("my.conf"));
        assert_eq!(config_path(&CliArgs::default()), Path::new(STORE_DIR).join(CONFIG_FILE));
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(parse_args(args(&["--format", "xml"])).is_err());
        assert!(parse_args(args(&["--workers", "0"])).is_err());
        assert!(parse_args(args(&["--workers"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn flags_override_config() {
        let mut dir = std::env::temp_dir();
        dir.push("zeus_attendance_cli_conf");
        std::fs::create_dir_all(&dir).unwrap();
        let conf = dir.join("attendance.conf");
        std::fs::write(&conf, "format=tsv\nworkers=2\nout_dir=from_conf\n").unwrap();

        let mut cli = parse_args(args(&["--workers", "6"])).unwrap();
        cli.config = Some(conf);
        let opts = resolve_options(&cli);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.run.workers, 6);
        assert_eq!(opts.export.out_dir, PathBuf::from("from_conf"));
    }

    #[test]
    fn op_summary_layout() {
        let op = OperationAttendance {
            op_date: NaiveDate::from_ymd_opt(2022, 5, 21).unwrap(),
            attendance: vec![SquadAttendance {
                squad: s!("A1"),
                members: vec![SquadMember::new("Toll", Some("L")), SquadMember::new("BLoaf", None)],
            }],
        };
        assert_eq!(
            format_op_summary(&op),
            "[2022-05-21] OP with 2 members, 1 squads:\n  A1: Toll (L), BLoaf\n"
        );
    }

    #[test]
    fn console_shows_bad_flag_skips_once() {
        use crate::config::options::RunOptions;
        use crate::model::fixtures::{flagged, msg};
        use crate::model::AttendanceFlag;

        let history = vec![
            msg(1, 0, "A1: Toll(L)"),
            flagged(msg(2, 1, "B1: Fake"), AttendanceFlag::Bad),
            msg(3, 2, "chatter"),
        ];
        let mut console = ConsoleProgress { quiet: false, err: Vec::new() };
        let report = crate::runner::run(&history, &RunOptions::default(), Some(&mut console));
        assert_eq!(report.bad_flagged(), 1);

        let err = String::from_utf8(console.err).unwrap();
        assert_eq!(err.matches("B1: Fake").count(), 1);
        assert_eq!(err.matches("Bad squad match").count(), 1);
        assert_eq!(err.lines().count(), 2);
    }

    #[test]
    fn quiet_console_prints_nothing() {
        let mut console = ConsoleProgress { quiet: true, err: Vec::new() };
        console.diagnostic(&Diagnostic::Undated { group: 0, messages: 1 });
        assert!(console.err.is_empty());
    }

    #[test]
    fn help_mentions_every_command() {
        let h = help_text();
        for c in ["run", "preprocess", "export"] {
            assert!(h.contains(c));
        }
    }
}
