// src/runner.rs
// Pipeline: preprocess → segment → parse every line of every op → assemble.
use std::{
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }},
    thread,
};

use crate::{
    config::options::RunOptions,
    error::{AttendanceError, Result},
    model::{AttendanceMessage, OperationAttendance},
    parse::{get_op_date, parse_line, LineRejection},
    preprocess::preprocess,
    progress::{Diagnostic, Progress},
    segment::{segment, OpGroup},
};

/// Everything a run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// In chronological group order.
    pub operations: Vec<OperationAttendance>,
    pub diagnostics: Vec<Diagnostic>,
    /// Op groups out of segmentation, empty ones included.
    pub groups: usize,
    pub skipped_empty: usize,
}

impl Report {
    pub fn rejected_lines(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Line { kind: LineRejection::NoMatch, .. }))
            .count()
    }

    pub fn bad_flagged(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Line { kind: LineRejection::BadFlag, .. }))
            .count()
    }

    pub fn undated_groups(&self) -> usize {
        self.diagnostics.iter().filter(|d| matches!(d, Diagnostic::Undated { .. })).count()
    }
}

/// One op plus whatever its lines were dropped for.
type Assembled = (OperationAttendance, Vec<Diagnostic>);

/// Plain entry point: raw history in, ops out. Diagnostics are only logged.
pub fn extract(raw: &[AttendanceMessage]) -> Vec<OperationAttendance> {
    run(raw, &RunOptions::default(), None).operations
}

/// Full run over a raw (unprocessed) history.
pub fn run(
    raw: &[AttendanceMessage],
    opts: &RunOptions,
    progress: Option<&mut dyn Progress>,
) -> Report {
    run_preprocessed(preprocess(raw), opts, progress)
}

/// Run over messages that already went through [`preprocess`].
pub fn run_preprocessed(
    messages: Vec<AttendanceMessage>,
    opts: &RunOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Report {
    let groups = segment(messages);
    let total = groups.len();

    let jobs: Vec<(usize, OpGroup)> = groups
        .into_iter()
        .enumerate()
        .filter(|(_, g)| !g.is_empty())
        .collect();
    let skipped_empty = total - jobs.len();
    if skipped_empty > 0 {
        logd!("Runner: skipping {skipped_empty} empty op groups");
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
        if skipped_empty > 0 {
            p.log(&format!("{skipped_empty} empty op groups skipped"));
        }
    }

    let outcomes = if opts.workers > 1 && jobs.len() > 1 {
        assemble_parallel(jobs, opts.workers)
    } else {
        jobs.iter().map(|(i, g)| (*i, assemble_operation(g))).collect()
    };

    let mut report = Report { groups: total, skipped_empty, ..Report::default() };

    for (group, outcome) in outcomes {
        let diags = match outcome {
            Ok((op, diags)) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.op_done(op.op_date, op.squad_count());
                }
                report.operations.push(op);
                diags
            }
            Err(AttendanceError::UndatedOperation { messages }) => {
                vec![Diagnostic::Undated { group, messages }]
            }
            Err(e) => {
                loge!("Runner: op group #{group}: {e}");
                continue;
            }
        };
        for d in diags {
            // A sink owns operator output; without one, the log does
            match progress.as_deref_mut() {
                Some(p) => p.diagnostic(&d),
                None => match &d {
                    Diagnostic::Line { kind: LineRejection::BadFlag, .. } => logf!("{d}"),
                    _ => logw!("{d}"),
                },
            }
            report.diagnostics.push(d);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!(
        "Runner: {} ops from {} groups, {} lines rejected",
        report.operations.len(),
        report.groups,
        report.rejected_lines()
    );
    report
}

/// Date one non-empty op group and parse each of its lines, keeping message order.
pub fn assemble_operation(group: &[AttendanceMessage]) -> Result<Assembled> {
    let op_date = get_op_date(group)?;
    let mut attendance = Vec::with_capacity(group.len());
    let mut diagnostics = Vec::new();

    for msg in group {
        match parse_line(msg) {
            Ok(squad) => attendance.push(squad),
            Err(kind) => diagnostics.push(Diagnostic::Line {
                kind,
                op_date,
                author: msg.author_display.clone(),
                text: msg.message.clone(),
            }),
        }
    }
    Ok((OperationAttendance { op_date, attendance }, diagnostics))
}

/// Same as mapping [`assemble_operation`] over `jobs`, on a small thread pool.
/// Results come back sorted by group index.
fn assemble_parallel(
    jobs: Vec<(usize, OpGroup)>,
    workers: usize,
) -> Vec<(usize, Result<Assembled>)> {
    let expected = jobs.len();
    let jobs = Arc::new(jobs);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Assembled>)>();

    let workers = workers.min(expected).max(1);
    logd!("Runner: assembling {expected} ops on {workers} workers");

    for _ in 0..workers {
        let jobs = Arc::clone(&jobs);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(move || loop {
            let i = idx.fetch_add(1, Ordering::Relaxed);
            if i >= jobs.len() {
                break;
            }
            let (group, msgs) = &jobs[i];
            if tx.send((*group, assemble_operation(msgs))).is_err() {
                break;
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    let mut out: Vec<(usize, Result<Assembled>)> = res_rx.iter().collect();
    if out.len() != expected {
        loge!("Runner: {} of {expected} op groups came back from workers", out.len());
    }
    out.sort_by_key(|(group, _)| *group);
    out
}
