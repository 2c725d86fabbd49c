// src/config/file.rs
// Plain `key=value` config file. `#` starts a comment, unknown keys are ignored,
// unparsable values keep whatever was there before.
use std::{fs, io, path::Path};

use super::options::{AppOptions, ExportFormat};

/// Apply a config file on top of `opts`. Returns false when there is no file to read.
pub fn load(path: &Path, opts: &mut AppOptions) -> bool {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(_) => return false,
    };
    apply(&text, opts);
    logd!("Config: loaded {}", path.display());
    true
}

pub fn apply(text: &str, opts: &mut AppOptions) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some(eq) = line.find('=') else {
            logw!("Config: ignoring line without '=': {line}");
            continue;
        };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();
        match key {
            "input" => opts.input = val.into(),
            "out_dir" => opts.export.set_out_dir(val),
            "format" => match ExportFormat::parse(val) {
                Some(f) => opts.export.format = f,
                None => logw!("Config: unknown format '{val}'"),
            },
            "include_headers" => opts.export.include_headers = parse_bool(val),
            "dump_processed" => opts.export.dump_processed = parse_bool(val),
            "workers" => match val.parse::<usize>() {
                Ok(n) => opts.run.set_workers(n),
                Err(_) => logw!("Config: workers must be a number, got '{val}'"),
            },
            "emoji_bad" => opts.reactions.bad = val.to_string(),
            "emoji_good" => opts.reactions.good = val.to_string(),
            "emoji_op_delimiter" => opts.reactions.op_delimiter = val.to_string(),
            _ => {}
        }
    }
}

pub fn save(path: &Path, opts: &AppOptions) -> io::Result<()> {
    let mut s = s!();
    s.push_str(&format!("input={}\n", opts.input.display()));
    s.push_str(&format!("out_dir={}\n", opts.export.out_dir.display()));
    s.push_str(&format!("format={}\n", opts.export.format.ext()));
    s.push_str(&format!("include_headers={}\n", if opts.export.include_headers {1} else {0}));
    s.push_str(&format!("dump_processed={}\n", if opts.export.dump_processed {1} else {0}));
    s.push_str(&format!("workers={}\n", opts.run.workers));
    s.push_str(&format!("emoji_bad={}\n", opts.reactions.bad));
    s.push_str(&format!("emoji_good={}\n", opts.reactions.good));
    s.push_str(&format!("emoji_op_delimiter={}\n", opts.reactions.op_delimiter));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; }
    }
    fs::write(path, s)
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
}
