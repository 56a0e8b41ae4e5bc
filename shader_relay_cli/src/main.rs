mod args;
mod output;

use args::Args;
use clap::Parser;
use colored::Colorize;
use output::ArtifactWriter;
use shader_relay::relay::log;
use shader_relay::relay::{BatchCoordinator, Error, ErrorKind, Job, Result, SkipReason};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status for command-line usage errors
const USAGE_EXIT_CODE: u8 = 64;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version also arrive here, on stdout
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    log::set_min_severity(args.log_severity());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                Error::InputNotFound(_) => println!("{}", err),
                _ => eprintln!("{} {}", "error:".red().bold(), err),
            }
            ExitCode::from(exit_code(err.kind()))
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // Nothing touches the filesystem until every input has been read
    check_inputs(&args.input)?;
    let jobs = load_jobs(&args.input)?;
    let relay = BatchCoordinator::new(args.relay_config())?;

    let writer = ArtifactWriter::new(&args.output);
    writer.prepare()?;

    let outputs = relay.compile(jobs, args.output_formats())?;

    for output in &outputs {
        let name = &output.shader.name;
        let report = writer.write(output)?;
        for (format, reason) in &report.skipped {
            println!(
                "{} {}: {}, not writing {}",
                "skipped".yellow(),
                name,
                describe(*reason),
                writer.derived_path(name, *format).display()
            );
        }
        println!("{} {} ({} files)", "compiled".green(), name, report.written.len());
    }
    Ok(())
}

/// First input that is empty or missing on disk
fn check_inputs(inputs: &[PathBuf]) -> Result<()> {
    match inputs
        .iter()
        .find(|path| path.as_os_str().is_empty() || !path.exists())
    {
        Some(path) => Err(Error::InputNotFound(path.clone())),
        None => Ok(()),
    }
}

/// One job per input, named after the file's basename
fn load_jobs(inputs: &[PathBuf]) -> Result<Vec<Job>> {
    inputs
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| Error::InputUnreadable {
                    path: path.clone(),
                    reason: "no usable file name".to_string(),
                })?;
            let source = fs::read(path).map_err(|e| Error::InputUnreadable {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            Ok(Job::new(name, source))
        })
        .collect()
}

fn describe(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NoConstantBuffer => "no constant buffer",
    }
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InputNotFound => 2,
        ErrorKind::ResultMissing => 3,
        ErrorKind::MalformedControlBlock => 4,
        ErrorKind::CleanupError => 5,
        ErrorKind::PublishFailed => 6,
        ErrorKind::OutputWriteFailed => 7,
        ErrorKind::InvalidConfig => 8,
    }
}
