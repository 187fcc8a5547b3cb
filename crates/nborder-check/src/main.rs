use anyhow::Context;
use nborder_check::batch::BatchRunner;
use nborder_check::cli::{command, CliArgs};
use nborder_check::logging;

fn run(args: &CliArgs) -> anyhow::Result<bool> {
    let runner = BatchRunner::new(args.config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let report = runner
        .run(&args.filenames, &mut out)
        .context("notebook check aborted")?;

    for failure in &report.strip_failures {
        eprintln!(
            "warning: could not strip {}: {}",
            failure.path.display(),
            failure.message
        );
    }

    Ok(report.passed())
}

fn main() {
    let matches = command().get_matches();
    let args = CliArgs::from_matches(&matches);
    logging::init(args.log_level);

    match run(&args) {
        Ok(passed) => std::process::exit(if passed { 0 } else { 1 }),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
