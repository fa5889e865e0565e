use std::path::PathBuf;

use anyhow::{anyhow, Result};
use getopts::Options;
use polyderiv::challenge::suite::builtin_cases;
use polyderiv::challenge::{ManyTestcases, Testcase};
use polyderiv::settings::Settings;
use serde_json::Value;
use uuid::Uuid;

fn main() -> Result<()> {
    let args: Vec<_> = std::env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let mut opts = Options::new();
    opts.parsing_style(getopts::ParsingStyle::FloatingFrees);
    opts.optflag("h", "help", "print this help menu");
    opts.optflag(
        "V",
        "version",
        &format!("print the version of {}", env!("CARGO_PKG_NAME")),
    );
    opts.optflag("v", "verbose", "print debug information to stderr");
    opts.optopt(
        "t",
        "threads",
        "how many testcases to solve in parallel, defaults to the number of CPUs",
        "N",
    );
    opts.optflag("e", "example", "print an example challenge definition");

    let matches = match opts.parse(args.get(1..).unwrap_or_default()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{e}");
            usage_and_exit(&opts, &program);
        }
    };

    if matches.opt_present("help") {
        eprintln!("{}", opts.usage(&opts.short_usage(&program)));
        std::process::exit(0);
    }

    if matches.opt_present("version") {
        eprintln!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    if matches.opt_present("example") {
        return print_example();
    }

    let threads: Option<usize> = matches
        .opt_get("threads")
        .inspect_err(|e| eprintln!("! threads must be a positive number: {e}"))?;
    if threads == Some(0) {
        return Err(anyhow!("at least one thread is needed"));
    }
    let settings = Settings {
        verbose: matches.opt_present("verbose"),
        threads,
    };

    match matches.free.as_slice() {
        [] => run_self_test(),
        [path] => run_challenge_file(path.into(), settings),
        _ => {
            eprintln!("! only one challenge definition can be given");
            usage_and_exit(&opts, &program);
        }
    }
}

fn run_self_test() -> Result<()> {
    let cases = builtin_cases();
    if let Some(passed) =
        polyderiv::challenge::suite::run_self_test(&cases, &mut std::io::stdout().lock())
    {
        eprintln!("* {passed}/{} test cases passed", cases.len());
    }
    Ok(())
}

fn run_challenge_file(path: PathBuf, settings: Settings) -> Result<()> {
    eprintln!("* Path of the challenge definition: {:?}", path);
    eprintln!("* Reading the challenge definition into memory");

    let raw_text = std::fs::read_to_string(&path)
        .inspect_err(|e| eprintln!("! Could not read the challenge definition file: {e}"))?;
    let json_value: Value = serde_json::from_str(&raw_text).inspect_err(|e| {
        eprintln!("! Could not parse the text of the challenge definition file as JSON: {e}")
    })?;
    if settings.verbose {
        eprintln!("? challenge definition: {json_value:#}");
    }

    // print our response to stdout
    println!(
        "{}",
        polyderiv::challenge::run_challenges(&json_value, settings)?
    );

    Ok(())
}

fn print_example() -> Result<()> {
    eprintln!(
        "? Example Testcase\n{:#}",
        serde_json::to_value(Testcase::default())?
    );

    let mut exhm = ManyTestcases::new();
    exhm.insert(Uuid::default(), Testcase::default());
    eprintln!("? Example challenge definition");
    println!("{:#}", serde_json::json!({ "testcases": exhm }));
    Ok(())
}

// `!` is a pseudo type and means the function will never return
fn usage_and_exit(opts: &Options, program: &str) -> ! {
    eprintln!("{}", opts.short_usage(program));
    std::process::exit(1);
}
