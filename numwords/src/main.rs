use clap::{Arg, ArgAction, ArgMatches, Command};
use numwords::{ConvertResult, Converter, LocaleRegistry};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let locale = Arg::new("locale")
        .long("locale")
        .short('l')
        .help("Locale of the number words (e.g., en, en-GB, es)")
        .default_value("en");
    let separator = Arg::new("separator")
        .long("separator")
        .short('s')
        .help("Separator between groups of three digits")
        .default_value(".");

    Command::new("numwords")
        .version("0.1.0")
        .about("Convert numbers to words and words to numbers")
        .subcommand_required(true)
        .arg(
            Arg::new("locales-dir")
                .long("locales-dir")
                .short('d')
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory with extra locale tables (default: $NUMWORDS_LOCALES_DIR)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log locale loading and conversion details")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("from")
                .about("Spell out a number")
                .arg(
                    Arg::new("number")
                        .help("Digits, optionally grouped with the separator")
                        .required(true)
                        .index(1),
                )
                .arg(locale.clone())
                .arg(separator.clone()),
        )
        .subcommand(
            Command::new("to")
                .about("Turn number words back into digits")
                .arg(
                    Arg::new("words")
                        .help("Number words, phrases separated by \", \"")
                        .required(true)
                        .index(1),
                )
                .arg(locale)
                .arg(separator),
        )
        .subcommand(Command::new("locales").about("List available locales"))
}

fn registry(matches: &ArgMatches) -> ConvertResult<LocaleRegistry> {
    let dir = matches
        .get_one::<PathBuf>("locales-dir")
        .cloned()
        .or_else(|| env::var_os("NUMWORDS_LOCALES_DIR").map(PathBuf::from));
    match dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "loading locale directory");
            LocaleRegistry::with_dir(&dir)
        }
        None => LocaleRegistry::builtin(),
    }
}

fn converter(matches: &ArgMatches, registry: &LocaleRegistry) -> ConvertResult<Converter> {
    let locale = matches
        .get_one::<String>("locale")
        .map(String::as_str)
        .unwrap_or("en");
    let separator = matches
        .get_one::<String>("separator")
        .map(String::as_str)
        .unwrap_or(".");
    registry.converter(locale, separator)
}

fn run(matches: &ArgMatches) -> ConvertResult<String> {
    let registry = registry(matches)?;
    match matches.subcommand() {
        Some(("from", sub)) => {
            let number = sub.get_one::<String>("number").map(String::as_str).unwrap_or("");
            converter(sub, &registry)?.from_number(number)
        }
        Some(("to", sub)) => {
            let words = sub.get_one::<String>("words").map(String::as_str).unwrap_or("");
            converter(sub, &registry)?.to_number(words)
        }
        _ => Ok(registry.available_locales().join("\n")),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    match run(&matches) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> ConvertResult<String> {
        let matches = cli().try_get_matches_from(args).unwrap();
        run(&matches)
    }

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_from_subcommand() {
        assert_eq!(
            run_args(&["numwords", "from", "10.001.000"]).unwrap(),
            "ten million, one thousand"
        );
        assert_eq!(
            run_args(&["numwords", "from", "1,212", "--separator", ",", "--locale", "en-GB"])
                .unwrap(),
            "one thousand, two hundred and twelve"
        );
    }

    #[test]
    fn test_to_subcommand() {
        assert_eq!(
            run_args(&["numwords", "to", "noventa y nueve", "-l", "es"]).unwrap(),
            "99"
        );
    }

    #[test]
    fn test_locales_subcommand() {
        let output = run_args(&["numwords", "locales"]).unwrap();
        assert!(output.lines().any(|line| line == "en"));
        assert!(output.lines().any(|line| line == "es"));
    }

    #[test]
    fn test_unknown_locale() {
        assert!(run_args(&["numwords", "from", "1", "--locale", "xx"]).is_err());
    }
}
