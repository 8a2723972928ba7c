//! rulelight - highlight a file with a reloadable rule set

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use rulelight::config::Config;
use rulelight::error::{Error, Result};
use rulelight::logger;
use rulelight::terminal::{span_columns, StyledWriter};
use rulelight::{Highlighter, LoadError, RuleFormat};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    rules: Vec<PathBuf>,
    format: Option<RuleFormat>,
    config: Option<PathBuf>,
    spans: bool,
    line_numbers: bool,
    dump_rules: bool,
    verbosity: i32,
    help: bool,
    version: bool,
    file: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let opts = parse_args(&args)?;

    if opts.help {
        print_usage();
        return Ok(());
    }
    if opts.version {
        print_version();
        return Ok(());
    }

    let config = match &opts.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    logger::init(logger::adjust_level(config.log_level, opts.verbosity))
        .map_err(|e| Error::Message(e.to_string()))?;

    let highlighter = Highlighter::new();
    let format = opts.format.or(config.format);

    let sources = config.rules.iter().chain(opts.rules.iter());
    for problem in reload_rules(&highlighter, sources, format) {
        if problem.is_fatal() {
            eprintln!("Error: {}", problem);
        } else {
            eprintln!("Warning: {}", problem);
        }
    }

    if opts.dump_rules {
        dump_rules(&highlighter);
        return Ok(());
    }

    let text = match &opts.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let line_numbers = opts.line_numbers || config.show_line_numbers;
    let mut writer = StyledWriter::new(io::stdout().lock(), config.color && !opts.spans);

    for (idx, line) in text.lines().enumerate() {
        if opts.spans {
            for span in highlighter.highlight(line) {
                let (start, end) = span_columns(line, &span);
                writer.write_str(&format!(
                    "{}:{}-{}\t{}\t{:?}\n",
                    idx + 1,
                    start + 1,
                    end + 1,
                    span.style,
                    span.slice(line)
                ))?;
            }
            continue;
        }

        if line_numbers {
            writer.write_gutter(idx + 1)?;
        }
        writer.write_line(line, &highlighter.highlight_runs(line))?;
    }

    writer.flush()
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => opts.help = true,
            "-V" | "--version" => opts.version = true,
            "-r" | "--rules" => opts.rules.push(PathBuf::from(value(&mut iter, arg)?)),
            "-f" | "--format" => {
                let name = value(&mut iter, arg)?;
                opts.format = Some(name.parse().map_err(Error::Usage)?);
            }
            "-c" | "--config" => opts.config = Some(PathBuf::from(value(&mut iter, arg)?)),
            "-s" | "--spans" => opts.spans = true,
            "-n" | "--line-numbers" => opts.line_numbers = true,
            "--dump-rules" => opts.dump_rules = true,
            "-v" => opts.verbosity += 1,
            "-q" => opts.verbosity -= 1,
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(Error::Usage(format!("unknown option `{}` (try --help)", flag)));
            }
            file => {
                if opts.file.is_some() {
                    return Err(Error::Usage("only one input file may be given".to_string()));
                }
                if file != "-" {
                    opts.file = Some(PathBuf::from(file));
                }
            }
        }
    }

    Ok(opts)
}

fn value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| Error::Usage(format!("option `{}` needs a value", flag)))
}

/// Load each rule source in turn
///
/// Each source is a reload, so a failure keeps whatever loaded before it.
/// Returns the failed loads and the records skipped by successful ones.
fn reload_rules<'a, I>(
    highlighter: &Highlighter,
    sources: I,
    format: Option<RuleFormat>,
) -> Vec<LoadError>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let mut problems = Vec::new();
    for path in sources {
        match highlighter.load_rules_from_path(path, format) {
            Ok(report) => problems.extend(report.rejected),
            Err(e) => problems.push(e),
        }
    }
    problems
}

fn dump_rules(highlighter: &Highlighter) {
    let rules = highlighter.current_rule_set();
    println!(
        "# {} ({} rules)",
        rules.name().unwrap_or("unnamed rule set"),
        rules.len()
    );
    for (idx, rule) in rules.iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:<28} {}",
            idx + 1,
            rule.name().unwrap_or("-"),
            rule.style().to_string(),
            rule.pattern()
        );
    }
}

fn print_usage() {
    println!("rulelight {} - rule-driven syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: rulelight [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or stdin) and prints it highlighted.");
    println!();
    println!("Options:");
    println!("  -r, --rules PATH    Load a rule-definition document (repeatable)");
    println!("  -f, --format FMT    Format of rule documents: toml or json");
    println!("  -c, --config PATH   Read configuration from PATH");
    println!("  -s, --spans         List styled spans instead of rendering");
    println!("  -n, --line-numbers  Show line numbers");
    println!("      --dump-rules    Print the active rule set and exit");
    println!("  -v, -q              More / less diagnostic output");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!();
    println!("Rule document (TOML):");
    println!("  [[rule]]");
    println!("  color = \"dark-blue\"   # blue dark-blue gray light-gray red green");
    println!("  style = \"bold\"        # bold italic normal");
    println!("  pattern = '\\bint\\b'");
    println!();
    println!("XML .tax templates are not read; convert them to the form above.");
}

fn print_version() {
    println!("rulelight {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let opts = parse_args(&args(&[
            "-r", "a.toml", "--rules", "b.json", "-f", "json", "-s", "-v", "-v", "main.cpp",
        ]))
        .unwrap();
        assert_eq!(opts.rules, vec![PathBuf::from("a.toml"), PathBuf::from("b.json")]);
        assert_eq!(opts.format, Some(RuleFormat::Json));
        assert!(opts.spans);
        assert_eq!(opts.verbosity, 2);
        assert_eq!(opts.file, Some(PathBuf::from("main.cpp")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(&args(&["--bogus"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["-r"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["-f", "xml"])), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args(&["a", "b"])), Err(Error::Usage(_))));
    }

    #[test]
    fn test_stdin_dash() {
        let opts = parse_args(&args(&["-"])).unwrap();
        assert_eq!(opts.file, None);
    }

    #[test]
    fn test_reload_rules_reports_failures() {
        let dir = std::env::temp_dir();
        let bad = dir.join(format!("rulelight-bad-{}.toml", process::id()));
        let missing = dir.join(format!("rulelight-missing-{}.toml", process::id()));
        fs::write(&bad, "[[rule]\npattern = 'x'").unwrap();

        let highlighter = Highlighter::new();
        let before = highlighter.current_rule_set();
        let problems = reload_rules(&highlighter, [&bad, &missing], None);
        let _ = fs::remove_file(&bad);

        assert_eq!(problems.len(), 2);
        assert!(problems.iter().all(LoadError::is_fatal));
        assert!(matches!(problems[0], LoadError::MalformedDocument { .. }));
        assert!(matches!(problems[1], LoadError::SourceUnavailable { .. }));
        assert_eq!(highlighter.current_rule_set(), before);
    }

    #[test]
    fn test_reload_rules_reports_skipped_records() {
        let path = std::env::temp_dir().join(format!("rulelight-mixed-{}.toml", process::id()));
        fs::write(
            &path,
            "[[rule]]\ncolor = 'purple'\npattern = 'a'\n\n[[rule]]\ncolor = 'red'\npattern = 'b'\n",
        )
        .unwrap();

        let highlighter = Highlighter::new();
        let problems = reload_rules(&highlighter, [&path], None);
        let _ = fs::remove_file(&path);

        assert_eq!(problems.len(), 1);
        assert!(!problems[0].is_fatal());
        assert_eq!(highlighter.current_rule_set().len(), 1);
    }
}
