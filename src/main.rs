use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use arbor::{ParseError, ParseErrorKind};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use tracing::*;

use crate::config::Config;

mod config;
mod logging;
mod query;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to a JSON document. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Print only the value at this dot-separated path, e.g. `items.0.name`.
    #[arg(short, long)]
    query: Option<String>,

    /// Ignore whatever follows the top-level value instead of rejecting the document.
    /// `--allow-trailing=false` turns this off again when the config or environment enables it.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    allow_trailing: Option<bool>,

    /// Maximum number of nested arrays/objects.
    #[arg(long)]
    max_depth: Option<usize>,

    /// A TOML configuration file. Environment variables override it; flags override both.
    #[arg(long)]
    config: Option<PathBuf>,
}

type DiagnosticReport<'a> = Report<'a, (&'a String, Range<usize>)>;

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(?cli);

    let config = Config::load_from(cli.config.as_deref()).context("failed to load config")?;
    debug!(?config);

    let mut options = config.parse_options();
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    if let Some(allow_trailing) = cli.allow_trailing {
        options = options.with_trailing_input(allow_trailing);
    }

    let (path, json_string) = read_input(cli.input.as_deref())?;

    let document = match arbor::parse_with_options(&json_string, options) {
        Ok(document) => document,
        Err(e) => {
            debug!(location = %e.location(&json_string), error = ?e);
            syntax_error_report(&path, &json_string, &e)
                .eprint((&path, Source::from(&json_string)))?;
            bail!("failed to parse JSON document `{path}`");
        }
    };

    debug!(value_type = %document.value_type(), "parsed document");

    let selected = match &cli.query {
        Some(query) => query::select(&document, query)
            .with_context(|| format!("failed to select `{query}`"))?,
        None => &document,
    };

    println!("{selected}");

    Ok(())
}

fn read_input(input: Option<&Path>) -> anyhow::Result<(String, String)> {
    match input {
        Some(path) if path != Path::new("-") => match std::fs::read_to_string(path) {
            Ok(file) => Ok((path.display().to_string(), file)),
            Err(e) => {
                error!(?path, "failed to read input");
                Err(e).with_context(|| format!("failed to read file `{}`", path.display()))
            }
        },
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(("<stdin>".to_owned(), buf))
        }
    }
}

fn syntax_error_report<'a>(path: &'a String, src: &str, e: &ParseError) -> DiagnosticReport<'a> {
    // `ariadne` addresses the source by `char`, the parser by byte.
    let range = e.span.char_range(src);
    let location = e.location(src);

    let mut report = Report::build(ReportKind::Error, path, range.start)
        .with_message(format!(
            "invalid JSON at {}",
            format!("{path}:{location}").fg(Color::Blue)
        ))
        .with_label(
            Label::new((path, range))
                .with_message(e.kind.to_string())
                .with_color(Color::Red),
        );

    match e.kind {
        ParseErrorKind::TrailingCharacters => report.set_help(format!(
            "pass {} to ignore text after the document",
            "--allow-trailing".fg(Color::Blue)
        )),
        ParseErrorKind::NestingTooDeep { .. } => report.set_help(format!(
            "raise the limit with {}",
            "--max-depth".fg(Color::Blue)
        )),
        ParseErrorKind::TrailingComma(_) => report.set_help("remove the trailing comma"),
        _ => {}
    }

    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_trailing_takes_an_optional_value() {
        let parse = |args: &[&str]| Args::try_parse_from(args.iter().copied()).unwrap().allow_trailing;
        assert_eq!(parse(&["arbor"]), None);
        assert_eq!(parse(&["arbor", "--allow-trailing"]), Some(true));
        assert_eq!(parse(&["arbor", "--allow-trailing=false"]), Some(false));

        let args = Args::try_parse_from(["arbor", "--allow-trailing", "doc.json"]).unwrap();
        assert_eq!(args.allow_trailing, Some(true));
        assert_eq!(args.input, Some(PathBuf::from("doc.json")));
    }

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
