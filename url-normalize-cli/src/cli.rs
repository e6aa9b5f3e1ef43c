use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use url_normalize::{NormalizationOptions, Normalizer};

/// Normalize URLs into a canonical form for deduplication and storage.
#[derive(Debug, Parser)]
#[command(name = "url-normalize", version)]
#[command(about = "Normalize URLs into a canonical form", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// URLs to normalize, taken verbatim. Reads one URL per line from stdin
    /// when omitted; stdin lines are trimmed and blank lines skipped.
    pub urls: Vec<String>,

    /// Load options from a TOML file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override an option, e.g. `-o strip_www=false`. Repeatable; applied last.
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Keep a leading `www.` on the host.
    #[arg(long)]
    pub keep_www: bool,

    /// Keep the `#fragment`.
    #[arg(long)]
    pub keep_fragment: bool,

    /// Drop the query string.
    #[arg(long)]
    pub strip_params: bool,

    /// Do not infer a scheme for schemeless input.
    #[arg(long)]
    pub no_protocol: bool,

    /// Give an empty path the root path `/`.
    #[arg(long)]
    pub add_root_path: bool,

    /// Remove trailing slashes from the path.
    #[arg(long)]
    pub trim_trailing_slash: bool,

    /// Lower-case the whole result.
    #[arg(long)]
    pub downcase: bool,

    /// Exit with an error if any URL is passed through unchanged.
    #[arg(long)]
    pub strict: bool,

    /// Print each distinct result once, in first-seen order.
    #[arg(long)]
    pub dedupe: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolves options: config file, then flags, then `-o` overrides.
    pub fn options(&self) -> Result<NormalizationOptions> {
        let mut options = match &self.config {
            Some(path) => load_config(path)?,
            None => NormalizationOptions::default(),
        };

        if self.keep_www {
            options.strip_www = false;
        }
        if self.keep_fragment {
            options.strip_fragment = false;
        }
        if self.no_protocol {
            options.normalize_protocol = false;
        }
        options.strip_params |= self.strip_params;
        options.add_root_path |= self.add_root_path;
        options.trim_trailing_slash |= self.trim_trailing_slash;
        options.downcase |= self.downcase;

        for pair in &self.overrides {
            options
                .apply_pair(pair)
                .with_context(|| format!("bad --option '{pair}'"))?;
        }

        Ok(options)
    }
}

/// Load options from a TOML file; missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<NormalizationOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let options = toml::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(options)
}

/// Counts from one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub normalized: usize,
    pub passed_through: usize,
}

/// Reads one input per line, trimmed, skipping blank lines.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader
        .lines()
        .map(|line| line.map(|line| line.trim().to_string()))
        .filter(|line| !matches!(line, Ok(line) if line.is_empty()))
}

/// Normalizes each input as given and writes one result per line.
pub fn process<I, W>(
    normalizer: &Normalizer,
    inputs: I,
    out: &mut W,
    dedupe: bool,
) -> Result<Summary>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut summary = Summary::default();
    let mut seen = HashSet::new();

    for line in inputs {
        let line = line.context("failed to read input")?;
        let input = line.as_str();

        let result = match normalizer.try_normalize(input) {
            Ok(normalized) => {
                summary.normalized += 1;
                normalized
            }
            Err(err) => {
                summary.passed_through += 1;
                tracing::warn!(input, reason = %err, "URL passed through unchanged");
                input.to_string()
            }
        };

        if dedupe && !seen.insert(result.clone()) {
            continue;
        }
        writeln!(out, "{result}")?;
    }

    Ok(summary)
}

pub fn run(cli: &Cli) -> Result<ExitCode> {
    let normalizer = Normalizer::new(cli.options()?);
    tracing::debug!(options = ?normalizer.options(), "resolved normalization options");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = if cli.urls.is_empty() {
        process(&normalizer, read_lines(io::stdin().lock()), &mut out, cli.dedupe)?
    } else {
        let inputs = cli.urls.iter().cloned().map(Ok);
        process(&normalizer, inputs, &mut out, cli.dedupe)?
    };
    out.flush()?;

    tracing::debug!(
        normalized = summary.normalized,
        passed_through = summary.passed_through,
        "done"
    );

    if cli.strict && summary.passed_through > 0 {
        eprintln!(
            "url-normalize: {} URL(s) could not be normalized",
            summary.passed_through
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn run_process(cli: &Cli, inputs: &[&str]) -> (String, Summary) {
        let normalizer = Normalizer::new(cli.options().unwrap());
        let mut out = Vec::new();
        let inputs = inputs.iter().map(|s| Ok(s.to_string()));
        let summary = process(&normalizer, inputs, &mut out, cli.dedupe).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn cli_parse_urls() {
        let cli = parse(&["url-normalize", "a.com", "b.com"]);
        assert_eq!(cli.urls, vec!["a.com", "b.com"]);
        assert!(!cli.strict);
        assert!(!cli.dedupe);
    }

    #[test]
    fn cli_parse_no_urls_reads_stdin() {
        let cli = parse(&["url-normalize"]);
        assert!(cli.urls.is_empty());
    }

    #[test]
    fn cli_default_options() {
        let cli = parse(&["url-normalize", "a.com"]);
        assert_eq!(cli.options().unwrap(), NormalizationOptions::default());
    }

    #[test]
    fn cli_flags_map_to_options() {
        let cli = parse(&[
            "url-normalize",
            "--keep-www",
            "--keep-fragment",
            "--strip-params",
            "--no-protocol",
            "--add-root-path",
            "--trim-trailing-slash",
            "--downcase",
        ]);
        let options = cli.options().unwrap();
        assert!(!options.strip_www);
        assert!(!options.strip_fragment);
        assert!(options.strip_params);
        assert!(!options.normalize_protocol);
        assert!(options.add_root_path);
        assert!(options.trim_trailing_slash);
        assert!(options.downcase);
    }

    #[test]
    fn cli_overrides_apply_last() {
        let cli = parse(&[
            "url-normalize",
            "--keep-www",
            "-o",
            "strip_www=true",
            "--option",
            "unknown_key=whatever",
        ]);
        assert!(cli.options().unwrap().strip_www);
    }

    #[test]
    fn cli_bad_override_is_an_error() {
        let cli = parse(&["url-normalize", "-o", "downcase=perhaps"]);
        assert!(cli.options().is_err());

        let cli = parse(&["url-normalize", "-o", "downcase"]);
        assert!(cli.options().is_err());
    }

    #[test]
    fn cli_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        fs::write(&path, "strip_www = false\nadd_root_path = true\n").unwrap();

        let cli = parse(&["url-normalize", "--config", path.to_str().unwrap()]);
        let options = cli.options().unwrap();
        assert!(!options.strip_www);
        assert!(options.add_root_path);
        assert!(options.strip_fragment);
    }

    #[test]
    fn cli_config_file_rejects_non_boolean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        fs::write(&path, "strip_www = \"no\"\n").unwrap();

        let cli = parse(&["url-normalize", "--config", path.to_str().unwrap()]);
        assert!(cli.options().is_err());
    }

    #[test]
    fn process_writes_one_line_per_input() {
        let cli = parse(&["url-normalize"]);
        let (out, summary) = run_process(&cli, &["www.a.com", "mailto:x@y.z"]);
        assert_eq!(out, "http://a.com\nmailto:x@y.z\n");
        assert_eq!(
            summary,
            Summary {
                normalized: 1,
                passed_through: 1
            }
        );
    }

    #[test]
    fn process_leaves_argument_whitespace_alone() {
        let cli = parse(&["url-normalize", " www.a.com"]);
        let (out, _) = run_process(&cli, &[" www.a.com"]);
        assert_eq!(out, "http:// www.a.com\n");
        assert_eq!(
            out.trim_end(),
            url_normalize::normalize(" www.a.com", &NormalizationOptions::default())
        );
    }

    #[test]
    fn read_lines_trims_and_skips_blank_lines() {
        let stdin = io::Cursor::new("  www.a.com \n\n   \nmailto:x@y.z\r\n");
        let lines: Vec<String> = read_lines(stdin).map(Result::unwrap).collect();
        assert_eq!(lines, vec!["www.a.com", "mailto:x@y.z"]);
    }

    #[test]
    fn stdin_lines_are_normalized_after_trimming() {
        let normalizer = Normalizer::default();
        let stdin = io::Cursor::new(" www.a.com\n\t\nb.com:443 \n");
        let mut out = Vec::new();
        let summary = process(&normalizer, read_lines(stdin), &mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "http://a.com\nhttps://b.com\n");
        assert_eq!(summary.normalized, 2);
    }

    #[test]
    fn process_dedupe_keeps_first_seen_order() {
        let cli = parse(&["url-normalize", "--dedupe"]);
        let (out, _) = run_process(
            &cli,
            &["b.com", "www.a.com", "http://b.com:80", "a.com#x"],
        );
        assert_eq!(out, "http://b.com\nhttp://a.com\n");
    }
}
