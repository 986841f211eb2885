//! Command-line front end.
//!
//! Configuration errors exit 1 with usage help; per-file errors are
//! reported in the run summary and still exit 0.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use audiobook_tags::config::{
    self, DEFAULT_ENCODING, DEFAULT_SUFFIX, DEFAULT_TITLE_PREFIX, OrderDirective, RunConfig,
};
use audiobook_tags::encoding;
use audiobook_tags::error::ConfigError;
use audiobook_tags::pipeline;

#[derive(Parser)]
#[command(
    name = "audiobook-tags",
    version,
    about = "Fixes mp3 tags for audiobook players"
)]
struct Cli {
    /// Folder to process
    #[arg(default_value = ".")]
    folder: PathBuf,

    /// File suffix to match
    #[arg(short, long, default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// Tag text encoding; "none" skips the encoding fix
    #[arg(short, long, default_value = DEFAULT_ENCODING)]
    encoding: String,

    /// Set a tag to a literal value (repeatable)
    #[arg(short, long = "tag", value_name = "NAME/VALUE")]
    tag: Vec<String>,

    /// Sort files and number tracks: "name" sorts by file name,
    /// "tag-<FIELD>" by that tag field's value
    #[arg(short, long = "num", value_name = "ORDER")]
    num: Option<String>,

    /// Title prefix template; "{track:04} - " when --num is given
    #[arg(short, long = "prefix", value_name = "TEMPLATE")]
    prefix: Option<String>,

    /// Report what would change without writing files
    #[arg(short, long)]
    dry: bool,
}

fn build_config(cli: Cli) -> Result<RunConfig, ConfigError> {
    encoding::validate_label(&cli.encoding)?;

    let order = match cli.num.as_deref() {
        None => OrderDirective::None,
        Some(raw) => OrderDirective::parse(raw)?,
    };
    let overrides = config::parse_overrides(&cli.tag)?;

    let title_prefix = cli.prefix.unwrap_or_else(|| {
        if order == OrderDirective::None {
            String::new()
        } else {
            DEFAULT_TITLE_PREFIX.to_string()
        }
    });

    Ok(RunConfig {
        root: cli.folder,
        suffix: cli.suffix,
        encoding: cli.encoding,
        overrides,
        order,
        title_prefix,
        dry_run: cli.dry,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match build_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}\n");
            let _ = Cli::command().print_help();
            return ExitCode::FAILURE;
        }
    };

    match pipeline::run(&config) {
        Ok(result) => {
            println!(
                "{} files fixed, {} failed{}",
                result.success_count(),
                result.failure_count(),
                if config.dry_run { " (dry run)" } else { "" },
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = build_config(parse(&["audiobook-tags"])).unwrap();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.suffix, "mp3");
        assert_eq!(config.encoding, "cp1251");
        assert_eq!(config.order, OrderDirective::None);
        assert_eq!(config.title_prefix, "");
        assert!(!config.dry_run);
    }

    #[test]
    fn num_enables_the_default_title_prefix() {
        let config = build_config(parse(&["audiobook-tags", "--num", "name"])).unwrap();
        assert_eq!(config.order, OrderDirective::ByFileName);
        assert_eq!(config.title_prefix, DEFAULT_TITLE_PREFIX);
    }

    #[test]
    fn explicit_prefix_beats_the_default() {
        let config = build_config(parse(&[
            "audiobook-tags",
            "--num",
            "name",
            "--prefix",
            "{track} / ",
        ]))
        .unwrap();
        assert_eq!(config.title_prefix, "{track} / ");
    }

    #[test]
    fn bad_ordering_directive_is_a_config_error() {
        let err = build_config(parse(&["audiobook-tags", "--num", "bogus"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOrderDirective(_)));
    }

    #[test]
    fn bad_encoding_is_a_config_error() {
        let err = build_config(parse(&["audiobook-tags", "--encoding", "klingon"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEncoding(_)));
    }

    #[test]
    fn malformed_tag_override_is_a_config_error() {
        let err = build_config(parse(&["audiobook-tags", "--tag", "artistX"])).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedTagOverride { .. }));
    }
}
