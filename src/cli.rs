mod args;

use std::io::Write;

pub use args::*;

use crate::composer::{self, BlockKind, FilterOptions};
use crate::error::TfblocksError;
use crate::locator;
use crate::matcher;
use crate::output::{self, RenderOptions};
use crate::providers::Registry;
use crate::resource::Resource;

/// Runs one command over the resources read from state and writes the result to `out`.
pub fn run<W: Write>(
    cli: &Cli,
    registry: &Registry,
    resources: &[Resource],
    out: &mut W,
) -> Result<(), TfblocksError> {
    let filter = cli.command.filter();
    let patterns = matcher::parse_patterns(&filter.addresses)?;
    let declarations = locator::scan_files(&locator::expand_paths(&filter.files));

    let mut options = FilterOptions {
        located_only: !filter.files.is_empty(),
        ..FilterOptions::default()
    };
    let (kind, destroy) = match &cli.command {
        Command::Import(args) => {
            options.supported_providers_only = args.supported_providers_only;
            (BlockKind::Import, false)
        }
        Command::Move(args) => {
            options.supported_providers_only = args.supported_providers_only;
            (BlockKind::Move, false)
        }
        Command::Remove(args) => (BlockKind::Remove, args.destroy),
        Command::List(_) => {
            let located = composer::select_located(resources, &patterns, &declarations, options);
            if located.is_empty() {
                if filter.is_filtering() {
                    tracing::warn!("no resources matched the given filters");
                }
                return Ok(());
            }
            let text = output::render_list(located.iter().map(|l| l.resource.address.as_str()));
            writeln!(out, "{text}")?;
            return Ok(());
        }
    };

    let composition =
        composer::compose(registry, resources, &patterns, kind, &declarations, options);
    if composition.selected == 0 && filter.is_filtering() {
        tracing::warn!("no resources matched the given filters");
    }
    if !composition.skipped.is_empty() {
        tracing::info!(
            count = composition.skipped.len(),
            "resources skipped, their {kind} blocks must be written by hand"
        );
    }
    if composition.blocks.is_empty() {
        return Ok(());
    }

    let text = output::render(
        &composition.blocks,
        RenderOptions {
            color: !cli.no_color,
            destroy,
        },
    );
    writeln!(out, "{text}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn resources() -> Vec<Resource> {
        vec![
            Resource::new(
                "aws_s3_bucket.this",
                "aws_s3_bucket",
                "this",
                None,
                json!({"bucket": "x"}),
            )
            .unwrap(),
            Resource::new(
                "aws_iam_role.unsupported_type_stub",
                "aws_iam_role",
                "unsupported_type_stub",
                None,
                json!({"name": "stub"}),
            )
            .unwrap(),
        ]
    }

    fn run_args(args: &[&str], resources: &[Resource]) -> String {
        let mut argv = vec!["tfblocks", "--no-color"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(&cli, Registry::builtin().unwrap(), resources, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_run_import() {
        let text = run_args(&["import"], &resources());
        assert_eq!(text, "import {\n  to = aws_s3_bucket.this\n  id = \"x\"\n}\n");
    }

    #[test]
    fn test_run_remove_with_destroy() {
        let text = run_args(&["remove", "--destroy", "aws_iam_role.*"], &resources());
        assert_eq!(
            text,
            "removed {\n  from = aws_iam_role.unsupported_type_stub\n  lifecycle {\n    destroy = true\n  }\n}\n"
        );
    }

    #[test]
    fn test_run_list() {
        let text = run_args(&["list"], &resources());
        assert_eq!(text, "aws_s3_bucket.this\naws_iam_role.unsupported_type_stub\n");
    }

    #[test]
    fn test_run_with_no_match_writes_nothing() {
        assert_eq!(run_args(&["import", "aws_lambda_function.*"], &resources()), "");
        assert_eq!(run_args(&["list", "module.absent"], &resources()), "");
    }

    #[test]
    fn test_run_invalid_pattern_is_error() {
        let cli = Cli::try_parse_from(["tfblocks", "import", "module..x"]).unwrap();
        let mut out = Vec::new();
        let err = run(&cli, Registry::builtin().unwrap(), &resources(), &mut out).unwrap_err();
        assert!(matches!(err, TfblocksError::Pattern(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_with_files_groups_and_filters() {
        let mut file = NamedTempFile::with_suffix(".tf").unwrap();
        writeln!(file, "resource \"aws_s3_bucket\" \"this\" {{\n  bucket = \"x\"\n}}").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let text = run_args(&["import", "--files", &path], &resources());

        assert!(text.starts_with(&"#".repeat(80)));
        assert!(text.contains(&format!("# Source file: {path}")));
        assert!(text.contains("to = aws_s3_bucket.this"));
        assert!(!text.contains("aws_iam_role"));
    }
}
