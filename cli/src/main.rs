#![allow(clippy::print_stdout)]
use crate::cli::{Args, OutputFormat};
use anyhow::Context;
use clap::Parser;
use ontometrics::{BatchOptions, ReportFormat};
use tracing::info;

mod cli;
mod logger;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::initialize(&args.log_level, args.log_format);

    let mut options = BatchOptions::new(args.input_dir, args.output);
    if let Some(format) = args.format {
        options = options.with_format(match format {
            OutputFormat::Xlsx => ReportFormat::Xlsx,
            OutputFormat::Csv => ReportFormat::Csv,
        });
    }

    let report = ontometrics::run(options.input_dir()).with_context(|| {
        format!(
            "Failed to analyze the ontologies of {}",
            options.input_dir().display()
        )
    })?;
    ontometrics::export(&report, options.output(), options.format()).with_context(|| {
        format!(
            "Failed to write the report to {}",
            options.output().display()
        )
    })?;
    info!(
        output = %options.output().display(),
        format = %options.format(),
        files = report.files.len(),
        skipped = report.skipped.len(),
        "Report written"
    );

    println!(
        "Ontology metrics saved to {}",
        options.output().display()
    );
    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.name, skipped.error.reason());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic_in_result_fn)]

    use super::*;
    use anyhow::Result;
    use assert_cmd::Command;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use predicates::prelude::*;
    use std::fs;

    const ZOO: &str = "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
        @prefix ex: <http://example.com/> .\n\
        ex:Animal a owl:Class .\n\
        ex:hasName a owl:DatatypeProperty .\n\
        ex:Dog a ex:Animal ; ex:hasName \"Rex\" .\n";

    fn cli_command() -> Result<Command> {
        let mut command = Command::from_std(
            escargot::CargoBuild::new()
                .bin("ontometrics")
                .manifest_path(format!("{}/Cargo.toml", env!("CARGO_MANIFEST_DIR")))
                .run()?
                .command(),
        );
        command.env_remove("RUST_LOG");
        command.env_remove("ONTOMETRICS_INPUT_DIR");
        command.env_remove("ONTOMETRICS_OUTPUT");
        Ok(command)
    }

    fn input_dir(files: &[(&str, &str)]) -> Result<TempDir> {
        let dir = TempDir::new()?;
        dir.child("ttl").create_dir_all()?;
        for (name, content) in files {
            dir.child("ttl").child(name).write_str(content)?;
        }
        Ok(dir)
    }

    #[test]
    fn cli_help() -> Result<()> {
        cli_command()?
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--input-dir"))
            .stdout(predicate::str::contains("ONTOMETRICS_OUTPUT"));
        Ok(())
    }

    #[test]
    fn cli_default_paths() -> Result<()> {
        let dir = input_dir(&[("zoo.ttl", ZOO)])?;
        cli_command()?
            .current_dir(dir.path())
            .assert()
            .success()
            .stdout("Ontology metrics saved to ontology_metrics.xlsx\n");
        dir.child("ontology_metrics.xlsx")
            .assert(predicate::path::is_file());
        Ok(())
    }

    #[test]
    fn cli_csv_report() -> Result<()> {
        let dir = input_dir(&[("zoo.ttl", ZOO)])?;
        let output = dir.child("metrics.csv");
        cli_command()?
            .arg("--input-dir")
            .arg(dir.child("ttl").path())
            .arg("--output")
            .arg(output.path())
            .assert()
            .success();
        let content = fs::read_to_string(output.path())?;
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("File,Total Triples,Total Classes,"));
        assert!(lines[1].starts_with("zoo.ttl,4,1,0,1,0,1,0,0,0,0,"));
        assert!(lines[2].starts_with("ALL,4,1,0,1,0,1,0,0,0,0,"));
        Ok(())
    }

    #[test]
    fn cli_counts_types_of_anonymous_instances() -> Result<()> {
        let dir = input_dir(&[("zoo.ttl", format!("{ZOO}[] a ex:Cat .\n").as_str())])?;
        let output = dir.child("metrics.csv");
        cli_command()?
            .arg("--input-dir")
            .arg(dir.child("ttl").path())
            .arg("--output")
            .arg(output.path())
            .assert()
            .success();
        output.assert(predicate::str::contains("\nzoo.ttl,5,2,0,1,"));
        Ok(())
    }

    #[test]
    fn cli_format_option_overrides_extension() -> Result<()> {
        let dir = input_dir(&[("zoo.ttl", ZOO)])?;
        let output = dir.child("metrics.out");
        cli_command()?
            .arg("--input-dir")
            .arg(dir.child("ttl").path())
            .arg("--output")
            .arg(output.path())
            .arg("--format")
            .arg("csv")
            .assert()
            .success();
        output.assert(predicate::str::starts_with("File,"));
        Ok(())
    }

    #[test]
    fn cli_environment_overrides() -> Result<()> {
        let dir = input_dir(&[("zoo.ttl", ZOO)])?;
        let output = dir.child("from_env.csv");
        cli_command()?
            .env("ONTOMETRICS_INPUT_DIR", dir.child("ttl").path())
            .env("ONTOMETRICS_OUTPUT", output.path())
            .assert()
            .success();
        output.assert(predicate::str::contains("zoo.ttl,"));
        Ok(())
    }

    #[test]
    fn cli_skips_malformed_files() -> Result<()> {
        let dir = input_dir(&[
            ("bad.ttl", "@prefix ex: <http://example.com/> .\nex:a ex:b\n"),
            ("zoo.ttl", ZOO),
        ])?;
        let output = dir.child("metrics.csv");
        cli_command()?
            .arg("--input-dir")
            .arg(dir.child("ttl").path())
            .arg("--output")
            .arg(output.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Skipped bad.ttl: Parse error"))
            .stderr(predicate::str::contains("Skipping ontology file"));
        output.assert(predicate::str::contains("bad.ttl").not());
        Ok(())
    }

    #[test]
    fn cli_fails_without_processed_files() -> Result<()> {
        let dir = input_dir(&[("empty.ttl", "")])?;
        cli_command()?
            .arg("--input-dir")
            .arg(dir.child("ttl").path())
            .arg("--output")
            .arg(dir.child("metrics.xlsx").path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("No ontology file could be processed"));
        dir.child("metrics.xlsx").assert(predicate::path::missing());
        Ok(())
    }

    #[test]
    fn cli_fails_on_missing_input_dir() -> Result<()> {
        let dir = TempDir::new()?;
        cli_command()?
            .arg("--input-dir")
            .arg(dir.child("nope").path())
            .arg("--output")
            .arg(dir.child("metrics.xlsx").path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to list the input directory"));
        Ok(())
    }

    #[test]
    fn cli_output_is_reproducible() -> Result<()> {
        let dir = input_dir(&[
            ("zoo.ttl", ZOO),
            ("other.ttl", "<http://e.com/s> <http://e.com/p> \"o\" .\n"),
        ])?;
        for name in ["first.xlsx", "second.xlsx"] {
            cli_command()?
                .arg("--input-dir")
                .arg(dir.child("ttl").path())
                .arg("--output")
                .arg(dir.child(name).path())
                .assert()
                .success();
        }
        assert_eq!(
            fs::read(dir.child("first.xlsx").path())?,
            fs::read(dir.child("second.xlsx").path())?
        );
        Ok(())
    }

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        Args::command().debug_assert()
    }
}
