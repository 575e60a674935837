use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use scribe_codegen::{Generator, Overwrite};
use scribe_manifest::Manifest;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to scribe.toml (defaults to ./scribe.toml)
    #[arg(short, long, default_value = "scribe.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Print the generated sources instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Leave files that already exist untouched
    #[arg(long)]
    pub skip_existing: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let overwrite = if self.skip_existing {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        };
        let generator = Generator::new(&manifest).with_overwrite(overwrite);

        if self.dry_run {
            self.run_preview(&generator)
        } else {
            self.run_generation(&generator, &manifest)
        }
    }

    fn run_generation(&self, generator: &Generator, manifest: &Manifest) -> Result<()> {
        let result = generator
            .generate(&self.output)
            .wrap_err("Failed to generate code")?;

        println!("package {}", manifest.package);
        println!();
        for path in &result.written {
            println!("  + {}", self.output.join(path).display());
        }
        for path in &result.skipped {
            println!("  = {} (kept)", self.output.join(path).display());
        }
        println!();
        println!(
            "Generated {} file{}",
            result.written.len(),
            if result.written.len() == 1 { "" } else { "s" }
        );

        Ok(())
    }

    fn run_preview(&self, generator: &Generator) -> Result<()> {
        let files = generator.preview().wrap_err("Failed to generate code")?;

        for file in &files {
            println!("── {} ──", file.path().display());
            println!("{}", file.content());
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }
}
