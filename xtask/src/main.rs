//! Build automation tasks for goxref
//!
//! - Generating the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for goxref", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<goxref_ingest::cli::Cli>();

    let content = format!(
        r#"# goxref CLI Reference

Generated from the CLI source code on {}.

`goxref` looks up Gene Ontology terms and annotations and UniChem compound
cross-references. Downloads are cached under the platform cache directory
(`~/.cache/goxref` on Linux) for 30 days.

## Examples

```bash
# Every ancestor of apoptotic process over is_a and part_of
goxref ancestors GO:0006915 --relations is_a,part_of

# Cellular component annotations of p53 in human
goxref annotations P04637 --aspect C

# Mouse annotations, all aspects, without the download cache
goxref --no-cache annotations P02340 --organism 10090

# ChEMBL -> DrugBank compound ids, first 20 ChEMBL compounds
goxref unichem-map chembl drugbank --limit 20
```

## Commands

{}

## Environment Variables

- `GOXREF_GO_ONTOLOGY_URL`, `GOXREF_GOA_BASE_URL` - Gene Ontology sources
- `GOXREF_UNICHEM_SOURCES_URL`, `GOXREF_UNICHEM_MAPPING_URL` - UniChem sources
- `GOXREF_TIMEOUT_SECS`, `GOXREF_MAX_RETRIES` - HTTP behaviour
- `GOXREF_CACHE_DIR`, `GOXREF_NO_CACHE`, `GOXREF_CACHE_MAX_AGE_DAYS` - download cache
- `GOXREF_ORGANISM` - default organism for `annotations`
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILE_PREFIX`, `LOG_FILTER` - logging

Variables may also be set in a `.env` file in the working directory.

---

*To update, run `cargo run -p xtask -- generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
