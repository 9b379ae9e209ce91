use std::path::PathBuf;

use clap::Args;

use msearch_core::allowed;

#[derive(Args)]
pub struct ValidateArgs {
    /// Allow-list document to check, `-` for stdin
    pub input: PathBuf,
}

pub async fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    println!("Validating {}...", args.input.display());

    let raw = super::read_input(&args.input)?;
    let document: serde_json::Value = match serde_json::from_str(raw.trim()) {
        Ok(doc) => doc,
        Err(e) => {
            println!("  JSON parsing: INVALID - {e}");
            anyhow::bail!("Invalid JSON: {e}");
        }
    };
    println!("  JSON parsing: OK");

    match allowed::check(&document) {
        Ok(fields) => {
            for collection in fields.collections() {
                let names = fields.fields(collection).unwrap_or_default();
                println!("  {collection}: {} field(s)", names.len());
            }
            println!();
            println!("Validation PASSED");
        }
        Err(problems) => {
            println!();
            println!("Validation FAILED with {} error(s):", problems.len());
            for problem in &problems {
                eprintln!("  - {problem}");
            }
            anyhow::bail!("{} validation error(s)", problems.len());
        }
    }

    Ok(())
}
