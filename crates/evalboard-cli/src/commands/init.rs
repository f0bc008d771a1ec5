//! The `evalboard init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("evalboard.toml").exists() {
        println!("evalboard.toml already exists, skipping.");
    } else {
        std::fs::write("evalboard.toml", SAMPLE_CONFIG)?;
        println!("Created evalboard.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point outputs_dir at your <model>/<dataset>/ eval outputs");
    println!("  2. Run: evalboard summary");
    println!("  3. Run: evalboard cases --correct-only false --per-page 10");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# evalboard configuration

# Root of the eval output tree: <outputs_dir>/<model>/<dataset>/
# holding one *_metrics.json and one *.jsonl file per dataset.
outputs_dir = "simplelr_math_eval/outputs"

# Cases per page when --per-page is not given.
per_page = 20
"#;
