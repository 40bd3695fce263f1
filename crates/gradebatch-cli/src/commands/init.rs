//! The `gradebatch init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("gradebatch.toml"), SAMPLE_CONFIG)?;
    write_if_absent(Path::new("answers.csv"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Point [service] in gradebatch.toml at your scoring service");
    println!("  2. Run: gradebatch validate --csv answers.csv");
    println!(
        "  3. Run: gradebatch evaluate --csv answers.csv --reference \"Light is scattered by air molecules.\""
    );

    Ok(())
}

fn write_if_absent(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, contents)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebatch configuration

default_marks_out_of = 10
output_dir = "./gradebatch-results"

[service]
type = "http"
base_url = "http://localhost:5000"
endpoint = "/evaluate"
timeout_secs = 120
# api_key = "${GRADEBATCH_API_KEY}"

# Offline scoring by word overlap, for trying things out:
# [service]
# type = "mock"
"#;

const EXAMPLE_ANSWERS: &str = r#"student_id,answer
S001,"Sunlight is scattered by air molecules, and blue light scatters the most."
S002,The sky reflects the ocean.
S003,"Rayleigh scattering makes shorter wavelengths, like blue, spread across the sky."
"#;
