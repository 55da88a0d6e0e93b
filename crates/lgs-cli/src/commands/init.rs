//! The `lgs init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("lgs.toml").exists() {
        println!("lgs.toml already exists, skipping.");
    } else {
        std::fs::write("lgs.toml", SAMPLE_CONFIG)?;
        println!("Created lgs.toml");
    }

    std::fs::create_dir_all("answer-sheets")?;
    let example_path = Path::new("answer-sheets/example.toml");
    if example_path.exists() {
        println!("answer-sheets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SHEET)?;
        println!("Created answer-sheets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: lgs login --username <name> --password <password>");
    println!("  2. Run: lgs validate --sheet answer-sheets/example.toml");
    println!("  3. Run: lgs calculate --sheet answer-sheets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lgs configuration

base_url = "http://localhost:5000"
timeout_secs = 30

# Filled in by `lgs login`, or set LGS_SESSION.
# session_cookie = "session=..."
"#;

const EXAMPLE_SHEET: &str = r#"# Correct (dogru) and incorrect (yanlis) answers per subject.
# Turkish, maths, and science have 20 questions; the rest have 10.

[turkce]
dogru = 15
yanlis = 3

[matematik]
dogru = 12
yanlis = 5

[fen]
dogru = 14
yanlis = 4

[inkilap]
dogru = 8
yanlis = 1

[din]
dogru = 9
yanlis = 0

[ingilizce]
dogru = 7
yanlis = 2
"#;
