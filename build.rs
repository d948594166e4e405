use vergen::EmitBuilder;

// Emits version/build metadata consumed by the startup log line.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    EmitBuilder::builder()
        .all_build() // Build timestamp, etc.
        .all_git() // Short sha for the startup log
        .emit()?;

    Ok(())
}
