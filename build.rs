use std::io::{self, Write};

use vergen::{BuildBuilder, CargoBuilder, Emitter};
use vergen_git2::Git2Builder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_date(true).build()?;
    let cargo = CargoBuilder::default().target_triple(true).build()?;
    let git2 = Git2Builder::default()
        .describe(true, true, None)
        .sha(true)
        .build()?;

    let mut emitted = Vec::new();
    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&git2)?
        .emit_to(&mut emitted)?;
    io::stdout().write_all(&emitted)?;

    // Tarball builds have no repository to describe; the version string
    // still needs the variables.
    let emitted = String::from_utf8_lossy(&emitted);
    for key in ["VERGEN_GIT_DESCRIBE", "VERGEN_GIT_SHA"] {
        if !emitted.contains(&format!("cargo:rustc-env={key}=")) {
            println!("cargo:rustc-env={key}=unknown");
        }
    }

    Ok(())
}
