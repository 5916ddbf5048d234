use std::error::Error;
use vergen::EmitBuilder;

// Emits VERGEN_GIT_DESCRIBE for the version string; builds from a source
// tarball without git metadata report "unknown".
fn main() -> Result<(), Box<dyn Error>> {
    let emitted = EmitBuilder::builder()
        .fail_on_error()
        .custom_build_rs(".")
        .all_git()
        .git_describe(true, false, Some("NoTagShouldMatchThisPattern"))
        .emit();
    if emitted.is_err() {
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=unknown");
    }
    Ok(())
}
