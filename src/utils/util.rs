use std::fs::File;
use std::io::BufWriter;

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}

pub fn output_path(output_prefix: &str, output_suffix: &str) -> String {
    format!("{}.{}", output_prefix, output_suffix)
}

pub fn create_writer(output_prefix: &str, output_suffix: &str) -> Result<BufWriter<File>> {
    let path = output_path(output_prefix, output_suffix);
    let file = File::create(&path).map_err(|e| format!("Failed to create {}: {}", path, e))?;
    log::debug!("Writing {}", path);
    Ok(BufWriter::new(file))
}
