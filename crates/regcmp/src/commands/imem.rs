//! Imem command.

use std::path::Path;

use regcmp_core::HexImage;
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Handle the `imem` command.
pub fn cmd_imem(input: &Path, imem_size: Option<usize>) -> i32 {
    terminal::info(&format!("parsing {}", input.display()));
    let image = match HexImage::from_file(input) {
        Ok(image) => image,
        Err(e) => {
            error!(error = %e, path = %input.display(), "failed to read hex file");
            terminal::error(&e.to_string());
            return EXIT_FAILURE;
        }
    };

    if image.is_empty() {
        terminal::error("no instructions parsed (empty file or bad format)");
        return EXIT_FAILURE;
    }

    match image.to_verilog(imem_size) {
        Ok(verilog) => {
            print!("{verilog}");
            let skipped = image.issues.len();
            if skipped > 0 {
                terminal::warning(&format!("{skipped} malformed lines skipped"));
            }
            terminal::success(&format!("{} instructions converted", image.len()));
            EXIT_SUCCESS
        }
        Err(e) => {
            terminal::error(&e.to_string());
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imem_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("riscv.hex");

        std::fs::write(&path, "00500093\n00a00113\n").unwrap();
        assert_eq!(cmd_imem(&path, None), EXIT_SUCCESS);
        assert_eq!(cmd_imem(&path, Some(1)), EXIT_FAILURE);

        std::fs::write(&path, "// only comments\n").unwrap();
        assert_eq!(cmd_imem(&path, None), EXIT_FAILURE);

        assert_eq!(
            cmd_imem(&dir.path().join("missing.hex"), None),
            EXIT_FAILURE
        );
    }
}
