use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

/// Platform command that opens a file in its default viewer
fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open the saved chart for viewing. Best-effort: returns whether a viewer was launched.
pub fn show_chart(path: &Path) -> bool {
    match viewer_command(path).spawn() {
        Ok(_) => {
            info!("Opened {} in the system viewer", path.display());
            true
        }
        Err(e) => {
            warn!("Could not open {} for display: {}", path.display(), e);
            false
        }
    }
}
