//! Shell commands run as a countdown's terminal action

use tokio::process::Command;
use tracing::{debug, info};

/// Run `command` through `sh -c` and fail unless it exits successfully
pub async fn execute_expire_command(command: &str) -> anyhow::Result<()> {
    info!("Executing expire command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to execute expire command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("Expire command failed ({}): {}", output.status, stderr.trim());
    }

    debug!("Expire command output: {}", String::from_utf8_lossy(&output.stdout).trim());
    info!("Expire command completed");
    Ok(())
}
