//! Opens an interactive terminal in a directory.
//!
//! Fire-and-forget: the spawned terminal is never awaited and the engine
//! only cares whether some supported emulator could be started at all.

use std::path::Path;

use anyhow::{bail, Result};

/// Open a new terminal window in `dir`, trying the platform's usual
/// emulators in order.
#[cfg(target_os = "linux")]
pub fn open_in_directory(dir: &Path) -> Result<()> {
    use std::process::Command;

    let dir_arg = dir.display().to_string();
    let attempts: Vec<(&str, Vec<String>)> = vec![
        (
            "gnome-terminal",
            vec![format!("--working-directory={dir_arg}")],
        ),
        ("konsole", vec!["--workdir".to_string(), dir_arg.clone()]),
        (
            "xfce4-terminal",
            vec![format!("--working-directory={dir_arg}")],
        ),
        (
            "xterm",
            vec!["-e".to_string(), format!("cd '{dir_arg}' && bash")],
        ),
    ];

    let mut last_err = None;
    for (program, args) in attempts {
        match Command::new(program).args(&args).spawn() {
            Ok(_) => return Ok(()),
            Err(e) => last_err = Some(e),
        }
    }

    match last_err {
        Some(e) => bail!("failed to open a terminal (tried gnome-terminal, konsole, xfce4-terminal, xterm): {e}"),
        None => bail!("no terminal emulators to try"),
    }
}

#[cfg(target_os = "macos")]
pub fn open_in_directory(dir: &Path) -> Result<()> {
    use std::process::Command;

    let script = format!(
        r#"tell application "Terminal" to do script "cd '{}'""#,
        dir.display()
    );
    Command::new("osascript")
        .args(["-e", &script])
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to open Terminal.app: {e}"))?;
    Ok(())
}

#[cfg(target_os = "windows")]
pub fn open_in_directory(dir: &Path) -> Result<()> {
    use std::process::Command;

    let dir_arg = dir.display().to_string();

    // Windows Terminal first, then PowerShell, then cmd.
    if Command::new("wt.exe")
        .args(["-w", "0", "nt", "-d", &dir_arg, "pwsh.exe"])
        .spawn()
        .is_ok()
    {
        return Ok(());
    }
    if Command::new("pwsh.exe")
        .args([
            "-NoExit",
            "-Command",
            &format!("Set-Location '{dir_arg}'"),
        ])
        .spawn()
        .is_ok()
    {
        return Ok(());
    }
    Command::new("cmd.exe")
        .args(["/k", &format!("cd /d \"{dir_arg}\"")])
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to open terminal: {e}"))?;
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn open_in_directory(_dir: &Path) -> Result<()> {
    bail!("opening a terminal is not supported on this platform")
}
