/// Desktop notifications and the system opener
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

#[cfg(any(target_os = "macos", test))]
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Show a desktop notification; failures are logged only
pub fn notify(title: &str, body: &str) {
    #[cfg(target_os = "macos")]
    let result = {
        let script = format!(
            r#"display notification "{}" with title "NoteFlow - {}""#,
            escape(body),
            escape(title)
        );
        Command::new("osascript").arg("-e").arg(&script).output()
    };

    #[cfg(all(unix, not(target_os = "macos")))]
    let result = Command::new("notify-send")
        .arg(format!("NoteFlow - {title}"))
        .arg(body)
        .output();

    #[cfg(not(unix))]
    let result: std::io::Result<std::process::Output> = {
        let _ = (title, body);
        Err(std::io::Error::new(std::io::ErrorKind::Unsupported, "no notifier"))
    };

    if let Err(e) = result {
        debug!(error = %e, "desktop notification unavailable");
    }
}

pub fn notify_task_done(task_title: &str) {
    notify("Task Completed", task_title);
}

/// Pomodoro alarm: terminal bell plus a notification
pub fn alarm(title: &str, body: &str) {
    let mut out = std::io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
    notify(title, body);
}

/// Hand a URL or file to the platform opener
pub fn open_external(target: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut cmd = Command::new("open");
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut cmd = Command::new("xdg-open");
    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };

    cmd.arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| {
            warn!(target, error = %e, "failed to launch opener");
            e
        })
}

pub fn open_path(path: &Path) -> std::io::Result<()> {
    open_external(&path.to_string_lossy())
}
