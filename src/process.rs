use std::{
    path::PathBuf,
    process::{Command, Stdio},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crate::structs::{request::ConversionRequest, settings::Settings, update::Update};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors from a single renderer invocation.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to launch '{renderer}': {source}")]
    Launch {
        renderer: String,
        source: std::io::Error,
    },

    #[error("renderer exited with code {code}: {stderr}")]
    Failed { code: i32, stderr: String },

    #[error("renderer did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("conversion cancelled")]
    Cancelled,

    #[error("failed to poll renderer: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run_conversion(
    sender: Sender<Update>,
    stop_flag: Arc<AtomicBool>,
    request: ConversionRequest,
    settings: Settings,
) {
    sender.send(Update::Started(request.source.clone())).unwrap();

    let start_time = Instant::now();

    match convert(&request, &settings, &stop_flag) {
        Ok(target) => {
            log::info!(
                "Rendered '{}' to '{}'",
                request.source.display(),
                target.display()
            );
            sender
                .send(Update::Finished(request, start_time.elapsed()))
                .unwrap();
        }
        Err(e) => {
            log::error!("Failed to render '{}': {}", request.source.display(), e);
            sender
                .send(Update::Failed(request.source.clone(), e.to_string()))
                .unwrap();
        }
    }
}

/// Run the renderer for one request and return the target path it wrote.
///
/// The child is polled rather than waited on, so a set stop flag or an
/// elapsed timeout kills it instead of stranding the worker thread.
pub fn convert(
    request: &ConversionRequest,
    settings: &Settings,
    stop_flag: &AtomicBool,
) -> Result<PathBuf, ConvertError> {
    let mut command = render_command(request, settings);

    log::debug!(
        "Running: {} -tpng {} -o {}",
        settings.renderer_path,
        request.source.display(),
        request.output_dir().display()
    );

    let mut child = command.spawn().map_err(|e| ConvertError::Launch {
        renderer: settings.renderer_path.clone(),
        source: e,
    })?;

    let timeout = Duration::from_secs(settings.timeout_secs);
    let started = Instant::now();

    loop {
        if stop_flag.load(Ordering::Relaxed) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ConvertError::Cancelled);
        }

        if child.try_wait()?.is_some() {
            break;
        }

        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ConvertError::TimedOut(timeout));
        }

        thread::sleep(POLL_INTERVAL);
    }

    // Child has exited; this only drains the remaining stderr.
    let output = child.wait_with_output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ConvertError::Failed {
            code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(request.target.clone())
}

fn render_command(request: &ConversionRequest, settings: &Settings) -> Command {
    let mut command = Command::new(&settings.renderer_path);
    command
        .arg("-tpng")
        .arg(&request.source)
        .arg("-o")
        .arg(request.output_dir())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    command
}
