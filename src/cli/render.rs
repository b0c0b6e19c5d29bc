//! The render command: one session from script file to saved download.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;

use super::args::RenderArgs;
use super::output::{icons, print_footer, print_header, print_options, print_step_line};
use crate::adapters::{ConsoleLog, ConsolePreview, ConsoleSelection, ZipArchiver};
use crate::cache::ArtifactIndex;
use crate::config::ClientConfig;
use crate::error::ExportError;
use crate::export::{Download, ExportCoordinator};
use crate::session::{Observers, RenderOutcome, SessionController};
use crate::traits::HttpClient;

/// Name used when an artifact name has no usable file name component.
const FALLBACK_FILE_NAME: &str = "artifact.stl";

/// What a render run produced.
#[derive(Debug)]
pub struct RenderReport {
    pub outcome: RenderOutcome,
    /// Where the download was written; `None` when nothing was received
    pub written: Option<PathBuf>,
}

/// Render the script named in `args` and write the result to `args.out_dir`.
///
/// A transport failure still saves whatever arrived before it; the outcome in
/// the report tells the caller how the stream ended.
pub async fn run_render<C: HttpClient + 'static>(
    client: C,
    config: ClientConfig,
    args: &RenderArgs,
) -> Result<RenderReport> {
    let script = std::fs::read_to_string(&args.script)
        .wrap_err_with(|| format!("Failed to read script {}", args.script.display()))?;

    let observers = Observers::new(
        ConsolePreview::new(args.debug),
        ConsoleLog,
        ConsoleSelection::default(),
    );
    let controller = SessionController::new(client, config, observers);
    let coordinator = ExportCoordinator::with_archive_name(
        ZipArchiver::new(),
        controller.config().archive_name.clone(),
    );

    print_header("RENDER LOG");
    let task = controller.start_render(script).await;
    tracing::info!(session = %task.session_id(), "Render started");
    let outcome = task.finished().await;
    match &outcome {
        RenderOutcome::Completed(summary) => {
            if !summary.dropped.is_empty() {
                print_step_line(
                    icons::WARNING,
                    &format!("{} malformed record(s) skipped", summary.dropped.len()),
                );
            }
        }
        RenderOutcome::Failed { error, .. } => {
            print_step_line(icons::FAILURE, &format!("Stream ended early: {}", error));
        }
        RenderOutcome::Cancelled => bail!("Render was cancelled"),
        RenderOutcome::Panicked(message) => bail!("Render task panicked: {}", message),
    }

    if let Some(index) = args.select {
        controller
            .select(ArtifactIndex::new(index))
            .await
            .wrap_err("Cannot select artifact")?;
    }

    let (options, selected) = controller
        .inspect(|cache| (cache.options(), cache.selected().map(ArtifactIndex::get)))
        .await;
    print_header("ARTIFACTS");
    print_options(&options, selected);

    let download = controller
        .inspect(|cache| {
            if args.all {
                coordinator.export_all(cache)
            } else {
                coordinator.export_selected(cache)
            }
        })
        .await;

    let written = match download {
        Ok(download) => {
            let path = write_download(&args.out_dir, &download)?;
            print_step_line(
                icons::SUCCESS,
                &format!("Wrote {} ({})", path.display(), download.content_type),
            );
            Some(path)
        }
        Err(ExportError::EmptyCache) => None,
        Err(err) => return Err(err).wrap_err("Export failed"),
    };
    print_footer();

    Ok(RenderReport { outcome, written })
}

/// Write `download` into `dir`, creating the directory if needed.
///
/// Only the final path component of the download name is used, so a name
/// like `../x.stl` still lands inside `dir`.
pub fn write_download(dir: &Path, download: &Download) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create {}", dir.display()))?;

    let file_name = Path::new(&download.name)
        .file_name()
        .map(|name| name.to_owned())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.into());
    let path = dir.join(file_name);
    std::fs::write(&path, &download.bytes)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
