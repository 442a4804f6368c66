//! Replay JSON-line UI actions against a storefront session.
//!
//! Each non-blank line that does not start with `#` is one [`UiAction`].
//! Unparseable lines and user-facing errors (empty cart, missing change
//! amount, unknown product) are printed as notices and the session carries
//! on; storage and catalog failures abort it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use marmita_storefront::preferences::SnapshotStore;
use marmita_storefront::{
    CartRenderer, Catalog, FileSnapshotStore, PreferenceStore, Session, StorefrontConfig,
    StorefrontError, UiAction,
};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::render::{OutputFormat, TerminalRenderer, write_notice, write_outcome};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),
}

/// Counts reported at the end of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub notices: usize,
}

/// Run a session over the file at `script`, or stdin.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the script cannot be
/// read, or preferences cannot be persisted.
pub fn run(
    config: &StorefrontConfig,
    script: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&config.catalog_path).map_err(StorefrontError::from)?;
    let store = PreferenceStore::new(
        FileSnapshotStore::new(&config.data_dir),
        config.preferences_key.clone(),
    );
    let renderer = TerminalRenderer::new(io::stdout(), format);
    let mut session = Session::start(catalog, store, renderer);

    let input: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let summary = replay(&mut session, input, &mut io::stdout(), format)?;
    info!(
        applied = summary.applied,
        notices = summary.notices,
        items_left = session.cart().item_count(),
        "Session finished"
    );
    Ok(())
}

/// Feed every action in `input` to `session`, writing outcomes to `out`.
///
/// # Errors
///
/// Returns `ReplayError` on I/O failure or a non-user-facing storefront
/// error.
#[instrument(skip_all)]
pub fn replay<S, R>(
    session: &mut Session<S, R>,
    input: impl BufRead,
    out: &mut impl Write,
    format: OutputFormat,
) -> Result<ReplaySummary, ReplayError>
where
    S: SnapshotStore,
    R: CartRenderer,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action: UiAction = match serde_json::from_str(trimmed) {
            Ok(action) => action,
            Err(e) => {
                summary.notices += 1;
                write_notice(out, format, line_no, &format!("linha {line_no}: ação inválida ({e})"))?;
                continue;
            }
        };
        debug!(line = line_no, ?action, "Dispatching");

        match session.dispatch(action) {
            Ok(outcome) => {
                summary.applied += 1;
                write_outcome(out, format, &outcome, session.catalog())?;
            }
            Err(e) if e.is_user_facing() => {
                summary.notices += 1;
                write_notice(out, format, line_no, &e)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}
