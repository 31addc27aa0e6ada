//! Fetch-validate-persist loop.
//!
//! One run makes up to `max_attempts` sequential attempts. Each attempt GETs
//! the source, validates the body and, if it passes, replaces the output file
//! and stops. Transport, validation and storage failures are all logged and
//! retried with linear backoff; only a configuration error ends the run
//! before the first request.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, Settings, SyncConfig};
use crate::fetch::{CurlTransport, FetchError, FetchRequest, Transport};
use crate::retry::{run_with_retry, RetryPolicy, Sleeper, ThreadSleeper};
use crate::storage;
use crate::validate::{ContentValidator, Rejection};

/// Why a single attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum AttemptFailure {
    #[error("request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("validation failed: {0}")]
    Rejected(#[from] Rejection),
    #[error("failed to write output: {0}")]
    Storage(#[source] io::Error),
}

/// Result of one sync run. `is_success()` is the boolean contract.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Output replaced with a validated body.
    Synced {
        path: PathBuf,
        bytes: u64,
        attempts: u32,
    },
    /// Every attempt failed; `last_failure` is the final attempt's cause.
    Exhausted {
        attempts: u32,
        last_failure: AttemptFailure,
    },
    /// Configuration was incomplete; no request was made.
    Misconfigured(ConfigError),
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }

    /// Attempts made (0 when misconfigured).
    pub fn attempts(&self) -> u32 {
        match self {
            SyncOutcome::Synced { attempts, .. } | SyncOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
            SyncOutcome::Misconfigured(_) => 0,
        }
    }
}

/// Mirrors the configured source into the output file.
pub struct SourceSyncer<T, S> {
    config: SyncConfig,
    validator: ContentValidator,
    policy: RetryPolicy,
    transport: T,
    sleeper: S,
}

impl<T: Transport, S: Sleeper> SourceSyncer<T, S> {
    pub fn new(config: SyncConfig, transport: T, sleeper: S) -> Self {
        let policy = config.settings.retry_policy();
        Self {
            config,
            validator: ContentValidator::default(),
            policy,
            transport,
            sleeper,
        }
    }

    pub fn with_validator(mut self, validator: ContentValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Run once; the boolean projection of `run`.
    pub fn sync(&mut self) -> bool {
        self.run().is_success()
    }

    pub fn run(&mut self) -> SyncOutcome {
        let Self {
            config,
            validator,
            policy,
            transport,
            sleeper,
        } = self;

        tracing::info!("starting playlist sync from {}", config.source_url);
        match config.masked_proxy() {
            Some(masked) => tracing::info!("using proxy {}", masked),
            None => tracing::info!("no proxy configured, connecting directly"),
        }

        let validator: &ContentValidator = validator;
        let request = config.request();
        let output = config.settings.output_path.as_path();
        let (attempts, result) = run_with_retry(&*policy, sleeper, |attempt| {
            attempt_once(&mut *transport, validator, &request, output, attempt)
        });

        match result {
            Ok(bytes) => SyncOutcome::Synced {
                path: output.to_path_buf(),
                bytes,
                attempts,
            },
            Err(last_failure) => {
                tracing::error!(attempts, "all attempts failed, sync aborted: {}", last_failure);
                SyncOutcome::Exhausted {
                    attempts,
                    last_failure,
                }
            }
        }
    }
}

fn attempt_once<T: Transport>(
    transport: &mut T,
    validator: &ContentValidator,
    request: &FetchRequest,
    output: &Path,
    attempt: u32,
) -> Result<u64, AttemptFailure> {
    let body = transport.get(request).map_err(|e| {
        tracing::warn!(attempt, "request error on attempt {}: {}", attempt, e);
        AttemptFailure::from(e)
    })?;

    let features = validator.validate(&body).into_result().map_err(|r| {
        tracing::warn!(attempt, "validation failed on attempt {}: {}", attempt, r);
        AttemptFailure::from(r)
    })?;
    tracing::debug!(attempt, features, "content accepted");

    let bytes = storage::write_output(output, &body).map_err(|e| {
        tracing::warn!(attempt, "could not write {}: {}", output.display(), e);
        AttemptFailure::Storage(e)
    })?;
    tracing::info!("sync succeeded, saved to {} ({} bytes)", output.display(), bytes);
    Ok(bytes)
}

/// Resolve configuration through `lookup` and run one sync. A configuration
/// error returns `Misconfigured` without touching `transport`.
pub fn sync_with<F, T, S>(settings: Settings, lookup: F, transport: T, sleeper: S) -> SyncOutcome
where
    F: Fn(&str) -> Option<String>,
    T: Transport,
    S: Sleeper,
{
    match SyncConfig::from_lookup(settings, lookup) {
        Ok(config) => SourceSyncer::new(config, transport, sleeper).run(),
        Err(e) => {
            tracing::error!("configuration error: {}", e);
            SyncOutcome::Misconfigured(e)
        }
    }
}

/// Resolve configuration from the process environment and sync with libcurl.
pub fn sync_from_env(settings: Settings) -> SyncOutcome {
    sync_with(
        settings,
        |name| std::env::var(name).ok(),
        CurlTransport::new(),
        ThreadSleeper,
    )
}
