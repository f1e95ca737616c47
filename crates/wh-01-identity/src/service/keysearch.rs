//! Proof-of-work identity key search.
//!
//! Workers race to find an Ed25519 key whose derived X25519 public key hashes,
//! together with a challenge, to at least `workbit` leading zero bits.
//!
//! The result slot is a single mutex. The first worker to fill it wins and
//! wakes the caller; every other worker sees the stop flag and exits. The
//! caller always joins all workers before returning.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use shared_crypto::{
    blake2b_256_many, ed25519_public_to_x25519, ed25519_seed_to_x25519, generate_ed25519,
    is_positive, SecretBytes,
};
use tracing::{debug, info, warn};

use crate::domain::workbit::{be_words, ensure_word_aligned, leading_zero_bits};
use crate::domain::KeyPair;
use crate::{IdentityError, KeySearchConfig, Result};

/// Highest reachable workbit for a 256-bit hash.
pub const MAX_WORKBIT: u32 = 256;

/// Attempts a worker batches before updating the shared counter.
const COUNTER_BATCH: u64 = 256;

/// How often a search with a deadline or token re-checks them.
const POLL_SLICE: Duration = Duration::from_millis(50);

/// Cooperative cancellation handle for a running search.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// New, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A completed search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The accepted identity
    pub keypair: KeyPair,
    /// Candidate keys tried across all workers
    pub attempts: u64,
    /// Workbit of the accepted key (at least the requested one)
    pub workbit_achieved: u32,
}

struct Shared {
    slot: Mutex<Option<Result<(KeyPair, u32)>>>,
    published: Condvar,
    stop: AtomicBool,
    attempts: AtomicU64,
}

impl Shared {
    /// Fill the slot if it is still empty. Later results are dropped (and wiped).
    fn publish(&self, build: impl FnOnce() -> Result<(KeyPair, u32)>) {
        let mut slot = self.slot.lock();
        if slot.is_none() {
            *slot = Some(build());
            self.stop.store(true, Ordering::Release);
            self.published.notify_all();
        }
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

enum Wake {
    Published,
    Cancelled,
    TimedOut(Duration),
}

/// Multithreaded proof-of-work key search.
pub struct KeySearch {
    config: KeySearchConfig,
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl KeySearch {
    /// Create a search from config.
    pub fn new(config: KeySearchConfig) -> Self {
        let timeout = config.timeout();
        Self {
            config,
            timeout,
            cancel: None,
        }
    }

    /// Override the config deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Search for a key meeting the configured workbit for `challenge`.
    ///
    /// Blocks until a worker publishes, the deadline passes or the token is
    /// cancelled. A key published before the workers are joined is returned
    /// even if the deadline fired meanwhile.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: challenge not a multiple of 4 bytes, or workbit > 256
    /// - `ResourceExhausted`: a worker thread could not be spawned
    /// - `Timeout` / `Cancelled`: no key found in time
    /// - `Crypto`: locked memory for the winning key could not be allocated
    #[tracing::instrument(skip(self, challenge), fields(workbit = self.config.workbit))]
    pub fn run(&self, challenge: &[u8]) -> Result<SearchOutcome> {
        ensure_word_aligned("challenge", challenge.len())?;
        let target = self.config.workbit;
        if target > MAX_WORKBIT {
            return Err(IdentityError::InvalidArgument(format!(
                "workbit {target} exceeds {MAX_WORKBIT}"
            )));
        }

        let workers = self.config.resolved_workers();
        debug!(
            "Starting key search: threads={}, workbit={}, timeout={:?}",
            workers, target, self.timeout
        );

        let shared = Arc::new(Shared {
            slot: Mutex::new(None),
            published: Condvar::new(),
            stop: AtomicBool::new(false),
            attempts: AtomicU64::new(0),
        });
        let challenge: Arc<[u8]> = Arc::from(challenge);
        let started = Instant::now();

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let worker_shared = Arc::clone(&shared);
            let worker_challenge = Arc::clone(&challenge);
            let spawned = thread::Builder::new()
                .name(format!("keysearch-{id}"))
                .spawn(move || search_worker(&worker_shared, &worker_challenge, target));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    shared.stop.store(true, Ordering::Release);
                    join_all(handles);
                    return Err(IdentityError::ResourceExhausted(format!(
                        "failed to spawn search worker {id}: {e}"
                    )));
                }
            }
        }

        let wake = self.wait(&shared, started);

        shared.stop.store(true, Ordering::Release);
        join_all(handles);

        let attempts = shared.attempts.load(Ordering::Relaxed);
        let elapsed = started.elapsed();
        let published = shared.slot.lock().take();

        match (published, wake) {
            (Some(result), _) => {
                let (keypair, workbit_achieved) = result?;
                info!(
                    "Key search successful: workbit={}, attempts={}, elapsed={:?}",
                    workbit_achieved, attempts, elapsed
                );
                Ok(SearchOutcome {
                    keypair,
                    attempts,
                    workbit_achieved,
                })
            }
            (None, Wake::Cancelled) => {
                warn!("Key search cancelled after {} attempts", attempts);
                Err(IdentityError::Cancelled)
            }
            (None, Wake::TimedOut(limit)) => {
                warn!("Key search timed out after {} attempts", attempts);
                Err(IdentityError::Timeout(limit))
            }
            (None, Wake::Published) => Err(IdentityError::ResourceExhausted(
                "search workers exited without a result".into(),
            )),
        }
    }

    fn wait(&self, shared: &Shared, started: Instant) -> Wake {
        let deadline = self.timeout.map(|t| (started + t, t));
        let progress = self.config.progress_interval();
        let mut next_report = progress.map(|p| started + p);

        let mut slot = shared.slot.lock();
        loop {
            if slot.is_some() {
                return Wake::Published;
            }
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Wake::Cancelled;
            }
            let now = Instant::now();
            if let Some((at, limit)) = deadline {
                if now >= at {
                    return Wake::TimedOut(limit);
                }
            }
            if let (Some(at), Some(every)) = (next_report, progress) {
                if now >= at {
                    report_progress(shared, started);
                    next_report = Some(at + every);
                }
            }

            if deadline.is_none() && self.cancel.is_none() && progress.is_none() {
                shared.published.wait(&mut slot);
            } else {
                let mut slice = POLL_SLICE;
                if let Some((at, _)) = deadline {
                    slice = slice.min(at.saturating_duration_since(now));
                }
                if let Some(at) = next_report {
                    slice = slice.min(at.saturating_duration_since(now));
                }
                shared.published.wait_for(&mut slot, slice);
            }
        }
    }
}

fn report_progress(shared: &Shared, started: Instant) {
    let attempts = shared.attempts.load(Ordering::Relaxed);
    let secs = started.elapsed().as_secs_f64().max(f64::EPSILON);
    info!(
        "Key search in progress: attempts={}, rate={:.1}kK/s",
        attempts,
        attempts as f64 / secs / 1000.0
    );
}

fn join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            warn!("Key search worker panicked");
        }
    }
}

fn search_worker(shared: &Shared, challenge: &[u8], target: u32) {
    let mut local = 0u64;

    while !shared.stopped() {
        local += 1;
        if local == COUNTER_BATCH {
            shared.attempts.fetch_add(local, Ordering::Relaxed);
            local = 0;
        }

        let candidate = generate_ed25519();
        if !is_positive(&candidate.public) {
            continue;
        }
        let Ok(dh_public) = ed25519_public_to_x25519(&candidate.public) else {
            continue;
        };

        let hash = blake2b_256_many(&[&dh_public[..], challenge]);
        let wb = leading_zero_bits(be_words(&hash));
        if wb < target {
            continue;
        }

        shared.publish(|| {
            let dh_secret = ed25519_seed_to_x25519(candidate.seed());
            let keypair = KeyPair::from_parts(
                candidate.public,
                SecretBytes::from_slice(&candidate.secret()[..])?,
                dh_public,
                SecretBytes::from_slice(&dh_secret[..])?,
            )?;
            Ok((keypair, wb))
        });
        break;
    }

    shared.attempts.fetch_add(local, Ordering::Relaxed);
}

/// Run a search with no deadline.
///
/// `workers == 0` uses `2 * num_cpus - 1` threads.
pub fn search(challenge: &[u8], workbit: u32, workers: usize) -> Result<KeyPair> {
    KeySearch::new(KeySearchConfig::new(workbit, workers))
        .run(challenge)
        .map(|outcome| outcome.keypair)
}
