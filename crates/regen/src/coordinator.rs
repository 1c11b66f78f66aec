//! The regeneration driver.
//!
//! A [`Coordinator`] owns one background task (the driver) fed by an
//! unbounded command channel. Edits are written into the shared session
//! immediately and then nudge the driver, which restarts its debounce sleep
//! on every nudge. When the sleep finally elapses the driver issues the next
//! sequence token and spawns one generation task for it.
//!
//! Generation tasks race freely. A finished task may only publish when its
//! token is still the newest one issued, so a slow stale generation can never
//! overwrite a faster fresh one. With [`RegenConfig::abort_superseded`] the
//! previous task is also aborted to free the encoder early.
//!
//! All state transitions (edit, token issue, publish) happen under the
//! session mutex, which is never held across an `.await`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use render::{
    encoder_for, evaluate_contrast, BarcodeEncoder, EncodeParams, RenderOptions,
};
use tokio::sync::{mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle, JoinSet};
use tracing::{debug, info, warn, Instrument, Level};
use uri::{build_uri, validate_required, FormField, PaymentFormInput, UriConfig};

use crate::config::RegenConfig;
use crate::error::RegenError;
use crate::merge::merge_with_placeholder;
use crate::result::{GenerationResult, Phase, RegenStats};

enum Command {
    Edited,
    Shutdown,
}

struct Session {
    input: PaymentFormInput,
    options: RenderOptions,
    latest_token: u64,
}

/// One generation's worth of input, frozen at token issue.
struct Request {
    token: u64,
    input: PaymentFormInput,
    options: RenderOptions,
    placeholder_backed: bool,
}

/// Builder plus encoder, shared by the placeholder render and every generation.
struct Pipeline {
    uri_config: UriConfig,
    encoder: Arc<dyn BarcodeEncoder>,
    min_contrast_ratio: f64,
}

impl Pipeline {
    async fn run(&self, request: &Request) -> Result<GenerationResult, RegenError> {
        let uri = build_uri(&request.input, &self.uri_config)?;
        let params = EncodeParams::from_options(&request.options);
        let image = self.encoder.encode(uri.as_str(), &params).await?;
        let contrast = evaluate_contrast(
            request.options.foreground,
            request.options.background,
            self.min_contrast_ratio,
        );
        Ok(GenerationResult {
            uri,
            image,
            version: request.token,
            placeholder_backed: request.placeholder_backed,
            contrast,
        })
    }
}

#[derive(Default)]
struct Counters {
    issued: AtomicU64,
    applied: AtomicU64,
    discarded: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> RegenStats {
        RegenStats {
            issued: self.issued.load(Ordering::SeqCst),
            applied: self.applied.load(Ordering::SeqCst),
            discarded: self.discarded.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}

/// Outcome accounting for one generation task. Dropping it unresolved,
/// including when the task is aborted, counts a discard.
struct Pending<'a> {
    counters: &'a Counters,
    resolved: bool,
}

impl<'a> Pending<'a> {
    fn new(counters: &'a Counters) -> Self {
        Self {
            counters,
            resolved: false,
        }
    }

    fn resolve(mut self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::SeqCst);
        self.resolved = true;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.counters.discarded.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct Shared {
    debounce: std::time::Duration,
    abort_superseded: bool,
    placeholder: PaymentFormInput,
    pipeline: Pipeline,
    session: Mutex<Session>,
    result: watch::Sender<Arc<GenerationResult>>,
    phase: watch::Sender<Phase>,
    counters: Counters,
}

impl Shared {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `mutate` to the session and marks the coordinator as debouncing.
    fn record_edit(&self, mutate: impl FnOnce(&mut Session)) {
        let mut session = self.session();
        mutate(&mut session);
        self.phase.send_replace(Phase::Debouncing);
    }

    /// Hands out the next token and freezes the merged input for it.
    fn issue(&self) -> Request {
        let mut session = self.session();
        session.latest_token += 1;
        let (input, placeholder_backed) = merge_with_placeholder(
            &session.input,
            &self.placeholder,
            &self.pipeline.uri_config,
        );
        self.phase.send_replace(Phase::Generating);
        self.counters.issued.fetch_add(1, Ordering::SeqCst);
        Request {
            token: session.latest_token,
            input,
            options: session.options.clone(),
            placeholder_backed,
        }
    }

    /// Publishes `result` if its token is still the newest. Returns whether it was applied.
    fn publish(&self, result: GenerationResult) -> bool {
        let session = self.session();
        let token = result.version;
        if token != session.latest_token {
            return false;
        }
        let result = Arc::new(result);
        let applied = self.result.send_if_modified(|current| {
            if token > current.version {
                *current = result;
                true
            } else {
                false
            }
        });
        if applied {
            self.settle();
        }
        applied
    }

    /// Marks a failed generation; the visible result is left alone.
    fn fail(&self, token: u64) {
        let session = self.session();
        if token == session.latest_token {
            self.settle();
        }
    }

    fn settle(&self) {
        self.phase.send_if_modified(|phase| {
            if *phase == Phase::Generating {
                *phase = Phase::Settled;
                true
            } else {
                false
            }
        });
    }
}

/// Keeps one authoritative [`GenerationResult`] in sync with a stream of edits.
///
/// ```rust,no_run
/// use regen::{Coordinator, RegenConfig};
/// use render::RenderOptions;
/// use uri::{FormField, PaymentFormInput, UriConfig};
///
/// # async fn demo() -> Result<(), regen::RegenError> {
/// let placeholder = PaymentFormInput::new("demo@bank", "Demo Store").with_amount("100");
/// let coordinator = Coordinator::start_builtin(
///     RegenConfig::default(),
///     UriConfig::default(),
///     placeholder,
///     RenderOptions::default(),
/// )
/// .await?;
///
/// coordinator.edit(FormField::PayeeId, "shop@bank");
/// coordinator.edit(FormField::PayeeName, "Shop Name");
/// let result = coordinator.settled().await;
/// assert_eq!(result.uri.param("pa").as_deref(), Some("shop@bank"));
/// # Ok(())
/// # }
/// ```
pub struct Coordinator {
    shared: Arc<Shared>,
    commands: mpsc::UnboundedSender<Command>,
    driver: Option<JoinHandle<()>>,
}

impl Coordinator {
    /// Renders the placeholder as version `0` and spawns the driver task.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(
        config: RegenConfig,
        uri_config: UriConfig,
        placeholder: PaymentFormInput,
        options: RenderOptions,
        encoder: Arc<dyn BarcodeEncoder>,
    ) -> Result<Self, RegenError> {
        config.validate()?;
        uri_config.validate()?;
        options.validate()?;

        let pipeline = Pipeline {
            uri_config,
            encoder,
            min_contrast_ratio: config.min_contrast_ratio,
        };
        let initial = pipeline
            .run(&Request {
                token: 0,
                input: placeholder.clone(),
                options: options.clone(),
                placeholder_backed: true,
            })
            .await
            .map_err(|err| RegenError::Placeholder(err.to_string()))?;
        info!(
            uri = %initial.uri,
            format = %initial.image.format,
            debounce_ms = config.debounce.as_millis(),
            "regen_started"
        );

        let shared = Arc::new(Shared {
            debounce: config.debounce,
            abort_superseded: config.abort_superseded,
            placeholder,
            pipeline,
            session: Mutex::new(Session {
                input: PaymentFormInput::default(),
                options,
                latest_token: 0,
            }),
            result: watch::Sender::new(Arc::new(initial)),
            phase: watch::Sender::new(Phase::Idle),
            counters: Counters::default(),
        });

        let (commands, receiver) = mpsc::unbounded_channel();
        let driver = tokio::spawn(drive(Arc::clone(&shared), receiver));
        Ok(Self {
            shared,
            commands,
            driver: Some(driver),
        })
    }

    /// [`Coordinator::start`] with the built-in encoder for `config.format`.
    pub async fn start_builtin(
        config: RegenConfig,
        uri_config: UriConfig,
        placeholder: PaymentFormInput,
        options: RenderOptions,
    ) -> Result<Self, RegenError> {
        let encoder = encoder_for(config.format);
        Self::start(config, uri_config, placeholder, options, encoder).await
    }

    /// Records a single field change and restarts the debounce timer.
    pub fn edit(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.shared
            .record_edit(|session| session.input.set(field, value));
        self.nudge();
    }

    pub fn replace_input(&self, input: PaymentFormInput) {
        self.shared.record_edit(|session| session.input = input);
        self.nudge();
    }

    /// Swaps the render options. Invalid options are rejected and nothing is scheduled.
    pub fn set_render_options(&self, options: RenderOptions) -> Result<(), RegenError> {
        options.validate()?;
        self.shared.record_edit(|session| session.options = options);
        self.nudge();
        Ok(())
    }

    fn nudge(&self) {
        if self.commands.send(Command::Edited).is_err() {
            debug!("regen_driver_stopped");
        }
    }

    pub fn current(&self) -> Arc<GenerationResult> {
        Arc::clone(&self.shared.result.borrow())
    }

    /// Receiver notified every time a new result is applied.
    pub fn subscribe(&self) -> watch::Receiver<Arc<GenerationResult>> {
        self.shared.result.subscribe()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.shared.phase.subscribe()
    }

    /// The input exactly as edited, without placeholder values.
    pub fn input(&self) -> PaymentFormInput {
        self.shared.session().input.clone()
    }

    pub fn render_options(&self) -> RenderOptions {
        self.shared.session().options.clone()
    }

    /// Whether the unmerged input passes the required-field gate.
    pub fn is_input_valid(&self) -> bool {
        validate_required(&self.shared.session().input).is_ok()
    }

    pub fn phase(&self) -> Phase {
        *self.shared.phase.borrow()
    }

    pub fn stats(&self) -> RegenStats {
        self.shared.counters.snapshot()
    }

    /// Waits until the newest edit has been generated (or failed) and returns
    /// the visible result.
    pub async fn settled(&self) -> Arc<GenerationResult> {
        let mut phase = self.subscribe_phase();
        // The sender lives in `shared`, so the channel cannot close here.
        let _ = phase.wait_for(|phase| phase.is_quiet()).await;
        self.current()
    }

    /// Stops the driver and every in-flight generation.
    pub async fn shutdown(mut self) {
        // Fails only when the driver is already gone.
        let _ = self.commands.send(Command::Shutdown);
        if let Some(driver) = self.driver.take() {
            if let Err(err) = driver.await {
                warn!(error = %err, "regen_driver_join_failed");
            }
        }
        info!(stats = ?self.stats(), "regen_stopped");
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

async fn drive(shared: Arc<Shared>, mut commands: mpsc::UnboundedReceiver<Command>) {
    let mut tasks = JoinSet::new();
    let mut newest: Option<AbortHandle> = None;

    'driver: loop {
        match commands.recv().await {
            Some(Command::Edited) => {}
            Some(Command::Shutdown) | None => break,
        }

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Edited) => continue,
                    Some(Command::Shutdown) | None => break 'driver,
                },
                () = tokio::time::sleep(shared.debounce) => break,
            }
        }

        while tasks.try_join_next().is_some() {}

        let request = shared.issue();
        let token = request.token;
        if shared.abort_superseded {
            if let Some(previous) = newest.take() {
                if !previous.is_finished() {
                    debug!(token, "regeneration_superseded");
                    previous.abort();
                }
            }
        }

        let span = tracing::span!(Level::INFO, "regen.generate", token);
        newest = Some(tasks.spawn(generate(Arc::clone(&shared), request).instrument(span)));
    }

    // Dropping the set aborts whatever is still running.
    drop(tasks);
}

async fn generate(shared: Arc<Shared>, request: Request) {
    let start = Instant::now();
    let pending = Pending::new(&shared.counters);
    let token = request.token;

    match shared.pipeline.run(&request).await {
        Ok(result) => {
            let elapsed_micros = start.elapsed().as_micros();
            let placeholder_backed = result.placeholder_backed;
            let advisory = result.advisory();
            if shared.publish(result) {
                pending.resolve(&shared.counters.applied);
                info!(
                    token,
                    placeholder_backed,
                    advisory = ?advisory,
                    elapsed_micros,
                    "regeneration_applied"
                );
            } else {
                drop(pending);
                debug!(token, elapsed_micros, "regeneration_discarded");
            }
        }
        Err(err) => {
            pending.resolve(&shared.counters.failed);
            shared.fail(token);
            let validation = matches!(&err, RegenError::Uri(uri_err) if uri_err.is_validation());
            warn!(
                token,
                validation,
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "regeneration_failed"
            );
        }
    }
}
