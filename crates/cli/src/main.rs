//! Run notification CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments** — which lifecycle event to render and where the
//!    defaults, context and run-status documents live.
//! 2. **Wire logging** — `tracing-subscriber` with a JSON formatter on stderr,
//!    so stdout carries nothing but the payload.
//! 3. **Construct infrastructure** — load the documents and the file-backed
//!    organization source from the `deployment` crate and hand them to
//!    [`MessageAssembler`].
//! 4. **Gate and print** — optionally apply the `fail_only` and
//!    `send_start_message` switches, then write the payload as JSON.
//!
//! Delivering the payload to a webhook is left to the caller.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use deployment::{ClientConfigOrganization, DEFAULT_CLIENT_CONFIG_PATH};
use notification::{Context, LifecycleEvent, MessageAssembler};
use tracing::info;

/// Builds a chat-webhook attachment describing a run lifecycle event and
/// prints it as JSON.
#[derive(Debug, Parser)]
#[command(name = "run-notify", version)]
struct Args {
    /// Lifecycle event to describe: start, success, failure or end.
    event: LifecycleEvent,

    /// JSON file holding the deployment's default options.
    #[arg(long, env = "RUN_NOTIFY_DEFAULTS")]
    defaults: PathBuf,

    /// JSON file holding the run-status snapshot.
    #[arg(long, env = "RUN_NOTIFY_RUN_STATUS")]
    run_status: PathBuf,

    /// JSON file holding per-invocation overrides. Defaults to no overrides.
    #[arg(long, env = "RUN_NOTIFY_CONTEXT")]
    context: Option<PathBuf>,

    /// Client configuration file the organization is read from.
    #[arg(long, env = "RUN_NOTIFY_CLIENT_CONFIG", default_value = DEFAULT_CLIENT_CONFIG_PATH)]
    client_config: PathBuf,

    /// Print nothing when `fail_only` or `send_start_message` rule the event out.
    #[arg(long)]
    respect_gates: bool,

    /// Pretty-print the payload.
    #[arg(long)]
    pretty: bool,

    /// Log filter directives, e.g. `info` or `notification=debug`.
    #[arg(long, env = "RUN_NOTIFY_LOG", default_value = "warn")]
    log: String,
}

/// Whether a message for `event` should be sent, given the resolved switches.
///
/// Unset switches behave as `false`: no start messages, and every outcome
/// reported.
fn should_send(event: LifecycleEvent, assembler: &MessageAssembler, context: &Context) -> bool {
    match event {
        LifecycleEvent::Start => assembler.should_send_on_start(context) == Some(true),
        LifecycleEvent::Success | LifecycleEvent::End => {
            assembler.should_send_only_on_failure(context) != Some(true)
        }
        LifecycleEvent::Failure => true,
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let defaults = deployment::load_defaults(&args.defaults).context("loading defaults")?;
    let run_status =
        deployment::load_run_status(&args.run_status).context("loading run status")?;
    let context = match &args.context {
        Some(path) => deployment::load_context(path).context("loading context")?,
        None => Context::default(),
    };

    let assembler = MessageAssembler::new(
        defaults,
        Arc::new(run_status),
        Arc::new(ClientConfigOrganization::new(args.client_config)),
    );

    if args.respect_gates && !should_send(args.event, &assembler, &context) {
        info!(event = %args.event, "message suppressed by configuration");
        return Ok(());
    }

    let payload = assembler.build(args.event, &context);

    let mut stdout = io::stdout().lock();
    let written = if args.pretty {
        serde_json::to_writer_pretty(&mut stdout, &payload)
    } else {
        serde_json::to_writer(&mut stdout, &payload)
    };
    written.context("serializing payload")?;
    writeln!(stdout).context("writing payload")?;

    info!(event = %args.event, fields = payload.fields().len(), "message written");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(args.log.as_str())
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false)
        .init();

    run(args)
}
