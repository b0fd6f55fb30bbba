use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;

use async_state::config::{Config, DemoConfig};
use async_state::logging::init_tracing;
use async_state::{AsyncSnapshot, AsyncState, AsyncStateOptions, AsyncStatus, CounterStore};

/// Drive an async-state controller and print every transition.
#[derive(Debug, Parser)]
#[command(name = "async-state-demo", version, about)]
struct Cli {
    /// Config file (default: <config_dir>/async-state/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Don't start an execution when the controller is built.
    #[arg(long)]
    no_immediate: bool,

    /// Make the producer fail with this message.
    #[arg(long, value_name = "MESSAGE")]
    fail: Option<String>,

    /// Simulated producer latency.
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Number of executions to run.
    #[arg(long, value_name = "N")]
    attempts: Option<u32>,

    /// Print transitions as JSON lines.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if self.no_immediate {
            config.defaults.immediate = false;
        }
        if let Some(message) = &self.fail {
            config.demo.fail_with = Some(message.clone());
        }
        if let Some(delay_ms) = self.delay_ms {
            config.demo.delay_ms = delay_ms;
        }
        if let Some(attempts) = self.attempts {
            config.demo.attempts = attempts;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Reading {
    attempt: i64,
    value: i64,
}

#[derive(Serialize)]
struct Transition<'a> {
    label: &'a str,
    status: AsyncStatus,
    counter: i64,
    #[serde(flatten)]
    snapshot: AsyncSnapshot<Reading>,
}

struct Printer {
    json: bool,
}

impl Printer {
    fn print(
        &self,
        label: &str,
        state: &AsyncState<Reading>,
        counter: &CounterStore,
    ) -> anyhow::Result<()> {
        let transition = Transition {
            label,
            status: state.status(),
            counter: counter.count(),
            snapshot: state.snapshot(),
        };

        if self.json {
            println!("{}", serde_json::to_string(&transition)?);
            return Ok(());
        }

        let data = match &transition.snapshot.data {
            Some(reading) => format!("attempt {} -> {}", reading.attempt, reading.value),
            None => "-".to_string(),
        };
        let error = match &transition.snapshot.error {
            Some(error) => error.message(),
            None => "-".to_string(),
        };
        println!(
            "{:<10} status={:<8} loading={:<5} data={} error={} counter={}",
            transition.label,
            format!("{:?}", transition.status),
            transition.snapshot.is_loading,
            data,
            error,
            transition.counter,
        );
        Ok(())
    }
}

/// Each call bumps the counter, waits `delay_ms`, then resolves or fails.
fn producer(
    counter: Arc<CounterStore>,
    demo: DemoConfig,
) -> impl Fn() -> BoxFuture<'static, anyhow::Result<Reading>> + Send + Sync + 'static {
    move || {
        counter.increment();
        let attempt = counter.count();
        let demo = demo.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(demo.delay_ms)).await;
            match demo.fail_with {
                Some(message) => Err(anyhow::anyhow!(message)),
                None => Ok(Reading {
                    attempt,
                    value: demo.value,
                }),
            }
        }
        .boxed()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging);

    let counter = Arc::new(CounterStore::new());
    let _counter_log = counter.state().subscribe(|state| {
        tracing::info!(
            count = state.count,
            double = state.double_count(),
            positive = state.is_positive(),
            "Counter changed"
        );
    });

    let options = AsyncStateOptions::from(&config.defaults)
        .on_error(|error| tracing::error!(error = %error, "Execution failed"));
    let state = AsyncState::new(producer(Arc::clone(&counter), config.demo.clone()), options)?;
    let _loading_log = state
        .is_loading()
        .subscribe(|loading| tracing::debug!(loading = *loading, "Loading flag changed"));

    let printer = Printer { json: cli.json };
    printer.print("built", &state, &counter)?;

    let mut ran = 0;
    if state.is_loading().get() {
        ran += 1;
        state.settled().await;
        printer.print("settled", &state, &counter)?;
    }

    while ran < config.demo.attempts {
        ran += 1;
        let execution = state.execute();
        printer.print("started", &state, &counter)?;
        execution.await;
        printer.print("settled", &state, &counter)?;
    }

    counter.reset();
    printer.print("done", &state, &counter)?;
    Ok(())
}
