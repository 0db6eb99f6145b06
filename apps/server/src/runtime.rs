use agri::domain::config::RuntimeConfig;
use anyhow::{Result, anyhow};
use std::thread::available_parallelism;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const DEFAULT_WORKER_THREADS: usize = 4;
const MAX_WORKER_THREADS: usize = 1024;
/// 1 `MiB`.
const MIN_STACK_SIZE: usize = 1 << 20;
/// 16 `MiB`.
const MAX_STACK_SIZE: usize = 16 << 20;
const DEFAULT_THREAD_NAME: &str = "agri-worker";

#[derive(Debug, PartialEq, Eq)]
struct Sizing {
    workers: usize,
    stack_size: usize,
    thread_name: String,
}

fn sizing(config: &RuntimeConfig) -> Sizing {
    let workers = config.worker_threads.unwrap_or_else(|| {
        available_parallelism().map_or(DEFAULT_WORKER_THREADS, std::num::NonZero::get)
    });
    let thread_name = if config.thread_name.trim().is_empty() {
        DEFAULT_THREAD_NAME.to_owned()
    } else {
        config.thread_name.clone()
    };

    Sizing {
        workers: workers.clamp(1, MAX_WORKER_THREADS),
        stack_size: config.stack_size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE),
        thread_name,
    }
}

/// Builds the multi-threaded Tokio runtime from the `[runtime]` section.
///
/// Worker count and stack size are clamped to sane bounds rather than rejected.
///
/// # Errors
/// Returns an error if the OS refuses to create the runtime.
pub fn build_runtime(config: &RuntimeConfig) -> Result<Runtime> {
    let sizing = sizing(config);
    debug!(sizing = ?sizing, "Building tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(sizing.workers)
        .thread_name(sizing.thread_name)
        .thread_stack_size(sizing.stack_size)
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}
