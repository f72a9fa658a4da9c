//! Observability implementations of the dispatch hooks.

mod metrics_hooks;
mod tracing_hooks;


pub use metrics_hooks::MetricsDispatchHooks;
pub use tracing_hooks::TracingDispatchHooks;
