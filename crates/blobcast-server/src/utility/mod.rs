pub mod tracing_targets;
