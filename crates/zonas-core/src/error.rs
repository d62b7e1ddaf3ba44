/// A boxed error type shared across the workspace.
///
/// OS-facing entry points in the engine never let one of these escape;
/// failures there degrade into state no-ops. The alias is for internal
/// helpers (file IO, parsing, process launch) that propagate with `?`.
pub type EngineResult<T> = Result<T, Box<dyn std::error::Error>>;
