//! Span attribute names for memory operations.
//!
//! String slices usable as field names in `tracing::info_span!` and as
//! OpenTelemetry attribute keys when the OTel layer is enabled.

/// The operation being performed (one of the `OP_*` values).
pub const MNEMO_OPERATION_NAME: &str = "mnemo.operation.name";

/// Ordinal assigned to a stored memory.
pub const MNEMO_MEMORY_ORDINAL: &str = "mnemo.memory.ordinal";

/// Number of memories held by the store.
pub const MNEMO_MEMORY_COUNT: &str = "mnemo.memory.count";

/// Result limit requested by a query.
pub const MNEMO_QUERY_K: &str = "mnemo.query.k";

/// Embedding model identifier.
pub const MNEMO_EMBEDDER_MODEL: &str = "mnemo.embedder.model";

/// Condenser identifier.
pub const MNEMO_CONDENSER_NAME: &str = "mnemo.condenser.name";

// --- Operation name values ---

/// Seeding the store with the bundled demo passages.
pub const OP_SEED: &str = "seed";

/// Ingesting one text.
pub const OP_ADD: &str = "add";

/// Nearest-neighbour lookup.
pub const OP_QUERY: &str = "query";
