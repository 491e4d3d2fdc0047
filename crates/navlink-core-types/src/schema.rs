//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Relationship identifiers
pub const FIELD_OWNER_KEY: &str = "owner_key";
pub const FIELD_ITEM_KEY: &str = "item_key";
pub const FIELD_PROPERTY: &str = "property";
pub const FIELD_INDEX: &str = "index";

// Sync decisions
pub const FIELD_ACTION: &str = "action";
pub const FIELD_REASON: &str = "reason";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
