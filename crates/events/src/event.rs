use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate after a command was accepted.
///
/// Aggregate state only changes by applying events, so an event must carry
/// everything `apply` needs.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted `context.aggregate.action` name, e.g. "purchasing.shopping_list.item_added".
    fn event_type(&self) -> &'static str;

    /// Payload schema version.
    fn version(&self) -> u32;

    /// Business time of the change.
    fn occurred_at(&self) -> DateTime<Utc>;
}
