use shared_types::UnixTimestamp;

/// Source of the ledger's notion of "now".
///
/// Handlers never read wall-clock time directly; the runtime samples the
/// clock once per transaction and passes the value down.
pub trait Clock: Send + Sync {
    fn unix_timestamp(&self) -> UnixTimestamp;
}
