//! Lock aliases used across the workspace.

/// Mutex used for state shared between the simulation thread and network tasks.
pub type SyncMutex<T> = parking_lot::Mutex<T>;
