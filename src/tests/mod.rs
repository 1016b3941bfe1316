//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive `TuiApp` through its crate-private test helpers with a
//! `TestBackend` terminal and in-process log sources.
