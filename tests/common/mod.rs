//! Shared helpers for the integration suites
//!
//! Value types that count their live instances (per thread, so parallel tests
//! don't see each other) and value types that fail or panic on demand.

#![allow(dead_code)]

use rowlayout::{ColumnValue, ValueError};
use std::cell::Cell;
use std::sync::Once;

thread_local! {
    static LIVE: Cell<i64> = Cell::new(0);
    static COPIES: Cell<u64> = Cell::new(0);
}

/// Live `Tracked` values on this thread
pub fn live() -> i64 {
    LIVE.with(Cell::get)
}

/// `Tracked` copies made on this thread
pub fn copies() -> u64 {
    COPIES.with(Cell::get)
}

/// Value type that counts constructions and destructions
#[derive(Debug)]
pub struct Tracked {
    pub value: u32,
    _token: LiveToken,
}

impl Tracked {
    pub fn new(value: u32) -> Self {
        Tracked {
            value,
            _token: LiveToken::new(),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl ColumnValue for Tracked {
    fn create() -> Result<Self, ValueError> {
        Ok(Tracked::new(0))
    }

    fn copy_from(src: &Self) -> Result<Self, ValueError> {
        COPIES.with(|copies| copies.set(copies.get() + 1));
        Ok(Tracked::new(src.value))
    }
}

/// One live instance on the counter; private so every `Tracked` is counted
#[derive(Debug)]
struct LiveToken(());

impl LiveToken {
    fn new() -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        LiveToken(())
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

/// Value type whose constructor always fails
#[derive(Debug)]
pub struct Refuses;

impl ColumnValue for Refuses {
    fn create() -> Result<Self, ValueError> {
        Err(ValueError::construct::<Self>("refused"))
    }

    fn copy_from(_: &Self) -> Result<Self, ValueError> {
        Err(ValueError::construct::<Self>("refused"))
    }
}

/// Value type whose constructor panics
#[derive(Debug)]
pub struct Explodes;

impl ColumnValue for Explodes {
    fn create() -> Result<Self, ValueError> {
        panic!("constructor exploded")
    }

    fn copy_from(_: &Self) -> Result<Self, ValueError> {
        panic!("copy exploded")
    }
}

/// Value type that can be created but not copied
#[derive(Debug, Default)]
pub struct NoCopy;

impl ColumnValue for NoCopy {
    fn create() -> Result<Self, ValueError> {
        Ok(NoCopy)
    }

    fn copy_from(_: &Self) -> Result<Self, ValueError> {
        Err(ValueError::construct::<Self>("not copyable"))
    }
}

/// Route `tracing` output through the test harness
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}
