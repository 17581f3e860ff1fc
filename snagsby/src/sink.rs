//! Destinations that resolved configuration can be written into.

use std::collections::{BTreeMap, HashMap};
use std::env;

/// A destination for resolved key/value pairs.
pub trait ConfigSink {
    /// Stores one key/value pair.
    fn set(&mut self, key: &str, value: &str);
}

impl ConfigSink for BTreeMap<String, String> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

impl ConfigSink for HashMap<String, String> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}

/// Sink writing pairs into the process environment.
///
/// Environment mutation is process-global and not thread-safe: write from a
/// single thread, typically during startup before any workers spawn.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl ConfigSink for ProcessEnv {
    fn set(&mut self, key: &str, value: &str) {
        // Sound under the single-threaded startup contract documented on the
        // type; no other thread may be reading the environment concurrently.
        unsafe { env::set_var(key, value) };
    }
}
