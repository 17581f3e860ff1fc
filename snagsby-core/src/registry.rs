//! Insertion-ordered handler registries.

/// An insertion-ordered table mapping names to handlers.
///
/// Registration order is preserved by [`names`](Registry::names) and
/// [`iter`](Registry::iter); re-registering a name replaces the handler
/// without moving it.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    entries: Vec<(String, T)>,
}

impl<T> Registry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a handler under `name`, replacing any existing entry in
    /// place.
    pub fn register(&mut self, name: impl Into<String>, handler: T) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == name) {
            entry.1 = handler;
        } else {
            self.entries.push((name, handler));
        }
    }

    /// Looks up a handler by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.0 == name)
            .map(|entry| &entry.1)
    }

    /// Returns the registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.0.as_str())
    }

    /// Iterates name/handler pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|entry| (entry.0.as_str(), &entry.1))
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
