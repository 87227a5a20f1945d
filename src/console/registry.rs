//! Command registry
//!
//! Append-only table of named handlers, capacity fixed at construction.
//! Lookup is a linear scan in registration order, so the first entry
//! registered under a name shadows any later duplicate.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::Write;

use super::RegistryError;

/// What a running handler can reach
pub struct CommandContext<'a> {
    /// Output sink (the terminal transport)
    pub out: &'a mut dyn Write,
    /// The registry the handler was found in. Handlers may register more
    /// commands through it; they become visible to the next dispatch.
    pub registry: &'a mut Registry,
}

/// A command implementation.
///
/// `args` is everything after the first space of the line, verbatim, or
/// `None` when the line held no space at all.
pub trait CommandHandler {
    fn run(&mut self, args: Option<&str>, cx: &mut CommandContext<'_>);
}

/// Handler shared between the registry and an in-flight dispatch
pub type SharedHandler = Rc<RefCell<dyn CommandHandler>>;

struct FnHandler<F>(F);

impl<F> CommandHandler for FnHandler<F>
where
    F: FnMut(Option<&str>, &mut CommandContext<'_>),
{
    fn run(&mut self, args: Option<&str>, cx: &mut CommandContext<'_>) {
        (self.0)(args, cx)
    }
}

/// Closure plus the context value it was registered with
struct BoundHandler<C, F> {
    context: C,
    f: F,
}

impl<C, F> CommandHandler for BoundHandler<C, F>
where
    F: FnMut(Option<&str>, &mut C, &mut CommandContext<'_>),
{
    fn run(&mut self, args: Option<&str>, cx: &mut CommandContext<'_>) {
        (self.f)(args, &mut self.context, cx)
    }
}

/// One registered command
pub struct CommandEntry {
    name: &'static str,
    handler: SharedHandler,
}

impl CommandEntry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get a handle on the handler, independent of the registry borrow
    pub fn handler(&self) -> SharedHandler {
        Rc::clone(&self.handler)
    }
}

impl core::fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandEntry").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Fixed-capacity command table
pub struct Registry {
    entries: Vec<CommandEntry>,
    capacity: usize,
}

impl Registry {
    /// Create an empty registry holding at most `capacity` commands
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Register a handler under `name`.
    ///
    /// Duplicate names are accepted; the earlier entry keeps winning lookups.
    pub fn register<H>(&mut self, name: &'static str, handler: H) -> Result<(), RegistryError>
    where
        H: CommandHandler + 'static,
    {
        self.insert(name, Rc::new(RefCell::new(handler)))
    }

    /// Register a closure
    pub fn register_fn<F>(&mut self, name: &'static str, f: F) -> Result<(), RegistryError>
    where
        F: FnMut(Option<&str>, &mut CommandContext<'_>) + 'static,
    {
        self.register(name, FnHandler(f))
    }

    /// Register a closure together with a context value handed back to it
    /// unchanged on every call. Pass an `Rc` to keep ownership outside.
    pub fn register_with<C, F>(
        &mut self,
        name: &'static str,
        context: C,
        f: F,
    ) -> Result<(), RegistryError>
    where
        C: 'static,
        F: FnMut(Option<&str>, &mut C, &mut CommandContext<'_>) + 'static,
    {
        self.register(name, BoundHandler { context, f })
    }

    fn insert(&mut self, name: &'static str, handler: SharedHandler) -> Result<(), RegistryError> {
        if name.is_empty() || name.contains(' ') {
            return Err(RegistryError::InvalidName);
        }
        if self.entries.len() >= self.capacity {
            return Err(RegistryError::CapacityExceeded { capacity: self.capacity });
        }

        self.entries.push(CommandEntry { name, handler });
        log::debug!("registered command '{}' ({}/{})", name, self.entries.len(), self.capacity);
        Ok(())
    }

    /// Find the first entry registered under exactly `name`
    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Registered names, in registration order
    pub fn list(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .finish()
    }
}
