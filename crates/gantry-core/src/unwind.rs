//! Structured unwinding without native exception support
//!
//! Emulates try/catch/throw for a host language whose calling convention
//! cannot express exceptions. A protected scope is entered with
//! [`run_protected`]; a [`throw`] anywhere below it (any number of call
//! frames deep) unwinds to the innermost running scope, whose caller then
//! hands the exception to a handler via [`register_handler`]. Scopes nest
//! strictly LIFO: a re-throw from a handler propagates to the next
//! enclosing scope.
//!
//! State is per-thread. The depth counter and the pending-exception slot
//! live in an [`UnwindContext`]; the module-level functions delegate to a
//! thread-local context so the ambient "are we inside a try scope" contract
//! holds without any cross-thread sharing.
//!
//! Throws travel as Rust panics carrying a private signal type. Foreign
//! panics (anything that is not a throw) pass through protected scopes
//! untouched.

use gantry_sdk::ExceptionObject;
use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::panic::{self, AssertUnwindSafe};

/// Unwind payload distinguishing a throw from a foreign panic.
struct ThrowSignal(ExceptionObject);

thread_local! {
    static AMBIENT: UnwindContext = UnwindContext::new();
}

/// Outcome of a protected block
#[derive(Debug)]
pub enum Protected<T> {
    /// The block ran to completion
    Completed(T),
    /// A throw reached this scope first; the exception is pending for the
    /// next registered handler
    Thrown,
}

impl<T> Protected<T> {
    /// The completed value, if the block was not unwound
    pub fn completed(self) -> Option<T> {
        match self {
            Protected::Completed(value) => Some(value),
            Protected::Thrown => None,
        }
    }

    /// True when a throw was intercepted at this scope
    pub fn was_thrown(&self) -> bool {
        matches!(self, Protected::Thrown)
    }
}

/// Usage errors detected by the unwinding engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnwindError {
    /// Exception object consumed or re-thrown more than once
    #[error("exception object already consumed")]
    DoubleConsume,
}

/// An intercepted exception handed to a catch handler.
///
/// The handler must either [`consume`](Caught::consume) the exception or
/// [`rethrow`](Caught::rethrow) it — never both. Dropping the guard without
/// doing either swallows the exception and the scope resolves normally.
pub struct Caught<'ctx> {
    ctx: &'ctx UnwindContext,
    exception: Option<ExceptionObject>,
}

impl Caught<'_> {
    /// The message of the pending exception, unless already consumed
    pub fn message(&self) -> Option<&str> {
        self.exception.as_ref().map(ExceptionObject::message)
    }

    /// Take ownership of the exception, resolving the scope
    pub fn consume(&mut self) -> Result<ExceptionObject, UnwindError> {
        self.exception.take().ok_or(UnwindError::DoubleConsume)
    }

    /// Propagate the exception to the next enclosing protected scope.
    ///
    /// Diverges on success. Returns [`UnwindError::DoubleConsume`] if the
    /// exception was already consumed or re-thrown.
    pub fn rethrow(&mut self) -> Result<Infallible, UnwindError> {
        match self.exception.take() {
            Some(exception) => self.ctx.throw(exception),
            None => Err(UnwindError::DoubleConsume),
        }
    }
}

/// Per-thread unwinding state: the catch-depth counter and the
/// pending-exception slot.
///
/// Every thread keeps its own context; the type is not `Sync`, so a single
/// context can never be shared across threads. Most callers use the
/// module-level functions, which operate on a thread-local context.
pub struct UnwindContext {
    depth: Cell<usize>,
    pending: RefCell<Option<ExceptionObject>>,
}

impl UnwindContext {
    /// Create a fresh context with depth 0 and nothing pending
    pub fn new() -> Self {
        UnwindContext {
            depth: Cell::new(0),
            pending: RefCell::new(None),
        }
    }

    /// Number of protected scopes currently running on this context
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Execute `block` inside a fresh protected scope.
    ///
    /// The depth counter is incremented on entry and restored on exit
    /// whether the block completes, throws, or panics. A throw raised
    /// anywhere during the block — including transitively through nested
    /// calls — is intercepted here unless an inner scope intercepts it
    /// first. The intercepted exception stays pending until a handler
    /// registered on this context takes it.
    pub fn run_protected<T>(&self, block: impl FnOnce() -> T) -> Protected<T> {
        struct DepthGuard<'a>(&'a Cell<usize>);
        impl Drop for DepthGuard<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() - 1);
            }
        }

        self.depth.set(self.depth.get() + 1);
        let _guard = DepthGuard(&self.depth);

        match panic::catch_unwind(AssertUnwindSafe(block)) {
            Ok(value) => Protected::Completed(value),
            Err(payload) => match payload.downcast::<ThrowSignal>() {
                Ok(signal) => {
                    // A later throw replaces an earlier exception nobody
                    // registered a handler for.
                    *self.pending.borrow_mut() = Some(signal.0);
                    Protected::Thrown
                }
                Err(foreign) => panic::resume_unwind(foreign),
            },
        }
    }

    /// Hand the pending exception of the nearest resolved scope to
    /// `handler`.
    ///
    /// Invoked exactly once if a scope on this context reached
    /// [`Protected::Thrown`] and its exception has not been taken yet;
    /// returns whether the handler ran. The handler receives a [`Caught`]
    /// guard it may consume or re-throw.
    pub fn register_handler(&self, handler: impl FnOnce(&mut Caught<'_>)) -> bool {
        let pending = self.pending.borrow_mut().take();
        match pending {
            Some(exception) => {
                let mut caught = Caught {
                    ctx: self,
                    exception: Some(exception),
                };
                handler(&mut caught);
                true
            }
            None => false,
        }
    }

    /// Unwind to the nearest enclosing protected scope.
    ///
    /// With no scope active on this context the throw is an unhandled
    /// fault: the failure is reported and the thread panics with a
    /// diagnostic naming the missing scope. There is no recovery path.
    pub fn throw(&self, exception: ExceptionObject) -> ! {
        if self.depth.get() == 0 {
            gantry_sdk::diag::warn(&format!(
                "unhandled throw with no protected scope active: {}",
                exception.message()
            ));
            panic!(
                "unhandled throw with no protected scope active: {}",
                exception.message()
            );
        }
        panic::panic_any(ThrowSignal(exception))
    }
}

impl Default for UnwindContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute `block` inside a protected scope on this thread's context.
///
/// See [`UnwindContext::run_protected`].
pub fn run_protected<T>(block: impl FnOnce() -> T) -> Protected<T> {
    AMBIENT.with(|ctx| ctx.run_protected(block))
}

/// Register a catch handler with this thread's context.
///
/// See [`UnwindContext::register_handler`].
pub fn register_handler(handler: impl FnOnce(&mut Caught<'_>)) -> bool {
    AMBIENT.with(|ctx| ctx.register_handler(handler))
}

/// Throw an exception on this thread's context.
///
/// See [`UnwindContext::throw`].
pub fn throw(exception: ExceptionObject) -> ! {
    AMBIENT.with(|ctx| ctx.throw(exception))
}

/// Catch depth of this thread's context: the number of protected scopes
/// currently running.
pub fn catch_depth() -> usize {
    AMBIENT.with(|ctx| ctx.depth())
}

/// True when a panic payload is a throw in flight.
///
/// Bridges that install a panic hook can use this to keep throw traffic
/// out of their crash reporting; every throw crosses the hook once per
/// scope it unwinds through.
pub fn is_throw_payload(payload: &(dyn std::any::Any + Send)) -> bool {
    payload.is::<ThrowSignal>()
}
