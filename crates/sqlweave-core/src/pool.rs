//! Explicit reuse pools for statements and render buffers.
//!
//! A [`Pool`] hands out [`Pooled`] guards. The element is reset when it is
//! acquired and goes back to the pool when the guard drops, on every exit
//! path. Because the guard borrows the pool and the caller borrows the guard,
//! reading a released element's output does not compile.
//!
//! ```rust
//! use sqlweave_core::dialect::PostgresDialect;
//! use sqlweave_core::render::{render_into, IdentQuoting, RenderBuffer};
//! use sqlweave_core::{col, Pool, Select};
//!
//! let selects: Pool<Select> = Pool::new();
//! let buffers: Pool<RenderBuffer> = Pool::new();
//! let dialect = PostgresDialect::new();
//!
//! for id in 0..3 {
//!     let mut select = selects.acquire();
//!     select.column("name").from("users").where_clause(col("id").eq(id))?;
//!     let mut buf = buffers.acquire();
//!     render_into(&*select, &dialect, IdentQuoting::AsNeeded, &mut buf)?;
//!     assert_eq!(buf.sql(), "SELECT name FROM users WHERE id = $1");
//! }
//! assert_eq!(selects.idle(), 1);
//! # Ok::<(), sqlweave_core::Error>(())
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::Result;
use crate::render::{Render, RenderBuffer, RenderContext};

/// Resets a value to its empty state while keeping allocated capacity.
pub trait Recycle {
    /// Clears all content.
    fn recycle(&mut self);
}

impl Recycle for RenderBuffer {
    fn recycle(&mut self) {
        self.clear();
    }
}

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Most idle elements kept; extra returns are dropped.
    pub max_idle: usize,
    /// Elements created up front, capped at `max_idle`.
    pub prefill: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: 64,
            prefill: 0,
        }
    }
}

/// A pool of reusable values.
///
/// The pool is the only shared state in this crate; it is `Sync` and may be
/// used from many threads. Each acquired element has a single owner until
/// its guard drops.
#[derive(Debug)]
pub struct Pool<T> {
    idle: Mutex<Vec<T>>,
    config: PoolConfig,
}

impl<T: Recycle + Default> Pool<T> {
    /// Creates a pool with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Creates a pool with the given configuration.
    #[must_use]
    pub fn with_config(config: PoolConfig) -> Self {
        let prefill = config.prefill.min(config.max_idle);
        let idle: Vec<T> = (0..prefill).map(|_| T::default()).collect();
        debug!(prefill, max_idle = config.max_idle, "created pool");
        Self {
            idle: Mutex::new(idle),
            config,
        }
    }

    /// Takes an element, creating one if none is idle. The element is
    /// always reset before it is returned.
    #[must_use]
    pub fn acquire(&self) -> Pooled<'_, T> {
        let mut value = self.lock().pop().unwrap_or_default();
        value.recycle();
        Pooled { pool: self, value }
    }

    /// Returns the number of idle elements.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    /// Returns the pool configuration.
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    fn release(&self, value: T) {
        let mut idle = self.lock();
        if idle.len() >= self.config.max_idle {
            debug!(max_idle = self.config.max_idle, "pool full, discarding element");
            return;
        }
        idle.push(value);
    }

    // Idle elements are reset on acquire, so a poisoned lock holds nothing
    // that needs repair.
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Recycle + Default> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An element on loan from a [`Pool`]; returned when dropped.
#[derive(Debug)]
pub struct Pooled<'a, T: Recycle + Default> {
    pool: &'a Pool<T>,
    value: T,
}

impl<T: Recycle + Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Recycle + Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Recycle + Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.value));
    }
}

impl<T: Recycle + Default + Render> Render for Pooled<'_, T> {
    fn kind(&self) -> &'static str {
        self.value.kind()
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        self.value.render_to(ctx)
    }
}
