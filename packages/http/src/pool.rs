//! A fixed-size set of [`Transport`]s shared between threads.
//!
//! The available set is the only state touched by more than one thread. Its
//! lock is held just long enough to push or pop a transport, never across a
//! request.

use std::ops::{Deref, DerefMut};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::Error;
use crate::transport::Transport;

pub struct Pool {
    available: Mutex<Vec<Transport>>,
    ready: Condvar,
    capacity: usize,
    verbose: bool,
    timeout: Duration,
}

impl Pool {
    /// Create a pool of `concurrent` transports sharing `verbose` and
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Fails if `concurrent` is zero or a client cannot be built.
    pub fn new(concurrent: usize, verbose: bool, timeout: Duration) -> Result<Self, Error> {
        if concurrent == 0 {
            return Err(Error::Config {
                message: "pool needs at least one transport".to_string(),
            });
        }

        let transports = (0..concurrent)
            .map(|_| Transport::new(verbose, timeout))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Created HTTP pool with {} transports (timeout {:?})",
            concurrent,
            timeout
        );

        Ok(Self {
            available: Mutex::new(transports),
            ready: Condvar::new(),
            capacity: concurrent,
            verbose,
            timeout,
        })
    }

    /// # Errors
    ///
    /// See [`Pool::new`].
    pub fn from_config(config: &HttpConfig) -> Result<Self, Error> {
        Self::new(config.concurrent, config.verbose, config.timeout())
    }

    /// Take a transport, blocking until one is free.
    pub fn acquire(&self) -> PooledTransport<'_> {
        let mut available = self
            .ready
            .wait_while(self.lock(), |available| available.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        let transport = available.pop();
        drop(available);

        tracing::trace!("Acquired HTTP transport");
        PooledTransport {
            pool: self,
            transport,
        }
    }

    /// Take a transport if one is free right now.
    pub fn try_acquire(&self) -> Option<PooledTransport<'_>> {
        let transport = self.lock().pop()?;
        Some(PooledTransport {
            pool: self,
            transport: Some(transport),
        })
    }

    /// Take a transport, waiting at most `wait`.
    ///
    /// # Errors
    ///
    /// Returns `Error::PoolExhausted` if none was released in time.
    pub fn acquire_timeout(&self, wait: Duration) -> Result<PooledTransport<'_>, Error> {
        let (mut available, _) = self
            .ready
            .wait_timeout_while(self.lock(), wait, |available| available.is_empty())
            .unwrap_or_else(PoisonError::into_inner);

        match available.pop() {
            Some(transport) => Ok(PooledTransport {
                pool: self,
                transport: Some(transport),
            }),
            None => Err(Error::PoolExhausted { waited: wait }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of transports not currently handed out.
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn release(&self, transport: Transport) {
        self.lock().push(transport);
        self.ready.notify_one();
        tracing::trace!("Released HTTP transport");
    }

    // The guarded Vec is valid even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Vec<Transport>> {
        self.available.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("capacity", &self.capacity)
            .field("available", &self.available())
            .field("verbose", &self.verbose)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Exclusive access to one pooled [`Transport`], returned to the pool on
/// drop.
pub struct PooledTransport<'a> {
    pool: &'a Pool,
    transport: Option<Transport>,
}

impl Deref for PooledTransport<'_> {
    type Target = Transport;

    fn deref(&self) -> &Transport {
        self.transport
            .as_ref()
            .unwrap_or_else(|| unreachable!("transport is only taken on drop"))
    }
}

impl DerefMut for PooledTransport<'_> {
    fn deref_mut(&mut self) -> &mut Transport {
        self.transport
            .as_mut()
            .unwrap_or_else(|| unreachable!("transport is only taken on drop"))
    }
}

impl Drop for PooledTransport<'_> {
    fn drop(&mut self) {
        if let Some(transport) = self.transport.take() {
            self.pool.release(transport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn pool(n: usize) -> Pool {
        Pool::new(n, false, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            Pool::new(0, false, Duration::from_secs(1)),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn acquire_and_release_track_availability() {
        let pool = pool(2);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.available(), 2);

        let first = pool.acquire();
        assert_eq!(pool.available(), 1);
        let second = pool.acquire();
        assert_eq!(pool.available(), 0);
        assert!(pool.try_acquire().is_none());

        drop(first);
        assert_eq!(pool.available(), 1);
        drop(second);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn acquire_timeout_errors_when_exhausted() {
        let pool = pool(1);
        let _held = pool.acquire();

        let result = pool.acquire_timeout(Duration::from_millis(50));
        assert!(matches!(result, Err(Error::PoolExhausted { .. })));
    }

    #[test]
    fn acquire_timeout_succeeds_when_released_in_time() {
        let pool = Arc::new(pool(1));
        let held = pool.acquire();

        let waiter = {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let acquired = pool.acquire_timeout(Duration::from_secs(5)).is_ok();
                acquired
            })
        };

        thread::sleep(Duration::from_millis(50));
        drop(held);
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn extra_acquire_blocks_until_release() {
        let pool = Arc::new(pool(1));
        let held = pool.acquire();
        let acquired = Arc::new(AtomicBool::new(false));

        let waiter = {
            let pool = Arc::clone(&pool);
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                let _transport = pool.acquire();
                acquired.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!acquired.load(Ordering::SeqCst));

        drop(held);
        waiter.join().unwrap();
        assert!(acquired.load(Ordering::SeqCst));
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn never_more_than_capacity_in_flight() {
        const CAPACITY: usize = 3;
        const WORKERS: usize = 12;

        let pool = pool(CAPACITY);
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..WORKERS {
                scope.spawn(|| {
                    for _ in 0..5 {
                        let _transport = pool.acquire();
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert!(peak.load(Ordering::SeqCst) <= CAPACITY);
        assert!(peak.load(Ordering::SeqCst) >= 1);
        assert_eq!(pool.available(), CAPACITY);
    }

    #[test]
    fn from_config_uses_config_values() {
        let config = HttpConfig {
            concurrent: 2,
            verbose: true,
            timeout_secs: 7,
            ..Default::default()
        };
        let pool = Pool::from_config(&config).unwrap();
        assert_eq!(pool.capacity(), 2);
        assert!(pool.verbose());
        assert_eq!(pool.timeout(), Duration::from_secs(7));
        assert_eq!(pool.acquire().timeout(), Duration::from_secs(7));
    }
}
