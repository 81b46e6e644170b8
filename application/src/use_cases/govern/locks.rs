//! Per-subject serialization
//!
//! Every write path for a subject (vote insert/update, recount, manual
//! publish, resubmit) runs while holding that subject's guard. Subjects never
//! share a guard, so writes on different subjects proceed in parallel.

use governance_domain::SubjectId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-subject async mutexes
///
/// Entries are created on first use and dropped again once no guard or
/// waiter references them.
#[derive(Default)]
pub struct SubjectLocks {
    inner: Mutex<HashMap<SubjectId, Arc<AsyncMutex<()>>>>,
}

impl SubjectLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `subject`
    pub async fn acquire(&self, subject: &SubjectId) -> SubjectGuard<'_> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.entry(subject.clone()).or_default())
        };

        let guard = lock.lock_owned().await;
        SubjectGuard {
            locks: self,
            subject: subject.clone(),
            guard: Some(guard),
        }
    }

    /// Number of subjects with a live guard or waiter
    pub fn active(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Exclusive access to one subject, released on drop
pub struct SubjectGuard<'a> {
    locks: &'a SubjectLocks,
    subject: SubjectId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SubjectGuard<'_> {
    fn drop(&mut self) {
        // Release first so the strong count below only sees waiters
        self.guard.take();

        let mut map = self
            .locks
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if map
            .get(&self.subject)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.subject);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_guard_is_released_and_pruned() {
        let locks = SubjectLocks::new();
        {
            let _guard = locks.acquire(&"p-1".into()).await;
            assert_eq!(locks.active(), 1);
        }
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn test_different_subjects_do_not_block() {
        let locks = SubjectLocks::new();
        let _a = locks.acquire(&"p-1".into()).await;
        let b =
            tokio::time::timeout(Duration::from_millis(100), locks.acquire(&"p-2".into())).await;
        assert!(b.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_subject_is_serialized() {
        let locks = Arc::new(SubjectLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let max_inside = Arc::clone(&max_inside);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(&"p-1".into()).await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_inside.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active(), 0);
    }
}
