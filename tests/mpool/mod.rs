use errno_rail::mpool::{self, AllocError, Collector, MemoryPool, PoolConfig, SystemCollector};
use errno_rail::contract::{Contract, EntryPolicy};
use errno_rail::{contract, log, register, ErrorCode, PoolBuffer};
use std::fs;
use std::thread;

/// Counts `init` calls and refuses requests above `max`.
#[derive(Default)]
struct CountingCollector {
    inits: usize,
    max: Option<usize>,
    inner: SystemCollector,
}

impl Collector for CountingCollector {
    fn init(&mut self) {
        self.inits += 1;
        self.inner.init();
    }

    fn allocate(&mut self, size: usize) -> Option<Vec<u8>> {
        match self.max {
            Some(max) if size > max => None,
            _ => self.inner.allocate(size),
        }
    }

    fn reallocate(&mut self, block: &mut Vec<u8>, size: usize) -> Option<()> {
        match self.max {
            Some(max) if size > max => None,
            _ => self.inner.reallocate(block, size),
        }
    }
}

#[test]
fn alloc_returns_requested_length_and_none() {
    thread::spawn(|| {
        let buf = mpool::alloc(24).unwrap();
        assert_eq!(buf.len(), 24);
        assert!(buf.iter().all(|&b| b == 0));
        assert_eq!(register::get(), ErrorCode::NONE);
    })
    .join()
    .unwrap();
}

#[test]
#[should_panic(expected = "allocation size must be greater than zero")]
fn zero_sized_alloc_is_a_contract_violation() {
    let _ = mpool::alloc(0);
}

#[test]
#[should_panic(expected = "output slot must be empty")]
fn alloc_into_an_occupied_slot_is_a_contract_violation() {
    let mut slot = Some(mpool::alloc(4).unwrap());
    let _ = mpool::alloc_into(&mut slot, 4);
}

#[test]
#[should_panic(expected = "reallocation size must be greater than zero")]
fn zero_sized_realloc_is_a_contract_violation() {
    let mut buf = mpool::alloc(4).unwrap();
    let _ = mpool::realloc(&mut buf, 0);
}

#[test]
fn alloc_into_fills_an_empty_slot() {
    let mut slot: Option<PoolBuffer> = None;
    assert_eq!(mpool::alloc_into(&mut slot, 7), ErrorCode::NONE);
    assert_eq!(slot.map(|buf| buf.len()), Some(7));
}

#[test]
fn realloc_preserves_the_common_prefix() {
    let mut buf = mpool::alloc(4).unwrap();
    buf.copy_from_slice(&[1, 2, 3, 4]);

    mpool::realloc(&mut buf, 10).unwrap();
    assert_eq!(buf.len(), 10);
    assert_eq!(&buf[..4], &[1, 2, 3, 4]);
    assert!(buf[4..].iter().all(|&b| b == 0));

    mpool::realloc(&mut buf, 2).unwrap();
    assert_eq!(buf.as_slice(), &[1, 2]);
}

#[test]
fn collector_is_initialised_lazily_and_once() {
    let mut pool = MemoryPool::new(CountingCollector::default());
    assert!(!pool.is_ready());
    assert_eq!(pool.collector().inits, 0);

    let mut buf = pool.try_allocate(8).unwrap();
    let _other = pool.try_allocate(8).unwrap();
    pool.try_reallocate(&mut buf, 16).unwrap();

    assert!(pool.is_ready());
    assert_eq!(pool.collector().inits, 1);
}

#[test]
fn thread_pool_is_not_ready_before_first_request() {
    thread::spawn(|| {
        assert!(!mpool::is_ready());
        let _buf = mpool::alloc(1).unwrap();
        assert!(mpool::is_ready());
    })
    .join()
    .unwrap();
}

#[test]
fn dropping_buffers_returns_their_bytes() {
    let mut pool = MemoryPool::default();
    let a = pool.try_allocate(100).unwrap();
    let mut b = pool.try_allocate(50).unwrap();
    pool.try_reallocate(&mut b, 70).unwrap();

    let stats = pool.stats();
    assert_eq!(stats.live_bytes, 170);
    assert_eq!(stats.live_buffers, 2);
    assert_eq!(stats.allocations, 2);
    assert_eq!(stats.reallocations, 1);

    drop(a);
    drop(b);
    let stats = pool.stats();
    assert_eq!(stats.live_bytes, 0);
    assert_eq!(stats.live_buffers, 0);
}

#[test]
fn collector_refusal_is_reported_as_exhaustion() {
    let mut pool = MemoryPool::new(CountingCollector { max: Some(32), ..Default::default() });

    assert_eq!(pool.try_allocate(64).unwrap_err(), AllocError::Exhausted { requested: 64 });
    assert_eq!(pool.stats().failures, 1);
}

#[test]
fn impossible_requests_fail_instead_of_aborting() {
    let mut pool = MemoryPool::default();
    let err = pool.try_allocate(usize::MAX).unwrap_err();
    assert_eq!(err.requested(), usize::MAX);
}

#[test]
fn heap_limit_caps_live_bytes() {
    let mut pool =
        MemoryPool::with_config(SystemCollector::new(), PoolConfig::default().with_max_heap_size(64));

    let mut buf = pool.try_allocate(48).unwrap();
    assert!(matches!(
        pool.try_allocate(32),
        Err(AllocError::HeapLimit { requested: 32, live: 48, limit: 64 })
    ));
    assert!(pool.try_reallocate(&mut buf, 80).is_err());
    assert_eq!(buf.len(), 48);

    drop(buf);
    assert!(pool.try_allocate(64).is_ok());
}

#[test]
#[should_panic(expected = "buffer was not allocated by this pool")]
fn reallocating_a_foreign_buffer_is_a_contract_violation() {
    let mut mine = MemoryPool::default();
    let mut theirs = MemoryPool::default();

    let mut buf = theirs.try_allocate(4).unwrap();
    let _ = mine.try_reallocate(&mut buf, 8);
}

#[test]
fn failed_alloc_sets_register_and_logs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mpool.log");

    thread::spawn({
        let path = path.clone();
        move || {
            log::open(&path, true);
            mpool::set_heap_limit(Some(16));

            assert_eq!(mpool::alloc(64).unwrap_err(), ErrorCode::MPOOL);
            assert_eq!(register::get(), ErrorCode::MPOOL);
            assert_eq!(mpool::stats().failures, 1);

            log::close();
        }
    })
    .join()
    .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[E] "));
    assert!(lines[0].contains("0x00010001"));
    assert!(lines[0].contains("allocate()"));
    assert!(lines[1].contains("failed to allocate 64 bytes of memory"));
}

#[test]
fn failed_realloc_keeps_the_buffer() {
    thread::spawn(|| {
        let mut buf = mpool::alloc(8).unwrap();
        buf[0] = 0xAB;
        mpool::set_heap_limit(Some(8));

        assert_eq!(mpool::realloc(&mut buf, 9), Err(ErrorCode::MPOOL));
        assert_eq!(buf.len(), 8);
        assert_eq!(buf[0], 0xAB);
        assert_eq!(register::get(), ErrorCode::MPOOL);
    })
    .join()
    .unwrap();
}

#[test]
fn allocation_failure_aborts_an_enclosing_block() {
    thread::spawn(|| {
        mpool::set_heap_limit(Some(10));
        let reached = std::cell::Cell::new(false);

        let done = contract::attempt(|| {
            let _small = mpool::alloc(4)?;
            let _big = mpool::alloc(100)?;
            reached.set(true);
            Ok(())
        })
        .run();

        assert_eq!(done.code(), ErrorCode::MPOOL);
        assert!(!reached.get());
    })
    .join()
    .unwrap();
}

#[test]
fn successful_allocation_keeps_an_inherited_code() {
    thread::spawn(|| {
        let stale = ErrorCode::new(0x0100_0009);
        register::set(stale);

        let done = Contract::new()
            .entry(EntryPolicy::Inherit)
            .attempt(|| {
                let mut buf = mpool::alloc(4)?;
                mpool::realloc(&mut buf, 8)?;
                Ok(buf.len())
            })
            .run();

        assert_eq!(done.value(), Some(&8));
        assert_eq!(done.code(), stale);
        assert_eq!(register::get(), stale);
    })
    .join()
    .unwrap();
}

#[test]
fn failed_allocation_overrides_an_inherited_code() {
    thread::spawn(|| {
        register::set(ErrorCode::new(0x0100_0009));
        mpool::set_heap_limit(Some(4));

        let done = Contract::new()
            .entry(EntryPolicy::Inherit)
            .attempt(|| mpool::alloc(16).map(|buf| buf.len()))
            .run();

        assert_eq!(done.code(), ErrorCode::MPOOL);
        assert!(done.value().is_none());
    })
    .join()
    .unwrap();
}
