//! Membership Module Tests
//!
//! ## Test Scopes
//! - **Identifiers**: Uniqueness, equality and serialization of `ProcessId`.
//! - **Process**: Address accessors and consistent snapshots under concurrent writers.
//! - **Registry**: Get-or-create semantics, including concurrent creation.

#[cfg(test)]
mod tests {
    use crate::membership::{Process, ProcessAddr, ProcessId, ProcessRegistry};
    use std::sync::{Arc, Barrier};

    // ============================================================
    // PROCESS ID TESTS
    // ============================================================

    #[test]
    fn test_process_id_is_unique() {
        let id1 = ProcessId::new();
        let id2 = ProcessId::new();

        assert_ne!(id1, id2, "Each ProcessId should be unique");
    }

    #[test]
    fn test_process_id_hash() {
        use std::collections::HashSet;

        let id = ProcessId::new();
        let mut set = HashSet::new();
        set.insert(id);
        set.insert(id);
        set.insert(ProcessId::new());

        assert_eq!(set.len(), 2, "HashSet should have 2 unique ProcessIds");
    }

    #[test]
    fn test_process_id_serialization() {
        let id = ProcessId::new();

        let json = serde_json::to_string(&id).expect("Serialization failed");
        let restored: ProcessId = serde_json::from_str(&json).expect("Deserialization failed");

        assert_eq!(restored, id);
        assert_eq!(json, format!("\"{}\"", id));
    }

    // ============================================================
    // PROCESS TESTS
    // ============================================================

    #[test]
    fn test_new_process_is_unaddressed() {
        let id = ProcessId::new();
        let process = Process::new(id);

        assert_eq!(process.id(), id);
        assert_eq!(process.host(), "");
        assert_eq!(process.port_tcp(), 0);
        assert_eq!(process.port_http(), 0);
    }

    #[test]
    fn test_process_setters() {
        let process = Process::new(ProcessId::new());

        process.set_host("10.0.0.7");
        process.set_port_tcp(12000);
        process.set_port_http(15000);

        assert_eq!(process.host(), "10.0.0.7");
        assert_eq!(process.port_tcp(), 12000);
        assert_eq!(process.port_http(), 15000);
        assert_eq!(process.addr().tcp_endpoint(), "10.0.0.7:12000");
        assert_eq!(process.addr().http_endpoint(), "10.0.0.7:15000");
    }

    #[test]
    fn test_process_addr_snapshot_is_never_torn() {
        let process = Arc::new(Process::with_addr(
            ProcessId::new(),
            ProcessAddr::new("host-0", 0, 0),
        ));
        let writers = 4;
        let barrier = Barrier::new(writers + 1);

        std::thread::scope(|s| {
            for w in 0..writers {
                let process = process.clone();
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    for i in 0..500u16 {
                        let port = w as u16 * 1000 + i;
                        process.set_addr(ProcessAddr::new(format!("host-{}", port), port, port));
                    }
                });
            }

            barrier.wait();
            for _ in 0..2000 {
                let addr = process.addr();
                assert_eq!(addr.host, format!("host-{}", addr.port_tcp));
                assert_eq!(addr.port_tcp, addr.port_http);
            }
        });
    }

    // ============================================================
    // REGISTRY TESTS
    // ============================================================

    #[test]
    fn test_registry_get_or_create_returns_same_instance() {
        let registry = ProcessRegistry::new();
        let id = ProcessId::new();

        let p1 = registry.get_or_create(id);
        let p2 = registry.get_or_create(id);

        assert!(Arc::ptr_eq(&p1, &p2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_register_updates_address() {
        let registry = ProcessRegistry::new();
        let id = ProcessId::new();

        let created = registry.get_or_create(id);
        registry.register(id, ProcessAddr::new("127.0.0.1", 10101, 10102));

        assert_eq!(created.host(), "127.0.0.1");
        assert_eq!(registry.get(&id).unwrap().port_http(), 10102);
    }

    #[test]
    fn test_registry_unknown_id() {
        let registry = ProcessRegistry::new();

        assert!(registry.is_empty());
        assert!(registry.get(&ProcessId::new()).is_none());
        assert!(!registry.contains(&ProcessId::new()));
    }

    #[test]
    fn test_registry_all_is_sorted() {
        let registry = ProcessRegistry::new();
        for _ in 0..10 {
            registry.get_or_create(ProcessId::new());
        }

        let ids: Vec<ProcessId> = registry.all().iter().map(|p| p.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(ids.len(), 10);
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_registry_concurrent_get_or_create() {
        let registry = ProcessRegistry::new();
        let id = ProcessId::new();
        let threads = 16;
        let barrier = Barrier::new(threads);

        let created: Vec<Arc<Process>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        registry.get_or_create(id)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(registry.len(), 1);
        for process in &created {
            assert!(Arc::ptr_eq(process, &created[0]));
        }
    }
}
