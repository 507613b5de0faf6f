#![forbid(unsafe_code)]

mod common;

use common::*;
use dv_storage::ListVersionsRequest;
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: usize = 10;

#[test]
fn concurrent_updates_get_distinct_gapless_versions() {
    let (_dir, mut store) = open_store();
    let t1 = tag(&mut store, "shared");
    let doc = create_doc(&mut store, "base", &[t1]);

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let mut handle = store.reopen().expect("second connection");
            let barrier = Arc::clone(&barrier);
            let document_id = doc.id;
            thread::spawn(move || {
                barrier.wait();
                handle
                    .update_document(edit_content(document_id, &format!("writer {writer}")))
                    .expect("concurrent update")
            })
        })
        .collect();

    let mut numbers: Vec<i64> = handles
        .into_iter()
        .map(|handle| {
            handle
                .join()
                .expect("writer thread")
                .version
                .expect("content changed")
                .version_number
        })
        .collect();
    numbers.sort_unstable();
    let expected: Vec<i64> = (2..=(WRITERS as i64 + 1)).collect();
    assert_eq!(numbers, expected);

    let page = store
        .get_version_history(ListVersionsRequest {
            document_id: doc.id,
            actor_id: AUTHOR,
            page: 1,
            page_size: Some(100),
        })
        .expect("history");
    assert_eq!(page.total, WRITERS as i64 + 1);

    let current = store.get_document(doc.id, AUTHOR).expect("get");
    assert_eq!(current.version_count, WRITERS as i64 + 1);
    assert_eq!(current.tag_ids(), vec![t1]);
    assert_eq!(use_count(&store, t1), 1);
}

#[test]
fn concurrent_retags_keep_counts_consistent() {
    let (_dir, mut store) = open_store();
    let a = tag(&mut store, "a");
    let b = tag(&mut store, "b");
    let doc = create_doc(&mut store, "base", &[a]);

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let mut handle = store.reopen().expect("second connection");
            let barrier = Arc::clone(&barrier);
            let document_id = doc.id;
            let target = if writer % 2 == 0 { vec![a, b] } else { vec![b] };
            thread::spawn(move || {
                barrier.wait();
                let mut request = edit_content(document_id, "base");
                request.tag_ids = Some(tag_ids(&target));
                handle.update_document(request).expect("retag");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let current = store.get_document(doc.id, AUTHOR).expect("get");
    assert_eq!(current.version_count, 1);
    for tag_id in [a, b] {
        let linked = i64::from(current.tag_ids().contains(&tag_id));
        assert_eq!(use_count(&store, tag_id), linked);
    }
}
