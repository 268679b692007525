use std::sync::Arc;
use std::thread;

use dredd::{run_chain, Rule, RuleContext};

#[test]
fn concurrent_writers_and_readers() {
    let ctx = Arc::new(RuleContext::new());
    let mut handles = vec![];

    for t in 0..8_i64 {
        let ctx = Arc::clone(&ctx);
        handles.push(thread::spawn(move || {
            for i in 0..100 {
                ctx.set(format!("t{t}_{i}"), t * 1000 + i);
                let _ = ctx.get(&format!("t{t}_{}", i / 2));
                let _ = ctx.keys();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(ctx.len(), 800);
    assert_eq!(ctx.get("t3_42"), Some(3042));
}

#[test]
fn last_writer_wins_on_one_key() {
    let ctx = Arc::new(RuleContext::new());
    let handles: Vec<_> = (0..4_u32)
        .map(|t| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                for _ in 0..50 {
                    ctx.set("shared", t);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(ctx.len(), 1);
    assert!(ctx.get("shared").is_some_and(|v| v < 4));
}

#[test]
fn store_inspected_from_another_thread_during_run() {
    let ctx = Arc::new(RuleContext::<u64>::new());
    let observer_ctx = Arc::clone(&ctx);

    let root = Rule::<u64>::chain().on_execute(|v| {
        for i in 0..1000 {
            v.context().set("progress", i);
        }
    });

    let observer = thread::spawn(move || {
        let mut max_seen = 0;
        for _ in 0..1000 {
            if let Some(p) = observer_ctx.get("progress") {
                max_seen = max_seen.max(p);
            }
        }
        max_seen
    });

    run_chain(ctx.as_ref(), &root).unwrap();
    let max_seen = observer.join().unwrap();

    assert!(max_seen <= 999);
    assert_eq!(ctx.get("progress"), Some(999));
}

#[test]
fn hooks_can_reenter_the_store() {
    let root = Rule::<i64>::chain()
        .on_eval(|v| {
            let ctx = v.context();
            ctx.set("visits", ctx.get("visits").unwrap_or(0) + 1);
            ctx.exists("visits")
        })
        .on_execute(|v| {
            let ctx = v.context();
            for key in ctx.keys() {
                let value = ctx.must_get(&key);
                ctx.set(format!("{key}_copy"), value);
            }
            ctx.delete("visits");
        });
    let ctx = RuleContext::new();

    run_chain(&ctx, &root).unwrap();

    assert!(!ctx.exists("visits"));
    assert_eq!(ctx.get("visits_copy"), Some(1));
}

#[test]
fn store_is_reusable_across_runs() {
    let root = Rule::<i64>::chain().on_execute(|v| {
        let runs = v.context().get("runs").unwrap_or(0);
        v.context().set("runs", runs + 1);
    });
    let ctx = RuleContext::new();

    for _ in 0..5 {
        run_chain(&ctx, &root).unwrap();
    }

    assert_eq!(ctx.get("runs"), Some(5));
}
