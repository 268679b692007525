use dredd::option::{children, evaluation, execute, name, post_execute, pre_execute};
use dredd::{
    run, run_best_first, run_chain, Action, Evaluation, Rule, RuleContext, RuleError, Runner,
    Strategy,
};
use tokio_util::sync::CancellationToken;

#[test]
fn empty_batches_succeed() {
    let ctx: RuleContext<i64> = RuleContext::new();
    let none: [Rule<i64>; 0] = [];
    run(Strategy::Chain, &CancellationToken::new(), &ctx, &none).unwrap();
    run_best_first(&ctx, &none).unwrap();
    Runner::chain().context(&ctx).run(&none).unwrap();
}

#[test]
fn missing_root_reports_its_index() {
    let ctx = RuleContext::new();
    let roots = [Some(Rule::<i64>::best_first()), Some(Rule::best_first()), None];

    let err = run_best_first(&ctx, &roots).unwrap_err();

    assert!(matches!(err, RuleError::NilNode { index: 2 }));
    assert_eq!(err.to_string(), "rule at index 2 is missing");
}

#[test]
fn missing_chain_root() {
    let err = run_chain(&RuleContext::new(), &None::<Rule<i64>>).unwrap_err();
    assert!(matches!(err, RuleError::NilNode { index: 0 }));
}

#[test]
fn missing_root_checked_before_chain_arity() {
    let roots = [None, Some(Rule::<i64>::chain())];
    let err = run(Strategy::Chain, &CancellationToken::new(), &RuleContext::new(), &roots)
        .unwrap_err();
    assert!(matches!(err, RuleError::NilNode { index: 0 }));
}

#[test]
fn missing_context_on_runner() {
    let err = Runner::<i64>::best_first()
        .run(&[Rule::best_first()])
        .unwrap_err();
    assert!(matches!(err, RuleError::NilContext));
}

#[test]
fn deep_chain() {
    let mut rule = Rule::<i64>::chain().on_execute(|v| v.context().set("depth", 0));
    for depth in 1..200 {
        rule = Rule::<i64>::chain()
            .on_execute(move |v| {
                let seen = v.context().get("visited").unwrap_or(0);
                v.context().set("visited", seen + 1);
                v.context().set("last_depth", depth);
            })
            .with_child(rule);
    }
    let ctx = RuleContext::new();

    run_chain(&ctx, &rule).unwrap();

    assert_eq!(ctx.get("visited"), Some(199));
    assert_eq!(ctx.get("depth"), Some(0));
    // Outer rules fire first, so the innermost non-leaf rule writes last.
    assert_eq!(ctx.get("last_depth"), Some(1));
}

#[test]
fn wide_best_first_picks_last() {
    let mut siblings: Vec<Rule<usize>> = (0..99)
        .map(|_| Rule::best_first().on_eval(|_| false))
        .collect();
    siblings.push(Rule::best_first().on_execute(|v| v.context().set("winner", 99)));
    let ctx = RuleContext::new();

    let report = Runner::best_first()
        .context(&ctx)
        .run_detailed(&siblings)
        .unwrap();

    assert_eq!(ctx.get("winner"), Some(99));
    assert_eq!(report.skipped().count(), 99);
    assert_eq!(report.executed().count(), 1);
}

#[test]
fn options_build_a_working_tree() {
    let gate = Evaluation::<&'static str>::detailed(|v| {
        let mode = v.context().get("mode").ok_or("mode not set")?;
        Ok(mode == "on")
    });
    let leaf = Rule::with_options(
        Strategy::Chain,
        [
            name("leaf"),
            evaluation(gate),
            pre_execute(Action::simple(|v| v.context().set("pre", "yes"))),
            execute(Action::simple(|v| v.context().set("exec", "yes"))),
            post_execute(Action::detailed(|v| {
                v.context().set("post", "yes");
                Ok(())
            })),
        ],
    );
    let root = Rule::with_options(Strategy::Chain, [name("root"), children([leaf])]);

    let ctx = RuleContext::new().with_entry("mode", "on");
    run_chain(&ctx, &root).unwrap();
    assert_eq!(ctx.get("post"), Some("yes"));

    let ctx = RuleContext::new();
    let err = run_chain(&ctx, &root).unwrap_err();
    assert_eq!(err.to_string(), "evaluation of rule 'leaf' failed: mode not set");
    assert!(!ctx.exists("pre"));
}

#[test]
fn unnamed_rule_errors_use_path() {
    let root = Rule::<i64>::best_first().with_children([
        Rule::best_first().on_eval(|_| false),
        Rule::best_first().with_child(Rule::chain().on_pre_execute_detailed(|_| Err("nope".into()))),
    ]);

    let err = run_best_first(&RuleContext::new(), &[root]).unwrap_err();

    assert_eq!(err.to_string(), "pre-execute of rule '#0/1/0' failed: nope");
}

#[test]
fn direct_fire_returns_continuation() {
    let ctx = RuleContext::new();
    let token = CancellationToken::new();

    let chain = Rule::<i64>::chain();
    assert!(chain.fire(&ctx, &token).unwrap().should_continue());

    let executed = Rule::<i64>::best_first();
    assert!(!executed.fire(&ctx, &token).unwrap().should_continue());

    let declined = Rule::<i64>::best_first().on_eval(|_| false);
    assert!(declined.fire(&ctx, &token).unwrap().should_continue());
}
