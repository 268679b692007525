use dredd::{Rule, RuleContext, Runner};

/// Picks a shipping option: the first tier whose condition holds wins.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let tiers = vec![
        Rule::<i64>::best_first()
            .named("express")
            .on_eval(|v| v.context().get("weight").is_some_and(|w| w <= 2))
            .on_execute(|v| v.context().set("days", 1)),
        Rule::<i64>::best_first()
            .named("standard")
            .on_eval(|v| v.context().get("weight").is_some_and(|w| w <= 20))
            .on_execute(|v| v.context().set("days", 4)),
        Rule::<i64>::best_first()
            .named("freight")
            .on_execute(|v| v.context().set("days", 10)),
    ];

    for weight in [1, 12, 80] {
        let ctx = RuleContext::new().with_entry("weight", weight);
        match Runner::best_first().context(&ctx).run_detailed(&tiers) {
            Ok(report) => {
                let days = ctx.get("days").unwrap_or_default();
                println!("weight {weight:>3}: {days} day(s) ({report})");
            }
            Err(err) => {
                eprintln!("run failed: {err}");
                std::process::exit(1);
            }
        }
    }
}
