use dredd::{run_chain, Rule, RuleContext};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let second = Rule::chain()
        .named("second")
        .on_eval(|_| {
            println!("Eval Chain Rule 2");
            false
        })
        .on_execute(|_| println!("Execute Chain Rule 2")); // never reached

    let first = Rule::<bool>::chain()
        .named("first")
        .on_eval(|v| {
            println!("Eval Chain Rule 1");
            v.context().must_get("value")
        })
        .on_pre_execute(|_| println!("Pre Chain Rule 1"))
        .on_execute(|_| println!("Execute Chain Rule 1"))
        .on_post_execute(|_| println!("Post Chain Rule 1"))
        .with_child(second);

    println!("{first}");

    let ctx = RuleContext::new().with_entry("value", true);
    if let Err(err) = run_chain(&ctx, &first) {
        eprintln!("run failed: {err}");
        std::process::exit(1);
    }
}
