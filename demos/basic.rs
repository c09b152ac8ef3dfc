//! Basic example: create a libzmq context, inspect and tune it, release it.
//!
//! Run with: cargo run --example basic --features libzmq

use zmq_context::{Context, ContextOption, ContextOptions, OptionKind, QueryPolicy};

fn main() -> zmq_context::Result<()> {
    zmq_context::dev_tracing::init_tracing();

    let opts = ContextOptions::default()
        .with_io_threads(2)
        .with_query_policy(QueryPolicy::SentinelOnly);
    let ctx = Context::with_options(opts)?;

    println!("--- Context options ---");
    for kind in OptionKind::ALL {
        match ctx.get(kind) {
            Ok(option) => println!("  {option}"),
            Err(e) => println!("  {kind}: unavailable ({e})"),
        }
    }

    println!("\n--- Tuning ---");
    ctx.set(ContextOption::MaxSockets(4096))?;
    ctx.set(ContextOption::Ipv6(true))?;
    println!("  {}", ctx.get(OptionKind::MaxSockets)?);
    println!("  {}", ctx.get(OptionKind::Ipv6)?);

    if let Err(e) = ctx.set(ContextOption::SocketLimit(1)) {
        println!("  socket limit is read-only: {e}");
    }

    println!("\n--- Releasing ---");
    loop {
        match ctx.destroy() {
            Ok(()) => break,
            Err(e) if e.is_retryable() => {
                println!("  interrupted, retrying");
                continue;
            }
            Err(e) => return Err(e),
        }
    }
    println!("  released: live={}", ctx.is_live());

    Ok(())
}
