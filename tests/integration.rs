//! Tests against the system libzmq.
//!
//! These require the `libzmq` feature and a libzmq installation.
//! Run with: ZMQ_RUN_NATIVE_TESTS=1 cargo test --features libzmq

use std::env;

use zmq_context::{Context, ContextOption, ContextOptions, Error, OptionKind, QueryPolicy};

fn should_run_native_tests() -> bool {
    env::var("ZMQ_RUN_NATIVE_TESTS")
        .map(|v| v == "1")
        .unwrap_or(false)
}

#[test]
fn test_native_lifecycle() {
    if !should_run_native_tests() {
        println!("Skipping native test (ZMQ_RUN_NATIVE_TESTS not set)");
        return;
    }
    zmq_context::dev_tracing::init_tracing();

    let ctx = Context::new().expect("zmq_ctx_new should succeed");
    assert_eq!(ctx.engine_name(), "libzmq");
    ctx.destroy().expect("zmq_ctx_term should succeed");

    let err = ctx.destroy().unwrap_err();
    assert!(err.is_invalid_context());
    assert!(ctx.get(OptionKind::IoThreads).unwrap_err().is_invalid_context());
}

#[test]
fn test_native_options() {
    if !should_run_native_tests() {
        println!("Skipping native test (ZMQ_RUN_NATIVE_TESTS not set)");
        return;
    }

    let ctx = Context::new().expect("zmq_ctx_new should succeed");

    ctx.set(ContextOption::IoThreads(2)).unwrap();
    assert_eq!(ctx.get(OptionKind::IoThreads).unwrap(), ContextOption::IoThreads(2));

    ctx.set(ContextOption::MaxSockets(256)).unwrap();
    assert_eq!(ctx.get(OptionKind::MaxSockets).unwrap(), ContextOption::MaxSockets(256));

    ctx.set(ContextOption::Ipv6(true)).unwrap();
    assert_eq!(ctx.get(OptionKind::Ipv6).unwrap(), ContextOption::Ipv6(true));

    let msg_size = ctx.get(OptionKind::RuntimeMessageSize).unwrap();
    assert_eq!(msg_size, ContextOption::RuntimeMessageSize(64));

    let socket_limit = ctx.get(OptionKind::SocketLimit).unwrap();
    assert!(socket_limit.as_int().unwrap() > 0);

    let err = ctx.set(ContextOption::SocketLimit(1)).unwrap_err();
    assert!(matches!(err, Error::GenericFailure(_)));
    println!("read-only write rejected: {err}");
}

#[test]
fn test_native_with_options() {
    if !should_run_native_tests() {
        println!("Skipping native test (ZMQ_RUN_NATIVE_TESTS not set)");
        return;
    }

    let opts = ContextOptions::default()
        .with_blocky(false)
        .with_query_policy(QueryPolicy::SentinelOnly);
    let ctx = Context::with_options(opts).expect("context should be created");
    assert_eq!(ctx.get(OptionKind::Blocky).unwrap(), ContextOption::Blocky(false));
}
