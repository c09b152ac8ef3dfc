//! Option get/set tests against the simulated engine.

use std::sync::Arc;

use zmq_context::ffi::raw::{EINVAL, ZMQ_BLOCKY, ZMQ_IPV6};
use zmq_context::sim::{SimEngine, SIM_MSG_T_SIZE, SIM_SOCKET_LIMIT};
use zmq_context::{Context, ContextOption, ContextOptions, Error, OptionKind, QueryPolicy};

fn context() -> (Arc<SimEngine>, Context) {
    let engine = Arc::new(SimEngine::new());
    let ctx = Context::with_engine(engine.clone()).expect("allocation should succeed");
    (engine, ctx)
}

fn sentinel_context() -> (Arc<SimEngine>, Context) {
    let engine = Arc::new(SimEngine::new());
    let opts = ContextOptions::default().with_query_policy(QueryPolicy::SentinelOnly);
    let ctx = Context::with_engine_and_options(engine.clone(), opts).unwrap();
    (engine, ctx)
}

#[test]
fn test_set_then_get_round_trip() {
    let (_engine, ctx) = context();
    let cases = [
        ContextOption::IoThreads(4),
        ContextOption::MaxSockets(512),
        ContextOption::MaxMessageSize(1 << 20),
        ContextOption::Ipv6(true),
        ContextOption::Blocky(true),
        ContextOption::ThreadSchedPolicy(2),
        ContextOption::ThreadNamePrefix(7),
    ];

    for option in cases {
        ctx.set(option).unwrap_or_else(|e| panic!("set {option} failed: {e}"));
        let read = ctx
            .get(option.kind())
            .unwrap_or_else(|e| panic!("get {} failed: {e}", option.kind()));
        assert_eq!(read, option);
    }
}

#[test]
fn test_zero_does_not_round_trip_under_strict_policy() {
    let (_engine, ctx) = context();

    ctx.set(ContextOption::ThreadNamePrefix(0)).unwrap();
    let err = ctx.get(OptionKind::ThreadNamePrefix).unwrap_err();
    assert!(matches!(err, Error::GenericFailure(_)));

    ctx.set(ContextOption::IoThreads(0)).unwrap();
    assert!(ctx.get(OptionKind::IoThreads).is_err());

    ctx.set(ContextOption::Ipv6(false)).unwrap();
    assert!(ctx.get(OptionKind::Ipv6).is_err());
}

#[test]
fn test_zero_round_trips_under_sentinel_policy() {
    let (_engine, ctx) = sentinel_context();

    ctx.set(ContextOption::ThreadNamePrefix(0)).unwrap();
    assert_eq!(
        ctx.get(OptionKind::ThreadNamePrefix).unwrap(),
        ContextOption::ThreadNamePrefix(0)
    );

    ctx.set(ContextOption::Blocky(false)).unwrap();
    assert_eq!(ctx.get(OptionKind::Blocky).unwrap(), ContextOption::Blocky(false));
}

#[test]
fn test_default_sched_policy() {
    let (_engine, strict) = context();
    assert!(strict.get(OptionKind::ThreadSchedPolicy).is_err());

    let (_engine, sentinel) = sentinel_context();
    assert_eq!(
        sentinel.get(OptionKind::ThreadSchedPolicy).unwrap(),
        ContextOption::ThreadSchedPolicy(-1)
    );
}

#[test]
fn test_sentinel_policy_still_reports_failures() {
    let (engine, ctx) = sentinel_context();
    engine.force_option(ZMQ_IPV6, -1);
    engine.set_last_error(EINVAL);
    assert!(ctx.get(OptionKind::Ipv6).is_err());
}

#[test]
fn test_bool_decoding() {
    let (engine, ctx) = context();

    ctx.set(ContextOption::Blocky(true)).unwrap();
    assert_eq!(ctx.get(OptionKind::Blocky).unwrap(), ContextOption::Blocky(true));

    // Anything other than 1 decodes as false.
    engine.force_option(ZMQ_BLOCKY, 2);
    assert_eq!(ctx.get(OptionKind::Blocky).unwrap(), ContextOption::Blocky(false));
    engine.force_option(ZMQ_IPV6, 17);
    assert_eq!(ctx.get(OptionKind::Ipv6).unwrap(), ContextOption::Ipv6(false));

    engine.clear_forced();
    assert_eq!(ctx.get(OptionKind::Blocky).unwrap(), ContextOption::Blocky(true));
}

#[test]
fn test_defaults() {
    let (_engine, ctx) = context();
    assert_eq!(ctx.get(OptionKind::IoThreads).unwrap(), ContextOption::IoThreads(1));
    assert_eq!(ctx.get(OptionKind::MaxSockets).unwrap(), ContextOption::MaxSockets(1023));
    assert_eq!(ctx.get(OptionKind::Blocky).unwrap(), ContextOption::Blocky(true));
    assert_eq!(
        ctx.get(OptionKind::MaxMessageSize).unwrap(),
        ContextOption::MaxMessageSize(i64::from(i32::MAX))
    );
}

#[test]
fn test_read_only_options() {
    let (_engine, ctx) = context();

    assert_eq!(
        ctx.get(OptionKind::SocketLimit).unwrap(),
        ContextOption::SocketLimit(i64::from(SIM_SOCKET_LIMIT))
    );
    assert_eq!(
        ctx.get(OptionKind::RuntimeMessageSize).unwrap(),
        ContextOption::RuntimeMessageSize(i64::from(SIM_MSG_T_SIZE))
    );

    for option in [ContextOption::SocketLimit(10), ContextOption::RuntimeMessageSize(10)] {
        assert!(option.kind().is_read_only());
        let err = ctx.set(option).unwrap_err();
        assert!(matches!(err, Error::GenericFailure(_)));
        assert_eq!(err.code(), Some(EINVAL));
    }
}

#[test]
fn test_rejected_value() {
    let (_engine, ctx) = context();
    let err = ctx.set(ContextOption::IoThreads(-3)).unwrap_err();
    assert_eq!(err.code(), Some(EINVAL));
    assert_eq!(err.description(), "Invalid argument");

    // Previous value unchanged.
    assert_eq!(ctx.get(OptionKind::IoThreads).unwrap(), ContextOption::IoThreads(1));
}

#[test]
fn test_oversized_value_saturates() {
    let (_engine, ctx) = context();
    ctx.set(ContextOption::MaxMessageSize(i64::MAX)).unwrap();
    assert_eq!(
        ctx.get(OptionKind::MaxMessageSize).unwrap(),
        ContextOption::MaxMessageSize(i64::from(i32::MAX))
    );
}

#[test]
fn test_refresh_in_place() {
    let (_engine, ctx) = context();
    ctx.set(ContextOption::IoThreads(6)).unwrap();

    let mut option = ContextOption::IoThreads(0);
    ctx.refresh(&mut option).unwrap();
    assert_eq!(option, ContextOption::IoThreads(6));
}
