//! Non-fatal end-to-end scenarios from the core's test-suite seed list
//! (§8): escape-through-handlers, restart return, escape arithmetic, and
//! the `signal` half of the line-limit scenario. The two scenarios that
//! end in an unhandled `error` abort live in `fatal.rs`, where they can
//! be run in a subprocess.

use std::cell::RefCell;
use std::rc::Rc;

use cond::prelude::*;

#[derive(Debug)]
struct DivByZero;

#[derive(Debug)]
struct LineEnd;

#[test]
fn escape_through_handlers() {
    let _ = env_logger::builder().is_test(true).try_init();
    let log = Rc::new(RefCell::new(String::new()));
    let log_a = log.clone();
    let log_b = log.clone();

    let result = to_escape(|exit: Escape<String>| {
        handling(
            vec![HandlerBinding::of_type(move |_c: &DivByZero| -> HandlerOutcome<()> {
                log_a.borrow_mut().push('A');
                exit.call("Done".to_string());
                unreachable!("escape always transfers control")
            })],
            || {
                handling(
                    vec![HandlerBinding::of_type(move |_c: &DivByZero| -> HandlerOutcome<()> {
                        log_b.borrow_mut().push('B');
                        HandlerOutcome::Declined
                    })],
                    || error::<DivByZero, String>(DivByZero),
                )
            },
        )
    });

    assert_eq!(result, "Done");
    assert_eq!(*log.borrow(), "BA");
}

fn reciprocal(v: i32) -> f64 {
    with_restart(
        vec![
            RestartBinding::new("zero", |_args: ()| 0.0_f64),
            RestartBinding::new("val", |v: f64| v),
            RestartBinding::new("retry", |v: i32| reciprocal(v)),
        ],
        || {
            if v == 0 {
                error::<DivByZero, f64>(DivByZero)
            } else {
                1.0 / v as f64
            }
        },
    )
}

#[test]
fn restart_return_zero() {
    let _ = env_logger::builder().is_test(true).try_init();
    let result = handling(
        vec![HandlerBinding::of_type(|_c: &DivByZero| -> HandlerOutcome<f64> {
            invoke_restart("zero", ())
        })],
        || reciprocal(0),
    );
    assert_eq!(result, 0.0);
}

#[test]
fn restart_return_val() {
    let _ = env_logger::builder().is_test(true).try_init();
    let result = handling(
        vec![HandlerBinding::of_type(|_c: &DivByZero| -> HandlerOutcome<f64> {
            invoke_restart("val", 123.0)
        })],
        || reciprocal(0),
    );
    assert_eq!(result, 123.0);
}

#[test]
fn restart_return_retry() {
    let _ = env_logger::builder().is_test(true).try_init();
    let result = handling(
        vec![HandlerBinding::of_type(|_c: &DivByZero| -> HandlerOutcome<f64> {
            invoke_restart("retry", 10)
        })],
        || reciprocal(0),
    );
    assert_eq!(result, 0.1);
}

/// `mystery(n) = 1 + to_escape(|outer| 1 + to_escape(|inner| 1 +
/// (n==0 ? inner(1) : n==1 ? outer(1) : 1)))`.
fn mystery(n: i32) -> i32 {
    1 + to_escape(|outer: Escape<i32>| {
        1 + to_escape(|inner: Escape<i32>| {
            1 + if n == 0 {
                inner.call(1)
            } else if n == 1 {
                outer.call(1)
            } else {
                1
            }
        })
    })
}

#[test]
fn mystery_escape_arithmetic() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(mystery(0), 3);
    assert_eq!(mystery(1), 2);
    assert_eq!(mystery(2), 4);
}

#[test]
fn signal_line_limit_inserts_newlines() {
    let _ = env_logger::builder().is_test(true).try_init();
    let out = Rc::new(RefCell::new(String::new()));
    let out_for_handler = out.clone();
    let out_for_body = out.clone();

    handling(
        vec![HandlerBinding::of_type(move |_c: &LineEnd| -> HandlerOutcome<()> {
            out_for_handler.borrow_mut().push('\n');
            HandlerOutcome::Handled(())
        })],
        move || {
            let s = "abcdefghij";
            for (i, ch) in s.chars().enumerate() {
                out_for_body.borrow_mut().push(ch);
                if (i + 1) % 4 == 0 {
                    signal::<LineEnd, ()>(LineEnd);
                }
            }
        },
    );

    assert_eq!(*out.borrow(), "abcd\nefgh\nij");
}
