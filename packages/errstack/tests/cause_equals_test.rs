//! Tests for cause extraction and identity-based equality

use errstack::{Error, Message, Original};
use std::io;
use std::sync::Arc;

fn same(a: &Original, b: &Original) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

#[test]
fn test_cause_of_plain_error_is_itself() {
    let err = Error::wrap(io::Error::new(io::ErrorKind::Other, "hello"));
    let cause = errstack::cause(Some(&err)).expect("cause");
    assert!(same(&cause, err.cause()));
    assert_eq!(cause.to_string(), "hello");
}

#[test]
fn test_cause_of_none_is_none() {
    assert!(errstack::cause(None).is_none());
}

#[test]
fn test_cause_of_container_is_the_original() {
    let err = errstack::new("hello").annotate("yoo");
    let cause = errstack::cause(Some(&err)).expect("cause");

    let container = err.container().expect("container");
    assert!(same(&cause, container.original()));
    assert_eq!(cause.to_string(), "hello");
    assert!(cause.downcast_ref::<Message>().is_some());
}

#[test]
fn test_cause_survives_upgrade() {
    let plain = Error::wrap(io::Error::new(io::ErrorKind::Other, "hello"));
    let before = Arc::clone(plain.cause());
    let upgraded = plain.annotate("yoo").add_stack();
    assert!(same(&before, upgraded.cause()));
}

#[test]
fn test_equals() {
    let a = errstack::new("hello");
    let b = errstack::new("hello");

    assert!(errstack::equals(None, None));
    assert!(!errstack::equals(Some(&a), None));
    assert!(!errstack::equals(None, Some(&a)));
    assert!(!errstack::equals(Some(&a), Some(&b)));
    assert!(errstack::equals(Some(&a), Some(&a)));
    assert_ne!(a, b);
}

#[test]
fn test_equals_sees_through_annotations() {
    let plain = Error::wrap(io::Error::new(io::ErrorKind::Other, "hello"));
    let annotated = errstack::annotate(Some(plain.clone()), "yoo").expect("annotated");

    assert!(errstack::equals(Some(&plain), Some(&annotated)));
    assert_eq!(plain, annotated);
}

#[test]
fn test_std_error_source_is_transparent() {
    use std::error::Error as _;

    let err = errstack::new("hello").annotate("yoo");
    assert!(err.source().is_none());
}
