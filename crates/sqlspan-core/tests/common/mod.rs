#![allow(dead_code)]

use sqlspan_core::{DatabaseOperations, FieldKind, GenericOperations, Value, WireValue};

pub const fn backend() -> GenericOperations {
    GenericOperations::new()
}

pub fn adapt(kind: FieldKind, value: impl Into<Value>) -> WireValue {
    backend()
        .adapt_value(kind, value.into())
        .unwrap_or_else(|e| panic!("Failed to adapt {kind} value: {e}"))
}
