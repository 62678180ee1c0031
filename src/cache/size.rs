// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Rough in-memory footprint used for cache size accounting.
///
/// Strings count 2 bytes per character, numbers 8 bytes, and composite
/// values the sum of their parts.
pub trait EstimateSize {
    fn estimated_size(&self) -> usize;
}

const NUMBER_SIZE: usize = 8;
const BOOL_SIZE: usize = 4;

impl EstimateSize for str {
    fn estimated_size(&self) -> usize {
        self.chars().count() * 2
    }
}

impl EstimateSize for String {
    fn estimated_size(&self) -> usize {
        self.as_str().estimated_size()
    }
}

impl EstimateSize for char {
    fn estimated_size(&self) -> usize {
        2
    }
}

impl EstimateSize for bool {
    fn estimated_size(&self) -> usize {
        BOOL_SIZE
    }
}

impl EstimateSize for () {
    fn estimated_size(&self) -> usize {
        0
    }
}

macro_rules! number_size {
    ($($t:ty),*) => {
        $(
            impl EstimateSize for $t {
                fn estimated_size(&self) -> usize {
                    NUMBER_SIZE
                }
            }
        )*
    };
}

number_size!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<T: EstimateSize> EstimateSize for Option<T> {
    fn estimated_size(&self) -> usize {
        self.as_ref().map_or(0, |v| v.estimated_size())
    }
}

impl<T: EstimateSize> EstimateSize for [T] {
    fn estimated_size(&self) -> usize {
        self.iter().map(|v| v.estimated_size()).sum()
    }
}

impl<T: EstimateSize> EstimateSize for Vec<T> {
    fn estimated_size(&self) -> usize {
        self.as_slice().estimated_size()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for Box<T> {
    fn estimated_size(&self) -> usize {
        self.as_ref().estimated_size()
    }
}

impl<T: EstimateSize + ?Sized> EstimateSize for Arc<T> {
    fn estimated_size(&self) -> usize {
        self.as_ref().estimated_size()
    }
}

impl<K: EstimateSize, V: EstimateSize, S> EstimateSize for HashMap<K, V, S> {
    fn estimated_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| k.estimated_size() + v.estimated_size())
            .sum()
    }
}

impl<K: EstimateSize, V: EstimateSize> EstimateSize for BTreeMap<K, V> {
    fn estimated_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| k.estimated_size() + v.estimated_size())
            .sum()
    }
}

impl<A: EstimateSize, B: EstimateSize> EstimateSize for (A, B) {
    fn estimated_size(&self) -> usize {
        self.0.estimated_size() + self.1.estimated_size()
    }
}

impl EstimateSize for serde_json::Value {
    fn estimated_size(&self) -> usize {
        use serde_json::Value;
        match self {
            Value::Null => 0,
            Value::Bool(_) => BOOL_SIZE,
            Value::Number(_) => NUMBER_SIZE,
            Value::String(s) => s.estimated_size(),
            Value::Array(items) => items.iter().map(|v| v.estimated_size()).sum(),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| k.estimated_size() + v.estimated_size())
                .sum(),
        }
    }
}
