//! Passes run over a finished [ParseResult] before it is rendered.

use crate::{registry::ParseResult, types::ClassObject};

/// Classes with fewer fields than this are rendered inline at their use site.
pub const MIN_FIELD_COUNT: usize = 3;

type Rule = fn(ParseResult) -> ParseResult;

const RULES: &[Rule] = &[inline_small_classes];

/// Runs every rule in order.
pub fn optimise(result: ParseResult) -> ParseResult {
    RULES.iter().fold(result, |result, rule| rule(result))
}

fn inline_small_classes(mut result: ParseResult) -> ParseResult {
    for class in result.classes.values_mut() {
        // Operations are entry points, user defined classes are imported.
        if class.operation.is_some() || class.user_defined.is_some() {
            continue;
        }

        if role_fields(class) < MIN_FIELD_COUNT {
            tracing::trace!(class = %class.id, "inlining small class");
            class.should_inline = true;
        }
    }

    result
}

fn role_fields(class: &ClassObject) -> usize {
    if class.is_input {
        class.inputs.len()
    } else {
        class.outputs.len()
    }
}
