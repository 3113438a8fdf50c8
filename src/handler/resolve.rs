use tracing::debug;

use super::core::{ArgValue, ParamSpec};
use crate::router::ParamVec;

/// Build the ordered argument list for one handler invocation.
///
/// For each declared parameter, in declaration order: a matched path
/// parameter of the same name wins and is passed as the raw matched text
/// (no type coercion), then a declared service rule, then a declared
/// default, then the empty placeholder.
pub fn resolve_args(params: &ParamVec, signature: &[ParamSpec]) -> Vec<ArgValue> {
    signature
        .iter()
        .map(|spec| {
            if let Some((_, value)) = params.iter().rfind(|(name, _)| name.as_ref() == spec.name())
            {
                return ArgValue::Text(value.clone());
            }
            if let Some(factory) = spec.service_factory() {
                return ArgValue::Service(factory());
            }
            match spec.default_value() {
                Some(value) => ArgValue::Default(value.clone()),
                None => {
                    debug!(param = spec.name(), "no binding for handler parameter");
                    ArgValue::Empty
                }
            }
        })
        .collect()
}
