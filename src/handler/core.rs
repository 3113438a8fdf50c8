use std::any::Any;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::http::{Request, Response};

/// A bound handler named an action its controller does not expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    UnknownAction { controller: String, action: String },
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownAction { controller, action } => {
                write!(
                    f,
                    "controller '{controller}' does not expose action '{action}'"
                )
            }
        }
    }
}

impl std::error::Error for HandlerError {}

/// One resolved handler argument.
#[derive(Clone)]
pub enum ArgValue {
    /// Raw text captured from a path segment.
    Text(String),
    /// Declared default from the handler signature.
    Default(Value),
    /// Value constructed by a named service rule.
    Service(Arc<dyn Any + Send + Sync>),
    /// No binding available.
    Empty,
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ArgValue::Default(v) => Some(v),
            _ => None,
        }
    }

    /// Downcast a service argument to its concrete type.
    pub fn service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            ArgValue::Service(value) => Arc::clone(value).downcast::<T>().ok(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ArgValue::Empty)
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ArgValue::Default(v) => f.debug_tuple("Default").field(v).finish(),
            ArgValue::Service(_) => f.write_str("Service(..)"),
            ArgValue::Empty => f.write_str("Empty"),
        }
    }
}

/// Factory behind a [`ParamSpec::service`] rule; runs once per dispatch.
pub type ServiceFactory = Arc<dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync>;

/// One declared handler parameter.
///
/// The signature replaces runtime introspection of the callable: every
/// binding source a parameter may use is declared here at registration.
#[derive(Clone)]
pub struct ParamSpec {
    name: String,
    service: Option<ServiceFactory>,
    default: Option<Value>,
}

impl ParamSpec {
    /// A parameter bound from a matched path segment of the same name.
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service: None,
            default: None,
        }
    }

    /// A parameter filled by a named service rule when no path segment
    /// matched it.
    pub fn service<T, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            service: Some(Arc::new(move || {
                Arc::new(factory()) as Arc<dyn Any + Send + Sync>
            })),
            default: None,
        }
    }

    /// A parameter with a declared default used when no path segment
    /// matched it.
    pub fn with_default(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            service: None,
            default: Some(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn service_factory(&self) -> Option<&ServiceFactory> {
        self.service.as_ref()
    }

    pub(crate) fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("service", &self.service.is_some())
            .field("default", &self.default)
            .finish()
    }
}

/// Direct handler callable: resolved arguments plus the live request and
/// response.
pub type HandlerFn = dyn Fn(&[ArgValue], &Request, &mut Response) -> Result<()> + Send + Sync;

/// A controller-style handler target: one value exposing named actions the
/// dispatcher invokes with positional arguments.
pub trait Controller: Send + Sync {
    /// Name used in diagnostics output.
    fn name(&self) -> &str {
        "controller"
    }

    /// Whether this controller exposes the named action.
    fn exposes(&self, action: &str) -> bool;

    /// Invoke the named action with resolved arguments.
    fn invoke(
        &self,
        action: &str,
        args: &[ArgValue],
        req: &Request,
        res: &mut Response,
    ) -> Result<()>;
}

/// The two handler shapes, dispatched by pattern match.
#[derive(Clone)]
pub enum HandlerKind {
    Direct(Arc<HandlerFn>),
    Bound {
        controller: Arc<dyn Controller>,
        action: String,
    },
}

/// A registered invocation target plus its declared parameter signature.
#[derive(Clone)]
pub struct Handler {
    kind: HandlerKind,
    params: Vec<ParamSpec>,
}

impl Handler {
    /// A direct handler with an empty signature.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[ArgValue], &Request, &mut Response) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            kind: HandlerKind::Direct(Arc::new(f)),
            params: Vec::new(),
        }
    }

    /// A handler bound to a controller action.
    ///
    /// Fails with [`HandlerError::UnknownAction`] when the controller does
    /// not expose `action` — the invalid-handler case surfaces here, at
    /// construction, never mid-dispatch.
    pub fn bound(
        controller: Arc<dyn Controller>,
        action: impl Into<String>,
    ) -> Result<Self, HandlerError> {
        let action = action.into();
        if !controller.exposes(&action) {
            return Err(HandlerError::UnknownAction {
                controller: controller.name().to_string(),
                action,
            });
        }
        Ok(Self {
            kind: HandlerKind::Bound { controller, action },
            params: Vec::new(),
        })
    }

    /// Declare the parameter signature.
    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub(crate) fn invoke(
        &self,
        args: &[ArgValue],
        req: &Request,
        res: &mut Response,
    ) -> Result<()> {
        match &self.kind {
            HandlerKind::Direct(f) => f(args, req, res),
            HandlerKind::Bound { controller, action } => {
                controller.invoke(action, args, req, res)
            }
        }
    }

    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            HandlerKind::Direct(_) => "fn".to_string(),
            HandlerKind::Bound { controller, action } => {
                format!("{}::{}", controller.name(), action)
            }
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("kind", &self.describe())
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widgets;

    impl Controller for Widgets {
        fn name(&self) -> &str {
            "widgets"
        }

        fn exposes(&self, action: &str) -> bool {
            matches!(action, "show" | "list")
        }

        fn invoke(
            &self,
            action: &str,
            _args: &[ArgValue],
            _req: &Request,
            res: &mut Response,
        ) -> Result<()> {
            res.set_text(action.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_bound_handler_validates_action_at_construction() {
        let controller: Arc<dyn Controller> = Arc::new(Widgets);
        assert!(Handler::bound(Arc::clone(&controller), "show").is_ok());

        let err = Handler::bound(controller, "destroy").unwrap_err();
        assert_eq!(
            err,
            HandlerError::UnknownAction {
                controller: "widgets".to_string(),
                action: "destroy".to_string(),
            }
        );
        assert!(err.to_string().contains("destroy"));
    }

    #[test]
    fn test_service_downcast() {
        struct Clock(u64);
        let arg = ArgValue::Service(Arc::new(Clock(7)));
        assert_eq!(arg.service::<Clock>().unwrap().0, 7);
        assert!(arg.service::<String>().is_none());
    }
}
