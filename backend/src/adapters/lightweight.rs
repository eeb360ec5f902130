//! Lightweight adapter
//!
//! Every exposed method is a plain monomorphic function: fetch the receiver,
//! narrow the arguments explicitly, call the native trait method, wrap the
//! result. No conversion traits and no boxed closures are involved beyond the
//! entry-point table itself.

use std::any::{type_name, Any};
use std::marker::PhantomData;
use std::sync::Arc;

use super::{BindingAdapter, LIGHTWEIGHT_MODULE};
use crate::host::class::{CallError, ClassDescriptor, Receiver};
use crate::host::module::{ModuleBuilder, RegistrationError};
use crate::host::value::Value;
use crate::native::{Math, MathApi, StringUtils, StringUtilsApi};

fn this<T: Any>(receiver: &Receiver) -> Result<&T, CallError> {
    receiver.downcast_ref::<T>().ok_or(CallError::Receiver {
        expected: type_name::<T>(),
    })
}

fn arg<'a>(args: &'a [Value], index: usize, expected: &'static str) -> Result<&'a Value, CallError> {
    args.get(index).ok_or(CallError::TypeMismatch {
        expected,
        found: "nothing",
    })
}

fn construct<T: Default + Any + Send + Sync>() -> Arc<Receiver> {
    Arc::new(T::default())
}

fn math_add<M: MathApi + Any>(receiver: &Receiver, args: &[Value]) -> Result<Value, CallError> {
    let math = this::<M>(receiver)?;
    let a = arg(args, 0, "int")?.as_i32()?;
    let b = arg(args, 1, "int")?.as_i32()?;
    Ok(Value::from(math.add(a, b)))
}

fn math_multiply<M: MathApi + Any>(
    receiver: &Receiver,
    args: &[Value],
) -> Result<Value, CallError> {
    let math = this::<M>(receiver)?;
    let a = arg(args, 0, "int")?.as_i32()?;
    let b = arg(args, 1, "int")?.as_i32()?;
    Ok(Value::from(math.multiply(a, b)))
}

fn string_brackets<S: StringUtilsApi + Any>(
    receiver: &Receiver,
    args: &[Value],
) -> Result<Value, CallError> {
    let utils = this::<S>(receiver)?;
    Ok(Value::from(utils.brackets(arg(args, 0, "str")?.as_str()?)))
}

fn string_reverse<S: StringUtilsApi + Any>(
    receiver: &Receiver,
    args: &[Value],
) -> Result<Value, CallError> {
    let utils = this::<S>(receiver)?;
    Ok(Value::from(utils.reverse(arg(args, 0, "str")?.as_str()?)))
}

/// Lightweight adapter over any `MathApi`/`StringUtilsApi` pair
pub struct LightweightAdapter<M = Math, S = StringUtils> {
    _native: PhantomData<fn() -> (M, S)>,
}

impl LightweightAdapter {
    /// Adapter over the bundled [`Math`] and [`StringUtils`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M, S> Default for LightweightAdapter<M, S> {
    fn default() -> Self {
        Self {
            _native: PhantomData,
        }
    }
}

impl<M, S> BindingAdapter for LightweightAdapter<M, S>
where
    M: MathApi + Default + Any + Send + Sync,
    S: StringUtilsApi + Default + Any + Send + Sync,
{
    fn module_name(&self) -> &str {
        LIGHTWEIGHT_MODULE
    }

    fn doc(&self) -> Option<&str> {
        Some("test_project bindings (lightweight adapter)")
    }

    fn bind(&self, module: &mut ModuleBuilder) -> Result<(), RegistrationError> {
        module.add_class(
            ClassDescriptor::builder("Math")
                .constructor(construct::<M>)
                .method("add", 2, math_add::<M>)
                .method("multiply", 2, math_multiply::<M>)
                .build()?,
        )?;

        module.add_class(
            ClassDescriptor::builder("StringUtils")
                .constructor(construct::<S>)
                .method("brackets", 1, string_brackets::<S>)
                .method("reverse", 1, string_reverse::<S>)
                .build()?,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::InitStrategy;

    fn bound() -> crate::host::module::ModuleDef {
        let mut builder = ModuleBuilder::new(LIGHTWEIGHT_MODULE);
        LightweightAdapter::<Math, StringUtils>::default()
            .bind(&mut builder)
            .unwrap();
        builder.finish(InitStrategy::Modern)
    }

    #[test]
    fn test_exposed_symbols() {
        let module = bound();
        assert_eq!(
            module.symbols().collect::<Vec<_>>(),
            vec!["Math", "StringUtils"]
        );
        let math = module.class("Math").unwrap();
        assert_eq!(
            math.method_names().collect::<Vec<_>>(),
            vec!["add", "multiply"]
        );
    }

    #[test]
    fn test_calls() {
        let module = bound();
        let math = module.instantiate("Math").unwrap();
        assert_eq!(
            math.call("multiply", &[Value::Int(2), Value::Int(3)]),
            Ok(Value::Int(6))
        );

        let utils = module.instantiate("StringUtils").unwrap();
        assert_eq!(
            utils.call("brackets", &[Value::from("text")]),
            Ok(Value::from("[text]"))
        );
    }

    #[test]
    fn test_misdeclared_arity_reports_missing_argument() {
        let class = ClassDescriptor::builder("Math")
            .constructor(construct::<Math>)
            .method("add", 1, math_add::<Math>)
            .build()
            .unwrap();
        let math = crate::host::class::Object::new(Arc::new(class)).unwrap();

        assert_eq!(
            math.call("add", &[Value::Int(1)]),
            Err(CallError::TypeMismatch {
                expected: "int",
                found: "nothing"
            })
        );
    }

    #[test]
    fn test_string_method_rejects_int() {
        let module = bound();
        let utils = module.instantiate("StringUtils").unwrap();
        assert_eq!(
            utils.call("reverse", &[Value::Int(1)]),
            Err(CallError::TypeMismatch {
                expected: "str",
                found: "int"
            })
        );
    }
}
