//! Reflective adapter
//!
//! Classes are declared Boost.Python style:
//!
//! ```
//! use test_project_pywrap::adapters::Class;
//! use test_project_pywrap::{Math, MathApi};
//!
//! let class = Class::<Math>::new("Math")
//!     .def("add", |m: &Math, a: i32, b: i32| m.add(a, b))
//!     .finish()
//!     .unwrap();
//! assert_eq!(class.method("add").unwrap().arity(), 2);
//! ```
//!
//! Any closure `Fn(&T, A, B, ..) -> R` whose arguments implement
//! [`FromValue`] and whose result implements [`IntoValue`] becomes a method.
//! Arity and conversions are derived from the closure's signature.

use std::any::{type_name, Any};
use std::marker::PhantomData;
use std::sync::Arc;

use super::{BindingAdapter, REFLECTIVE_MODULE};
use crate::host::class::{CallError, ClassBuilder, ClassDescriptor, MethodFn, Receiver};
use crate::host::module::{ModuleBuilder, RegistrationError};
use crate::host::value::{FromValue, IntoValue, Value};
use crate::native::{Math, MathApi, StringUtils, StringUtilsApi};

/// Conversion of a typed closure into a type-erased method
///
/// `Marker` is the function-pointer type `fn(A, B, ..) -> R` of the closure's
/// arguments and result; it only serves to keep the implementations for
/// different arities apart.
pub trait IntoMethod<T, Marker>: Send + Sync + 'static {
    const ARITY: usize;

    fn into_method(self) -> MethodFn;
}

fn receiver<T: Any>(target: &Receiver) -> Result<&T, CallError> {
    target.downcast_ref::<T>().ok_or(CallError::Receiver {
        expected: type_name::<T>(),
    })
}

macro_rules! impl_into_method {
    ($arity:expr; $($ty:ident $var:ident),*) => {
        impl<T, F, R $(, $ty)*> IntoMethod<T, fn($($ty),*) -> R> for F
        where
            T: Any + Send + Sync,
            F: Fn(&T $(, $ty)*) -> R + Send + Sync + 'static,
            R: IntoValue,
            $($ty: FromValue,)*
        {
            const ARITY: usize = $arity;

            fn into_method(self) -> MethodFn {
                Arc::new(move |target: &Receiver, args: &[Value]| -> Result<Value, CallError> {
                    let target = receiver::<T>(target)?;
                    #[allow(unused_mut, unused_variables)]
                    let mut args = args.iter();
                    $(
                        let $var = match args.next() {
                            Some(value) => $ty::from_value(value)?,
                            None => return Err(CallError::TypeMismatch {
                                expected: type_name::<$ty>(),
                                found: "nothing",
                            }),
                        };
                    )*
                    Ok((self)(target $(, $var)*).into_value())
                })
            }
        }
    };
}

impl_into_method!(0;);
impl_into_method!(1; A a);
impl_into_method!(2; A a, B b);
impl_into_method!(3; A a, B b, C c);

/// Declaration of one exposed class over native type `T`
pub struct Class<T> {
    builder: ClassBuilder,
    _native: PhantomData<fn() -> T>,
}

impl<T> Class<T>
where
    T: Default + Any + Send + Sync,
{
    /// Declare class `name`, default-constructible through `T::default()`.
    pub fn new(name: &str) -> Self {
        Self {
            builder: ClassDescriptor::builder(name)
                .constructor(|| Arc::new(T::default()) as Arc<Receiver>),
            _native: PhantomData,
        }
    }

    /// Expose the class without a host-side constructor.
    pub fn no_init(mut self) -> Self {
        self.builder = self.builder.no_init();
        self
    }

    /// Expose `method` as `name`.
    pub fn def<M, Marker>(mut self, name: &str, method: M) -> Self
    where
        M: IntoMethod<T, Marker>,
    {
        self.builder = self
            .builder
            .method_fn(name, M::ARITY, method.into_method());
        self
    }

    pub fn finish(self) -> Result<ClassDescriptor, RegistrationError> {
        self.builder.build()
    }
}

/// Heavyweight adapter over any `MathApi`/`StringUtilsApi` pair
pub struct ReflectiveAdapter<M = Math, S = StringUtils> {
    _native: PhantomData<fn() -> (M, S)>,
}

impl ReflectiveAdapter {
    /// Adapter over the bundled [`Math`] and [`StringUtils`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M, S> Default for ReflectiveAdapter<M, S> {
    fn default() -> Self {
        Self {
            _native: PhantomData,
        }
    }
}

impl<M, S> BindingAdapter for ReflectiveAdapter<M, S>
where
    M: MathApi + Default + Any + Send + Sync,
    S: StringUtilsApi + Default + Any + Send + Sync,
{
    fn module_name(&self) -> &str {
        REFLECTIVE_MODULE
    }

    fn doc(&self) -> Option<&str> {
        Some("test_project bindings (reflective adapter)")
    }

    fn bind(&self, module: &mut ModuleBuilder) -> Result<(), RegistrationError> {
        module.add_class(
            Class::<M>::new("Math")
                .def("add", |m: &M, a: i32, b: i32| m.add(a, b))
                .def("multiply", |m: &M, a: i32, b: i32| m.multiply(a, b))
                .finish()?,
        )?;

        module.add_class(
            Class::<S>::new("StringUtils")
                .def("brackets", |s: &S, text: String| s.brackets(&text))
                .def("reverse", |s: &S, text: String| s.reverse(&text))
                .finish()?,
        )?;

        Ok(())
    }
}
