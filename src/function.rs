use std::fmt::{Debug, Display};
use std::rc::Rc;
use std::cell::RefCell;

use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::Token;

/// A user-declared function (or method) paired with the environment that
/// was in effect at its declaration site. `params`/`body` are shared via
/// `Rc` so that `bind` (used once per method lookup on an instance) only
/// has to clone a handful of reference-counted pointers.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Rc<Vec<Token>>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(
        name: Token,
        params: Rc<Vec<Token>>,
        body: Rc<Vec<Stmt>>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Function { name, params, body, closure, is_initializer }
    }

    /// Returns a new function value whose closure begins with a fresh scope
    /// defining `this`, enclosing the original captured closure (I4).
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function::new(
            self.name.clone(),
            Rc::clone(&self.params),
            Rc::clone(&self.body),
            Rc::new(RefCell::new(environment)),
            self.is_initializer,
        )
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.params.iter().zip(arguments.into_iter()) {
            environment.define(&param.lexeme, arg);
        }

        let result = interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment)));

        // An initializer always returns `this`, whether the body fell
        // through or hit a bare `return;` (I4 / P4).
        if self.is_initializer {
            return self.closure.borrow().get_at(0, &Token::from("this"));
        }

        match result {
            Ok(()) => Ok(Object::from(Literal::Nil)),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

/// A native function installed directly in the global environment. Rocks
/// ships exactly one (`clock`), per spec.md's Non-goals.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, _interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// Returns the natives installed into `globals` at interpreter
    /// construction.
    pub fn builtins() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: "clock",
                arity: 0,
                function: |_| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .expect("system clock to be after the unix epoch")
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
        ]
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
