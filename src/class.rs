use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::token::Token;

/// `Class` is callable (construction), but unlike `Function`/`NativeFunction`
/// the call needs the class's own `Rc` handle (to hand to the `Instance` it
/// creates), not just `&self`. That one extra bit of shape means class
/// construction is dispatched directly by the interpreter rather than
/// through the `Callable` trait object — see `Interpreter::call_callee`.

/// A class value. Immutable once constructed: the method table and
/// superclass link never change after `Stmt::Class` finishes executing, so
/// `Class` itself needs no interior mutability — only `Instance` does.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<Class>>,
    pub methods: HashMap<String, Rc<Function>>,
}

impl Class {
    pub fn new(name: String, superclass: Option<Rc<Class>>, methods: HashMap<String, Rc<Function>>) -> Self {
        Class { name, superclass, methods }
    }

    /// Looks up a method on this class, walking the superclass chain (I4).
    pub fn find_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }

        self.superclass.as_ref()?.find_method(name)
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Class {
    pub fn arity(&self) -> usize {
        match self.find_method("init") {
            Some(initializer) => initializer.arity(),
            None => 0,
        }
    }

    /// Constructs a new instance, running `init` (if any) against it.
    pub fn instantiate(class: &Rc<Class>, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let instance = Rc::new(Instance::new(Rc::clone(class)));

        if let Some(initializer) = class.find_method("init") {
            initializer.bind(Object::Instance(Rc::clone(&instance))).call(interpreter, arguments)?;
        }

        Ok(Object::Instance(instance))
    }
}

/// A runtime instance of a `Class`. Field mutation is the only user-visible
/// mutation in the language, so only the field map needs a `RefCell`.
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<Class>,
    pub fields: RefCell<HashMap<String, Object>>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Instance { class, fields: RefCell::new(HashMap::new()) }
    }

    /// Resolves a property access: fields shadow methods, methods are bound
    /// to `self_instance` before being returned (I4).
    pub fn get(&self, name: &Token, self_instance: &Object) -> Result<Object, RuntimeError> {
        if let Some(field) = self.fields.borrow().get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = self.class.find_method(&name.lexeme) {
            return Ok(Object::Function(method.bind(self_instance.clone())));
        }

        Err(RuntimeError::new(name, format!("Undefined property '{}'", name.lexeme)))
    }

    pub fn set(&self, name: &Token, value: Object) {
        self.fields.borrow_mut().insert(name.lexeme.clone(), value);
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}
