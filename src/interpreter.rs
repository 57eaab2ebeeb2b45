use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::expr::{Expr, ExprVisitor, NodeId};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

type EvalResult = Result<Object, RuntimeError>;
type ExecResult = Result<(), Unwind>;

/// Tree-walking evaluator. Owns the live environment chain (rooted at
/// `globals`) and the resolver's distance annotations (`locals`), and
/// drives every side effect — variable mutation, `print`, native calls.
///
/// Output is written through an injected sink rather than straight to
/// `stdout` so the REPL, the file runner, and tests all share one code
/// path (spec.md §6).
pub struct Interpreter<'o> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<NodeId, usize>,
    out: &'o mut dyn Write,
}

impl<'o> Interpreter<'o> {
    pub fn new(out: &'o mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::builtins() {
            globals.borrow_mut().define(native.name, Object::from(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
        }
    }

    pub fn write_line(&mut self, line: &str) {
        let _ = writeln!(self.out, "{line}");
    }

    /// Records the lexical distance the resolver computed for a
    /// `Variable`/`Assign`/`This`/`Super` node (I3).
    pub fn resolve(&mut self, id: NodeId, depth: usize) {
        self.locals.insert(id, depth);
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {},
                Err(Unwind::Error(error)) => return Err(error),
                Err(Unwind::Return(_)) => unreachable!("resolver forbids return outside a function"),
            }
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    /// Executes a block's statements in a fresh environment, restoring the
    /// caller's environment no matter how execution ends (I1).
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, environment);

        let result = (|| {
            for statement in statements {
                self.execute(statement)?;
            }
            Ok(())
        })();

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    fn look_up_variable(&mut self, name: &Token, id: NodeId) -> EvalResult {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn call_callee(&mut self, callee: Object, paren: &Token, arguments: Vec<Object>) -> EvalResult {
        match callee {
            Object::Function(function) => Self::invoke(self, &function, paren, arguments),
            Object::NativeFunction(native) => Self::invoke(self, &native, paren, arguments),
            Object::Class(class) => {
                let arity = class.arity();
                if arguments.len() != arity {
                    return Err(RuntimeError::new(paren, format!("Expected {arity} arguments but got {}", arguments.len())));
                }
                Class::instantiate(&class, self, arguments)
            },
            _ => Err(RuntimeError::new(paren, "Can only call functions and classes")),
        }
    }

    fn invoke(&mut self, callable: &impl Callable, paren: &Token, arguments: Vec<Object>) -> EvalResult {
        if arguments.len() != callable.arity() {
            return Err(RuntimeError::new(
                paren,
                format!("Expected {} arguments but got {}", callable.arity(), arguments.len()),
            ));
        }
        callable.call(self, arguments)
    }
}

impl ExprVisitor<EvalResult> for Interpreter<'_> {
    fn visit_literal_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Literal(literal) = expr else { unreachable!() };
        Ok(Object::from(literal.clone()))
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Logical(data) = expr else { unreachable!() };

        let left = self.evaluate(&data.left)?;

        // `and`/`or` short-circuit and return the deciding operand's value,
        // not a coerced boolean.
        if data.operator.r#type == Type::Or {
            if left.is_truthy() { return Ok(left); }
        } else if !left.is_truthy() {
            return Ok(left);
        }

        self.evaluate(&data.right)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Unary(data) = expr else { unreachable!() };

        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => match right {
                Object::Literal(Literal::Number(n)) => Ok(Object::from(-n)),
                _ => Err(RuntimeError::new(&data.operator, "Operand must be a number")),
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("scanner/parser only produce ! and - as unary operators"),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Binary(data) = expr else { unreachable!() };

        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        use Literal::Number as N;

        let numbers = |l: &Object, r: &Object| match (l, r) {
            (Object::Literal(N(l)), Object::Literal(N(r))) => Some((*l, *r)),
            _ => None,
        };

        match data.operator.r#type {
            Type::Plus => match (&left, &right) {
                (Object::Literal(N(l)), Object::Literal(N(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                },
                _ => Err(RuntimeError::new(&data.operator, "Operands must be two numbers or two strings")),
            },
            Type::Minus => numbers(&left, &right)
                .map(|(l, r)| Object::from(l - r))
                .ok_or_else(|| RuntimeError::new(&data.operator, "Operands must be numbers")),
            Type::Slash => numbers(&left, &right)
                .map(|(l, r)| Object::from(l / r))
                .ok_or_else(|| RuntimeError::new(&data.operator, "Operands must be numbers")),
            Type::Star => numbers(&left, &right)
                .map(|(l, r)| Object::from(l * r))
                .ok_or_else(|| RuntimeError::new(&data.operator, "Operands must be numbers")),
            Type::Greater => numbers(&left, &right)
                .map(|(l, r)| Object::from(l > r))
                .ok_or_else(|| RuntimeError::new(&data.operator, "Operands must be numbers")),
            Type::GreaterEqual => numbers(&left, &right)
                .map(|(l, r)| Object::from(l >= r))
                .ok_or_else(|| RuntimeError::new(&data.operator, "Operands must be numbers")),
            Type::Less => numbers(&left, &right)
                .map(|(l, r)| Object::from(l < r))
                .ok_or_else(|| RuntimeError::new(&data.operator, "Operands must be numbers")),
            Type::LessEqual => numbers(&left, &right)
                .map(|(l, r)| Object::from(l <= r))
                .ok_or_else(|| RuntimeError::new(&data.operator, "Operands must be numbers")),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!("scanner/parser only produce binary operators here"),
        }
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.evaluate(&data.expr)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Variable(data) = expr else { unreachable!() };
        self.look_up_variable(&data.name, data.id)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Assign(data) = expr else { unreachable!() };

        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(&distance) => self.environment.borrow_mut().assign_at(distance, &data.name, value.clone())?,
            None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Call(data) = expr else { unreachable!() };

        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        self.call_callee(callee, &data.paren, arguments)
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Get(data) = expr else { unreachable!() };

        let object = self.evaluate(&data.object)?;
        match &object {
            Object::Instance(instance) => instance.get(&data.name, &object),
            _ => Err(RuntimeError::new(&data.name, "Only instances have properties")),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Set(data) = expr else { unreachable!() };

        let object = self.evaluate(&data.object)?;
        let Object::Instance(instance) = &object else {
            return Err(RuntimeError::new(&data.name, "Only instances have fields"));
        };

        let value = self.evaluate(&data.value)?;
        instance.set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::This(data) = expr else { unreachable!() };
        self.look_up_variable(&data.keyword, data.id)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Super(data) = expr else { unreachable!() };

        let distance = self.locals[&data.id];
        let superclass = self.environment.borrow().get_at(distance, &data.keyword)?;
        let Object::Class(superclass) = superclass else { unreachable!("resolver only binds 'super' to a class") };

        let this_token = Token::from("this");
        let instance = self.environment.borrow().get_at(distance - 1, &this_token)?;

        let Some(method) = superclass.find_method(&data.method.lexeme) else {
            return Err(RuntimeError::new(&data.method, format!("Undefined property '{}'", data.method.lexeme)));
        };

        Ok(Object::Function(method.bind(instance)))
    }
}

impl StmtVisitor<ExecResult> for Interpreter<'_> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Print(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;
        writeln!(self.out, "{value}").map_err(|e| RuntimeError::without_token(e.to_string()))?;
        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
        self.execute_block(&data.statements, scope)
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }
        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(
            data.name.clone(),
            Rc::new(data.params.clone()),
            Rc::new(data.body.clone()),
            Rc::clone(&self.environment),
            false,
        );

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(expr) => {
                match self.evaluate(expr)? {
                    Object::Class(class) => Some(class),
                    _ => {
                        let Expr::Variable(v) = expr else { unreachable!() };
                        return Err(RuntimeError::new(&v.name, "Superclass must be a class"));
                    },
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        let previous_environment = if let Some(superclass) = &superclass {
            let enclosing = Rc::clone(&self.environment);
            let env = Rc::new(RefCell::new(Environment::new(Some(enclosing))));
            env.borrow_mut().define("super", Object::Class(Rc::clone(superclass)));
            Some(std::mem::replace(&mut self.environment, env))
        } else {
            None
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function_data) = method else { unreachable!() };
            let is_initializer = function_data.name.lexeme == "init";
            let function = Function::new(
                function_data.name.clone(),
                Rc::new(function_data.params.clone()),
                Rc::new(function_data.body.clone()),
                Rc::clone(&self.environment),
                is_initializer,
            );
            methods.insert(function_data.name.lexeme.clone(), Rc::new(function));
        }

        let class = Rc::new(Class::new(data.name.lexeme.clone(), superclass, methods));

        if let Some(previous) = previous_environment {
            self.environment = previous;
        }

        // Q2: the class-name binding assign's result is discarded.
        self.environment.borrow_mut().assign(&data.name, Object::Class(class))?;
        Ok(())
    }
}
