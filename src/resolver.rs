use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::{Expr, ExprVisitor};
use crate::interpreter::Interpreter;
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::Token;

type ResolveResult = Result<(), ResolveError>;

#[derive(PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Static pass between parsing and interpretation: walks the AST once,
/// stamping every `Variable`/`Assign`/`This`/`Super` node with its lexical
/// distance (I3) and enforcing the rules that can be checked without
/// running the program (I2, return/this/super context).
///
/// Unlike the scanner and parser, the resolver aborts at the first error
/// (spec.md §7) — a half-resolved program is not safe to interpret.
pub struct Resolver<'r, 'o> {
    interpreter: &'r mut Interpreter<'o>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'r, 'o> Resolver<'r, 'o> {
    pub fn new(interpreter: &'r mut Interpreter<'o>) -> Self {
        Resolver {
            interpreter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) -> ResolveResult {
        expr.accept(self)
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        stmt.accept(self)
    }

    pub fn resolve(&mut self, statements: &[Stmt]) -> ResolveResult {
        for statement in statements {
            self.resolve_stmt(statement)?;
        }
        Ok(())
    }

    fn resolve_function(&mut self, stmt: &Stmt, r#type: FunctionType) -> ResolveResult {
        let Stmt::Function(function) = stmt else { unreachable!() };

        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param)?;
            self.define(param);
        }
        self.resolve(&function.body)?;
        self.end_scope();

        self.current_function = enclosing_function;
        Ok(())
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) -> ResolveResult {
        let Some(scope) = self.scopes.last_mut() else { return Ok(()) };

        if scope.contains_key(&name.lexeme) {
            return Err(ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope".to_string(),
            });
        }

        scope.insert(name.lexeme.clone(), false);
        Ok(())
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn resolve_local(&mut self, id: crate::expr::NodeId, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }
}

impl ExprVisitor<ResolveResult> for Resolver<'_, '_> {
    fn visit_variable_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Variable(data) = expr else { unreachable!() };

        if let Some(scope) = self.scopes.last() {
            if scope.get(&data.name.lexeme) == Some(&false) {
                return Err(ResolveError {
                    token: data.name.clone(),
                    message: "Can't read local variable in its own initializer".to_string(),
                });
            }
        }

        self.resolve_local(data.id, &data.name);
        Ok(())
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Assign(data) = expr else { unreachable!() };

        self.resolve_expr(&data.value)?;
        self.resolve_local(data.id, &data.name);
        Ok(())
    }

    fn visit_literal_expr(&mut self, _expr: &Expr) -> ResolveResult {
        Ok(())
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Logical(data) = expr else { unreachable!() };
        self.resolve_expr(&data.left)?;
        self.resolve_expr(&data.right)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Unary(data) = expr else { unreachable!() };
        self.resolve_expr(&data.expr)
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Binary(data) = expr else { unreachable!() };
        self.resolve_expr(&data.left)?;
        self.resolve_expr(&data.right)
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.resolve_expr(&data.expr)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Call(data) = expr else { unreachable!() };

        self.resolve_expr(&data.callee)?;
        for argument in &data.arguments {
            self.resolve_expr(argument)?;
        }
        Ok(())
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Get(data) = expr else { unreachable!() };
        self.resolve_expr(&data.object)
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Set(data) = expr else { unreachable!() };
        self.resolve_expr(&data.value)?;
        self.resolve_expr(&data.object)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::This(data) = expr else { unreachable!() };

        if self.current_class == ClassType::None {
            return Err(ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'this' outside of a class".to_string(),
            });
        }

        self.resolve_local(data.id, &data.keyword);
        Ok(())
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> ResolveResult {
        let Expr::Super(data) = expr else { unreachable!() };

        match self.current_class {
            ClassType::Subclass => {},
            ClassType::None => {
                return Err(ResolveError {
                    token: data.keyword.clone(),
                    message: "Can't use 'super' outside of a class".to_string(),
                });
            },
            ClassType::Class => {
                return Err(ResolveError {
                    token: data.keyword.clone(),
                    message: "Can't use 'super' in a class with no superclass".to_string(),
                });
            },
        }

        self.resolve_local(data.id, &data.keyword);
        Ok(())
    }
}

impl StmtVisitor<ResolveResult> for Resolver<'_, '_> {
    fn visit_block_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::Block(data) = stmt else { unreachable!() };

        self.begin_scope();
        let result = self.resolve(&data.statements);
        self.end_scope();
        result
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::Var(data) = stmt else { unreachable!() };

        self.declare(&data.name)?;
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer)?;
        }
        self.define(&data.name);
        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::Function(data) = stmt else { unreachable!() };

        self.declare(&data.name)?;
        self.define(&data.name);

        self.resolve_function(stmt, FunctionType::Function)
    }

    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        self.resolve_expr(&data.expr)
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::If(data) = stmt else { unreachable!() };

        self.resolve_expr(&data.condition)?;
        self.resolve_stmt(&data.then_branch)?;
        if let Some(else_branch) = &data.else_branch {
            self.resolve_stmt(else_branch)?;
        }
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::Print(data) = stmt else { unreachable!() };
        self.resolve_expr(&data.expr)
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::Return(data) = stmt else { unreachable!() };

        if self.current_function == FunctionType::None {
            return Err(ResolveError {
                token: data.keyword.clone(),
                message: "Can't return from top-level code".to_string(),
            });
        }

        if let Some(value) = &data.value {
            if self.current_function == FunctionType::Initializer {
                return Err(ResolveError {
                    token: data.keyword.clone(),
                    message: "Can't return a value from an initializer".to_string(),
                });
            }

            self.resolve_expr(value)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::While(data) = stmt else { unreachable!() };

        self.resolve_expr(&data.condition)?;
        self.resolve_stmt(&data.body)
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> ResolveResult {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name)?;
        self.define(&data.name);

        let has_superclass = data.superclass.is_some();
        if let Some(superclass) = &data.superclass {
            let Expr::Variable(superclass_var) = superclass else { unreachable!() };
            if superclass_var.name.lexeme == data.name.lexeme {
                self.current_class = enclosing_class;
                return Err(ResolveError {
                    token: superclass_var.name.clone(),
                    message: "A class can't inherit from itself".to_string(),
                });
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass)?;

            self.begin_scope();
            self.scopes.last_mut().expect("scope just pushed").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

        let mut result = Ok(());
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };
            let declaration = if function.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };

            if let Err(error) = self.resolve_function(method, declaration) {
                result = Err(error);
                break;
            }
        }

        self.end_scope();
        if has_superclass {
            self.end_scope();
        }

        self.current_class = enclosing_class;
        result
    }
}
