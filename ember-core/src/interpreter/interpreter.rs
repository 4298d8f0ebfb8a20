use std::{cell::RefCell, io::{Stdout, Write}, rc::Rc};

use crate::{
    environment::prelude::{Arity, Builtin, Environment, Function, Value, NIL},
    lexer::prelude::TokenKind,
    parser::prelude::{
        Binary, Call, Conditional, ConditionalLoop, Expression, FunctionDeclaration,
        Primitive, Statement, Unary
    },
    utils::prelude::SrcSpan
};
use super::{
    builtins::Builtins,
    error::{runtime_error, RuntimeError, RuntimeErrorType}
};

/// How a statement finished. `Return` unwinds to the nearest call.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value)
}

/// Leaves statements and expressions alike. `Break` and `Continue` travel to
/// the nearest running loop, through function calls if they have to, and an
/// `Error` travels to the top.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwind {
    Break { location: SrcSpan },
    Continue { location: SrcSpan },
    Error(RuntimeError)
}

impl Unwind {
    /// A loop signal that reaches the top has no loop left to stop.
    pub fn into_error(self) -> RuntimeError {
        match self {
            Unwind::Break { location } => RuntimeError { error: RuntimeErrorType::BreakOutsideLoop, location },
            Unwind::Continue { location } => RuntimeError { error: RuntimeErrorType::ContinueOutsideLoop, location },
            Unwind::Error(err) => err
        }
    }
}

impl From<RuntimeError> for Unwind {
    fn from(err: RuntimeError) -> Self {
        Unwind::Error(err)
    }
}

pub type Exec = Result<Flow, Unwind>;
pub type Eval = Result<Value, Unwind>;

pub struct Interpreter<W: Write> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    loop_depth: usize,
    function_depth: usize,
    out: W,
}

impl Interpreter<Stdout> {
    pub fn new() -> Self {
        Self::with_output(std::io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Self {
        Self::with_builtins(out, &Builtins::standard())
    }

    pub fn with_builtins(out: W, builtins: &Builtins) -> Self {
        let globals = Environment::new().into_shared();
        builtins.install(&mut globals.borrow_mut());

        Self {
            environment: globals.clone(),
            globals,
            loop_depth: 0,
            function_depth: 0,
            out,
        }
    }

    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        self.globals.clone()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs top-level statements in order and stops at the first runtime
    /// error, which is the only entry of the returned list.
    pub fn interpret(&mut self, statements: &[Statement]) -> Vec<RuntimeError> {
        match self.run(statements) {
            Ok(()) => vec![],
            Err(err) => vec![err]
        }
    }

    pub fn run(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        let res = statements.iter()
            .try_for_each(|statement| self.execute(statement).map(|_| ()))
            .map_err(Unwind::into_error);

        let flushed = self.out.flush();

        match (res, flushed) {
            (Ok(()), Err(err)) => runtime_error(
                RuntimeErrorType::Output { err: err.kind() },
                statements.last().map(Statement::location).unwrap_or_default()
            ),
            (res, _) => res
        }
    }

    pub fn execute(&mut self, statement: &Statement) -> Exec {
        match statement {
            Statement::Expression(statement) => {
                self.evaluate(&statement.expression)?;

                Ok(Flow::Normal)
            },
            Statement::Let(statement) => {
                let value = self.evaluate(&statement.initializer)?;

                if !self.environment.borrow_mut().define(&statement.name.value, value) {
                    return runtime_error(
                        RuntimeErrorType::VariableRedeclaration { name: statement.name.value.clone() },
                        statement.name.location
                    );
                }

                Ok(Flow::Normal)
            },
            Statement::Block(block) => {
                let env = Environment::with_enclosing(self.environment.clone());

                self.execute_block(&block.statements, env.into_shared())
            },
            Statement::If(conditional) => self.execute_conditional(conditional),
            Statement::While(loop_) => {
                self.loop_depth += 1;
                let res = self.execute_loop(loop_);
                self.loop_depth -= 1;

                res
            },
            Statement::Break { location } => match self.loop_depth {
                0 => runtime_error(RuntimeErrorType::BreakOutsideLoop, *location),
                _ => Err(Unwind::Break { location: *location })
            },
            Statement::Continue { location } => match self.loop_depth {
                0 => runtime_error(RuntimeErrorType::ContinueOutsideLoop, *location),
                _ => Err(Unwind::Continue { location: *location })
            },
            Statement::Return(statement) => {
                if self.function_depth == 0 {
                    return runtime_error(RuntimeErrorType::ReturnOutsideFunction, statement.location);
                }

                let value = match &statement.value {
                    Some(value) => self.evaluate(value)?,
                    None => NIL
                };

                Ok(Flow::Return(value))
            },
            Statement::Fn(declaration) => self.declare_function(declaration),
        }
    }

    /// Runs `statements` with `env` as the current scope. The previous scope
    /// is back in place whatever way the block ends.
    pub fn execute_block(&mut self, statements: &[Statement], env: Rc<RefCell<Environment>>) -> Exec {
        let previous = std::mem::replace(&mut self.environment, env);
        let res = self.execute_all(statements);
        self.environment = previous;

        res
    }

    fn execute_all(&mut self, statements: &[Statement]) -> Exec {
        for statement in statements {
            if let Flow::Return(value) = self.execute(statement)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    fn execute_conditional(&mut self, conditional: &Conditional) -> Exec {
        let condition = self.evaluate(&conditional.condition)?;

        if expect_bool(&condition, conditional.condition.location(), "if condition")? {
            return self.execute(&conditional.resolution);
        }

        match &conditional.alternative {
            Some(alternative) => self.execute(alternative),
            None => Ok(Flow::Normal)
        }
    }

    fn execute_loop(&mut self, loop_: &ConditionalLoop) -> Exec {
        loop {
            let condition = self.evaluate(&loop_.condition)?;

            if !expect_bool(&condition, loop_.condition.location(), "while condition")? {
                break;
            }

            match self.execute(&loop_.block) {
                Ok(Flow::Normal) | Err(Unwind::Continue { .. }) => {},
                Err(Unwind::Break { .. }) => break,
                res => return res
            }
        }

        Ok(Flow::Normal)
    }

    /// The function is stored in the scope it captures. The two keep each
    /// other alive, so that scope lives as long as the interpreter does.
    fn declare_function(&mut self, declaration: &Rc<FunctionDeclaration>) -> Exec {
        let function = Function {
            declaration: declaration.clone(),
            closure: self.environment.clone()
        };

        let defined = self.environment.borrow_mut()
            .define(&declaration.name.value, Value::Function(Rc::new(function)));

        if !defined {
            return runtime_error(
                RuntimeErrorType::FunctionRedeclaration { name: declaration.name.value.clone() },
                declaration.name.location
            );
        }

        Ok(Flow::Normal)
    }

    pub fn evaluate(&mut self, expression: &Expression) -> Eval {
        match expression {
            Expression::Primitive(primitive) => Ok(match primitive {
                Primitive::Nil { .. } => NIL,
                Primitive::Int { value, .. } => Value::from(*value),
                Primitive::Bool { value, .. } => Value::from(*value),
            }),
            Expression::Identifier(ident) => {
                let value = self.environment.borrow().lookup(&ident.value);

                match value {
                    Some(value) => Ok(value),
                    None => runtime_error(
                        RuntimeErrorType::UndefinedIdentifier { name: ident.value.clone() },
                        ident.location
                    )
                }
            },
            Expression::Grouping { expression, .. } => self.evaluate(expression),
            Expression::Unary(unary) => self.evaluate_unary(unary),
            Expression::Binary(binary) => self.evaluate_binary(binary),
            Expression::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;

                if !self.environment.borrow_mut().assign(&assign.target.value, value.clone()) {
                    return runtime_error(
                        RuntimeErrorType::UndefinedVariable { name: assign.target.value.clone() },
                        assign.target.location
                    );
                }

                Ok(value)
            },
            Expression::Call(call) => self.evaluate_call(call),
        }
    }

    fn evaluate_unary(&mut self, unary: &Unary) -> Eval {
        let operand = self.evaluate(&unary.expression)?;
        let location = unary.operator.location;

        match unary.operator.kind {
            TokenKind::Minus => {
                let value = expect_number(&operand, location, "unary minus")?;

                Ok(checked(value.checked_neg(), location, "unary minus")?)
            },
            TokenKind::Bang => {
                let value = expect_bool(&operand, location, "logical not")?;

                Ok(Value::from(!value))
            },
            kind => unreachable!("`{kind}` is not a prefix operator")
        }
    }

    fn evaluate_binary(&mut self, binary: &Binary) -> Eval {
        match binary.operator.kind {
            TokenKind::And => return self.evaluate_logical(binary, false, "logical and"),
            TokenKind::Or => return self.evaluate_logical(binary, true, "logical or"),
            _ => {}
        }

        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        let location = binary.operator.location;

        let value = match binary.operator.kind {
            TokenKind::Plus => {
                let (a, b) = expect_numbers(&left, &right, location, "addition")?;

                checked(a.checked_add(b), location, "addition")?
            },
            TokenKind::Minus => {
                let (a, b) = expect_numbers(&left, &right, location, "subtraction")?;

                checked(a.checked_sub(b), location, "subtraction")?
            },
            TokenKind::Asterisk => {
                let (a, b) = expect_numbers(&left, &right, location, "multiplication")?;

                checked(a.checked_mul(b), location, "multiplication")?
            },
            TokenKind::Slash => {
                let (a, b) = expect_numbers(&left, &right, location, "division")?;

                if b == 0 {
                    return runtime_error(RuntimeErrorType::DivisionByZero, location);
                }

                // truncates toward zero, only i64::MIN / -1 can overflow
                checked(a.checked_div(b), location, "division")?
            },
            TokenKind::GreaterThan => {
                let (a, b) = expect_numbers(&left, &right, location, "comparison")?;
                Value::from(a > b)
            },
            TokenKind::GreaterThanOrEqual => {
                let (a, b) = expect_numbers(&left, &right, location, "comparison")?;
                Value::from(a >= b)
            },
            TokenKind::LessThan => {
                let (a, b) = expect_numbers(&left, &right, location, "comparison")?;
                Value::from(a < b)
            },
            TokenKind::LessThanOrEqual => {
                let (a, b) = expect_numbers(&left, &right, location, "comparison")?;
                Value::from(a <= b)
            },
            TokenKind::Equal => Value::from(left == right),
            TokenKind::NotEqual => Value::from(left != right),
            kind => unreachable!("`{kind}` is not a binary operator")
        };

        Ok(value)
    }

    /// `&&` and `||`. The right side is skipped once the left side equals
    /// `short_circuit_on`.
    fn evaluate_logical(
        &mut self,
        binary: &Binary,
        short_circuit_on: bool,
        context: &'static str
    ) -> Eval {
        let left = self.evaluate(&binary.left)?;

        if expect_bool(&left, binary.left.location(), context)? == short_circuit_on {
            return Ok(Value::from(short_circuit_on));
        }

        let right = self.evaluate(&binary.right)?;

        Ok(Value::from(expect_bool(&right, binary.right.location(), context)?))
    }

    fn evaluate_call(&mut self, call: &Call) -> Eval {
        let callee = self.evaluate(&call.callee)?;

        match callee {
            Value::Builtin(builtin) => self.call_builtin(&builtin, call),
            Value::Function(function) => self.call_function(&function, call),
            other => runtime_error(RuntimeErrorType::NotCallable { got: other._type() }, call.location)
        }
    }

    fn call_builtin(&mut self, builtin: &Builtin, call: &Call) -> Eval {
        check_arity(builtin.arity, call)?;

        let arguments = self.evaluate_arguments(&call.arguments)?;

        builtin.call(&arguments, &mut self.out)
            .or_else(|err| runtime_error(RuntimeErrorType::Output { err: err.kind() }, call.location))
    }

    fn call_function(&mut self, function: &Function, call: &Call) -> Eval {
        check_arity(Arity::Fixed(function.arity()), call)?;

        let arguments = self.evaluate_arguments(&call.arguments)?;

        let mut env = Environment::with_enclosing(function.closure.clone());

        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            if !env.define(&param.value, argument) {
                return runtime_error(
                    RuntimeErrorType::DuplicateParameter { name: param.value.clone() },
                    param.location
                );
            }
        }

        self.function_depth += 1;
        let res = self.execute_block(&function.declaration.body, env.into_shared());
        self.function_depth -= 1;

        match res? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(NIL)
        }
    }

    fn evaluate_arguments(&mut self, arguments: &[Expression]) -> Result<Vec<Value>, Unwind> {
        arguments.iter()
            .map(|argument| self.evaluate(argument))
            .collect()
    }
}

/// Runs before any argument is evaluated.
fn check_arity(arity: Arity, call: &Call) -> Result<(), RuntimeError> {
    let got = call.arguments.len();

    if !arity.accepts(got) {
        return runtime_error(RuntimeErrorType::ArityMismatch { expected: arity, got }, call.paren);
    }

    Ok(())
}

fn expect_number(value: &Value, location: SrcSpan, context: &'static str) -> Result<i64, RuntimeError> {
    match value {
        Value::Integer { value } => Ok(*value),
        other => runtime_error(RuntimeErrorType::ExpectedNumber { context, got: other._type() }, location)
    }
}

fn expect_numbers(
    left: &Value,
    right: &Value,
    location: SrcSpan,
    context: &'static str
) -> Result<(i64, i64), RuntimeError> {
    Ok((
        expect_number(left, location, context)?,
        expect_number(right, location, context)?
    ))
}

fn expect_bool(value: &Value, location: SrcSpan, context: &'static str) -> Result<bool, RuntimeError> {
    match value {
        Value::Boolean { value } => Ok(*value),
        other => runtime_error(RuntimeErrorType::ExpectedBoolean { context, got: other._type() }, location)
    }
}

fn checked(value: Option<i64>, location: SrcSpan, context: &'static str) -> Result<Value, RuntimeError> {
    match value {
        Some(value) => Ok(Value::from(value)),
        None => runtime_error(RuntimeErrorType::IntegerOverflow { context }, location)
    }
}
