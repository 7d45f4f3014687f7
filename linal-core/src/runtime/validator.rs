//! 调用校验
//!
//! 按顺序检查：
//! 1. 命令是否存在
//! 2. 调用是否 malformed
//! 3. 参数个数是否与签名完全相等
//! 4. 每个参数能否转换为对应位置的声明类型
//!
//! 第 4 步会报告所有失败的参数后再丢弃该调用。
//! 只有全部参数都转换成功时才写回，因此重复校验结果不变。

use tracing::{debug, trace};

use super::callable::CallableTable;
use super::diagnostic::{DiagnosticKind, DiagnosticSink, ScriptDiagnostic};
use crate::script::Invocation;

const TARGET: &str = "linal::validator";

pub struct Validator<'t> {
    table: &'t CallableTable,
}

impl<'t> Validator<'t> {
    pub fn new(table: &'t CallableTable) -> Self {
        Self { table }
    }

    /// 校验一个调用，返回全部诊断；通过时设置 `resolved` 并写回转换后的参数
    pub fn check(&self, invocation: &mut Invocation) -> Vec<ScriptDiagnostic> {
        invocation.resolved = None;
        let diagnostic = |kind| {
            ScriptDiagnostic::new(kind, invocation.name.clone(), invocation.location.clone())
        };

        let Some((index, callable)) = self.table.lookup(&invocation.name) else {
            return vec![diagnostic(DiagnosticKind::UnknownCommand)];
        };
        if invocation.malformed {
            return vec![diagnostic(DiagnosticKind::Malformed)];
        }

        let expected = callable.arity();
        let found = invocation.args.len();
        if found < expected {
            return vec![diagnostic(DiagnosticKind::TooFewArguments { expected, found })];
        }
        if found > expected {
            return vec![diagnostic(DiagnosticKind::TooManyArguments { expected, found })];
        }

        let mut coerced = Vec::with_capacity(found);
        let mut problems = Vec::new();
        for (position, (value, &declared)) in invocation
            .args
            .iter()
            .zip(callable.signature())
            .enumerate()
        {
            match value.coerce(declared) {
                Some(converted) => coerced.push(converted),
                None => problems.push(ScriptDiagnostic::new(
                    DiagnosticKind::TypeMismatch {
                        ordinal: position + 1,
                        expected: declared,
                        found: value.ty(),
                    },
                    invocation.name.clone(),
                    invocation.arg_location(position).clone(),
                )),
            }
        }
        if !problems.is_empty() {
            return problems;
        }

        trace!(target: TARGET, name = %invocation.name, index, "resolved");
        invocation.args = coerced;
        invocation.resolved = Some(index);
        Vec::new()
    }

    /// 校验并把诊断写入 sink，返回是否通过
    pub fn validate(
        &self,
        invocation: &mut Invocation,
        source: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        let problems = self.check(invocation);
        for problem in &problems {
            debug!(target: TARGET, message = %problem, "invocation rejected");
            sink.report(problem, source);
        }
        problems.is_empty()
    }

    /// 批量校验，返回通过的数量；通过的调用 `resolved` 已设置
    pub fn validate_all(
        &self,
        invocations: &mut [Invocation],
        source: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        invocations
            .iter_mut()
            .map(|invocation| self.validate(invocation, source, sink))
            .filter(|ok| *ok)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::diagnostic::CollectingSink;
    use crate::runtime::{ArgType, ArgValue};
    use crate::script::parse_script;

    fn table() -> CallableTable {
        let mut table = CallableTable::new();
        table
            .register("pair", &[ArgType::Str, ArgType::Int], |_| {})
            .register("flag", &[ArgType::Bool], |_| {})
            .register("ratio", &[ArgType::Float, ArgType::Float, ArgType::Float], |_| {});
        table
    }

    fn run(source: &str) -> (Vec<Invocation>, CollectingSink) {
        let table = table();
        let mut invocations = parse_script(source, "v.lln");
        let mut sink = CollectingSink::new();
        Validator::new(&table).validate_all(&mut invocations, source, &mut sink);
        (invocations, sink)
    }

    #[test]
    fn test_valid_invocation_is_resolved() {
        let (invocations, sink) = run(r#"!pair("a", 3)"#);
        assert!(sink.is_empty());
        assert_eq!(invocations[0].resolved, Some(0));
        assert_eq!(
            invocations[0].args,
            vec![ArgValue::Str("a".into()), ArgValue::Int(3)]
        );
    }

    #[test]
    fn test_unknown_command() {
        let (invocations, sink) = run("!nope()");
        assert_eq!(sink.messages(), vec!["Command 'nope' doesn't exist."]);
        assert!(!invocations[0].is_resolved());
    }

    #[test]
    fn test_unknown_reported_before_malformed() {
        let (_, sink) = run("!nope( !pair(");
        assert_eq!(
            sink.messages(),
            vec!["Command 'nope' doesn't exist.", "Command 'pair' is malformed."]
        );
    }

    #[test]
    fn test_arity() {
        let (_, sink) = run("!pair(1) !pair(\"x\", 2, 3)");
        assert_eq!(
            sink.messages(),
            vec![
                "Command 'pair' needs 2 arguments, only 1 were passed.",
                "Command 'pair' needs 2 arguments, but 3 were passed."
            ]
        );
    }

    #[test]
    fn test_float_cannot_become_int() {
        let (invocations, sink) = run(r#"!pair("a", 3.5)"#);
        assert_eq!(
            sink.messages(),
            vec!["Command 'pair' expects int as 2nd argument, but float was passed."]
        );
        assert_eq!(sink.diagnostics[0].location.col(), 12);
        assert!(!invocations[0].is_resolved());
    }

    #[test]
    fn test_all_type_errors_reported() {
        let (invocations, sink) = run(r#"!ratio("x", 2, false)"#);
        assert_eq!(
            sink.messages(),
            vec![
                "Command 'ratio' expects float as 1st argument, but string was passed.",
                "Command 'ratio' expects float as 3rd argument, but bool was passed."
            ]
        );
        // 失败的调用保持原值
        assert_eq!(invocations[0].args[1], ArgValue::Int(2));
    }

    #[test]
    fn test_coercion_written_back() {
        let (invocations, sink) = run("!flag(5) !ratio(1, 2.5, 0)");
        assert!(sink.is_empty());
        assert_eq!(invocations[0].args, vec![ArgValue::Bool(true)]);
        assert_eq!(
            invocations[1].args,
            vec![ArgValue::Float(1.0), ArgValue::Float(2.5), ArgValue::Float(0.0)]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let source = r#"!pair("a", 1) !flag(2.0) !nope() !ratio(1, true, 3) !pair(1"#;
        let table = table();
        let validator = Validator::new(&table);
        let mut invocations = parse_script(source, "v.lln");

        let mut first = CollectingSink::new();
        let passed_first = validator.validate_all(&mut invocations, source, &mut first);
        let resolved_first: Vec<_> = invocations.iter().map(|i| i.resolved).collect();

        let mut second = CollectingSink::new();
        let passed_second = validator.validate_all(&mut invocations, source, &mut second);
        let resolved_second: Vec<_> = invocations.iter().map(|i| i.resolved).collect();

        assert_eq!(passed_first, 1);
        assert_eq!(passed_first, passed_second);
        assert_eq!(resolved_first, resolved_second);
        assert_eq!(first.diagnostics, second.diagnostics);
    }
}
