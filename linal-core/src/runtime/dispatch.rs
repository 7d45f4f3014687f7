//! 执行引擎
//!
//! 状态机：Idle → PreHook → Dispatching → PostHook → Done。
//! 调用表为空时直接进入 Done，不运行钩子。
//! 调用以流的方式逐个校验、执行；被拒绝的调用报告后丢弃。

use tracing::{debug, info};

use super::callable::CallableTable;
use super::diagnostic::DiagnosticSink;
use super::validator::Validator;
use crate::script::Invocation;

const TARGET: &str = "linal::dispatch";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    PreHook,
    Dispatching,
    PostHook,
    Done,
}

/// 一次运行的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub executed: usize,
    pub rejected: usize,
    pub pre_ran: bool,
    pub post_ran: bool,
}

pub struct Engine<'t> {
    table: &'t CallableTable,
    state: DispatchState,
}

impl<'t> Engine<'t> {
    pub fn new(table: &'t CallableTable) -> Self {
        Self {
            table,
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    fn transition(&mut self, next: DispatchState) {
        debug!(target: TARGET, from = ?self.state, to = ?next, "state");
        self.state = next;
    }

    /// 执行一个已校验的调用；未通过校验的调用不会执行
    pub fn execute(&self, invocation: &Invocation) -> bool {
        let Some(callable) = invocation.resolved.and_then(|index| self.table.get(index)) else {
            return false;
        };
        debug!(
            target: TARGET,
            name = callable.name(),
            row = invocation.location.row(),
            "dispatch"
        );
        callable.call(&invocation.args);
        true
    }

    /// 运行整个状态机
    pub fn run<I>(
        &mut self,
        invocations: I,
        source: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> DispatchReport
    where
        I: IntoIterator<Item = Invocation>,
    {
        let mut report = DispatchReport::default();
        if self.table.is_empty() {
            info!(target: TARGET, "callable table is empty, nothing to run");
            self.transition(DispatchState::Done);
            return report;
        }

        if self.table.has_pre() {
            self.transition(DispatchState::PreHook);
            report.pre_ran = self.table.run_pre();
        }

        self.transition(DispatchState::Dispatching);
        let validator = Validator::new(self.table);
        for mut invocation in invocations {
            if validator.validate(&mut invocation, source, sink) && self.execute(&invocation) {
                report.executed += 1;
            } else {
                report.rejected += 1;
            }
        }

        if self.table.has_post() {
            self.transition(DispatchState::PostHook);
            report.post_ran = self.table.run_post();
        }

        self.transition(DispatchState::Done);
        info!(
            target: TARGET,
            executed = report.executed,
            rejected = report.rejected,
            "run finished"
        );
        report
    }
}
