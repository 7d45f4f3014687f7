//! 胶水代码渲染
//!
//! 把 `GlueUnit` 渲染成最终的 C 源码文本。

use std::fmt::Write;

use linal_config::{CodegenConfig, ModuleConfig};

use super::ir::{GlueItem, GlueUnit, HookKind};

/// 渲染器
pub struct Emitter<'cfg> {
    codegen: &'cfg CodegenConfig,
    module: &'cfg ModuleConfig,
    out: String,
}

impl<'cfg> Emitter<'cfg> {
    pub fn new(codegen: &'cfg CodegenConfig, module: &'cfg ModuleConfig) -> Self {
        Self {
            codegen,
            module,
            out: String::new(),
        }
    }

    pub fn emit(mut self, unit: &GlueUnit<'_>) -> String {
        let file = escape_c_string(&unit.file);

        let _ = writeln!(self.out, "#define {}", self.codegen.preprocessed_define);
        self.line_directive(1, &file);

        for item in &unit.items {
            self.emit_item(item, &file);
        }

        self.emit_trailer(unit, &file);
        self.out
    }

    fn emit_item(&mut self, item: &GlueItem<'_>, file: &str) {
        match item {
            GlueItem::Passthrough(text) => self.out.push_str(text),
            GlueItem::CommandHeader {
                function,
                custom_name,
                signature,
                row,
            } => {
                self.line_directive(*row, file);
                let mut args: Vec<String> = Vec::with_capacity(signature.len() + 2);
                let macro_name = match custom_name {
                    Some(name) => {
                        args.push(format!("\"{}\"", escape_c_string(name)));
                        "LINAL_declare_command_custom_name"
                    }
                    None => "LINAL_declare_command",
                };
                args.push(function.to_string());
                args.extend(signature.iter().map(|ty| ty.glue_constant().to_string()));
                let _ = writeln!(self.out, "{}({}) {{", macro_name, args.join(", "));
            }
            GlueItem::Extraction { param, ordinal } => {
                let c_type = param.ty.c_type();
                let sep = if c_type.ends_with('*') { "" } else { " " };
                let _ = writeln!(
                    self.out,
                    "\t{}{}{} = {}({});",
                    c_type,
                    sep,
                    param.name,
                    param.ty.accessor(),
                    ordinal
                );
            }
            GlueItem::HookHeader { kind, row } => {
                self.line_directive(*row, file);
                let _ = writeln!(self.out, "{} {{", hook_declare_macro(*kind));
            }
            GlueItem::LineMarker { row } => self.line_directive(*row, file),
        }
    }

    fn emit_trailer(&mut self, unit: &GlueUnit<'_>, file: &str) {
        let table = &self.module.table_symbol;
        self.ensure_line_start();
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "linal_Callables {};", table);
        let _ = writeln!(self.out, "void {}(void) {{", self.module.register_symbol);
        for hook in &unit.hooks {
            let _ = writeln!(self.out, "\t{}(&{});", hook_register_macro(*hook), table);
        }
        for registration in &unit.registrations {
            self.line_directive(registration.row, file);
            let _ = writeln!(
                self.out,
                "\tLINAL_register_command(&{}, {});",
                table, registration.function
            );
        }
        let _ = writeln!(self.out, "}}");
    }

    fn line_directive(&mut self, row: usize, file: &str) {
        if !self.codegen.line_directives {
            return;
        }
        self.ensure_line_start();
        let _ = writeln!(self.out, "#line {} \"{}\"", row, file);
    }

    /// 指令必须位于行首
    fn ensure_line_start(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

fn hook_declare_macro(kind: HookKind) -> &'static str {
    match kind {
        HookKind::Pre => "LINAL_declare_pre",
        HookKind::Post => "LINAL_declare_post",
    }
}

fn hook_register_macro(kind: HookKind) -> &'static str {
    match kind {
        HookKind::Pre => "LINAL_register_pre",
        HookKind::Post => "LINAL_register_post",
    }
}

fn escape_c_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 使用给定配置渲染
pub fn emit(unit: &GlueUnit<'_>, codegen: &CodegenConfig, module: &ModuleConfig) -> String {
    Emitter::new(codegen, module).emit(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::generate;

    fn render(source: &str) -> String {
        let unit = generate(source, "cmds.c").unwrap();
        emit(&unit, &CodegenConfig::default(), &ModuleConfig::default())
    }

    fn render_plain(source: &str) -> String {
        let unit = generate(source, "cmds.c").unwrap();
        let codegen = CodegenConfig {
            line_directives: false,
            ..Default::default()
        };
        emit(&unit, &codegen, &ModuleConfig::default())
    }

    #[test]
    fn test_command_glue() {
        let out = render_plain("// @cmd\nvoid *say(char *msg, int n) {\n\tputs(msg);\n}\n");
        let expected = "#define __LINAL_PREPROCESSED_FILE\n\
// @cmd\n\
LINAL_declare_command(say, ARG_STR, ARG_INT) {\n\
\tchar *msg = LINAL_arg_str(0);\n\
\tint n = LINAL_arg_int(1);\n\
\tputs(msg);\n\
}\n\
\n\
linal_Callables __linal_preproc_callables;\n\
void __linal_preproc_register_commands(void) {\n\
\tLINAL_register_command(&__linal_preproc_callables, say);\n\
}\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_custom_name_and_hooks() {
        let out = render_plain(
            "// @pre\nvoid setup(void) {}\n// @cmd !print\nvoid *print_it(void) {}\n// @post\nvoid done() {}\n",
        );
        assert!(out.contains("LINAL_declare_pre {"));
        assert!(out.contains("LINAL_declare_post {"));
        assert!(out.contains("LINAL_declare_command_custom_name(\"!print\", print_it) {"));
        let pre = out.find("\tLINAL_register_pre(&__linal_preproc_callables);").unwrap();
        let post = out.find("\tLINAL_register_post(&__linal_preproc_callables);").unwrap();
        let cmd = out.find("\tLINAL_register_command(&__linal_preproc_callables, print_it);").unwrap();
        assert!(pre < post && post < cmd);
    }

    #[test]
    fn test_line_directives() {
        let out = render("int x;\n// @cmd\nvoid *f(float v) {\n\treturn 0;\n}\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "#define __LINAL_PREPROCESSED_FILE");
        assert_eq!(lines[1], "#line 1 \"cmds.c\"");
        assert_eq!(lines[2], "int x;");
        assert_eq!(lines[3], "// @cmd");
        assert_eq!(lines[4], "#line 3 \"cmds.c\"");
        assert_eq!(lines[5], "LINAL_declare_command(f, ARG_FLT) {");
        assert_eq!(lines[6], "\tfloat v = LINAL_arg_flt(0);");
        assert_eq!(lines[7], "#line 4 \"cmds.c\"");
        assert_eq!(lines[8], "\treturn 0;");
        assert!(out.contains("#line 3 \"cmds.c\"\n\tLINAL_register_command(&__linal_preproc_callables, f);"));
    }

    #[test]
    fn test_same_line_tag_gets_directive_on_new_line() {
        let out = render("/* @cmd */ void *f(bool b) { return 0; }\n");
        assert!(out.contains("/* @cmd */ \n#line 1 \"cmds.c\"\nLINAL_declare_command(f, ARG_BOOL) {\n"));
        assert!(out.contains("\tbool b = LINAL_arg_bool(0);\n#line 1 \"cmds.c\"\n return 0; }"));
    }

    #[test]
    fn test_escape_file_name() {
        assert_eq!(escape_c_string(r#"C:\src\"x".c"#), r#"C:\\src\\\"x\".c"#);
    }
}
