//! 集成测试 - 端到端：标注源码 → 胶水代码 → 调用表 → 脚本执行

mod common;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use common::{build_module, compile_shared, compiler_available, RECORDER_C};
use linal_vfs::{NativeFs, SourceFs};
use linal_workspace::{
    ensure_library_shaped, preprocess_source, run_script, run_with_module, ArgType, ArgValue,
    BindingError, CallableTable, CollectingSink, LinalConfig, LinalError, ModuleConfig,
};

fn script_for(target: &str) -> String {
    format!(
        "set up first: !target(\"{target}\")\n\
!add(1, 2, true)\n\
!add(True, 3.5, 0)\n\
!add(2.5, 1, false)\n\
!missing()\n"
    )
}

#[test]
fn test_glue_for_recorder_module() {
    let glue = preprocess_source(RECORDER_C, "recorder.c", &LinalConfig::default()).unwrap();
    assert!(glue.contains(
        "LINAL_declare_command_custom_name(\"!target\", set_target, ARG_STR) {\n\tchar *path = LINAL_arg_str(0);\n"
    ));
    assert!(glue.contains("LINAL_declare_command(add, ARG_INT, ARG_FLT, ARG_BOOL) {\n"));
    assert!(glue.contains("static void emit(const char *text) {\n"));

    let pre = glue.find("LINAL_register_pre(").unwrap();
    let post = glue.find("LINAL_register_post(").unwrap();
    let target = glue.find("LINAL_register_command(&__linal_preproc_callables, set_target)").unwrap();
    let add = glue.find("LINAL_register_command(&__linal_preproc_callables, add)").unwrap();
    assert!(pre < post && post < target && target < add);
}

#[test]
fn test_script_against_mirrored_table() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut table = CallableTable::new();
    for (name, signature) in [
        ("target", vec![ArgType::Str]),
        ("add", vec![ArgType::Int, ArgType::Float, ArgType::Bool]),
    ] {
        let log = Rc::clone(&log);
        table.register(name, &signature, move |args: &[ArgValue]| {
            let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
            log.borrow_mut().push(format!("{name} {}", rendered.join(" ")));
        });
    }
    let pre = Rc::clone(&log);
    let post = Rc::clone(&log);
    table
        .set_pre(move || pre.borrow_mut().push("pre".into()))
        .set_post(move || post.borrow_mut().push("post".into()));

    let script = script_for("out.txt");
    let mut sink = CollectingSink::new();
    let report = run_script("demo.lln", &script, table, &mut sink).unwrap();

    assert_eq!(report.executed, 3);
    assert_eq!(report.rejected, 2);
    assert_eq!(
        *log.borrow(),
        vec![
            "pre",
            "target \"out.txt\"",
            "add 1 2 true",
            "add 1 3.5 false",
            "post"
        ]
    );
    assert_eq!(
        sink.messages(),
        vec![
            "Command 'add' expects int as 1st argument, but float was passed.",
            "Command 'missing' doesn't exist.",
        ]
    );
    assert!(sink.rendered[0].starts_with("demo.lln:4:6: "));
}

#[test]
fn test_missing_module_is_binding_error() {
    let fs = NativeFs::new();
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("s.lln");
    fs.write_file(&script, b"!x()").unwrap();

    let mut sink = CollectingSink::new();
    let err = run_with_module(
        &fs,
        &script,
        &dir.path().join("absent.so").to_string_lossy(),
        &LinalConfig::default(),
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, LinalError::Binding(BindingError::Load { .. })));
    assert_eq!(err.phase(), "module");
    assert!(sink.is_empty());
}

#[test]
fn test_generation_error_report() {
    let source = "#include \"linal.h\"\n\n// @cmd\nvoid *bad(double x) {\n}\n";
    let err = preprocess_source(source, "bad.c", &LinalConfig::default()).unwrap_err();
    let report = err.to_report();
    assert_eq!(report.phase, "codegen");
    assert_eq!(report.line, Some(4));
    assert!(report.message.contains("'char *', 'int', 'bool' and 'float'"));
    assert!(report.to_json().contains("\"phase\":\"codegen\""));
    assert!(err.render(source).contains("void *bad(double x) {"));
}

#[test]
fn test_compiled_module_end_to_end() {
    if !compiler_available() {
        eprintln!("skipping: no C compiler");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let module = build_module(dir.path(), "recorder", RECORDER_C);

    let fs = NativeFs::new();
    let out = dir.path().join("out.txt");
    let script = dir.path().join("demo.lln");
    fs.write_file(&script, script_for(&out.to_string_lossy()).as_bytes())
        .unwrap();

    let mut sink = CollectingSink::new();
    let report = run_with_module(
        &fs,
        &script,
        &module.to_string_lossy(),
        &LinalConfig::default(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(report.executed, 3);
    assert_eq!(report.rejected, 2);
    assert!(report.pre_ran && report.post_ran);
    assert_eq!(
        fs.read_to_string(&out).unwrap(),
        "pre;add 1 2.0 1;add 1 3.5 0;post"
    );
}

#[test]
fn test_module_exporting_main_is_rejected() {
    if !compiler_available() {
        eprintln!("skipping: no C compiler");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.c");
    std::fs::write(&input, "int main(void) { return 0; }\n").unwrap();
    let output = dir.path().join("libprog.so");
    compile_shared(dir.path(), &input, &output);

    let err = ensure_library_shaped(&output.to_string_lossy(), &ModuleConfig::default()).unwrap_err();
    assert!(matches!(err, BindingError::ExportsEntryPoint { ref symbol, .. } if symbol == "main"));

    let library = build_module(dir.path(), "recorder", RECORDER_C);
    assert!(ensure_library_shaped(&library.to_string_lossy(), &ModuleConfig::default()).is_ok());
    assert!(Path::new(&library).exists());
}
