//! Comment splicing — the per-file pipeline.
//!
//! Consumes the boundary scanner's event stream and appends to the output
//! file in scan order: pass-through lines verbatim, function buffers behind
//! their resolved comment block. The round-trip verifier then confirms the
//! output differs from the input only in comments and whitespace.

use crate::cache;
use crate::comment;
use crate::context::RunContext;
use crate::extract;
use crate::scanner::{BoundaryScanner, ScanEvent};
use crate::verify;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Outcome of one file's splice run.
#[derive(Debug)]
pub struct SpliceReport {
    /// Function buffers emitted by the scanner.
    pub functions: usize,
    /// Buffers that resolved to a stored comment.
    pub commented: usize,
    /// Store file names that could not be resolved, in scan order.
    pub missing: Vec<String>,
    /// Lines of an unterminated trailing buffer, dropped at end of input.
    pub dropped: usize,
    /// Round-trip verification outcome.
    pub verified: bool,
}

/// Splice stored comments into one source file.
///
/// The output file is truncated once, up front; everything after that is a
/// strictly ordered append. A crash mid-run leaves a partial file behind,
/// with no rollback.
pub fn splice_file(ctx: &RunContext, source_path: &Path, output_path: &Path) -> Result<SpliceReport> {
    let source = fs::read_to_string(source_path)
        .with_context(|| format!("failed to read {}", source_path.display()))?;

    let spans = extract::function_spans(&source)?;
    let mut scanner = BoundaryScanner::new(extract::signatures(&spans));

    let mut out = File::create(output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    let mut report = SpliceReport {
        functions: 0,
        commented: 0,
        missing: Vec::new(),
        dropped: 0,
        verified: false,
    };

    for line in source.lines() {
        match scanner.push(line.to_string()) {
            Some(ScanEvent::Line(line)) => {
                writeln!(out, "{line}")
                    .with_context(|| format!("failed to write {}", output_path.display()))?;
            }
            Some(ScanEvent::Function(buffer)) => {
                report.functions += 1;
                write_function(ctx, &mut out, &buffer, &mut report)
                    .with_context(|| format!("failed to write {}", output_path.display()))?;
            }
            None => {}
        }
    }

    if let Some(leftover) = scanner.finish() {
        report.dropped = leftover.len();
        eprintln!(
            "warning: {}: function body still open at end of file, {} line(s) dropped",
            ctx.file_name,
            leftover.len()
        );
    }

    let generated = fs::read_to_string(output_path)
        .with_context(|| format!("failed to read back {}", output_path.display()))?;
    report.verified = verify::round_trip(&source, &generated);

    Ok(report)
}

/// Append one function buffer, preceded by its comment block when the store
/// has one.
fn write_function(
    ctx: &RunContext,
    out: &mut File,
    buffer: &[String],
    report: &mut SpliceReport,
) -> std::io::Result<()> {
    let key = cache::function_key(&ctx.project, &ctx.file_name, &buffer.join("\n"));
    if ctx.verbose {
        println!("function of {} line(s) -> {key}", buffer.len());
    }
    match cache::resolve(&ctx.comments_dir, &key) {
        Some(raw) => {
            report.commented += 1;
            write!(out, "{}", comment::normalize(&raw))?;
        }
        None => {
            let name = cache::comment_file_name(&key);
            eprintln!("warning: {}: no stored comment {}", ctx.file_name, name);
            report.missing.push(name);
        }
    }
    for line in buffer {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(source: &str, stored: &[(&str, &str)]) -> (SpliceReport, String) {
        let dir = TempDir::new().unwrap();
        let source_path = dir.path().join("input.c");
        let output_path = dir.path().join("output.c");
        fs::write(&source_path, source).unwrap();

        let comments_dir = dir.path().join("functions");
        for (function_text, raw_comment) in stored {
            let key = cache::function_key("Linux", "input.c", function_text);
            cache::store(&comments_dir, &cache::comment_file_name(&key), raw_comment).unwrap();
        }

        let ctx = RunContext {
            project: "Linux".to_string(),
            file_name: "input.c".to_string(),
            comments_dir,
            verbose: false,
        };
        let report = splice_file(&ctx, &source_path, &output_path).unwrap();
        let output = fs::read_to_string(&output_path).unwrap();
        (report, output)
    }

    #[test]
    fn splices_stored_comment_above_function() {
        let function = "void f(void)\n{\n    return;\n}";
        let source = "void f(void)\n{\n    return;\n}\n";
        let (report, output) = run(source, &[(function, "* f - does nothing\n*/")]);
        assert_eq!(
            output,
            "/**\n* f - does nothing\n*/\nvoid f(void)\n{\n    return;\n}\n"
        );
        assert_eq!(report.functions, 1);
        assert_eq!(report.commented, 1);
        assert!(report.missing.is_empty());
        assert!(report.verified);
    }

    #[test]
    fn missing_comment_emits_bare_function() {
        let source = "void f(void)\n{\n    return;\n}\n";
        let (report, output) = run(source, &[]);
        assert_eq!(output, source);
        assert_eq!(report.functions, 1);
        assert_eq!(report.commented, 0);
        assert_eq!(report.missing.len(), 1);
        assert!(report.missing[0].ends_with("-ai.c"));
        assert!(report.verified);
    }

    #[test]
    fn lines_outside_functions_pass_through_in_order() {
        let source = "#include <stdio.h>\n\nint x = 1;\n\nint get(void)\n{\n\treturn x;\n}\n\nint y = 2;\n";
        let (report, output) = run(source, &[]);
        assert_eq!(output, source);
        assert_eq!(report.functions, 1);
        assert!(report.verified);
    }

    #[test]
    fn round_trip_holds_with_every_comment_resolved() {
        let f1 = "int get(void)\n{\n\treturn 1;\n}";
        let f2 = "int put(int v)\n{\n\treturn v;\n}";
        let source = "int get(void)\n{\n\treturn 1;\n}\n\nint put(int v)\n{\n\treturn v;\n}\n";
        let (report, output) = run(
            source,
            &[
                (f1, "/**\n* get - fetch the value\n*/\n"),
                (f2, "* put - store the value"),
            ],
        );
        assert_eq!(report.commented, 2);
        assert!(report.verified);
        assert!(output.contains("* get - fetch the value"));
        assert!(output.contains("* put - store the value"));
    }

    #[test]
    fn unterminated_function_is_dropped_with_diagnostic() {
        // The first definition parses and supplies the signature; the second
        // occurrence opens a buffer that never closes.
        let source = "void ping(void)\n{\n\treturn;\n}\n\nvoid ping(void)\n{\n\treturn;\n";
        let (report, output) = run(source, &[]);
        assert_eq!(output, "void ping(void)\n{\n\treturn;\n}\n\n");
        assert_eq!(report.functions, 1);
        assert_eq!(report.dropped, 3);
        assert!(!report.verified);
    }

    #[test]
    fn comment_smuggling_code_fails_verification() {
        let function = "void f(void)\n{\n    return;\n}";
        let source = "void f(void)\n{\n    return;\n}\n";
        let (report, _) = run(source, &[(function, "* note */ stray\n")]);
        assert_eq!(report.commented, 1);
        assert!(!report.verified);
    }
}
