//! Implements the command line behavior.

use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use log::debug;
use std::{
    fs::{self, metadata, read_dir},
    path::{Path, PathBuf},
};

use crate::stages;

/// Checks the specified files and directories.
pub fn check(paths: Vec<PathBuf>, suppress_output: bool) -> Result<(), String> {
    let mut files: Vec<PathBuf> = vec![];
    for path in paths {
        files.append(&mut enumerate_files(&path)?);
    }

    let mut errors = 0;
    for path in &files {
        let source = read_source(path)?;
        if let Err(diagnostics) = stages::check(&source) {
            errors += diagnostics.len();
            handle_diagnostics(&diagnostics, path, &source, suppress_output);
        }
    }

    if errors > 0 {
        return Err(format!("Number of errors: {}", errors));
    }
    Ok(())
}

/// Prints the tokens of the file, one per line.
pub fn tokenize(path: &Path, suppress_output: bool) -> Result<(), String> {
    let source = read_source(path)?;
    let tokens = stages::tokenize(&source).map_err(|diagnostics| {
        handle_diagnostics(&diagnostics, path, &source, suppress_output);
        format!("Number of errors: {}", diagnostics.len())
    })?;

    for token in tokens {
        println!("{}", token);
    }
    Ok(())
}

/// Prints the parsed program, one statement per line.
pub fn echo(path: &Path, suppress_output: bool) -> Result<(), String> {
    let source = read_source(path)?;
    let program = stages::parse(&source).map_err(|diagnostics| {
        handle_diagnostics(&diagnostics, path, &source, suppress_output);
        format!("Number of errors: {}", diagnostics.len())
    })?;

    for statement in program {
        println!("{}", statement);
    }
    Ok(())
}

/// Compiles the file and writes the assembly program to the output path.
///
/// Nothing is written when compilation fails.
pub fn compile(path: &Path, output: &Path, suppress_output: bool) -> Result<(), String> {
    let source = read_source(path)?;
    let lines = stages::compile(&source).map_err(|diagnostics| {
        handle_diagnostics(&diagnostics, path, &source, suppress_output);
        format!("Number of errors: {}", diagnostics.len())
    })?;

    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(output, contents)
        .map_err(|e| format!("Unable to write output {}. {}", output.display(), e))?;

    debug!("Wrote {} lines to {}", lines.len(), output.display());
    Ok(())
}

fn read_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read file {}. {}", path.display(), e))
}

fn enumerate_files(path: &PathBuf) -> Result<Vec<PathBuf>, String> {
    let metadata = metadata(path).map_err(|e| e.to_string())?;
    if metadata.is_dir() {
        let paths = read_dir(path).map_err(|e| e.to_string())?;
        let mut paths: Vec<PathBuf> = paths
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(_) => None,
            })
            .filter(|path| path.is_file())
            .collect();
        paths.sort();
        return Ok(paths);
    }
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    Ok(vec![])
}

fn handle_diagnostics(
    diagnostics: &[whisker_dsl::diagnostic::Diagnostic],
    path: &Path,
    source: &str,
    suppress_output: bool,
) {
    for diagnostic in diagnostics {
        debug!("{}", diagnostic.render(source));
    }

    if suppress_output {
        return;
    }

    let writer = StandardStream::stderr(ColorChoice::Always);
    let config = codespan_reporting::term::Config::default();

    let mut files: SimpleFiles<String, &str> = SimpleFiles::new();
    let file_id = files.add(path.display().to_string(), source);

    for diagnostic in diagnostics {
        let diagnostic = map_diagnostic(diagnostic, file_id);
        let _ = term::emit(&mut writer.lock(), &config, &files, &diagnostic).map_err(|err| {
            println!("Failed writing to terminal: {}", err);
            1usize
        });
    }
}

fn map_diagnostic(
    diagnostic: &whisker_dsl::diagnostic::Diagnostic,
    file_id: usize,
) -> Diagnostic<usize> {
    let description = diagnostic.description();
    let primary = &diagnostic.primary;

    // Line 0 marks a label with no place in the source.
    if primary.position.line == 0 {
        return Diagnostic::error()
            .with_code(diagnostic.code.clone())
            .with_message(description)
            .with_notes(vec![primary.message.clone()]);
    }

    let label = Label::primary(file_id, primary.span.start..primary.span.end)
        .with_message(primary.message.clone());

    Diagnostic::error()
        .with_code(diagnostic.code.clone())
        .with_message(format!("{} [{}]", description, diagnostic.phase))
        .with_labels(vec![label])
}
