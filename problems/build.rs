use std::{
    env,
    error::Error,
    fs::{self, File},
    io::Write,
    path::PathBuf,
    process,
};

struct ProblemDef {
    /// The code that users know this as. This should remain stable
    /// between releases to facilitate consistent documentation.
    code: String,
    /// The internal name that this error is known as. This makes for
    /// easy reading, but we don't promise that this remains consistent
    /// between releases.
    name: String,
    /// A message describing the type of error.
    message: String,
    /// The compilation phase that reports the problem (Syntax, Parse, ...).
    phase: String,
}

fn field<'a>(record: &'a csv::StringRecord, index: usize) -> Result<&'a str, String> {
    record
        .get(index)
        .ok_or_else(|| format!("Record {:?} is not valid at column {}", record, index))
}

fn create_problems() -> Result<(), Box<dyn Error>> {
    // Tell Cargo that if the error definitions change, to rerun this build script.
    println!("cargo:rerun-if-changed=resources/problem-codes.csv");

    let mut src_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    src_path.push("resources");
    src_path.push("problem-codes.csv");

    let src = fs::read_to_string(&src_path)
        .map_err(|e| format!("Unable to read {}: {}", src_path.display(), e))?;

    let mut defs = vec![];
    let mut rdr = csv::Reader::from_reader(src.as_bytes());
    for result in rdr.records() {
        let record = result?;
        defs.push(ProblemDef {
            code: field(&record, 0)?.to_string(),
            name: field(&record, 1)?.to_string(),
            message: field(&record, 2)?.to_string(),
            phase: field(&record, 3)?.to_string(),
        });
    }

    let mut out_path = PathBuf::from(env::var("OUT_DIR")?);
    fs::create_dir_all(out_path.clone())
        .map_err(|e| format!("Unable to create directory 'problems': {}", e))?;

    out_path.push("problems.rs");
    let mut out =
        File::create(out_path).map_err(|e| format!("Unable to create 'problems.rs': {}", e))?;

    out.write_all(b"#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n")?;
    out.write_all(b"pub enum Problem {\n")?;
    for def in &defs {
        out.write_all(format!("    {},\n", def.name).as_bytes())?;
    }
    out.write_all(b"}\n\n")?;

    out.write_all(b"impl Problem {\n")?;
    write_accessor(
        &mut out,
        "code",
        "Returns the code for the particular problem as a string.",
        defs.iter().map(|def| (&def.name, &def.code)),
    )?;
    write_accessor(
        &mut out,
        "message",
        "Returns the constant message for the particular problem.",
        defs.iter().map(|def| (&def.name, &def.message)),
    )?;
    write_accessor(
        &mut out,
        "phase",
        "Returns the compilation phase that reports the problem.",
        defs.iter().map(|def| (&def.name, &def.phase)),
    )?;
    out.write_all(b"}\n")?;

    out.flush()?;

    Ok(())
}

/// Writes a `fn <name>(&self) -> &'static str` that maps each variant to a
/// column of the CSV file.
fn write_accessor<'a>(
    out: &mut File,
    name: &str,
    doc: &str,
    rows: impl Iterator<Item = (&'a String, &'a String)>,
) -> Result<(), Box<dyn Error>> {
    out.write_all(format!("    /// {}\n", doc).as_bytes())?;
    out.write_all(format!("    pub fn {}(&self) -> &'static str {{\n", name).as_bytes())?;
    out.write_all(b"        match self {\n")?;
    for (variant, value) in rows {
        out.write_all(
            format!("            Problem::{} => {:?},\n", variant, value).as_bytes(),
        )?;
    }
    out.write_all(b"        }\n")?;
    out.write_all(b"    }\n\n")?;
    Ok(())
}

fn main() {
    if let Err(err) = create_problems() {
        println!("problem generating problems.rs: {}", err);
        process::exit(1);
    }
}
