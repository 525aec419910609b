//! Path list writers for files and standard output

use crate::output::traits::OutputHandler;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Writes the path list to a file, replacing any previous content
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for FileOutput {
    fn write_paths(&mut self, paths: &[String]) -> io::Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_lines(&mut writer, paths)?;
        writer.flush()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes the path list to any writer, typically stdout
#[derive(Debug)]
pub struct WriterOutput<W: Write> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputHandler for WriterOutput<W> {
    fn write_paths(&mut self, paths: &[String]) -> io::Result<()> {
        write_lines(&mut self.writer, paths)?;
        self.writer.flush()
    }

    fn describe(&self) -> String {
        "stream".to_string()
    }
}

fn write_lines<W: Write>(writer: &mut W, paths: &[String]) -> io::Result<()> {
    for path in paths {
        writeln!(writer, "{}", path)?;
    }
    Ok(())
}
