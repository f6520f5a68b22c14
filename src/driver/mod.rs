//! Command-line driver: precondition checks, stream lifetimes and the single
//! delegated conversion.
//!
//! The driver moves through
//! `Unvalidated → Validated → StreamsOpen → Converted|Failed → StreamsClosed → Done`.
//! A failed conversion still passes through `StreamsClosed` before the error
//! is handed back, and the driver then stays in `Failed`.

use crate::conversion::{ConversionOptions, EdiToJson, EdiTranscoder};
use crate::error::{ConversionResult, DriverError, DriverResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Input and output locations for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FilePaths {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Input path made absolute for reporting
    pub fn resolved_input(&self) -> PathBuf {
        resolve(&self.input)
    }

    /// Output path made absolute for reporting
    pub fn resolved_output(&self) -> PathBuf {
        resolve(&self.output)
    }
}

fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Driver lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Unvalidated,
    Validated,
    StreamsOpen,
    Converted,
    Failed,
    StreamsClosed,
    Done,
}

/// Runs exactly one conversion of one file pair
#[derive(Debug)]
pub struct Driver {
    paths: FilePaths,
    options: ConversionOptions,
    state: DriverState,
}

impl Driver {
    pub fn new(paths: FilePaths, options: ConversionOptions) -> Self {
        Self {
            paths,
            options,
            state: DriverState::Unvalidated,
        }
    }

    pub fn paths(&self) -> &FilePaths {
        &self.paths
    }

    pub fn options(&self) -> ConversionOptions {
        self.options
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Check that the input can be read and the output can be written.
    ///
    /// Nothing is created or modified by the check.
    pub fn validate(&mut self) -> DriverResult<()> {
        check_input_readable(&self.paths.input)
            .map_err(|_| DriverError::input_not_readable(self.paths.resolved_input()))?;
        check_output_writable(&self.paths.output)
            .map_err(|_| DriverError::output_not_writable(self.paths.resolved_output()))?;
        // truncating the output would destroy the input before it is read
        if is_same_file(&self.paths.input, &self.paths.output) {
            return Err(DriverError::output_not_writable(self.paths.resolved_output()));
        }

        self.transition(DriverState::Validated);
        Ok(())
    }

    /// Convert with the built-in engine
    pub fn run(&mut self) -> DriverResult<()> {
        let engine = EdiToJson::from_options(&self.options);
        self.run_with(&engine)
    }

    /// Validate, open both streams, delegate once, release both streams
    pub fn run_with<T: EdiTranscoder + ?Sized>(&mut self, engine: &T) -> DriverResult<()> {
        self.validate()?;

        tracing::debug!(
            input = %self.paths.input.display(),
            output = %self.paths.output.display(),
            options = %self.options,
            "starting conversion"
        );

        match self.convert_streams(engine) {
            Ok(()) => {
                self.transition(DriverState::Done);
                tracing::info!(
                    output = %self.paths.output.display(),
                    "converted {}",
                    self.paths.input.display()
                );
                Ok(())
            }
            Err(err) => {
                self.transition(DriverState::Failed);
                Err(DriverError::from(err))
            }
        }
    }

    fn convert_streams<T: EdiTranscoder + ?Sized>(&mut self, engine: &T) -> ConversionResult<()> {
        let reader = BufReader::new(File::open(&self.paths.input)?);
        let writer = BufWriter::new(
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.paths.output)?,
        );
        self.transcode(engine, reader, writer)
    }

    /// Delegate once to the engine, then release both streams whatever the outcome
    fn transcode<T, R, W>(&mut self, engine: &T, mut reader: R, mut writer: W) -> ConversionResult<()>
    where
        T: EdiTranscoder + ?Sized,
        R: Read,
        W: Write,
    {
        self.transition(DriverState::StreamsOpen);

        let converted = engine.as_json(&mut reader, &mut writer);
        self.transition(if converted.is_ok() {
            DriverState::Converted
        } else {
            DriverState::Failed
        });

        let released = release_streams(reader, writer);
        self.transition(DriverState::StreamsClosed);

        // the engine's own failure is the more useful report
        converted.and(released)
    }

    fn transition(&mut self, next: DriverState) {
        tracing::debug!(from = ?self.state, to = ?next, "driver state");
        self.state = next;
    }
}

/// Close the input and flush/close the output; both are always attempted
fn release_streams<R, W: Write>(reader: R, mut writer: W) -> ConversionResult<()> {
    drop(reader);
    let flushed = writer.flush();
    drop(writer);
    Ok(flushed?)
}

/// Input must be an existing regular file that opens for reading
pub fn check_input_readable(path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    File::open(path).map(drop)
}

/// Output must be a writable regular file or a new file in a writable directory
pub fn check_output_writable(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() || path.to_string_lossy().ends_with(std::path::is_separator) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "output path does not name a file",
        ));
    }

    match fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "not a regular file",
                ));
            }
            // no truncate: the check must leave existing content alone
            OpenOptions::new().write(true).open(path).map(drop)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            if !fs::metadata(parent)?.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "parent is not a directory",
                ));
            }
            check_directory_writable(parent)
        }
        Err(err) => Err(err),
    }
}

/// Creating an entry needs write and search permission on the directory
#[cfg(unix)]
fn check_directory_writable(dir: &Path) -> io::Result<()> {
    use nix::unistd::{access, AccessFlags};

    access(dir, AccessFlags::W_OK | AccessFlags::X_OK).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn check_directory_writable(dir: &Path) -> io::Result<()> {
    if fs::metadata(dir)?.permissions().readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "directory is read-only",
        ));
    }
    Ok(())
}

/// Whether both paths name one existing file, links included
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
