// src/output.rs
use crate::types::{HostscopeError, RecordKind, RecordOutcome};
use std::collections::BTreeSet;
use std::io::Write;

pub const DOMAIN_PROMPT: &str = "Enter domain or URL: ";
pub const OPEN_PROMPT: &str = "\nOpen these hostnames (https://<host>) in new browser tabs? [y/N]: ";

fn io_err(e: std::io::Error) -> HostscopeError {
    HostscopeError::OutputError(e.to_string())
}

/// Console report writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputManager;

impl OutputManager {
    pub fn new() -> Self {
        Self
    }

    /// Write a prompt without a newline and flush so it shows before input is read.
    pub fn write_prompt<W: Write>(&self, writer: &mut W, prompt: &str) -> Result<(), HostscopeError> {
        write!(writer, "{}", prompt).map_err(io_err)?;
        writer.flush().map_err(io_err)
    }

    pub fn write_no_domain<W: Write>(&self, writer: &mut W) -> Result<(), HostscopeError> {
        writeln!(writer, "No domain parsed.").map_err(io_err)
    }

    pub fn write_records_header<W: Write>(&self, writer: &mut W, domain: &str) -> Result<(), HostscopeError> {
        writeln!(writer, "\nDNS records for: {}\n", domain).map_err(io_err)?;
        writer.flush().map_err(io_err)
    }

    pub fn write_record<W: Write>(
        &self,
        writer: &mut W,
        kind: RecordKind,
        outcome: &RecordOutcome,
    ) -> Result<(), HostscopeError> {
        writeln!(writer, "{}:", kind).map_err(io_err)?;

        let lines = outcome.display_lines(kind);
        if lines.is_empty() {
            writeln!(writer, "  (none)").map_err(io_err)?;
        } else {
            for line in lines {
                writeln!(writer, "   {}", line).map_err(io_err)?;
            }
        }

        // Records trickle in one query at a time
        writer.flush().map_err(io_err)
    }

    pub fn write_records_footer<W: Write>(&self, writer: &mut W) -> Result<(), HostscopeError> {
        writeln!(writer).map_err(io_err)
    }

    pub fn write_crtsh_start<W: Write>(&self, writer: &mut W) -> Result<(), HostscopeError> {
        writeln!(writer, "Querying crt.sh for certificate hostnames (passive)...").map_err(io_err)?;
        writer.flush().map_err(io_err)
    }

    pub fn write_hostnames<W: Write>(&self, writer: &mut W, names: &BTreeSet<String>) -> Result<(), HostscopeError> {
        if names.is_empty() {
            return writeln!(writer, "\ncrt.sh returned no names or the query failed/was rate-limited.").map_err(io_err);
        }

        writeln!(writer, "\ncrt.sh results ({} unique names):", names.len()).map_err(io_err)?;
        for name in names {
            writeln!(writer, "  {}", name).map_err(io_err)?;
        }
        Ok(())
    }

    pub fn write_open_result<W: Write>(&self, writer: &mut W, opened: bool) -> Result<(), HostscopeError> {
        if opened {
            writeln!(writer, "Opened host pages in the default browser.").map_err(io_err)
        } else {
            writeln!(writer, "Skipped opening host pages.").map_err(io_err)
        }
    }
}
