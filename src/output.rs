use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::ExpressionRecord;

/// Write `record` as one JSON document followed by a newline.
pub fn write_json<W: Write>(record: &ExpressionRecord, mut writer: W, pretty: bool) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, record)
    } else {
        serde_json::to_writer(&mut writer, record)
    };
    written.context("serializing record")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Emit to `output` when given, otherwise to stdout.
pub fn emit(record: &ExpressionRecord, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write_json(record, BufWriter::new(file), pretty)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_json(record, BufWriter::new(stdout.lock()), pretty)
                .context("writing to stdout")?;
        }
    }
    Ok(())
}
