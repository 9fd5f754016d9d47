use clap::Args;
use me_tlk::{TlkStringTable, TlkWriter};
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, io::BufReader, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct EncodeArgs {
    /// An input JSON string table
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The TLK file to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl EncodeArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let table: TlkStringTable =
            serde_json::from_reader(BufReader::new(f)).into_diagnostic()?;

        info!(
            "encoding {} male and {} female entries",
            table.male.len(),
            table.female.len()
        );

        let out = if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        };

        TlkWriter::from_table(out, &table)?.finish()?;

        Ok(())
    }
}
