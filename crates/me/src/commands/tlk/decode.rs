use clap::Args;
use me_tlk::TlkDocument;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct DecodeArgs {
    /// An input TLK file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The JSON file to write the decoded strings to
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecodeArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let tlk = TlkDocument::new(&mut f)?;
        let table = tlk.decode_all();

        info!(
            "decoded {} male and {} female entries",
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

        serde_json::to_writer_pretty(out, &table).into_diagnostic()?;

        Ok(())
    }
}
